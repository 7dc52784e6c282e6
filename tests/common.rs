//! Common utilities for tests

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pcdev::devno::makedev;
use pcdev::{ClassHandle, Error, Host, IdentityRange};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

pub const TEST_MAJOR: u32 = 240;

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr) => {
        println!("{}[test] {}{}", crate::common::ORANGE, $msg, crate::common::RESET)
    };
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every host call the registry makes, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AllocRegion(u32, String),
    ReleaseRegion(IdentityRange),
    CreateClass(String),
    DestroyClass(ClassHandle),
    Attach(u64),
    Detach(u64),
    Expose(u64, String),
    Hide(u64),
}

/// In-memory host that records calls and fails on request.
#[derive(Default)]
pub struct MockHost {
    calls: Mutex<Vec<Call>>,
    pub fail_alloc: AtomicBool,
    pub fail_class: AtomicBool,
    /// Fail the n-th attach (0 based).
    pub fail_attach_at: Mutex<Option<usize>>,
    /// Fail the n-th expose (0 based).
    pub fail_expose_at: Mutex<Option<usize>>,
    pub fault_copies: AtomicBool,
    /// First minor handed out by `alloc_region`.
    pub base_minor: u32,
    attaches: AtomicUsize,
    exposes: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_attach(n: usize) -> Self {
        let host = Self::new();
        *host.fail_attach_at.lock().unwrap() = Some(n);
        host
    }

    pub fn failing_expose(n: usize) -> Self {
        let host = Self::new();
        *host.fail_expose_at.lock().unwrap() = Some(n);
        host
    }

    pub fn with_base_minor(base_minor: u32) -> Self {
        Self {
            base_minor,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn dev(minor: u32) -> u64 {
        makedev(TEST_MAJOR, minor)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Host for MockHost {
    fn alloc_region(&self, count: u32, name: &str) -> Result<IdentityRange, Error> {
        self.record(Call::AllocRegion(count, name.to_string()));
        if self.fail_alloc.load(Ordering::SeqCst) {
            return Err(Error::AllocationFailed);
        }
        Ok(IdentityRange::new(makedev(TEST_MAJOR, self.base_minor), count))
    }

    fn release_region(&self, range: IdentityRange) {
        self.record(Call::ReleaseRegion(range));
    }

    fn create_class(&self, name: &str) -> Result<ClassHandle, Error> {
        self.record(Call::CreateClass(name.to_string()));
        if self.fail_class.load(Ordering::SeqCst) {
            return Err(Error::ClassCreationFailed);
        }
        Ok(ClassHandle(7))
    }

    fn destroy_class(&self, class: ClassHandle) {
        self.record(Call::DestroyClass(class));
    }

    fn attach(&self, dev: u64) -> Result<(), Error> {
        let n = self.attaches.fetch_add(1, Ordering::SeqCst);
        if *self.fail_attach_at.lock().unwrap() == Some(n) {
            return Err(Error::RegistrationFailed);
        }
        self.record(Call::Attach(dev));
        Ok(())
    }

    fn detach(&self, dev: u64) {
        self.record(Call::Detach(dev));
    }

    fn expose(&self, _class: ClassHandle, dev: u64, name: &str) -> Result<(), Error> {
        let n = self.exposes.fetch_add(1, Ordering::SeqCst);
        if *self.fail_expose_at.lock().unwrap() == Some(n) {
            return Err(Error::ExposureFailed);
        }
        self.record(Call::Expose(dev, name.to_string()));
        Ok(())
    }

    fn hide(&self, _class: ClassHandle, dev: u64) {
        self.record(Call::Hide(dev));
    }

    fn copy_to_user(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        if self.fault_copies.load(Ordering::SeqCst) {
            return Err(Error::TransferFault);
        }
        dst.copy_from_slice(src);
        Ok(())
    }

    fn copy_from_user(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        if self.fault_copies.load(Ordering::SeqCst) {
            return Err(Error::TransferFault);
        }
        dst.copy_from_slice(src);
        Ok(())
    }
}
