use alloc::boxed::Box;
use alloc::vec;

use spin::Mutex;

use crate::config::DeviceConfig;
use crate::Error;
use crate::Result;

/// Access policy a device enforces at open time.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ReadOnly = 0x01,
    WriteOnly = 0x10,
    ReadWrite = 0x11,
}

impl Permission {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(Permission::ReadOnly),
            0x10 => Some(Permission::WriteOnly),
            0x11 => Some(Permission::ReadWrite),
            _ => None,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8
    }
}

bitflags::bitflags! {
    /// Access requested by an opener.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenMode: u32 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
    }
}

impl OpenMode {
    const O_ACCMODE: u32 = 0o3;
    const O_RDONLY: u32 = 0o0;
    const O_WRONLY: u32 = 0o1;
    const O_RDWR: u32 = 0o2;

    /// Derives the mode from POSIX open flags (only the access bits are looked at).
    pub fn from_accmode(flags: u32) -> Result<Self> {
        match flags & Self::O_ACCMODE {
            Self::O_RDONLY => Ok(OpenMode::READ),
            Self::O_WRONLY => Ok(OpenMode::WRITE),
            Self::O_RDWR => Ok(OpenMode::READ | OpenMode::WRITE),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Fixed-capacity backing store of one device.
///
/// The byte buffer is allocated once and never resized. Access goes through
/// a lock held only for a plain memory copy, never across a host call.
#[derive(Debug)]
pub struct StorageRegion {
    bytes: Mutex<Box<[u8]>>,
    capacity: usize,
}

impl StorageRegion {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Mutex::new(vec![0u8; capacity].into_boxed_slice()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copies `start..start + dst.len()` out of the region.
    /// The range must lie within the region.
    pub(crate) fn copy_out(&self, start: usize, dst: &mut [u8]) {
        let bytes = self.bytes.lock();
        dst.copy_from_slice(&bytes[start..start + dst.len()]);
    }

    /// Copies `src` into the region at `start`.
    /// The range must lie within the region.
    pub(crate) fn copy_in(&self, start: usize, src: &[u8]) {
        let mut bytes = self.bytes.lock();
        bytes[start..start + src.len()].copy_from_slice(src);
    }
}

/// One addressable device: its storage, policy and identity.
#[derive(Debug)]
pub struct DeviceRecord {
    pub region: StorageRegion,
    pub serial_number: &'static str,
    pub permission: Permission,
    pub index: usize,
}

impl DeviceRecord {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            region: StorageRegion::new(config.capacity),
            serial_number: config.serial_number,
            permission: config.permission,
            index: config.index,
        }
    }

    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }
}
