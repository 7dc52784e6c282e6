use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Write;

use log::{debug, error, info};

use crate::config::{DeviceConfig, RegistryConfig};
use crate::devno::{major, minor, IdentityRange};
use crate::host::ClassHandle;
use crate::{access, DeviceRecord, Error, Host, OpenMode, Result, Session};

/// A host resource acquired during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Region(IdentityRange),
    Class(ClassHandle),
    Attached(u64),
    Exposed(ClassHandle, u64),
}

/// Owns the device table and every host resource backing it.
///
/// Resources are recorded as they are acquired and released in exactly the
/// reverse order, both when initialization fails halfway and on teardown.
pub struct Registry<H: Host> {
    host: Arc<H>,
    devices: Vec<Arc<DeviceRecord>>,
    range: IdentityRange,
    class: ClassHandle,
    steps: Vec<Step>,
}

impl<H: Host> Registry<H> {
    pub fn initialize(host: Arc<H>, table: &[DeviceConfig]) -> Result<Self> {
        Self::initialize_with(host, table, RegistryConfig::default())
    }

    pub fn initialize_with(
        host: Arc<H>,
        table: &[DeviceConfig],
        config: RegistryConfig,
    ) -> Result<Self> {
        validate(table)?;

        let mut steps = Vec::with_capacity(2 + 2 * table.len());
        match bring_up(&*host, table, &config, &mut steps) {
            Ok((range, class)) => {
                let devices = table.iter().map(|c| Arc::new(DeviceRecord::new(c))).collect();
                info!("{} devices initialized", table.len());
                Ok(Self {
                    host,
                    devices,
                    range,
                    class,
                    steps,
                })
            }
            Err(e) => {
                error!("initialization failed: {}", e);
                unwind(&*host, &mut steps);
                Err(e)
            }
        }
    }

    /// Maps a device number onto its record.
    pub fn resolve(&self, dev: u64) -> Result<&Arc<DeviceRecord>> {
        self.range
            .index_of(dev)
            .and_then(|index| self.devices.get(index))
            .ok_or(Error::NotFound)
    }

    /// Opens a session on `dev` if its policy admits `mode`.
    pub fn open(&self, dev: u64, mode: OpenMode) -> Result<Session<H>> {
        debug!("open {}:{} with {:?}", major(dev), minor(dev), mode);
        let device = self.resolve(dev)?;
        access::check(device.permission, mode)?;
        Ok(Session::new(Arc::clone(&self.host), Arc::clone(device), mode))
    }

    /// Releases every host resource. Equivalent to dropping the registry.
    pub fn teardown(mut self) {
        unwind(&*self.host, &mut self.steps);
        info!("all devices torn down");
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.devices.iter().map(|d| &**d)
    }

    pub fn device(&self, index: usize) -> Option<&DeviceRecord> {
        self.devices.get(index).map(|d| &**d)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn range(&self) -> IdentityRange {
        self.range
    }

    pub fn class(&self) -> ClassHandle {
        self.class
    }

    /// Device number of the device at `index`.
    pub fn dev_of(&self, index: usize) -> Option<u64> {
        self.range.nth(index).filter(|_| index < self.devices.len())
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} devices, class {:?}", self.devices.len(), self.class);
        for device in &self.devices {
            if let Some(dev) = self.range.nth(device.index) {
                let _ = writeln!(
                    out,
                    "  {}:{} {:<14} {:?} {} bytes",
                    major(dev),
                    minor(dev),
                    device.serial_number,
                    device.permission,
                    device.capacity(),
                );
            }
        }
        out
    }
}

impl<H: Host> Drop for Registry<H> {
    fn drop(&mut self) {
        unwind(&*self.host, &mut self.steps);
    }
}

/// Every row must sit at the position its index names and have storage.
fn validate(table: &[DeviceConfig]) -> Result<()> {
    if table.is_empty() || table.len() > u32::MAX as usize {
        return Err(Error::InvalidConfig);
    }
    for (position, config) in table.iter().enumerate() {
        if config.index != position || config.capacity == 0 {
            error!("bad table row {}: index {}, {} bytes", position, config.index, config.capacity);
            return Err(Error::InvalidConfig);
        }
    }
    Ok(())
}

/// Acquires host resources in order, pushing each onto `steps` once held.
fn bring_up(
    host: &impl Host,
    table: &[DeviceConfig],
    config: &RegistryConfig,
    steps: &mut Vec<Step>,
) -> Result<(IdentityRange, ClassHandle)> {
    let range = host
        .alloc_region(table.len() as u32, config.region_name)
        .map_err(|_| Error::AllocationFailed)?;
    steps.push(Step::Region(range));

    let class = host
        .create_class(config.class_name)
        .map_err(|_| Error::ClassCreationFailed)?;
    steps.push(Step::Class(class));

    for index in 0..table.len() {
        let dev = range.nth(index).ok_or(Error::RegistrationFailed)?;
        info!("device number <major>:<minor> = {}:{}", major(dev), minor(dev));
        host.attach(dev).map_err(|_| Error::RegistrationFailed)?;
        steps.push(Step::Attached(dev));
    }

    for index in 0..table.len() {
        let dev = range.nth(index).ok_or(Error::ExposureFailed)?;
        let name = format!("{}-{}", config.node_prefix, index + 1);
        host.expose(class, dev, &name).map_err(|_| Error::ExposureFailed)?;
        steps.push(Step::Exposed(class, dev));
    }

    Ok((range, class))
}

/// Releases recorded resources, most recent first. Leaves `steps` empty.
fn unwind(host: &impl Host, steps: &mut Vec<Step>) {
    while let Some(step) = steps.pop() {
        debug!("undo {:?}", step);
        match step {
            Step::Exposed(class, dev) => host.hide(class, dev),
            Step::Attached(dev) => host.detach(dev),
            Step::Class(class) => host.destroy_class(class),
            Step::Region(range) => host.release_region(range),
        }
    }
}
