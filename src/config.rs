use crate::Permission;

pub const MEM_SIZE_PCD1: usize = 1024;
pub const MEM_SIZE_PCD2: usize = 512;
pub const MEM_SIZE_PCD3: usize = 1024;
pub const MEM_SIZE_PCD4: usize = 512;

pub const NO_OF_DEVICES: usize = 4;

pub const REGION_NAME: &str = "pcd_devices"; // Name handed to the identity-range allocator
pub const CLASS_NAME: &str = "pcd_class";
pub const NODE_PREFIX: &str = "pcd"; // Nodes are exposed as "<prefix>-<index + 1>"

/// One row of a static device table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    pub capacity: usize,
    pub serial_number: &'static str,
    pub permission: Permission,
    pub index: usize,
}

impl DeviceConfig {
    pub const fn new(
        capacity: usize,
        serial_number: &'static str,
        permission: Permission,
        index: usize,
    ) -> Self {
        Self {
            capacity,
            serial_number,
            permission,
            index,
        }
    }
}

/// The four-device layout. Every index is distinct, so the last device is reachable.
pub const REFERENCE_TABLE: [DeviceConfig; NO_OF_DEVICES] = [
    DeviceConfig::new(MEM_SIZE_PCD1, "ABHI1995KNIT", Permission::ReadOnly, 0),
    DeviceConfig::new(MEM_SIZE_PCD2, "CHAU1995KNIT", Permission::WriteOnly, 1),
    DeviceConfig::new(MEM_SIZE_PCD3, "HAN1995KNIT", Permission::ReadWrite, 2),
    DeviceConfig::new(MEM_SIZE_PCD4, "BHA1995KNIT", Permission::ReadWrite, 3),
];

/// A lone 512 byte read-write device.
///
/// Its node is exposed as `pcd-1`, not the bare `pcd` of a standalone
/// single-device driver. A host that needs the bare name can map it in
/// [`Host::expose`](crate::Host::expose).
pub const SINGLE_DEVICE_TABLE: [DeviceConfig; 1] = [
    DeviceConfig::new(512, "PCD0000", Permission::ReadWrite, 0),
];

/// Names the registry hands to the host while bringing devices up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub region_name: &'static str,
    pub class_name: &'static str,
    pub node_prefix: &'static str,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            region_name: REGION_NAME,
            class_name: CLASS_NAME,
            node_prefix: NODE_PREFIX,
        }
    }
}
