//! Open-time permission arbitration.

use log::warn;

use crate::{Error, OpenMode, Permission, Result};

/// Decides whether `requested` may open a device guarded by `permission`.
///
/// Read-only devices accept pure reads and write-only devices accept pure
/// writes. Read-write devices accept anything.
pub fn check(permission: Permission, requested: OpenMode) -> Result<()> {
    let reads = requested.contains(OpenMode::READ);
    let writes = requested.contains(OpenMode::WRITE);

    let granted = match permission {
        Permission::ReadWrite => true,
        Permission::ReadOnly => reads && !writes,
        Permission::WriteOnly => writes && !reads,
    };

    if granted {
        Ok(())
    } else {
        warn!("open denied: {:?} device, requested {:?}", permission, requested);
        Err(Error::PermissionDenied)
    }
}
