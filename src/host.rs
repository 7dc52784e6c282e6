use crate::devno::IdentityRange;
use crate::error::Error;

/// Opaque handle for a device class created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle(pub usize);

/// Services the registry consumes from the environment that dispatches
/// file operations to it.
///
/// Acquisition methods may fail; the registry maps any failure onto the
/// error of the stage that was running. Release methods have no failure path
/// and are always called during unwinding, in reverse order of acquisition.
pub trait Host: Send + Sync {
    /// Reserves `count` consecutive device numbers.
    fn alloc_region(&self, count: u32, name: &str) -> Result<IdentityRange, Error>;

    /// Returns a range obtained from `alloc_region`.
    fn release_region(&self, range: IdentityRange);

    fn create_class(&self, name: &str) -> Result<ClassHandle, Error>;

    fn destroy_class(&self, class: ClassHandle);

    /// Routes file operations on `dev` to the registry.
    fn attach(&self, dev: u64) -> Result<(), Error>;

    fn detach(&self, dev: u64);

    /// Makes `dev` visible under `name` inside `class`.
    fn expose(&self, class: ClassHandle, dev: u64, name: &str) -> Result<(), Error>;

    fn hide(&self, class: ClassHandle, dev: u64);

    /// Copies device bytes out to the caller.
    /// `dst.len()` always equals `src.len()`.
    fn copy_to_user(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Copies caller bytes into the device.
    /// `dst.len()` always equals `src.len()`.
    fn copy_from_user(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        dst.copy_from_slice(src);
        Ok(())
    }
}
