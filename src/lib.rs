//! pcdev exposes fixed-size in-memory byte regions as character devices with
//! POSIX-like file semantics: open, seek, read, write and release.
//! Each device carries an access policy (read-only, write-only, read-write)
//! that is checked once, when a handle is opened.
//!
//! pcdev's layers (from bottom to top):
//! 1. Host: device numbers, classes, dispatch and nodes.         | User implemented (environment-specific)
//! 2. Storage: fixed-capacity regions owned by device records.   | Crate implemented
//! 3. Access: permission check of the requested open mode.       | Crate implemented
//! 4. Seek/Transfer: cursor positioning and bounded copies.      | Crate implemented
//! 5. Session: one cursor per open handle.                       | Crate implemented
//! 6. Registry: bring-up, lookup by device number, teardown.     | Crate implemented
//!
//! Nothing here installs a logger; records go through the `log` facade.

#![no_std]

extern crate alloc;

pub mod config;
pub mod devno;
mod error;
mod host;
mod structs;
pub mod access;
pub mod seek;
pub mod transfer;
mod session;
mod registry;

pub use config::{DeviceConfig, RegistryConfig};
pub use devno::IdentityRange;
pub use error::{Error, Result};
pub use host::{ClassHandle, Host};
pub use registry::Registry;
pub use seek::Whence;
pub use session::Session;
pub use structs::*;
