//! Per-open state and the file operations a host routes to a device.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::seek::{self, Whence};
use crate::{transfer, DeviceRecord, Host, OpenMode, Result};

/// An open handle on one device.
///
/// Every session owns its own cursor. Sessions on the same device share the
/// storage, so writes through one are visible to reads through another.
/// Dropping the session or calling [`release`](Self::release) closes it.
pub struct Session<H: Host> {
    host: Arc<H>,
    device: Arc<DeviceRecord>,
    mode: OpenMode,
    cursor: usize,
}

impl<H: Host> Session<H> {
    pub(crate) fn new(host: Arc<H>, device: Arc<DeviceRecord>, mode: OpenMode) -> Self {
        Self {
            host,
            device,
            mode,
            cursor: 0,
        }
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let (count, cursor) = transfer::read(&*self.host, &self.device.region, self.cursor, buf)?;
        self.cursor = cursor;
        Ok(count)
    }

    /// Reads up to `max_len` bytes into a fresh buffer.
    pub fn read_to_vec(&mut self, max_len: usize) -> Result<Vec<u8>> {
        let len = max_len.min(self.device.capacity().saturating_sub(self.cursor));
        let mut buf = vec![0u8; len];
        let count = self.read(&mut buf)?;
        buf.truncate(count);
        Ok(buf)
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let (count, cursor) = transfer::write(&*self.host, &self.device.region, self.cursor, buf)?;
        self.cursor = cursor;
        Ok(count)
    }

    /// Moves the cursor and returns its new value.
    /// A rejected seek leaves the cursor where it was.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<usize> {
        self.cursor = seek::seek(self.cursor, self.device.capacity(), offset, whence)?;
        Ok(self.cursor)
    }

    pub fn seek_raw(&mut self, offset: i64, whence: usize) -> Result<usize> {
        self.cursor = seek::seek_raw(self.cursor, self.device.capacity(), offset, whence)?;
        Ok(self.cursor)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn device(&self) -> &DeviceRecord {
        &self.device
    }

    pub fn release(self) {}
}

impl<H: Host> Drop for Session<H> {
    fn drop(&mut self) {
        debug!("released device {} at position {}", self.device.index, self.cursor);
    }
}
