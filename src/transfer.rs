//! Bounded copies between a device's storage and the caller.

use alloc::vec;

use log::debug;

use crate::{Error, Host, Result, StorageRegion};

/// Reads from `region` at `cursor` into `buffer`.
/// At most `capacity - cursor` bytes are read; reading at or past the end
/// yields 0 bytes rather than an error.
/// Returns the number of bytes read and the advanced cursor. On a boundary
/// fault the cursor is reported unchanged through the error.
pub fn read(
    host: &impl Host,
    region: &StorageRegion,
    cursor: usize,
    buffer: &mut [u8],
) -> Result<(usize, usize)> {
    debug!("read request of {} bytes at {}", buffer.len(), cursor);

    let count = buffer.len().min(region.capacity().saturating_sub(cursor));
    if count == 0 {
        return Ok((0, cursor));
    }

    let mut bounce = vec![0u8; count];
    region.copy_out(cursor, &mut bounce);
    host.copy_to_user(&mut buffer[..count], &bounce).map_err(|_| Error::TransferFault)?;

    let cursor = cursor + count;
    debug!("read {} bytes, cursor now {}", count, cursor);
    Ok((count, cursor))
}

/// Writes `buffer` into `region` at `cursor`.
/// Input beyond `capacity - cursor` is dropped. If nothing fits, the write
/// fails with `OutOfSpace` and no bytes are copied. A boundary fault leaves
/// both the region and the cursor unchanged.
/// Returns the number of bytes written and the advanced cursor.
pub fn write(
    host: &impl Host,
    region: &StorageRegion,
    cursor: usize,
    buffer: &[u8],
) -> Result<(usize, usize)> {
    debug!("write request of {} bytes at {}", buffer.len(), cursor);

    let count = buffer.len().min(region.capacity().saturating_sub(cursor));
    if count == 0 {
        return Err(Error::OutOfSpace);
    }

    // Staged so a faulting copy leaves the region untouched.
    let mut bounce = vec![0u8; count];
    host.copy_from_user(&mut bounce, &buffer[..count]).map_err(|_| Error::TransferFault)?;
    region.copy_in(cursor, &bounce);

    let cursor = cursor + count;
    debug!("wrote {} bytes, cursor now {}", count, cursor);
    Ok((count, cursor))
}
