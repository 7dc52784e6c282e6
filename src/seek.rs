//! Cursor positioning against a device's capacity.

use log::{debug, warn};

use crate::{Error, Result};

/// Reference point of a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Whence {
    /// From the start of the region.
    Set = 0,
    /// From the current cursor.
    Cur = 1,
    /// From the end of the region.
    End = 2,
}

impl Whence {
    /// 0=Set, 1=Cur, 2=End
    pub fn from_raw(value: usize) -> Option<Self> {
        match value {
            0 => Some(Whence::Set),
            1 => Some(Whence::Cur),
            2 => Some(Whence::End),
            _ => None,
        }
    }
}

/// Computes the cursor a seek would produce.
///
/// The result is only valid if it lands in `0..=capacity`; anything else,
/// including arithmetic overflow, is `InvalidArgument`. The caller owns the
/// cursor and stores the returned value.
pub fn seek(cursor: usize, capacity: usize, offset: i64, whence: Whence) -> Result<usize> {
    debug!("seek from {} by {} ({:?}), capacity {}", cursor, offset, whence, capacity);

    let base = match whence {
        Whence::Set => 0,
        Whence::Cur => cursor,
        Whence::End => capacity,
    };
    let candidate = i64::try_from(base)
        .ok()
        .and_then(|base| base.checked_add(offset))
        .and_then(|pos| usize::try_from(pos).ok());

    match candidate {
        Some(pos) if pos <= capacity => {
            debug!("cursor moved to {}", pos);
            Ok(pos)
        }
        _ => {
            warn!("seek rejected: {} {:?} {} outside 0..={}", base, whence, offset, capacity);
            Err(Error::InvalidArgument)
        }
    }
}

/// [`seek`] with a raw whence value as handed over by the host.
pub fn seek_raw(cursor: usize, capacity: usize, offset: i64, whence: usize) -> Result<usize> {
    let whence = Whence::from_raw(whence).ok_or(Error::InvalidArgument)?;
    seek(cursor, capacity, offset, whence)
}
