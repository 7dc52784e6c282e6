//! Device number encoding.
//!
//! Identity tokens use the Linux `dev_t` layout:
//! `(minor & 0xff) | ((major & 0xfff) << 8) | ((minor & !0xff) << 12) | ((major & !0xfff) << 32)`.

/// Builds a device number from `major` and `minor`.
#[inline]
pub const fn makedev(major: u32, minor: u32) -> u64 {
    let major = major as u64;
    let minor = minor as u64;
    (minor & 0xff) | ((major & 0xfff) << 8) | ((minor & !0xff) << 12) | ((major & !0xfff) << 32)
}

/// Extracts the major number from `dev`.
#[inline]
pub const fn major(dev: u64) -> u32 {
    (((dev >> 8) & 0xfff) | ((dev >> 32) & !0xfff)) as u32
}

/// Extracts the minor number from `dev`.
#[inline]
pub const fn minor(dev: u64) -> u32 {
    ((dev & 0xff) | ((dev >> 12) & !0xff)) as u32
}

/// A contiguous run of device numbers sharing one major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityRange {
    pub first: u64,
    pub count: u32,
}

impl IdentityRange {
    pub const fn new(first: u64, count: u32) -> Self {
        Self { first, count }
    }

    /// Device number of the `index`-th device in the range.
    pub fn nth(&self, index: usize) -> Option<u64> {
        if index >= self.count as usize {
            return None;
        }
        let minor = minor(self.first).checked_add(index as u32)?;
        Some(makedev(major(self.first), minor))
    }

    /// Position of `dev` inside the range.
    pub fn index_of(&self, dev: u64) -> Option<usize> {
        if major(dev) != major(self.first) {
            return None;
        }
        let offset = minor(dev).checked_sub(minor(self.first))?;
        if offset >= self.count {
            return None;
        }
        Some(offset as usize)
    }

    pub fn contains(&self, dev: u64) -> bool {
        self.index_of(dev).is_some()
    }
}
