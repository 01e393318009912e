//! Object handles carried by xrecord reference entries

use std::fmt;

/// A 64-bit object handle, written in hexadecimal on the wire.
///
/// Handle 0 is reserved as the null reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0)
    pub const NULL: Handle = Handle(0);

    /// Create a handle from its raw value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Parse a hexadecimal handle token such as `"1F"`
    pub fn from_hex(token: &str) -> Option<Self> {
        u64::from_str_radix(token.trim(), 16).ok().map(Handle)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}
