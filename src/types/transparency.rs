//! Transparency representation

use crate::error::{DxfError, Result};
use std::fmt;

/// Transparency on AutoCAD's 0-90 percentage scale.
///
/// - 0 = fully opaque
/// - 90 = the most transparent value a user may assign
/// - -1 / 100 are the inherited ByLayer / ByBlock values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transparency(i16);

/// Alpha value flag for an explicit transparency
const ALPHA_FLAG_VALUE: i32 = 0x0200_0000;
/// Alpha value flag for ByBlock transparency
const ALPHA_FLAG_BY_BLOCK: i32 = 0x0100_0000;

impl Transparency {
    /// Fully opaque (0% transparent)
    pub const OPAQUE: Transparency = Transparency(0);

    /// Use the layer's transparency
    pub const BY_LAYER: Transparency = Transparency(-1);

    /// Use the block's transparency
    pub const BY_BLOCK: Transparency = Transparency(100);

    /// Highest explicit transparency
    pub const MAX: i16 = 90;

    /// Create an explicit transparency from a 0-90 percentage
    pub fn new(value: i16) -> Result<Self> {
        if !(0..=Self::MAX).contains(&value) {
            return Err(DxfError::InvalidValue(format!(
                "transparency must be between 0 and {}, got {}",
                Self::MAX,
                value
            )));
        }
        Ok(Transparency(value))
    }

    /// Map a raw stored value, where -1 and 100 are the inherited values
    pub fn from_cad_index(value: i16) -> Result<Self> {
        match value {
            -1 => Ok(Transparency::BY_LAYER),
            100 => Ok(Transparency::BY_BLOCK),
            v => Transparency::new(v),
        }
    }

    /// Decode a packed alpha value (code 440).
    ///
    /// Only the low byte carries the alpha; 255 is opaque and 0 maps to
    /// ByBlock. Callers that treat a zero token as "opaque" must check for it
    /// before calling this.
    pub fn from_alpha_value(value: i32) -> Result<Self> {
        let alpha = value & 0xFF;
        let percent = ((25_500 - alpha * 100) / 255) as i16;
        Transparency::from_cad_index(percent)
    }

    /// Encode as a packed alpha value (code 440).
    ///
    /// ByLayer has no alpha encoding and is written as 0.
    pub fn to_alpha_value(&self) -> i32 {
        match *self {
            Transparency::BY_LAYER => 0,
            Transparency::BY_BLOCK => ALPHA_FLAG_BY_BLOCK,
            Transparency(v) => {
                let alpha = 255 * (100 - v as i32) / 100;
                ALPHA_FLAG_VALUE | alpha
            }
        }
    }

    /// Get the raw value (-1, 0-90 or 100)
    pub const fn value(&self) -> i16 {
        self.0
    }

    pub const fn is_by_layer(&self) -> bool {
        self.0 == -1
    }

    pub const fn is_by_block(&self) -> bool {
        self.0 == 100
    }

    /// Check if fully opaque
    pub const fn is_opaque(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Transparency {
    fn default() -> Self {
        Transparency::OPAQUE
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transparency::BY_LAYER => write!(f, "ByLayer"),
            Transparency::BY_BLOCK => write!(f, "ByBlock"),
            Transparency(v) => write!(f, "{}%", v),
        }
    }
}
