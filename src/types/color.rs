//! Color representation for layers and layer state properties

use crate::error::{DxfError, Result};
use std::fmt;

/// Represents a color in AutoCAD
///
/// A color is either a palette entry or a true color, never both:
/// - By index (1-255): AutoCAD Color Index (ACI)
/// - By RGB values: true color, stored on the wire as a 24-bit integer
/// - By layer (index 256) or by block (index 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index.
    ///
    /// Layers store a negative index when they are turned off; the sign is
    /// dropped here and reported separately by [`Color::is_off_index`].
    /// Indices outside -255..=256 are rejected.
    pub fn from_index(index: i16) -> Result<Self> {
        match index {
            0 => Ok(Color::ByBlock),
            256 => Ok(Color::ByLayer),
            1..=255 => Ok(Color::Index(index as u8)),
            -255..=-1 => Ok(Color::Index(index.unsigned_abs() as u8)),
            _ => Err(DxfError::InvalidValue(format!(
                "color index {} is outside 0-256",
                index
            ))),
        }
    }

    /// Whether a raw color index marks its layer as turned off
    pub fn is_off_index(index: i16) -> bool {
        index < 0
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a true color from its packed `0x00RRGGBB` integer form
    pub fn from_true_color(value: i32) -> Self {
        Color::Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Packed `0x00RRGGBB` form, only for true colors
    pub fn to_true_color(&self) -> Option<i32> {
        match self {
            Color::Rgb { r, g, b } => Some(((*r as i32) << 16) | ((*g as i32) << 8) | (*b as i32)),
            _ => None,
        }
    }

    /// Whether this color is stored as RGB rather than as a palette index
    pub fn is_true_color(&self) -> bool {
        matches!(self, Color::Rgb { .. })
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);

    /// Index written alongside a true color for readers that ignore the
    /// true color code
    pub fn approximate_index(&self) -> i16 {
        match self {
            Color::ByBlock => 0,
            Color::ByLayer => 256,
            Color::Index(i) => *i as i16,
            Color::Rgb { r, g, b } => {
                let brightness = ((*r as u16) + (*g as u16) + (*b as u16)) / 3;
                if brightness < 32 {
                    8
                } else if brightness > 224 {
                    7
                } else if *r > *g && *r > *b {
                    1
                } else if *g > *r && *g > *b {
                    3
                } else if *b > *r && *b > *g {
                    5
                } else if *r > 128 && *g > 128 {
                    2
                } else if *g > 128 && *b > 128 {
                    4
                } else if *r > 128 && *b > 128 {
                    6
                } else {
                    7
                }
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}
