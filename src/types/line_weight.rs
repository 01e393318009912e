//! Line weight representation

use std::fmt;

/// Line weight in 1/100 mm, or one of the inherited values.
///
/// Written as a short integer; code 370 in layer state blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LineWeight {
    /// Use the layer's line weight
    #[default]
    ByLayer,
    /// Use the block's line weight
    ByBlock,
    /// Default line weight
    Default,
    /// Specific line weight in 1/100 mm
    Value(i16),
}

/// Discrete weights AutoCAD offers, in 1/100 mm
const STANDARD_WEIGHTS: [i16; 24] = [
    0, 5, 9, 13, 15, 18, 20, 25, 30, 35, 40, 50, 53, 60, 70, 80, 90, 100, 106, 120, 140, 158, 200,
    211,
];

impl LineWeight {
    /// Create a line weight from a raw value
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Default,
            v => LineWeight::Value(v),
        }
    }

    /// Get the raw value
    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    /// Whether this is an inherited value or one of the discrete weights
    pub fn is_standard(&self) -> bool {
        match self {
            LineWeight::Value(v) => STANDARD_WEIGHTS.contains(v),
            _ => true,
        }
    }

    /// All standard explicit weights, thinnest first
    pub fn standard_values() -> impl Iterator<Item = LineWeight> {
        STANDARD_WEIGHTS.iter().map(|&v| LineWeight::Value(v))
    }

    /// Get the line weight in millimeters
    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }

    pub const W0_00: LineWeight = LineWeight::Value(0);
    pub const W0_13: LineWeight = LineWeight::Value(13);
    pub const W0_25: LineWeight = LineWeight::Value(25);
    pub const W0_50: LineWeight = LineWeight::Value(50);
    pub const W1_00: LineWeight = LineWeight::Value(100);
    pub const W2_11: LineWeight = LineWeight::Value(211);
}

impl fmt::Display for LineWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineWeight::ByLayer => write!(f, "ByLayer"),
            LineWeight::ByBlock => write!(f, "ByBlock"),
            LineWeight::Default => write!(f, "Default"),
            LineWeight::Value(v) => write!(f, "{:.2}mm", *v as f64 / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_weight_from_value() {
        assert_eq!(LineWeight::from_value(-1), LineWeight::ByLayer);
        assert_eq!(LineWeight::from_value(-2), LineWeight::ByBlock);
        assert_eq!(LineWeight::from_value(-3), LineWeight::Default);
        assert_eq!(LineWeight::from_value(25), LineWeight::Value(25));
    }

    #[test]
    fn test_value_round_trip() {
        for lw in LineWeight::standard_values() {
            assert_eq!(LineWeight::from_value(lw.value()), lw);
        }
        assert_eq!(LineWeight::Default.value(), -3);
    }

    #[test]
    fn test_is_standard() {
        assert!(LineWeight::W0_25.is_standard());
        assert!(LineWeight::ByBlock.is_standard());
        assert!(!LineWeight::Value(26).is_standard());
    }

    #[test]
    fn test_line_weight_display() {
        assert_eq!(LineWeight::ByLayer.to_string(), "ByLayer");
        assert_eq!(LineWeight::W0_25.to_string(), "0.25mm");
    }
}
