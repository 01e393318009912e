//! Line type table entry

use super::TableEntry;

/// Line type element (dash, dot, space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineTypeElement {
    /// Length of the element (positive = dash, negative = space, 0 = dot)
    pub length: f64,
}

impl LineTypeElement {
    pub fn dash(length: f64) -> Self {
        LineTypeElement { length: length.abs() }
    }

    pub fn space(length: f64) -> Self {
        LineTypeElement { length: -length.abs() }
    }

    pub fn dot() -> Self {
        LineTypeElement { length: 0.0 }
    }
}

/// A line type table entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    /// Line type name
    pub name: String,
    pub description: String,
    /// Pattern elements
    pub elements: Vec<LineTypeElement>,
}

impl LineType {
    /// Name of the line type every drawing defines
    pub const CONTINUOUS: &'static str = "Continuous";

    /// Create a new line type with an empty pattern
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            name: name.into(),
            description: String::new(),
            elements: Vec::new(),
        }
    }

    /// Create the standard "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: "Solid line".to_string(),
            ..LineType::new(Self::CONTINUOUS)
        }
    }

    /// Create a dashed line type
    pub fn dashed() -> Self {
        LineType {
            description: "__ __ __ __ __ __".to_string(),
            elements: vec![LineTypeElement::dash(0.5), LineTypeElement::space(0.25)],
            ..LineType::new("Dashed")
        }
    }

    /// Total length of one pattern repetition
    pub fn pattern_length(&self) -> f64 {
        self.elements.iter().map(|e| e.length.abs()).sum()
    }

    /// Check if this is a continuous line type
    pub fn is_continuous(&self) -> bool {
        self.elements.is_empty()
    }
}

impl TableEntry for LineType {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_standard(&self) -> bool {
        matches!(self.name.as_str(), "Continuous" | "ByLayer" | "ByBlock")
    }
}
