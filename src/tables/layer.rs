//! Layer table entry

use super::TableEntry;
use crate::types::{Color, LineWeight, Transparency};

/// Layer visibility and editing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFlags {
    /// Layer is frozen
    pub frozen: bool,
    /// Layer is locked
    pub locked: bool,
    /// Layer is off (invisible)
    pub off: bool,
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    pub flags: LayerFlags,
    pub color: Color,
    /// Name of the layer's line type
    pub line_type: String,
    pub line_weight: LineWeight,
    pub transparency: Transparency,
    /// Is this layer plottable?
    pub is_plottable: bool,
}

impl Layer {
    /// Create a new layer with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            flags: LayerFlags::default(),
            color: Color::WHITE,
            line_type: "Continuous".to_string(),
            line_weight: LineWeight::Default,
            transparency: Transparency::OPAQUE,
            is_plottable: true,
        }
    }

    /// Create the standard "0" layer
    pub fn layer_0() -> Self {
        Layer::new("0")
    }

    /// Create a layer with a specific color
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Layer {
            color,
            ..Self::new(name)
        }
    }

    pub fn freeze(&mut self) {
        self.flags.frozen = true;
    }

    pub fn thaw(&mut self) {
        self.flags.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.flags.frozen
    }

    pub fn lock(&mut self) {
        self.flags.locked = true;
    }

    pub fn unlock(&mut self) {
        self.flags.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.flags.locked
    }

    pub fn turn_off(&mut self) {
        self.flags.off = true;
    }

    pub fn turn_on(&mut self) {
        self.flags.off = false;
    }

    pub fn is_off(&self) -> bool {
        self.flags.off
    }

    /// Check if the layer is visible (not off and not frozen)
    pub fn is_visible(&self) -> bool {
        !self.flags.off && !self.flags.frozen
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_standard(&self) -> bool {
        self.name == "0"
    }
}
