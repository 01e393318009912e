//! Shared helpers for the layer state integration tests.
//!
//! Test crates import this with `mod common;`.

#![allow(dead_code)]

use dxf_layerstate::objects::LayerPropertiesFlags;
use dxf_layerstate::tables::{Layer, LineType, Table};
use dxf_layerstate::{Color, LayerState, LayerStateProperties, LineWeight, Transparency};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// A fresh path under the system temp directory, unique per call and process.
pub fn temp_path(stem: &str) -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "dxf_layerstate_{}_{}_{}.las",
        stem,
        std::process::id(),
        n
    ))
}

/// Removes the file when dropped, so failed assertions do not leak files.
pub struct TempFile(PathBuf);

impl TempFile {
    pub fn new(stem: &str) -> Self {
        TempFile(temp_path(stem))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Path of the sibling file a save writes before renaming
    pub fn temporary_sibling(&self) -> PathBuf {
        let mut name = self.0.file_name().unwrap().to_os_string();
        name.push(".tmp");
        self.0.with_file_name(name)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
        let _ = std::fs::remove_file(self.temporary_sibling());
    }
}

/// The two-layer `PLAN_A` state used across the tests.
pub fn plan_a() -> LayerState {
    let mut state = LayerState::new("PLAN_A").unwrap();
    state.paper_space = false;
    state.current_layer = "0".to_string();

    let mut walls = LayerStateProperties::new("WALLS");
    walls.flags = LayerPropertiesFlags::PLOT;
    walls.color = Color::from_index(1).unwrap();
    walls.line_weight = LineWeight::Default;
    walls.line_type = "Continuous".to_string();
    walls.transparency = Transparency::OPAQUE;
    assert!(state.add_properties(walls));

    let mut doors = LayerStateProperties::new("DOORS");
    doors.flags = LayerPropertiesFlags::PLOT | LayerPropertiesFlags::FROZEN;
    doors.color = Color::from_true_color(0x00FF00);
    doors.line_weight = LineWeight::from_value(25);
    doors.line_type = "Dashed".to_string();
    doors.transparency = Transparency::new(50).unwrap();
    assert!(state.add_properties(doors));

    state
}

/// Layers matching [`plan_a`] by name, all with default properties.
pub fn drawing_layers() -> Table<Layer> {
    let mut layers = Table::new();
    layers.add(Layer::layer_0()).unwrap();
    layers.add(Layer::new("WALLS")).unwrap();
    layers.add(Layer::new("DOORS")).unwrap();
    layers
}

pub fn drawing_line_types() -> Table<LineType> {
    let mut line_types = Table::new();
    line_types.add(LineType::continuous()).unwrap();
    line_types.add(LineType::dashed()).unwrap();
    line_types
}

pub fn write_to_string(state: &LayerState) -> String {
    let mut buf = Vec::new();
    state.write_to(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}
