//! # dxf-layerstate
//!
//! Reading and writing AutoCAD layer state (`.las`) files, built on a small
//! codec for DXF tagged `(code, value)` streams.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_layerstate::LayerState;
//!
//! let state = LayerState::load("plan_a.las").expect("not a layer state file");
//! for properties in state.properties() {
//!     println!("{}: {:?}", properties.name(), properties.color);
//! }
//! state.save("plan_a_copy.las");
//! ```
//!
//! ## Layout
//!
//! - [`io::dxf`] - chunk reader and writer traits with their text implementations
//! - [`objects`] - record assemblers: [`LayerState`] and [`XRecord`]
//! - [`tables`] - layers and line types a layer state is captured from and restored to
//! - [`types`] - colors, line weights, transparency and handles

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod objects;
pub mod tables;
pub mod types;

pub use error::{DxfError, Result};
pub use types::{Color, Handle, LineWeight, Transparency};

pub use tables::{Layer, LineType, Table, TableEntry};

pub use objects::{
    read_layer_states, write_layer_states, LayerPropertiesFlags, LayerPropertiesRestoreFlags,
    LayerState, LayerStateProperties, XRecord,
};

pub use io::dxf::{ChunkReader, ChunkWriter, TextChunkReader, TextChunkWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
