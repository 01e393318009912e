//! Value types shared by table entries, layer states and xrecords

mod color;
mod handle;
mod line_weight;
mod transparency;

pub use color::Color;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use transparency::Transparency;
