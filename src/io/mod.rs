//! I/O for tagged code/value streams

pub mod dxf;

pub use dxf::{ChunkReader, ChunkWriter, TextChunkReader, TextChunkWriter};
