//! Tagged `(group code, value)` chunk codec.
//!
//! A chunk stream is a flat, forward-only sequence of pairs. The group code
//! decides how the value token is decoded, but nothing here enforces the
//! conventional code ranges: producers routinely place data outside them
//! (line weight at 370, transparency at 440), so each record format brings
//! its own code table.

mod configuration;
mod reader;
mod writer;

pub use configuration::{encoding_for_code_page, TextReaderConfiguration, TextWriterConfiguration};
pub use reader::{ChunkReader, CodePair, TextChunkReader, INVALID_CODE};
pub use writer::{ChunkWriter, ChunkWriterExt, TextChunkWriter};
