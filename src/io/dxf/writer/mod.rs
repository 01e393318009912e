//! Chunk writers

mod stream_writer;
mod text_writer;

pub use stream_writer::{ChunkWriter, ChunkWriterExt};
pub use text_writer::TextChunkWriter;
