//! Chunk readers

mod stream_reader;
mod text_reader;

pub use stream_reader::{ChunkReader, CodePair, INVALID_CODE};
pub use text_reader::TextChunkReader;
