//! Chunk writer trait

use crate::error::Result;
use crate::types::Handle;

/// Append-only writer of `(code, value)` pairs.
///
/// No check is made that a value's type suits its code; pairing them is the
/// caller's job, the same way readers trust the caller to pick the accessor.
pub trait ChunkWriter {
    /// Write a code/value pair with a string value
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a boolean as 0/1
    fn write_bool(&mut self, code: i32, value: bool) -> Result<()>;

    fn write_byte(&mut self, code: i32, value: u8) -> Result<()>;

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()>;

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()>;

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()>;

    fn write_double(&mut self, code: i32, value: f64) -> Result<()>;

    /// Write a handle in hexadecimal
    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()>;

    /// Write binary data as hexadecimal digits
    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()>;

    /// Push everything written so far to the underlying sink
    fn flush(&mut self) -> Result<()>;
}

/// Extension trait for record-level writing operations
pub trait ChunkWriterExt: ChunkWriter {
    /// Write a code 0 record sentinel
    fn write_sentinel(&mut self, name: &str) -> Result<()> {
        self.write_string(0, name)
    }

    /// Write a point as three doubles at `code`, `code + 10` and `code + 20`
    fn write_point3d(&mut self, code: i32, point: (f64, f64, f64)) -> Result<()> {
        self.write_double(code, point.0)?;
        self.write_double(code + 10, point.1)?;
        self.write_double(code + 20, point.2)?;
        Ok(())
    }
}

impl<T: ChunkWriter + ?Sized> ChunkWriterExt for T {}
