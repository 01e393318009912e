//! Chunk reader trait and the code/value pair it exposes

use crate::error::{DxfError, Result};
use crate::types::Handle;

/// Code reported before the reader has been advanced onto a pair
pub const INVALID_CODE: i32 = -9999;

/// One raw `(code, token)` pair under the reader's cursor.
///
/// The token is kept undecoded; each accessor decodes it on demand, so how a
/// value is interpreted is decided by the caller from the code alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePair {
    /// The group code
    pub code: i32,
    /// The value token as it appeared in the stream
    pub token: String,
}

impl CodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, token: impl Into<String>) -> Self {
        Self {
            code,
            token: token.into(),
        }
    }

    fn mismatch(&self, expected: &'static str) -> DxfError {
        DxfError::TypeMismatch {
            code: self.code,
            expected,
            token: self.token.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Decode a 0/1 flag; any other token is a mismatch
    pub fn as_bool(&self) -> Result<bool> {
        match self.token.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn as_byte(&self) -> Result<u8> {
        self.token.trim().parse().map_err(|_| self.mismatch("byte"))
    }

    pub fn as_i16(&self) -> Result<i16> {
        self.token.trim().parse().map_err(|_| self.mismatch("short"))
    }

    pub fn as_i32(&self) -> Result<i32> {
        self.token.trim().parse().map_err(|_| self.mismatch("int"))
    }

    pub fn as_i64(&self) -> Result<i64> {
        self.token.trim().parse().map_err(|_| self.mismatch("long"))
    }

    pub fn as_double(&self) -> Result<f64> {
        self.token.trim().parse().map_err(|_| self.mismatch("double"))
    }

    /// Decode a hexadecimal handle
    pub fn as_handle(&self) -> Result<Handle> {
        Handle::from_hex(&self.token).ok_or_else(|| self.mismatch("handle"))
    }

    /// Decode a hexadecimal binary chunk (two digits per byte)
    pub fn as_binary(&self) -> Result<Vec<u8>> {
        let hex = self.token.trim();
        if hex.len() % 2 != 0 || !hex.is_ascii() {
            return Err(self.mismatch("binary"));
        }
        (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| self.mismatch("binary")))
            .collect()
    }
}

/// Forward-only reader of `(code, value)` pairs.
///
/// Advancing and decoding are separate steps: callers inspect [`code`]
/// first, then pick the `read_*` accessor for it, or skip the pair with
/// another [`next`] without knowing its type. The accessors never move the
/// cursor.
///
/// [`code`]: ChunkReader::code
/// [`next`]: ChunkReader::next
pub trait ChunkReader {
    /// Advance to the next pair. Returns `false` when the stream ended
    /// cleanly before a code line.
    fn try_next(&mut self) -> Result<bool>;

    /// The pair under the cursor, `None` before the first advance
    fn current(&self) -> Option<&CodePair>;

    /// Number of physical lines consumed so far
    fn line_number(&self) -> usize;

    /// Advance to the next pair, failing with `StreamExhausted` at the end
    fn next(&mut self) -> Result<()> {
        if self.try_next()? {
            Ok(())
        } else {
            Err(DxfError::StreamExhausted {
                line: self.line_number(),
            })
        }
    }

    /// Code of the pair under the cursor, [`INVALID_CODE`] before the first
    /// advance
    fn code(&self) -> i32 {
        self.current().map_or(INVALID_CODE, |pair| pair.code)
    }

    fn read_string(&self) -> Result<String> {
        Ok(positioned(self.current())?.token.clone())
    }

    fn read_bool(&self) -> Result<bool> {
        positioned(self.current())?.as_bool()
    }

    fn read_byte(&self) -> Result<u8> {
        positioned(self.current())?.as_byte()
    }

    fn read_i16(&self) -> Result<i16> {
        positioned(self.current())?.as_i16()
    }

    fn read_i32(&self) -> Result<i32> {
        positioned(self.current())?.as_i32()
    }

    fn read_i64(&self) -> Result<i64> {
        positioned(self.current())?.as_i64()
    }

    fn read_double(&self) -> Result<f64> {
        positioned(self.current())?.as_double()
    }

    fn read_handle(&self) -> Result<Handle> {
        positioned(self.current())?.as_handle()
    }

    fn read_binary(&self) -> Result<Vec<u8>> {
        positioned(self.current())?.as_binary()
    }
}

fn positioned(pair: Option<&CodePair>) -> Result<&CodePair> {
    pair.ok_or(DxfError::NotPositioned)
}
