//! Error types for the code/value codec and layer state records

use std::io;
use thiserror::Error;

/// Main error type for chunk reading, chunk writing and record assembly
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred on the underlying stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `next` was called with nothing left to read
    #[error("Unexpected end of stream after line {line}")]
    StreamExhausted { line: usize },

    /// A code line is not an integer, or its value line is missing
    #[error("Malformed code/value pair at line {line}: {message}")]
    MalformedPair { line: usize, message: String },

    /// The current token cannot be decoded as the requested type
    #[error("Code {code}: expected {expected}, found '{token}'")]
    TypeMismatch {
        code: i32,
        expected: &'static str,
        token: String,
    },

    /// A code 0 pair did not carry the record type name required here
    #[error("File not valid: expected sentinel '{expected}', found '{found}'")]
    UnexpectedSentinel { expected: String, found: String },

    /// A value was requested before the reader was advanced onto a pair
    #[error("No current code/value pair, call next() first")]
    NotPositioned,

    /// A decoded or assigned value is outside its domain
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Text could not be represented in the configured encoding
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, DxfError>;
