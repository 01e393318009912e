//! Line-oriented text chunk writer

use super::stream_writer::ChunkWriter;
use crate::error::{DxfError, Result};
use crate::io::dxf::TextWriterConfiguration;
use crate::types::Handle;
use std::io::{BufWriter, Write};

/// Writes each `(code, value)` pair as two physical lines.
pub struct TextChunkWriter<W: Write> {
    writer: BufWriter<W>,
    configuration: TextWriterConfiguration,
}

impl<W: Write> TextChunkWriter<W> {
    /// Create a writer with the default configuration
    pub fn new(writer: W) -> Self {
        Self::with_configuration(writer, TextWriterConfiguration::default())
    }

    pub fn with_configuration(writer: W, configuration: TextWriterConfiguration) -> Self {
        Self {
            writer: BufWriter::new(writer),
            configuration,
        }
    }

    fn write_code(&mut self, code: i32) -> Result<()> {
        if self.configuration.pad_codes {
            writeln!(self.writer, "{:>3}", code)?;
        } else {
            writeln!(self.writer, "{}", code)?;
        }
        Ok(())
    }

    /// Write a plain ASCII token on its own line
    fn write_token(&mut self, code: i32, token: impl std::fmt::Display) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", token)?;
        Ok(())
    }

    /// Flush and return the underlying sink
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| DxfError::Io(err.into_error()))
    }
}

/// Escape characters that would break the one-value-per-line layout
fn escape(value: &str) -> std::borrow::Cow<'_, str> {
    if !value.contains(['^', '\n', '\r', '\t']) {
        return value.into();
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '^' => out.push_str("^ "),
            '\n' => out.push_str("^J"),
            '\r' => out.push_str("^M"),
            '\t' => out.push_str("^I"),
            other => out.push(other),
        }
    }
    out.into()
}

/// Format a double so that parsing the text yields the same value.
///
/// Integral values keep one decimal place.
fn format_double(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl<W: Write> ChunkWriter for TextChunkWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        let escaped = escape(value);
        let bytes = match self.configuration.encoding {
            Some(enc) if enc != encoding_rs::UTF_8 => {
                let (bytes, _, had_errors) = enc.encode(&escaped);
                if had_errors {
                    return Err(DxfError::Encoding(format!(
                        "'{}' cannot be written as {}",
                        value,
                        enc.name()
                    )));
                }
                bytes
            }
            _ => std::borrow::Cow::Borrowed(escaped.as_bytes()),
        };
        self.write_code(code)?;
        self.writer.write_all(&bytes)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn write_bool(&mut self, code: i32, value: bool) -> Result<()> {
        self.write_token(code, if value { 1 } else { 0 })
    }

    fn write_byte(&mut self, code: i32, value: u8) -> Result<()> {
        self.write_token(code, value)
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_token(code, value)
    }

    fn write_i32(&mut self, code: i32, value: i32) -> Result<()> {
        self.write_token(code, value)
    }

    fn write_i64(&mut self, code: i32, value: i64) -> Result<()> {
        self.write_token(code, value)
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_token(code, format_double(value))
    }

    fn write_handle(&mut self, code: i32, handle: Handle) -> Result<()> {
        self.write_token(code, handle)
    }

    fn write_binary(&mut self, code: i32, data: &[u8]) -> Result<()> {
        self.write_code(code)?;
        for byte in data {
            write!(self.writer, "{:02X}", byte)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
