//! Line-oriented text chunk reader

use super::stream_reader::{ChunkReader, CodePair};
use crate::error::{DxfError, Result};
use crate::io::dxf::TextReaderConfiguration;
use std::io::{BufRead, BufReader, Read};

/// Reads `(code, value)` pairs stored as two physical lines each.
pub struct TextChunkReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    current: Option<CodePair>,
    configuration: TextReaderConfiguration,
}

impl<R: Read> TextChunkReader<R> {
    /// Create a reader with the default configuration
    pub fn new(reader: R) -> Self {
        Self::with_configuration(reader, TextReaderConfiguration::default())
    }

    pub fn with_configuration(reader: R, configuration: TextReaderConfiguration) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            current: None,
            configuration,
        }
    }

    /// Read one physical line without its terminator.
    ///
    /// A configured encoding decodes every line. Without one, lines are read
    /// as UTF-8 and fall back to Latin-1 when they are not valid UTF-8.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        if self.line_number == 1 && bytes.starts_with(b"\xEF\xBB\xBF") {
            bytes.drain(..3);
        }

        let line = match self.configuration.encoding {
            Some(enc) => enc.decode_without_bom_handling(&bytes).0.into_owned(),
            None => String::from_utf8(bytes)
                .unwrap_or_else(|err| err.into_bytes().iter().map(|&b| b as char).collect()),
        };
        Ok(Some(line))
    }

    /// Read a code/value pair from the stream
    fn read_pair(&mut self) -> Result<Option<CodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        let code = code_line
            .trim()
            .parse::<i32>()
            .map_err(|_| DxfError::MalformedPair {
                line: self.line_number,
                message: format!("'{}' is not a group code", code_line),
            })?;

        let value_line = self.read_line()?.ok_or_else(|| DxfError::MalformedPair {
            line: self.line_number,
            message: format!("missing value for code {}", code),
        })?;

        Ok(Some(CodePair::new(code, unescape(&value_line))))
    }
}

/// Undo the caret escapes used for control characters in string values
fn unescape(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '^' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('J') => out.push('\n'),
            Some('M') => out.push('\r'),
            Some('I') => out.push('\t'),
            Some(' ') => out.push('^'),
            Some(other) => {
                out.push('^');
                out.push(other);
            }
            None => out.push('^'),
        }
    }
    out
}

impl<R: Read> ChunkReader for TextChunkReader<R> {
    fn try_next(&mut self) -> Result<bool> {
        self.current = self.read_pair()?;
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&CodePair> {
        self.current.as_ref()
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::INVALID_CODE;

    fn reader(data: &str) -> TextChunkReader<&[u8]> {
        TextChunkReader::new(data.as_bytes())
    }

    #[test]
    fn test_read_simple_pair() {
        let mut reader = reader("0\nLAYERSTATE\n");
        reader.next().unwrap();
        assert_eq!(reader.code(), 0);
        assert_eq!(reader.read_string().unwrap(), "LAYERSTATE");
    }

    #[test]
    fn test_padded_codes_and_crlf() {
        let mut reader = reader("  8\r\nWALLS\r\n 90\r\n8\r\n");
        reader.next().unwrap();
        assert_eq!(reader.code(), 8);
        assert_eq!(reader.read_string().unwrap(), "WALLS");
        reader.next().unwrap();
        assert_eq!(reader.code(), 90);
        assert_eq!(reader.read_i32().unwrap(), 8);
    }

    #[test]
    fn test_read_does_not_advance() {
        let mut reader = reader("62\n5\n370\n25\n");
        reader.next().unwrap();
        assert_eq!(reader.read_i16().unwrap(), 5);
        assert_eq!(reader.read_i16().unwrap(), 5);
        assert_eq!(reader.code(), 62);
        reader.next().unwrap();
        assert_eq!(reader.code(), 370);
    }

    #[test]
    fn test_code_before_first_advance() {
        let reader = reader("0\nEOF\n");
        assert_eq!(reader.code(), INVALID_CODE);
        assert!(matches!(reader.read_string(), Err(DxfError::NotPositioned)));
    }

    #[test]
    fn test_stream_exhausted() {
        let mut reader = reader("0\nEOF\n");
        reader.next().unwrap();
        assert!(!reader.try_next().unwrap());
        assert!(matches!(reader.next(), Err(DxfError::StreamExhausted { line: 2 })));
    }

    #[test]
    fn test_malformed_code_line() {
        let mut reader = reader("eight\nWALLS\n");
        assert!(matches!(reader.next(), Err(DxfError::MalformedPair { line: 1, .. })));
    }

    #[test]
    fn test_missing_value_line() {
        let mut reader = reader("0\nLAYERSTATE\n8");
        reader.next().unwrap();
        assert!(matches!(reader.next(), Err(DxfError::MalformedPair { .. })));
    }

    #[test]
    fn test_empty_value_line_is_a_value() {
        let mut reader = reader("8\n\n90\n8\n");
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "");
        reader.next().unwrap();
        assert_eq!(reader.code(), 90);
    }

    #[test]
    fn test_type_mismatch() {
        let mut reader = reader("290\nyes\n");
        reader.next().unwrap();
        assert!(matches!(reader.read_bool(), Err(DxfError::TypeMismatch { .. })));
        assert_eq!(reader.read_string().unwrap(), "yes");
    }

    #[test]
    fn test_special_characters() {
        let mut reader = reader("301\nLine1^JLine2^MLine3^ x^I\n");
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "Line1\nLine2\rLine3^x\t");
    }

    #[test]
    fn test_latin1_fallback() {
        let data: &[u8] = b"8\nCaf\xE9\n";
        let mut reader = TextChunkReader::new(data);
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "Café");
    }

    #[test]
    fn test_configured_encoding() {
        let data: &[u8] = b"8\n\xC0\xC1\n";
        let config = TextReaderConfiguration {
            encoding: Some(encoding_rs::WINDOWS_1251),
        };
        let mut reader = TextChunkReader::with_configuration(data, config);
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "АБ");
    }

    #[test]
    fn test_configured_encoding_wins_over_utf8() {
        // valid UTF-8 for "é", but "Ã©" in Windows-1252
        let data: &[u8] = b"301\n\xC3\xA9\n";
        let config = TextReaderConfiguration {
            encoding: Some(encoding_rs::WINDOWS_1252),
        };
        let mut reader = TextChunkReader::with_configuration(data, config);
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "Ã©");

        let mut reader = TextChunkReader::new(data);
        reader.next().unwrap();
        assert_eq!(reader.read_string().unwrap(), "é");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let data: &[u8] = b"\xEF\xBB\xBF0\nLAYERSTATEDICTIONARY\n";
        let mut reader = TextChunkReader::new(data);
        reader.next().unwrap();
        assert_eq!(reader.code(), 0);
    }
}
