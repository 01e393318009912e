//! Reader and writer configuration

use encoding_rs::Encoding;

/// Configuration for [`TextChunkReader`](super::TextChunkReader).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReaderConfiguration {
    /// Decoding for every line.
    ///
    /// `None` reads UTF-8 and maps the bytes of any line that is not valid
    /// UTF-8 to the code points of the same value (Latin-1).
    pub encoding: Option<&'static Encoding>,
}

impl TextReaderConfiguration {
    /// Configure the fallback from a `$DWGCODEPAGE` style name
    pub fn for_code_page(code_page: &str) -> Self {
        Self {
            encoding: encoding_for_code_page(code_page),
        }
    }
}

/// Configuration for [`TextChunkWriter`](super::TextChunkWriter).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriterConfiguration {
    /// Encoding for string values; `None` writes UTF-8
    pub encoding: Option<&'static Encoding>,
    /// Right-align codes in a three character field, as DXF files do
    pub pad_codes: bool,
}

/// Map a code page name such as `ANSI_1252` to an encoding.
///
/// Returns `None` for UTF-8 and for names that are not recognized, both of
/// which leave strings as UTF-8.
pub fn encoding_for_code_page(code_page: &str) -> Option<&'static Encoding> {
    match code_page.trim().to_ascii_lowercase().as_str() {
        "ansi_874" => Some(encoding_rs::WINDOWS_874),
        "ansi_932" => Some(encoding_rs::SHIFT_JIS),
        "ansi_936" | "gb2312" => Some(encoding_rs::GBK),
        "ansi_949" | "korean" => Some(encoding_rs::EUC_KR),
        "ansi_950" | "big5" => Some(encoding_rs::BIG5),
        "ansi_1250" | "dos852" => Some(encoding_rs::WINDOWS_1250),
        "ansi_1251" => Some(encoding_rs::WINDOWS_1251),
        "ansi_1252" | "iso8859-1" | "dos850" => Some(encoding_rs::WINDOWS_1252),
        "ansi_1253" | "dos869" => Some(encoding_rs::WINDOWS_1253),
        "ansi_1254" | "dos857" => Some(encoding_rs::WINDOWS_1254),
        "ansi_1255" => Some(encoding_rs::WINDOWS_1255),
        "ansi_1256" => Some(encoding_rs::WINDOWS_1256),
        "ansi_1257" => Some(encoding_rs::WINDOWS_1257),
        "ansi_1258" => Some(encoding_rs::WINDOWS_1258),
        "dos866" => Some(encoding_rs::IBM866),
        _ => None,
    }
}
