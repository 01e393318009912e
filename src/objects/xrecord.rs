//! Extended records: ordered lists of arbitrary code/value pairs.
//!
//! The value type of each pair is looked up from its code in
//! [`XRecordValueType::from_code`]. This table belongs to the xrecord format
//! only; other record formats map codes on their own.

use crate::error::{DxfError, Result};
use crate::io::dxf::{ChunkReader, ChunkWriter, ChunkWriterExt};
use crate::types::Handle;
use tracing::trace;

/// Code holding the cloning flags, ahead of the first entry
const CLONING_FLAGS_CODE: i32 = 280;

/// How a record behaves when its owning dictionary is cloned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictionaryCloningFlags {
    #[default]
    NotApplicable = 0,
    KeepExisting = 1,
    UseClone = 2,
    XrefName = 3,
    Name = 4,
    UnmangleName = 5,
}

impl DictionaryCloningFlags {
    /// Unknown values fall back to `NotApplicable`
    pub fn from_value(value: i16) -> Self {
        match value {
            1 => DictionaryCloningFlags::KeepExisting,
            2 => DictionaryCloningFlags::UseClone,
            3 => DictionaryCloningFlags::XrefName,
            4 => DictionaryCloningFlags::Name,
            5 => DictionaryCloningFlags::UnmangleName,
            _ => DictionaryCloningFlags::NotApplicable,
        }
    }

    pub fn to_value(self) -> i16 {
        self as i16
    }
}

/// Value type carried by a code in an xrecord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XRecordValueType {
    String,
    Point3D,
    Double,
    Byte,
    Int16,
    Int32,
    Int64,
    Handle,
    /// Handle that references another object
    ObjectId,
    Bool,
    /// Hexadecimal binary data
    Chunk,
    /// Code outside every known range
    Unknown,
}

impl XRecordValueType {
    pub fn from_code(code: i32) -> Self {
        match code {
            5 | 105 | 320..=329 | 480..=481 => XRecordValueType::Handle,
            330..=369 => XRecordValueType::ObjectId,
            0..=4 | 6..=9 | 100..=102 | 300..=309 | 410..=419 | 999..=1009 => {
                XRecordValueType::String
            }
            10..=39 => XRecordValueType::Point3D,
            40..=59 | 110..=149 | 210..=239 | 460..=469 | 1010..=1059 => XRecordValueType::Double,
            280..=289 => XRecordValueType::Byte,
            60..=79 | 170..=179 | 270..=279 | 400..=409 | 1060..=1070 => XRecordValueType::Int16,
            90..=99 | 420..=459 | 1071 => XRecordValueType::Int32,
            160..=169 => XRecordValueType::Int64,
            290..=299 => XRecordValueType::Bool,
            310..=319 => XRecordValueType::Chunk,
            _ => XRecordValueType::Unknown,
        }
    }

    /// Whether the type holds a handle
    pub fn is_handle(&self) -> bool {
        matches!(self, XRecordValueType::Handle | XRecordValueType::ObjectId)
    }
}

/// Decoded value of one xrecord entry
#[derive(Debug, Clone, PartialEq)]
pub enum XRecordValue {
    String(String),
    Double(f64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Byte(u8),
    Bool(bool),
    Handle(Handle),
    Point3D(f64, f64, f64),
    Chunk(Vec<u8>),
}

impl XRecordValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            XRecordValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            XRecordValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Any of the integer types that fit in an `i32`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            XRecordValue::Int32(v) => Some(*v),
            XRecordValue::Int16(v) => Some(i32::from(*v)),
            XRecordValue::Byte(v) => Some(i32::from(*v)),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            XRecordValue::Handle(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            XRecordValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_point3d(&self) -> Option<(f64, f64, f64)> {
        match self {
            XRecordValue::Point3D(x, y, z) => Some((*x, *y, *z)),
            _ => None,
        }
    }
}

/// One code/value pair of an xrecord. Points are a single entry stored under
/// the code of their X coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct XRecordEntry {
    pub code: i32,
    pub value: XRecordValue,
}

impl XRecordEntry {
    pub fn new(code: i32, value: XRecordValue) -> Self {
        Self { code, value }
    }

    pub fn value_type(&self) -> XRecordValueType {
        XRecordValueType::from_code(self.code)
    }

    fn write<W: ChunkWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match &self.value {
            XRecordValue::String(s) => writer.write_string(self.code, s),
            XRecordValue::Double(v) => writer.write_double(self.code, *v),
            XRecordValue::Int16(v) => writer.write_i16(self.code, *v),
            XRecordValue::Int32(v) => writer.write_i32(self.code, *v),
            XRecordValue::Int64(v) => writer.write_i64(self.code, *v),
            XRecordValue::Byte(v) => writer.write_byte(self.code, *v),
            XRecordValue::Bool(v) => writer.write_bool(self.code, *v),
            XRecordValue::Handle(h) => writer.write_handle(self.code, *h),
            XRecordValue::Point3D(x, y, z) => writer.write_point3d(self.code, (*x, *y, *z)),
            XRecordValue::Chunk(data) => writer.write_binary(self.code, data),
        }
    }
}

/// Arbitrary application data stored as tagged pairs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XRecord {
    pub cloning_flags: DictionaryCloningFlags,
    pub entries: Vec<XRecordEntry>,
}

impl XRecord {
    /// Record sentinel name
    pub const OBJECT_TYPE: &'static str = "XRECORD";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: XRecordEntry) {
        self.entries.push(entry);
    }

    pub fn add_string(&mut self, code: i32, value: impl Into<String>) {
        self.add_entry(XRecordEntry::new(code, XRecordValue::String(value.into())));
    }

    pub fn add_double(&mut self, code: i32, value: f64) {
        self.add_entry(XRecordEntry::new(code, XRecordValue::Double(value)));
    }

    pub fn add_i32(&mut self, code: i32, value: i32) {
        self.add_entry(XRecordEntry::new(code, XRecordValue::Int32(value)));
    }

    pub fn add_handle(&mut self, code: i32, value: Handle) {
        self.add_entry(XRecordEntry::new(code, XRecordValue::Handle(value)));
    }

    /// Add a point stored at `code`, `code + 10` and `code + 20`
    pub fn add_point3d(&mut self, code: i32, x: f64, y: f64, z: f64) {
        self.add_entry(XRecordEntry::new(code, XRecordValue::Point3D(x, y, z)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &XRecordEntry> {
        self.entries.iter()
    }

    /// First entry stored under `code`
    pub fn get(&self, code: i32) -> Option<&XRecordEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    pub fn get_string(&self, code: i32) -> Option<&str> {
        self.get(code)?.value.as_string()
    }

    pub fn get_double(&self, code: i32) -> Option<f64> {
        self.get(code)?.value.as_double()
    }

    pub fn get_i32(&self, code: i32) -> Option<i32> {
        self.get(code)?.value.as_i32()
    }

    /// Every handle the record refers to, in entry order
    pub fn references(&self) -> Vec<Handle> {
        self.entries
            .iter()
            .filter_map(|e| e.value.as_handle())
            .collect()
    }

    /// Read entries up to the next code 0 pair, which is left under the
    /// cursor. The reader must sit on the first pair after the sentinel.
    ///
    /// A code 280 as the very first pair is taken as the cloning flags; any
    /// later 280 is an entry.
    pub fn read_entries<R: ChunkReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut record = XRecord::new();

        if reader.code() == CLONING_FLAGS_CODE {
            record.cloning_flags = DictionaryCloningFlags::from_value(reader.read_i16()?);
            reader.next()?;
        }

        while reader.code() != 0 {
            let code = reader.code();

            let value = match XRecordValueType::from_code(code) {
                XRecordValueType::Point3D if (10..=18).contains(&code) => {
                    // leaves the cursor on the pair after the point
                    let point = read_point(reader, code)?;
                    record.add_entry(XRecordEntry::new(code, point));
                    continue;
                }
                // a lone Y or Z coordinate
                XRecordValueType::Point3D | XRecordValueType::Double => {
                    XRecordValue::Double(reader.read_double()?)
                }
                XRecordValueType::Byte => XRecordValue::Byte(reader.read_byte()?),
                XRecordValueType::Int16 => XRecordValue::Int16(reader.read_i16()?),
                XRecordValueType::Int32 => XRecordValue::Int32(reader.read_i32()?),
                XRecordValueType::Int64 => XRecordValue::Int64(reader.read_i64()?),
                XRecordValueType::Bool => XRecordValue::Bool(reader.read_bool()?),
                XRecordValueType::Handle | XRecordValueType::ObjectId => {
                    XRecordValue::Handle(reader.read_handle()?)
                }
                XRecordValueType::Chunk => XRecordValue::Chunk(reader.read_binary()?),
                XRecordValueType::String => XRecordValue::String(reader.read_string()?),
                XRecordValueType::Unknown => {
                    trace!(code = code, "keeping unknown xrecord code as text");
                    XRecordValue::String(reader.read_string()?)
                }
            };
            record.add_entry(XRecordEntry::new(code, value));
            reader.next()?;
        }

        Ok(record)
    }

    /// Write the cloning flags followed by every entry
    pub fn write_entries<W: ChunkWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_i16(CLONING_FLAGS_CODE, self.cloning_flags.to_value())?;
        for entry in &self.entries {
            entry.write(writer)?;
        }
        Ok(())
    }
}

/// Read a point whose X is under the cursor. A missing Z reads as 0.
fn read_point<R: ChunkReader + ?Sized>(reader: &mut R, code: i32) -> Result<XRecordValue> {
    let x = reader.read_double()?;
    reader.next()?;
    if reader.code() != code + 10 {
        return Err(DxfError::MalformedPair {
            line: reader.line_number(),
            message: format!(
                "expected code {} for the Y of the point at code {}, found {}",
                code + 10,
                code,
                reader.code()
            ),
        });
    }
    let y = reader.read_double()?;
    reader.next()?;
    let z = if reader.code() == code + 20 {
        let z = reader.read_double()?;
        reader.next()?;
        z
    } else {
        0.0
    };
    Ok(XRecordValue::Point3D(x, y, z))
}
