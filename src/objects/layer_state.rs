//! Layer states: named snapshots of per-layer properties.
//!
//! A layer state is persisted as a chunk stream (the `.las` export format):
//!
//! ```text
//! 0   LAYERSTATEDICTIONARY
//! 0   LAYERSTATE
//! 1   <name>            91  2047           301 <description>
//! 290 <paper space>     302 <current layer>
//! 8   <layer name>      one block per layer, up to the next 8 or 0
//! 90  <flags>  62 <color index>  370 <line weight>  6 <line type>
//! 440 <alpha>  92 <true color, only for true colors>
//! 0   EOF
//! ```
//!
//! Reading is a two-level loop: record fields until a code 0, and inside it
//! one property block per code 8. Codes the loops do not know are skipped.

use crate::error::{DxfError, Result};
use crate::io::dxf::{ChunkReader, ChunkWriter, ChunkWriterExt, TextChunkReader, TextChunkWriter};
use crate::tables::{is_valid_name, Layer, LineType, Table};
use crate::types::{Color, LineWeight, Transparency};
use bitflags::bitflags;
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Container sentinel opening every layer state stream
pub const LAYER_STATE_DICTIONARY: &str = "LAYERSTATEDICTIONARY";
/// Record sentinel opening one layer state
pub const LAYER_STATE: &str = "LAYERSTATE";
/// Terminator written after the last record
pub const END_OF_FILE: &str = "EOF";

/// Value AutoCAD writes at code 91; it carries no information on read
const RESERVED_MARKER: i32 = 2047;

bitflags! {
    /// Per-layer state stored in a layer state block (code 90).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerPropertiesFlags: i32 {
        /// Layer is turned off.
        const HIDDEN = 1;
        /// Layer is frozen.
        const FROZEN = 2;
        /// Layer is locked.
        const LOCKED = 4;
        /// Layer is plotted.
        const PLOT = 8;
    }
}

bitflags! {
    /// Selects which stored properties a restore writes back to layers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerPropertiesRestoreFlags: i32 {
        const HIDDEN = 1;
        const FROZEN = 2;
        const LOCKED = 4;
        const PLOT = 8;
        const COLOR = 16;
        const LINETYPE = 32;
        const LINE_WEIGHT = 64;
        const TRANSPARENCY = 128;
        const ALL = Self::HIDDEN.bits()
            | Self::FROZEN.bits()
            | Self::LOCKED.bits()
            | Self::PLOT.bits()
            | Self::COLOR.bits()
            | Self::LINETYPE.bits()
            | Self::LINE_WEIGHT.bits()
            | Self::TRANSPARENCY.bits();
    }
}

impl Default for LayerPropertiesRestoreFlags {
    fn default() -> Self {
        LayerPropertiesRestoreFlags::ALL
    }
}

/// Stored properties of one layer inside a layer state.
///
/// The line type is kept by name; it is resolved against a line type table
/// only when the properties are applied to a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStateProperties {
    name: String,
    pub flags: LayerPropertiesFlags,
    pub line_type: String,
    pub color: Color,
    pub line_weight: LineWeight,
    pub transparency: Transparency,
}

impl LayerStateProperties {
    /// Properties with the values a block gets when it omits a code
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: LayerPropertiesFlags::PLOT,
            line_type: LineType::CONTINUOUS.to_string(),
            color: Color::WHITE,
            line_weight: LineWeight::Default,
            transparency: Transparency::OPAQUE,
        }
    }

    /// Snapshot the current properties of a layer
    pub fn from_layer(layer: &Layer) -> Self {
        let mut flags = LayerPropertiesFlags::empty();
        flags.set(LayerPropertiesFlags::HIDDEN, layer.is_off());
        flags.set(LayerPropertiesFlags::FROZEN, layer.is_frozen());
        flags.set(LayerPropertiesFlags::LOCKED, layer.is_locked());
        flags.set(LayerPropertiesFlags::PLOT, layer.is_plottable);

        Self {
            name: layer.name.clone(),
            flags,
            line_type: layer.line_type.clone(),
            color: layer.color,
            line_weight: layer.line_weight,
            transparency: layer.transparency,
        }
    }

    /// Name of the layer these properties belong to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the selected properties back to a layer.
    ///
    /// A line type name missing from `line_types` leaves the layer's line
    /// type unchanged.
    pub fn apply_to(
        &self,
        layer: &mut Layer,
        restore: LayerPropertiesRestoreFlags,
        line_types: &Table<LineType>,
    ) {
        if restore.contains(LayerPropertiesRestoreFlags::HIDDEN) {
            layer.flags.off = self.flags.contains(LayerPropertiesFlags::HIDDEN);
        }
        if restore.contains(LayerPropertiesRestoreFlags::FROZEN) {
            layer.flags.frozen = self.flags.contains(LayerPropertiesFlags::FROZEN);
        }
        if restore.contains(LayerPropertiesRestoreFlags::LOCKED) {
            layer.flags.locked = self.flags.contains(LayerPropertiesFlags::LOCKED);
        }
        if restore.contains(LayerPropertiesRestoreFlags::PLOT) {
            layer.is_plottable = self.flags.contains(LayerPropertiesFlags::PLOT);
        }
        if restore.contains(LayerPropertiesRestoreFlags::COLOR) {
            layer.color = self.color;
        }
        if restore.contains(LayerPropertiesRestoreFlags::LINETYPE) {
            match line_types.get(&self.line_type) {
                Some(line_type) => layer.line_type = line_type.name.clone(),
                None => warn!(
                    layer = %layer.name,
                    line_type = %self.line_type,
                    "line type not found, keeping the layer's line type"
                ),
            }
        }
        if restore.contains(LayerPropertiesRestoreFlags::LINE_WEIGHT) {
            layer.line_weight = self.line_weight;
        }
        if restore.contains(LayerPropertiesRestoreFlags::TRANSPARENCY) {
            layer.transparency = self.transparency;
        }
    }

    fn write<W: ChunkWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_string(8, &self.name)?;
        writer.write_i32(90, self.flags.bits())?;
        writer.write_i16(62, self.color.approximate_index())?;
        writer.write_i16(370, self.line_weight.value())?;
        writer.write_string(6, &self.line_type)?;
        let alpha = if self.transparency.value() == 0 {
            0
        } else {
            self.transparency.to_alpha_value()
        };
        writer.write_i32(440, alpha)?;
        if let Some(true_color) = self.color.to_true_color() {
            writer.write_i32(92, true_color)?;
        }
        Ok(())
    }

    /// Read one property block. The reader sits on the code 8 pair and is
    /// left on the code 8 or 0 pair that ends the block.
    ///
    /// Returns `None` for a block without a layer name.
    fn read<R: ChunkReader + ?Sized>(reader: &mut R) -> Result<Option<Self>> {
        let mut properties = LayerStateProperties::new(reader.read_string()?);
        reader.next()?;

        while reader.code() != 8 && reader.code() != 0 {
            match reader.code() {
                90 => properties.flags = LayerPropertiesFlags::from_bits_retain(reader.read_i32()?),
                62 => properties.color = Color::from_index(reader.read_i16()?)?,
                370 => properties.line_weight = LineWeight::from_value(reader.read_i16()?),
                6 => properties.line_type = reader.read_string()?,
                440 => {
                    // zero means opaque, not what the alpha decoding gives for 0
                    let alpha = reader.read_i32()?;
                    properties.transparency = if alpha == 0 {
                        Transparency::OPAQUE
                    } else {
                        Transparency::from_alpha_value(alpha)?
                    };
                }
                // follows 62 and replaces the compatibility index
                92 => properties.color = Color::from_true_color(reader.read_i32()?),
                code => trace!(code = code, "skipping unknown layer property code"),
            }
            reader.next()?;
        }

        if properties.name.is_empty() {
            debug!("discarding layer state block without a layer name");
            return Ok(None);
        }
        Ok(Some(properties))
    }
}

/// A named set of per-layer properties that can be restored onto a drawing's
/// layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    name: String,
    pub description: String,
    /// Layer that was current when the state was saved
    pub current_layer: String,
    /// Whether the state was saved from paper space
    pub paper_space: bool,
    /// Keyed by upper-cased layer name
    properties: IndexMap<String, LayerStateProperties>,
}

impl LayerState {
    /// Create an empty layer state
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(DxfError::InvalidValue(format!(
                "'{}' is not a valid layer state name",
                name
            )));
        }
        Ok(Self {
            name,
            description: String::new(),
            current_layer: "0".to_string(),
            paper_space: false,
            properties: IndexMap::new(),
        })
    }

    /// Snapshot every layer of a table
    pub fn from_layers(
        name: impl Into<String>,
        layers: &Table<Layer>,
        current_layer: impl Into<String>,
    ) -> Result<Self> {
        let mut state = LayerState::new(name)?;
        state.current_layer = current_layer.into();
        for layer in layers.iter() {
            state.add_properties(LayerStateProperties::from_layer(layer));
        }
        Ok(state)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored layer properties in insertion order
    pub fn properties(&self) -> impl Iterator<Item = &LayerStateProperties> {
        self.properties.values()
    }

    /// Look up the properties stored for a layer (case-insensitive)
    pub fn get(&self, layer_name: &str) -> Option<&LayerStateProperties> {
        self.properties.get(&layer_name.to_uppercase())
    }

    pub fn get_mut(&mut self, layer_name: &str) -> Option<&mut LayerStateProperties> {
        self.properties.get_mut(&layer_name.to_uppercase())
    }

    /// Add properties for a layer. Returns `false` and keeps the existing
    /// entry when the layer is already present, or when the name is empty.
    pub fn add_properties(&mut self, properties: LayerStateProperties) -> bool {
        if properties.name.is_empty() {
            return false;
        }
        let key = properties.name.to_uppercase();
        if self.properties.contains_key(&key) {
            return false;
        }
        self.properties.insert(key, properties);
        true
    }

    pub fn remove_properties(&mut self, layer_name: &str) -> Option<LayerStateProperties> {
        self.properties.shift_remove(&layer_name.to_uppercase())
    }

    /// Number of layers stored
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Apply the stored properties to the matching layers of a table.
    ///
    /// Returns how many layers were updated; stored layers missing from the
    /// table are ignored.
    pub fn restore(
        &self,
        layers: &mut Table<Layer>,
        line_types: &Table<LineType>,
        restore: LayerPropertiesRestoreFlags,
    ) -> usize {
        let mut restored = 0;
        for properties in self.properties.values() {
            match layers.get_mut(properties.name()) {
                Some(layer) => {
                    properties.apply_to(layer, restore, line_types);
                    restored += 1;
                }
                None => debug!(layer = properties.name(), "no layer to restore"),
            }
        }
        restored
    }

    /// Read a single layer state stream. The reader must not have been
    /// advanced yet.
    pub fn read<R: ChunkReader + ?Sized>(reader: &mut R) -> Result<Self> {
        reader.next()?;
        expect_sentinel(reader, LAYER_STATE_DICTIONARY)?;
        reader.next()?;
        expect_sentinel(reader, LAYER_STATE)?;
        reader.next()?;
        Self::read_record(reader)
    }

    /// Write a complete single layer state stream and flush it
    pub fn write<W: ChunkWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_sentinel(LAYER_STATE_DICTIONARY)?;
        self.write_record(writer)?;
        writer.write_sentinel(END_OF_FILE)?;
        writer.flush()
    }

    /// Read a layer state from text
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut chunk = TextChunkReader::new(reader);
        Self::read(&mut chunk)
    }

    /// Write a layer state as text
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut chunk = TextChunkWriter::new(writer);
        self.write(&mut chunk)
    }

    /// Load a layer state file, returning `None` if it cannot be read or is
    /// not a valid layer state.
    pub fn load<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(state) => {
                info!(
                    path = %path.display(),
                    layers = state.len(),
                    "loaded layer state '{}'",
                    state.name
                );
                Some(state)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not load layer state");
                None
            }
        }
    }

    /// Load a layer state file, reporting why it failed
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(file)
    }

    /// Save to a file, returning whether the whole file was written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        match self.try_save(path) {
            Ok(()) => {
                info!(path = %path.display(), layers = self.len(), "saved layer state '{}'", self.name);
                true
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not save layer state");
                false
            }
        }
    }

    /// Save to a file, reporting why it failed.
    ///
    /// The stream goes to a sibling temporary file that replaces `path` only
    /// once it is complete.
    pub fn try_save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let temp = temporary_path(path);
        let written = File::create(&temp)
            .map_err(DxfError::from)
            .and_then(|file| {
                self.write_to(&file)?;
                file.sync_all()?;
                Ok(())
            })
            .and_then(|()| fs::rename(&temp, path).map_err(DxfError::from));

        if written.is_err() {
            let _ = fs::remove_file(&temp);
        }
        written
    }

    fn write_record<W: ChunkWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.write_sentinel(LAYER_STATE)?;
        writer.write_string(1, &self.name)?;
        writer.write_i32(91, RESERVED_MARKER)?;
        writer.write_string(301, &self.description)?;
        writer.write_bool(290, self.paper_space)?;
        writer.write_string(302, &self.current_layer)?;
        for properties in self.properties.values() {
            properties.write(writer)?;
        }
        Ok(())
    }

    /// Read the fields of one record. The reader sits on the first pair after
    /// the `LAYERSTATE` sentinel and is left on the code 0 pair that ends it.
    fn read_record<R: ChunkReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut name = String::new();
        let mut description = String::new();
        let mut current_layer = "0".to_string();
        let mut paper_space = false;
        let mut blocks = Vec::new();

        while reader.code() != 0 {
            match reader.code() {
                1 => name = reader.read_string()?,
                91 => {}
                301 => description = reader.read_string()?,
                290 => paper_space = reader.read_bool()?,
                302 => current_layer = reader.read_string()?,
                8 => {
                    // consumes the block up to the next 8 or 0
                    if let Some(properties) = LayerStateProperties::read(reader)? {
                        blocks.push(properties);
                    }
                    continue;
                }
                code => trace!(code = code, "skipping unknown layer state code"),
            }
            reader.next()?;
        }

        let mut state = LayerState::new(name)?;
        state.description = description;
        state.current_layer = current_layer;
        state.paper_space = paper_space;
        for properties in blocks {
            let layer = properties.name.clone();
            if !state.add_properties(properties) {
                debug!(layer = %layer, "ignoring repeated layer state block");
            }
        }
        Ok(state)
    }
}

/// Read every record of a layer state dictionary stream, up to the `EOF`
/// terminator.
pub fn read_layer_states<R: ChunkReader + ?Sized>(reader: &mut R) -> Result<Vec<LayerState>> {
    reader.next()?;
    expect_sentinel(reader, LAYER_STATE_DICTIONARY)?;
    reader.next()?;

    let mut states = Vec::new();
    loop {
        if reader.code() != 0 {
            return Err(unexpected_sentinel(reader, LAYER_STATE));
        }
        match reader.read_string()?.as_str() {
            LAYER_STATE => {
                reader.next()?;
                states.push(LayerState::read_record(reader)?);
            }
            END_OF_FILE => break,
            _ => return Err(unexpected_sentinel(reader, LAYER_STATE)),
        }
    }
    Ok(states)
}

/// Write several layer states into one dictionary stream and flush it.
pub fn write_layer_states<W: ChunkWriter + ?Sized>(
    writer: &mut W,
    states: &[LayerState],
) -> Result<()> {
    writer.write_sentinel(LAYER_STATE_DICTIONARY)?;
    for state in states {
        state.write_record(writer)?;
    }
    writer.write_sentinel(END_OF_FILE)?;
    writer.flush()
}

fn expect_sentinel<R: ChunkReader + ?Sized>(reader: &R, expected: &str) -> Result<()> {
    if reader.code() == 0 && reader.read_string()? == expected {
        Ok(())
    } else {
        Err(unexpected_sentinel(reader, expected))
    }
}

fn unexpected_sentinel<R: ChunkReader + ?Sized>(reader: &R, expected: &str) -> DxfError {
    let found = match reader.current() {
        Some(pair) if pair.code == 0 => pair.token.clone(),
        Some(pair) => format!("code {}", pair.code),
        None => String::new(),
    };
    DxfError::UnexpectedSentinel {
        expected: expected.to_string(),
        found,
    }
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
