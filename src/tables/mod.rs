//! Table entries referenced by layer states, and the name lookup table

use crate::error::{DxfError, Result};
use indexmap::IndexMap;

pub mod layer;
pub mod linetype;

pub use layer::{Layer, LayerFlags};
pub use linetype::{LineType, LineTypeElement};

/// Characters AutoCAD forbids in table entry names
const INVALID_NAME_CHARS: &[char] = &['<', '>', '/', '\\', '"', ':', ';', '?', '*', '|', ',', '=', '`'];

/// Check whether a name may be used for a table entry or layer state.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(INVALID_NAME_CHARS)
}

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's name
    fn name(&self) -> &str;

    /// Check if this is a standard/default entry
    fn is_standard(&self) -> bool {
        false
    }
}

/// Named entries with case-insensitive lookup, kept in insertion order.
///
/// This is the lookup service name references are resolved against.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<()> {
        if !is_valid_name(entry.name()) {
            return Err(DxfError::InvalidValue(format!(
                "'{}' is not a valid table entry name",
                entry.name()
            )));
        }
        let key = entry.name().to_uppercase();
        if self.entries.contains_key(&key) {
            return Err(DxfError::InvalidValue(format!(
                "entry '{}' already exists in table",
                entry.name()
            )));
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Remove an entry by name (case-insensitive)
    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.entries.shift_remove(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterate over all entries mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
