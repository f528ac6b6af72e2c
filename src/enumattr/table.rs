//! Enum lookup tables.
//!
//! A lookup table translates between the three faces of an enum entry:
//! the raw code stored on the model, the symbolic key used in code
//! (`"male"`), and the display name (`"Male"`).
//!
//! [`EnumLookup`] is the contract the overlay relies on. [`EnumTable`] is the
//! in-memory implementation shipped with the crate; it can be built in code
//! or deserialized from JSON/TOML.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// The scalar physically stored for an enumerated attribute.
pub type RawCode = i64;

/// Shared handle to a bound lookup table.
pub type EnumRef = Arc<dyn EnumLookup>;

/// A single record of a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    pub id: RawCode,
    pub key: String,
    pub name: String,
}

impl EnumEntry {
    pub fn new(id: RawCode, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: normalize_key(&key.into()),
            name: name.into(),
        }
    }
}

/// What to translate with [`EnumLookup::map_to_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// A raw code; maps to the entry's display name.
    Id(RawCode),
    /// A symbolic key; maps to the entry's raw code.
    Key(&'a str),
}

/// Result of [`EnumLookup::map_to_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapped<'a> {
    Id(RawCode),
    Name(&'a str),
}

/// Bidirectional translation between raw codes, keys and display names.
///
/// Only [`type_name`](EnumLookup::type_name) and
/// [`entries`](EnumLookup::entries) are required; lookups default to a
/// linear scan, which implementors backed by an index can override.
pub trait EnumLookup: Debug + Send + Sync {
    /// Name of the enum type, e.g. `"Sex"`.
    fn type_name(&self) -> &str;

    fn entries(&self) -> &[EnumEntry];

    fn find_by_id(&self, id: RawCode) -> Option<&EnumEntry> {
        self.entries().iter().find(|entry| entry.id == id)
    }

    /// Keys are compared after normalization, so `"Male"`, `"male"` and
    /// `" MALE "` all find the same entry. A key that normalizes to nothing
    /// finds nothing.
    fn find_by_key(&self, key: &str) -> Option<&EnumEntry> {
        let key = normalize_key(key);
        if key.is_empty() {
            return None;
        }
        self.entries().iter().find(|entry| entry.key == key)
    }

    /// Raw code → display name, key → raw code.
    fn map_to_value(&self, lookup: Lookup<'_>) -> Option<Mapped<'_>> {
        match lookup {
            Lookup::Id(id) => self.find_by_id(id).map(|e| Mapped::Name(e.name.as_str())),
            Lookup::Key(key) => self.find_by_key(key).map(|e| Mapped::Id(e.id)),
        }
    }

    fn id_for(&self, key: &str) -> Option<RawCode> {
        match self.map_to_value(Lookup::Key(key))? {
            Mapped::Id(id) => Some(id),
            Mapped::Name(_) => None,
        }
    }

    fn name_for(&self, id: RawCode) -> Option<&str> {
        match self.map_to_value(Lookup::Id(id))? {
            Mapped::Name(name) => Some(name),
            Mapped::Id(_) => None,
        }
    }
}

/// In-memory lookup table.
///
/// ```
/// use enumattr::{EnumLookup, EnumTable};
///
/// let sex = EnumTable::new("Sex").value(1, "Male").value(2, "Female");
/// assert_eq!(sex.id_for("female"), Some(2));
/// assert_eq!(sex.name_for(1), Some("Male"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TableDef")]
pub struct EnumTable {
    name: String,
    entries: Vec<EnumEntry>,
}

impl EnumTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry whose key is derived from its display name.
    pub fn value(self, id: RawCode, name: impl Into<String>) -> Self {
        let name = name.into();
        let key = normalize_key(&name);
        self.entry(id, key, name)
    }

    /// Add an entry with an explicit key. An existing entry with the same
    /// raw code is replaced.
    pub fn entry(mut self, id: RawCode, key: impl Into<String>, name: impl Into<String>) -> Self {
        let entry = EnumEntry::new(id, key, name);
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    pub fn into_ref(self) -> EnumRef {
        Arc::new(self)
    }
}

impl EnumLookup for EnumTable {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> &[EnumEntry] {
        &self.entries
    }
}

#[derive(Deserialize)]
struct TableDef {
    name: String,
    #[serde(default)]
    entries: Vec<EntryDef>,
}

#[derive(Deserialize)]
struct EntryDef {
    id: RawCode,
    name: String,
    #[serde(default)]
    key: Option<String>,
}

impl From<TableDef> for EnumTable {
    fn from(def: TableDef) -> Self {
        def.entries
            .into_iter()
            .fold(EnumTable::new(def.name), |table, e| match e.key {
                Some(key) => table.entry(e.id, key, e.name),
                None => table.value(e.id, e.name),
            })
    }
}

/// Normalize a symbolic key to lower snake case: `"In Progress"` → `"in_progress"`.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}
