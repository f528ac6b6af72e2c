//! Enum-aware accessors layered over an attribute's original accessors.
//!
//! An [`EnumAttribute`] is installed per enumerated attribute. It looks up
//! the attribute's enum type in the shared registry on each call, so a
//! re-declaration is picked up by overlays already handed out.
//!
//! | Call | Behaviour |
//! |------|-----------|
//! | `read(m, Default)` | raw code, or display name when `use_name_as_value` is set |
//! | `read(m, Id)` | raw code, only if the table has an entry for it |
//! | `read(m, Name)` | display name of the raw code |
//! | `read(m, Enum)` | the bound table |
//! | `write(m, key)` | raw code of `key` |
//! | `write(m, raw)` | `raw`, unchanged |
//! | `check(m, Some(key))` | stored entry == entry of `key` |
//! | `check(m, None)` | original predicate |

use crate::accessor::OriginalAccessors;
use crate::config::{Settings, UnmappedKeyPolicy};
use crate::error::{EnumError, Result};
use crate::registry::EnumRegistry;
use crate::table::{EnumLookup, EnumRef, Lookup, Mapped, RawCode};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Which face of the value a read returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    #[default]
    Default,
    Id,
    Name,
    Enum,
}

/// Unknown mode names parse to [`ReadMode::Default`].
impl FromStr for ReadMode {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "id" => ReadMode::Id,
            "name" => ReadMode::Name,
            "enum" => ReadMode::Enum,
            _ => ReadMode::Default,
        })
    }
}

impl From<&str> for ReadMode {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// Result of an overlay read.
#[derive(Debug, Clone)]
pub enum EnumValue {
    Id(RawCode),
    Name(String),
    Enum(EnumRef),
}

impl EnumValue {
    pub fn as_id(&self) -> Option<RawCode> {
        match self {
            EnumValue::Id(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            EnumValue::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumRef> {
        match self {
            EnumValue::Enum(table) => Some(table),
            _ => None,
        }
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EnumValue::Id(a), EnumValue::Id(b)) => a == b,
            (EnumValue::Name(a), EnumValue::Name(b)) => a == b,
            (EnumValue::Enum(a), EnumValue::Enum(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Id(id) => write!(f, "{id}"),
            EnumValue::Name(name) => f.write_str(name),
            EnumValue::Enum(table) => f.write_str(table.type_name()),
        }
    }
}

/// Value accepted by an overlay write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumInput {
    /// Stored as given.
    Raw(Option<RawCode>),
    /// Translated to its raw code first.
    Key(String),
}

impl From<RawCode> for EnumInput {
    fn from(value: RawCode) -> Self {
        EnumInput::Raw(Some(value))
    }
}

impl From<i32> for EnumInput {
    fn from(value: i32) -> Self {
        EnumInput::Raw(Some(RawCode::from(value)))
    }
}

impl From<Option<RawCode>> for EnumInput {
    fn from(value: Option<RawCode>) -> Self {
        EnumInput::Raw(value)
    }
}

impl From<&str> for EnumInput {
    fn from(key: &str) -> Self {
        EnumInput::Key(key.to_string())
    }
}

impl From<String> for EnumInput {
    fn from(key: String) -> Self {
        EnumInput::Key(key)
    }
}

/// The read/write/check overlay of one enumerated attribute.
pub struct EnumAttribute<M> {
    name: String,
    registry: Arc<EnumRegistry>,
    settings: Arc<Settings>,
    original: OriginalAccessors<M>,
}

impl<M> EnumAttribute<M> {
    pub(crate) fn new(
        name: impl Into<String>,
        registry: Arc<EnumRegistry>,
        settings: Arc<Settings>,
        original: OriginalAccessors<M>,
    ) -> Self {
        Self {
            name: name.into(),
            registry,
            settings,
            original,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The enum type currently bound in the registry.
    pub fn enum_type(&self) -> Option<EnumRef> {
        self.registry.lookup(&self.name)
    }

    /// The accessors this overlay delegates to.
    pub fn original(&self) -> &OriginalAccessors<M> {
        &self.original
    }

    pub fn read(&self, model: &M, mode: ReadMode) -> Option<EnumValue> {
        let raw = self.original.read(model);
        let table = self.enum_type();

        match mode {
            ReadMode::Id => {
                let id = raw?;
                table?.find_by_id(id).map(|_| EnumValue::Id(id))
            }
            ReadMode::Name => display_name(table.as_ref(), raw).map(EnumValue::Name),
            ReadMode::Enum => table.map(EnumValue::Enum),
            ReadMode::Default if self.settings.use_name_as_value() => {
                display_name(table.as_ref(), raw).map(EnumValue::Name)
            }
            ReadMode::Default => raw.map(EnumValue::Id),
        }
    }

    pub fn read_default(&self, model: &M) -> Option<EnumValue> {
        self.read(model, ReadMode::Default)
    }

    /// Store a raw code, or the raw code of a symbolic key.
    ///
    /// Raw codes are not validated. A key without an entry follows the
    /// configured [`UnmappedKeyPolicy`].
    pub fn write(&self, model: &mut M, value: impl Into<EnumInput>) -> Result<()> {
        match value.into() {
            EnumInput::Raw(raw) => self.original.write(model, raw),
            EnumInput::Key(key) => {
                let table = self.enum_type();
                let mapped = table.as_ref().and_then(|t| match t.map_to_value(Lookup::Key(&key)) {
                    Some(Mapped::Id(id)) => Some(id),
                    _ => None,
                });
                match mapped {
                    Some(id) => self.original.write(model, Some(id)),
                    None => self.write_unmapped(model, &key, table.as_ref()),
                }
            }
        }
    }

    fn write_unmapped(&self, model: &mut M, key: &str, table: Option<&EnumRef>) -> Result<()> {
        let enum_type = table.map_or("<unbound>", |t| t.type_name()).to_string();
        let policy = self.settings.unmapped_key();
        warn!(attribute = %self.name, key, enum_type = %enum_type, ?policy, "write of unmapped enum key");

        match policy {
            UnmappedKeyPolicy::Clear => self.original.write(model, None),
            UnmappedKeyPolicy::Keep => Ok(()),
            UnmappedKeyPolicy::Reject => Err(EnumError::UnmappedKey {
                attribute: self.name.clone(),
                key: key.to_string(),
                enum_type,
            }),
        }
    }

    /// With a key: whether the stored value is that key's entry.
    /// Without: the original predicate.
    pub fn check(&self, model: &M, key: Option<&str>) -> bool {
        let Some(key) = key else {
            return self.original.query(model);
        };
        let Some(table) = self.enum_type() else {
            return false;
        };
        let Some(raw) = self.original.read(model) else {
            return false;
        };
        match (table.find_by_id(raw), table.find_by_key(key)) {
            (Some(stored), Some(wanted)) => stored == wanted,
            _ => false,
        }
    }

    pub fn is(&self, model: &M, key: &str) -> bool {
        self.check(model, Some(key))
    }
}

fn display_name(table: Option<&EnumRef>, raw: Option<RawCode>) -> Option<String> {
    table?.name_for(raw?).map(str::to_string)
}

impl<M> fmt::Debug for EnumAttribute<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumAttribute")
            .field("name", &self.name)
            .field("owner", &self.registry.owner())
            .field("original", &self.original)
            .finish_non_exhaustive()
    }
}
