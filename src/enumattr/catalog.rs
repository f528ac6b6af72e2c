//! Enum type catalogs.
//!
//! A catalog is the typed stand-in for "look the type up by name": the
//! resolver derives a type name from an attribute name and asks the catalog
//! for it. Catalogs report an unknown name as `Ok(None)`; anything else that
//! goes wrong while locating a type is an `Err` and is passed through to the
//! caller untouched.

use crate::error::Result;
use crate::table::{EnumLookup, EnumRef};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub trait EnumCatalog: Send + Sync {
    /// Locate an enum type by name. `Ok(None)` means the type does not exist.
    fn locate(&self, type_name: &str) -> Result<Option<EnumRef>>;
}

/// In-memory catalog keyed by [`EnumLookup::type_name`].
#[derive(Debug, Default)]
pub struct EnumTypes {
    types: RwLock<HashMap<String, EnumRef>>,
}

impl EnumTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(self, table: impl EnumLookup + 'static) -> Self {
        self.register(Arc::new(table));
        self
    }

    /// Register a type under its own name, replacing any previous one.
    pub fn register(&self, table: EnumRef) -> Option<EnumRef> {
        let name = table.type_name().to_string();
        self.types.write().insert(name, table)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.read().contains_key(type_name)
    }

    pub fn into_shared(self) -> Arc<dyn EnumCatalog> {
        Arc::new(self)
    }
}

impl EnumCatalog for EnumTypes {
    fn locate(&self, type_name: &str) -> Result<Option<EnumRef>> {
        Ok(self.types.read().get(type_name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::EnumTable;

    #[test]
    fn locate_known_type() {
        let types = EnumTypes::new().with(EnumTable::new("Sex").value(1, "Male"));
        let found = types.locate("Sex").unwrap().unwrap();
        assert_eq!(found.type_name(), "Sex");
        assert!(types.contains("Sex"));
    }

    #[test]
    fn locate_unknown_type_is_none() {
        let types = EnumTypes::new();
        assert!(types.locate("Sex").unwrap().is_none());
    }

    #[test]
    fn register_replaces_same_name() {
        let types = EnumTypes::new().with(EnumTable::new("Sex").value(1, "Male"));
        let previous = types.register(EnumTable::new("Sex").value(1, "Man").into_ref());
        assert!(previous.is_some());
        let found = types.locate("Sex").unwrap().unwrap();
        assert_eq!(found.name_for(1), Some("Man"));
    }
}
