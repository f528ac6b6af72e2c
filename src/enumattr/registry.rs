//! Attribute → enum type bindings for one owning type.

use crate::table::EnumRef;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Bindings are written during model setup and read on every overlay call.
#[derive(Debug)]
pub struct EnumRegistry {
    owner: String,
    bindings: RwLock<HashMap<String, EnumRef>>,
}

impl EnumRegistry {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            bindings: RwLock::new(HashMap::new()),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Bind `attribute` to `enum_type`, returning the binding it replaced.
    pub fn register(&self, attribute: &str, enum_type: EnumRef) -> Option<EnumRef> {
        self.bindings.write().insert(attribute.to_string(), enum_type)
    }

    pub fn lookup(&self, attribute: &str) -> Option<EnumRef> {
        self.bindings.read().get(attribute).cloned()
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.bindings.read().contains_key(attribute)
    }

    /// Bound attribute names, sorted.
    pub fn attributes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}
