//! Naming-convention resolution of enum types.
//!
//! `enumerate("sex")` without an explicit type looks for a type named `Sex`;
//! `enumerate("user_roles")` looks for `UserRole`.

use crate::catalog::EnumCatalog;
use crate::error::{EnumError, Result};
use crate::table::EnumRef;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct EnumResolver {
    catalog: Arc<dyn EnumCatalog>,
}

impl EnumResolver {
    pub fn new(catalog: Arc<dyn EnumCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve the enum type for `attribute` of `owner`.
    ///
    /// An absent type becomes [`EnumError::EnumNotFound`]; catalog errors are
    /// returned as-is.
    pub fn resolve(&self, owner: &str, attribute: &str) -> Result<EnumRef> {
        let type_name = classify(attribute);
        debug!(owner, attribute, type_name = %type_name, "resolving enum type by convention");

        self.catalog
            .locate(&type_name)?
            .ok_or_else(|| EnumError::EnumNotFound {
                attribute: attribute.to_string(),
                owner: owner.to_string(),
            })
    }
}

impl std::fmt::Debug for EnumResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumResolver").finish_non_exhaustive()
    }
}

/// Derive a type name from an attribute name: singular, camel-cased.
pub fn classify(attribute: &str) -> String {
    let singular = singularize(attribute.trim());
    singular
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if let Some(stem) = lower.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", &word[..stem.len()]);
        }
    }
    for suffix in ["sses", "shes", "ches", "xes", "uses"] {
        if lower.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if ["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return word.to_string();
    }
    match lower.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => word[..stem.len()].to_string(),
        _ => word.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
