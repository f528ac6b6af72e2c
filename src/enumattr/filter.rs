//! Enum attribute filtering.
//!
//! `EnumFilter` expresses a condition on an enumerated attribute in terms of
//! symbolic keys and evaluates it through the attribute's predicate overlay,
//! so raw codes never leak into filter definitions.

use crate::binder::EnumDefinition;

/// Filter operation on an enumerated attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// The stored entry is the first key's entry. Further keys are ignored.
    Eq,
    /// The stored entry is not the first key's entry. Further keys are ignored.
    Ne,
    /// The stored entry is one of the keys' entries (OR logic).
    In,
}

/// A filter condition on an enumerated attribute.
///
/// Combines an attribute name, an operation, and the symbolic keys to match.
/// `Eq` and `Ne` take a single key; use `In` to match any of several.
#[derive(Debug, Clone)]
pub struct EnumFilter {
    /// The attribute name (e.g., "sex", "status")
    pub attribute: String,
    /// The filter operation
    pub op: FilterOp,
    /// Symbolic keys to compare against
    pub keys: Vec<String>,
}

impl EnumFilter {
    /// Create a new filter condition.
    pub fn new(attribute: impl Into<String>, op: FilterOp, keys: Vec<String>) -> Self {
        Self {
            attribute: attribute.into(),
            op,
            keys,
        }
    }

    /// Convenience: create an equality filter.
    pub fn eq(attribute: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(attribute, FilterOp::Eq, vec![key.into()])
    }

    /// Convenience: create a not-equal filter.
    pub fn ne(attribute: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(attribute, FilterOp::Ne, vec![key.into()])
    }

    /// Convenience: create a filter matching any of `keys`.
    pub fn any_of<I, K>(attribute: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(
            attribute,
            FilterOp::In,
            keys.into_iter().map(Into::into).collect(),
        )
    }

    /// Check if `model` satisfies this filter.
    ///
    /// An attribute that is not enumerated in `definition` matches nothing,
    /// `Ne` included.
    pub fn matches<M>(&self, definition: &EnumDefinition<M>, model: &M) -> bool {
        let Some(overlay) = definition.attribute(&self.attribute) else {
            return false;
        };
        let is = |key: &String| overlay.is(model, key);

        match self.op {
            FilterOp::Eq => self.keys.first().is_some_and(is),
            FilterOp::Ne => !self.keys.first().is_some_and(is),
            FilterOp::In => self.keys.iter().any(is),
        }
    }

    /// Keep the models that satisfy this filter.
    pub fn apply<'a, M>(
        &self,
        definition: &EnumDefinition<M>,
        models: impl IntoIterator<Item = &'a M>,
    ) -> Vec<&'a M>
    where
        M: 'a,
    {
        models
            .into_iter()
            .filter(|model| self.matches(definition, model))
            .collect()
    }
}
