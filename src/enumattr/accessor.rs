//! Raw accessors of a model attribute.
//!
//! A model exposes its raw fields through [`RawAttributes`]. From that trait
//! every attribute gets generated read, write and query accessors. A model
//! definition may replace any of the three with a custom closure; the
//! overlay then wraps the custom one instead of the generated one.

use crate::error::Result;
use crate::table::RawCode;
use std::fmt;
use std::sync::Arc;

pub type ReadFn<M> = Arc<dyn Fn(&M) -> Option<RawCode> + Send + Sync>;
pub type WriteFn<M> = Arc<dyn Fn(&mut M, Option<RawCode>) -> Result<()> + Send + Sync>;
pub type QueryFn<M> = Arc<dyn Fn(&M) -> bool + Send + Sync>;

/// Storage contract for models with enumerated attributes.
pub trait RawAttributes {
    fn read_raw(&self, attribute: &str) -> Option<RawCode>;

    fn write_raw(&mut self, attribute: &str, value: Option<RawCode>) -> Result<()>;

    /// Whether the attribute holds a value.
    fn raw_present(&self, attribute: &str) -> bool {
        self.read_raw(attribute).is_some()
    }
}

/// Which of the three accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Read,
    Write,
    Query,
}

/// The accessors an overlay delegates to.
pub struct OriginalAccessors<M> {
    pub(crate) read: ReadFn<M>,
    pub(crate) write: WriteFn<M>,
    pub(crate) query: QueryFn<M>,
    custom: Vec<AccessorKind>,
}

impl<M: RawAttributes + 'static> OriginalAccessors<M> {
    /// Accessors generated from [`RawAttributes`] for `attribute`.
    pub fn generated(attribute: &str) -> Self {
        let (r, w, q) = (
            attribute.to_string(),
            attribute.to_string(),
            attribute.to_string(),
        );
        Self {
            read: Arc::new(move |model: &M| model.read_raw(&r)),
            write: Arc::new(move |model: &mut M, value| model.write_raw(&w, value)),
            query: Arc::new(move |model: &M| model.raw_present(&q)),
            custom: Vec::new(),
        }
    }

    /// Generated accessors, with any custom ones from `overrides` in their place.
    pub(crate) fn compose(attribute: &str, overrides: Option<&AccessorOverrides<M>>) -> Self {
        let mut accessors = Self::generated(attribute);
        let Some(overrides) = overrides else {
            return accessors;
        };
        if let Some(read) = &overrides.read {
            accessors.read = Arc::clone(read);
            accessors.custom.push(AccessorKind::Read);
        }
        if let Some(write) = &overrides.write {
            accessors.write = Arc::clone(write);
            accessors.custom.push(AccessorKind::Write);
        }
        if let Some(query) = &overrides.query {
            accessors.query = Arc::clone(query);
            accessors.custom.push(AccessorKind::Query);
        }
        accessors
    }
}

impl<M> OriginalAccessors<M> {
    pub fn read(&self, model: &M) -> Option<RawCode> {
        (self.read)(model)
    }

    pub fn write(&self, model: &mut M, value: Option<RawCode>) -> Result<()> {
        (self.write)(model, value)
    }

    pub fn query(&self, model: &M) -> bool {
        (self.query)(model)
    }

    /// Whether `kind` is a custom accessor rather than a generated one.
    pub fn is_custom(&self, kind: AccessorKind) -> bool {
        self.custom.contains(&kind)
    }
}

impl<M> fmt::Debug for OriginalAccessors<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginalAccessors")
            .field("custom", &self.custom)
            .finish_non_exhaustive()
    }
}

/// Custom accessors registered for one attribute.
pub(crate) struct AccessorOverrides<M> {
    pub(crate) read: Option<ReadFn<M>>,
    pub(crate) write: Option<WriteFn<M>>,
    pub(crate) query: Option<QueryFn<M>>,
}

impl<M> Default for AccessorOverrides<M> {
    fn default() -> Self {
        Self {
            read: None,
            write: None,
            query: None,
        }
    }
}
