//! Declaring enumerated attributes.
//!
//! An [`EnumDefinition`] belongs to one model type. During setup it is
//! mutated with [`enumerate`](EnumDefinition::enumerate); afterwards it is
//! shared read-only (typically from a `once_cell::sync::Lazy` static) and
//! hands out the [`EnumAttribute`] overlays.
//!
//! ```
//! use enumattr::{EnumDefinition, EnumTable, EnumTypes, EnumerateOptions, RawAttributes, RawCode};
//!
//! #[derive(Default)]
//! struct User {
//!     sex: Option<RawCode>,
//! }
//!
//! impl RawAttributes for User {
//!     fn read_raw(&self, _: &str) -> Option<RawCode> {
//!         self.sex
//!     }
//!
//!     fn write_raw(&mut self, _: &str, value: Option<RawCode>) -> enumattr::Result<()> {
//!         self.sex = value;
//!         Ok(())
//!     }
//! }
//!
//! let types = EnumTypes::new().with(EnumTable::new("Sex").value(1, "Male").value(2, "Female"));
//! let mut users = EnumDefinition::<User>::new("User", types.into_shared());
//! users.enumerate("sex", EnumerateOptions::default()).unwrap();
//!
//! let mut user = User::default();
//! users.write(&mut user, "sex", "female").unwrap();
//! assert_eq!(user.sex, Some(2));
//! assert!(users.check(&user, "sex", Some("female")).unwrap());
//! ```

use crate::accessor::{AccessorOverrides, OriginalAccessors, RawAttributes};
use crate::catalog::EnumCatalog;
use crate::config::Settings;
use crate::error::{EnumError, Result};
use crate::overlay::{EnumAttribute, EnumInput, EnumValue, ReadMode};
use crate::registry::EnumRegistry;
use crate::resolver::EnumResolver;
use crate::table::{EnumLookup, EnumRef, RawCode};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Options for [`EnumDefinition::enumerate`].
#[derive(Debug, Clone, Default)]
pub struct EnumerateOptions {
    /// Explicit enum type; resolved by naming convention when `None`.
    pub with: Option<EnumRef>,
}

impl EnumerateOptions {
    pub fn with(enum_type: EnumRef) -> Self {
        Self {
            with: Some(enum_type),
        }
    }
}

/// Enumerated attributes of one model type.
pub struct EnumDefinition<M> {
    registry: Arc<EnumRegistry>,
    resolver: EnumResolver,
    settings: Arc<Settings>,
    overrides: HashMap<String, AccessorOverrides<M>>,
    overlays: BTreeMap<String, EnumAttribute<M>>,
}

impl<M: RawAttributes + 'static> EnumDefinition<M> {
    pub fn new(owner: impl Into<String>, catalog: Arc<dyn EnumCatalog>) -> Self {
        Self {
            registry: Arc::new(EnumRegistry::new(owner)),
            resolver: EnumResolver::new(catalog),
            settings: Settings::global(),
            overrides: HashMap::new(),
            overlays: BTreeMap::new(),
        }
    }

    /// Like [`new`](Self::new), with the owner named after `M`.
    pub fn for_type(catalog: Arc<dyn EnumCatalog>) -> Self {
        Self::new(short_type_name::<M>(), catalog)
    }

    /// Use `settings` instead of the process-wide [`Settings::global`].
    ///
    /// Affects overlays installed after this call.
    pub fn with_settings(mut self, settings: Arc<Settings>) -> Self {
        self.settings = settings;
        self
    }

    /// Declare `attribute` enumerated and install its overlay.
    ///
    /// Without `options.with` the enum type is resolved from the attribute
    /// name; a missing type fails with [`EnumError::EnumNotFound`] and leaves
    /// the definition untouched. Declaring an attribute again rebinds it.
    pub fn enumerate(
        &mut self,
        attribute: &str,
        options: EnumerateOptions,
    ) -> Result<&EnumAttribute<M>> {
        let enum_type = match options.with {
            Some(enum_type) => enum_type,
            None => self.resolver.resolve(self.owner(), attribute)?,
        };
        debug!(
            owner = self.owner(),
            attribute,
            enum_type = enum_type.type_name(),
            "enumerated attribute"
        );

        if let Some(previous) = self.registry.register(attribute, enum_type) {
            debug!(
                attribute,
                previous = previous.type_name(),
                "replaced enum binding"
            );
        }
        Ok(self.install(attribute))
    }

    pub fn enumerate_with(&mut self, attribute: &str, enum_type: EnumRef) -> Result<&EnumAttribute<M>> {
        self.enumerate(attribute, EnumerateOptions::with(enum_type))
    }

    /// Replace the generated reader of `attribute`.
    pub fn override_reader<F>(&mut self, attribute: &str, read: F) -> &mut Self
    where
        F: Fn(&M) -> Option<RawCode> + Send + Sync + 'static,
    {
        self.overrides.entry(attribute.to_string()).or_default().read = Some(Arc::new(read));
        self.reinstall(attribute)
    }

    /// Replace the generated writer of `attribute`.
    pub fn override_writer<F>(&mut self, attribute: &str, write: F) -> &mut Self
    where
        F: Fn(&mut M, Option<RawCode>) -> Result<()> + Send + Sync + 'static,
    {
        self.overrides.entry(attribute.to_string()).or_default().write = Some(Arc::new(write));
        self.reinstall(attribute)
    }

    /// Replace the generated predicate of `attribute`.
    pub fn override_query<F>(&mut self, attribute: &str, query: F) -> &mut Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.overrides.entry(attribute.to_string()).or_default().query = Some(Arc::new(query));
        self.reinstall(attribute)
    }

    // An overlay captures its originals when installed, so a late override
    // needs a fresh overlay to be wrapped.
    fn reinstall(&mut self, attribute: &str) -> &mut Self {
        if self.registry.contains(attribute) {
            trace!(attribute, "re-installing overlay over custom accessor");
            self.install(attribute);
        }
        self
    }

    fn install(&mut self, attribute: &str) -> &EnumAttribute<M> {
        let original = OriginalAccessors::compose(attribute, self.overrides.get(attribute));
        let overlay = EnumAttribute::new(
            attribute,
            Arc::clone(&self.registry),
            Arc::clone(&self.settings),
            original,
        );
        match self.overlays.entry(attribute.to_string()) {
            Entry::Occupied(mut slot) => {
                slot.insert(overlay);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(overlay),
        }
    }
}

impl<M> EnumDefinition<M> {
    pub fn owner(&self) -> &str {
        self.registry.owner()
    }

    pub fn registry(&self) -> &Arc<EnumRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// The enum type bound to `attribute`, if it is enumerated.
    pub fn enum_for(&self, attribute: &str) -> Option<EnumRef> {
        self.registry.lookup(attribute)
    }

    pub fn attribute(&self, attribute: &str) -> Option<&EnumAttribute<M>> {
        self.overlays.get(attribute)
    }

    /// Installed overlays, ordered by attribute name.
    pub fn attributes(&self) -> impl Iterator<Item = &EnumAttribute<M>> {
        self.overlays.values()
    }

    pub fn read(&self, model: &M, attribute: &str, mode: ReadMode) -> Result<Option<EnumValue>> {
        Ok(self.require(attribute)?.read(model, mode))
    }

    pub fn write(&self, model: &mut M, attribute: &str, value: impl Into<EnumInput>) -> Result<()> {
        self.require(attribute)?.write(model, value)
    }

    pub fn check(&self, model: &M, attribute: &str, key: Option<&str>) -> Result<bool> {
        Ok(self.require(attribute)?.check(model, key))
    }

    fn require(&self, attribute: &str) -> Result<&EnumAttribute<M>> {
        self.overlays
            .get(attribute)
            .ok_or_else(|| EnumError::NotEnumerated {
                owner: self.owner().to_string(),
                attribute: attribute.to_string(),
            })
    }
}

impl<M> fmt::Debug for EnumDefinition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumDefinition")
            .field("owner", &self.owner())
            .field("attributes", &self.registry.attributes())
            .finish_non_exhaustive()
    }
}

/// Models whose enumerated attributes live in a static definition.
///
/// ```ignore
/// static USER_ENUMS: Lazy<EnumDefinition<User>> = Lazy::new(|| { ... });
///
/// impl Enumerated for User {
///     fn enum_definition() -> &'static EnumDefinition<Self> {
///         &USER_ENUMS
///     }
/// }
///
/// user.enum_write("sex", "male")?;
/// assert!(user.enum_check("sex", Some("male"))?);
/// ```
pub trait Enumerated: RawAttributes + Sized + 'static {
    fn enum_definition() -> &'static EnumDefinition<Self>;

    fn enum_for(attribute: &str) -> Option<EnumRef> {
        Self::enum_definition().enum_for(attribute)
    }

    fn enum_read(&self, attribute: &str, mode: ReadMode) -> Result<Option<EnumValue>> {
        Self::enum_definition().read(self, attribute, mode)
    }

    fn enum_write<V: Into<EnumInput>>(&mut self, attribute: &str, value: V) -> Result<()> {
        Self::enum_definition().write(self, attribute, value)
    }

    fn enum_check(&self, attribute: &str, key: Option<&str>) -> Result<bool> {
        Self::enum_definition().check(self, attribute, key)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
