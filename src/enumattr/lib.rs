//! # enumattr
//!
//! Enumerated-type semantics for model attributes that store a raw scalar.
//!
//! A model keeps storing a plain code (`sex = 1`). Declaring the attribute
//! enumerated installs an overlay that can:
//!
//! - **Read** the value as the raw code, the display name, or the enum table
//! - **Write** either a raw code or a symbolic key (`"male"`)
//! - **Check** the stored value against a symbolic key
//!
//! ## Building Blocks
//!
//! | Item | Role |
//! |------|------|
//! | [`EnumLookup`] / [`EnumTable`] | Translate between raw codes, keys and names |
//! | [`EnumCatalog`] / [`EnumTypes`] | Find enum types by name |
//! | [`EnumResolver`] | Derive a type name from an attribute name (`sex` → `Sex`) |
//! | [`EnumRegistry`] | Attribute → enum type bindings of one model type |
//! | [`EnumDefinition`] | Declares attributes and owns their overlays |
//! | [`EnumAttribute`] | The read / write / check overlay of one attribute |
//! | [`Settings`] | `use_name_as_value` and the unmapped-key policy |
//!
//! ## Usage
//!
//! ```ignore
//! let mut people = EnumDefinition::<Person>::new("Person", types.into_shared());
//! people.enumerate("sex", EnumerateOptions::default())?;     // resolves `Sex`
//!
//! people.write(&mut person, "sex", "male")?;                  // stores 1
//! people.read(&person, "sex", ReadMode::Name)?;               // Some(Name("Male"))
//! people.check(&person, "sex", Some("female"))?;              // false
//! ```

pub mod accessor;
pub mod binder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod overlay;
pub mod registry;
pub mod resolver;
pub mod table;

#[cfg(test)]
mod test_utils;

pub use accessor::{AccessorKind, OriginalAccessors, QueryFn, RawAttributes, ReadFn, WriteFn};
pub use binder::{EnumDefinition, EnumerateOptions, Enumerated};
pub use catalog::{EnumCatalog, EnumTypes};
pub use config::{EnumConfig, Settings, UnmappedKeyPolicy};
pub use error::{EnumError, Result};
pub use filter::{EnumFilter, FilterOp};
pub use overlay::{EnumAttribute, EnumInput, EnumValue, ReadMode};
pub use registry::EnumRegistry;
pub use resolver::{classify, EnumResolver};
pub use table::{normalize_key, EnumEntry, EnumLookup, EnumRef, EnumTable, Lookup, Mapped, RawCode};
