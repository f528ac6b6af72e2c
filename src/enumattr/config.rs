//! # Configuration
//!
//! Enum behaviour that is not per-attribute lives in [`EnumConfig`], loaded
//! with [`confique`] from layered sources.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ENUMATTR_USE_NAME_AS_VALUE`.
//! 2. **Config file**: an optional TOML file passed to [`EnumConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `use_name_as_value` | `false` | Bare reads return the display name instead of the raw code |
//! | `unmapped_key` | `"clear"` | What writing an unknown symbolic key does (`clear`, `keep`, `reject`) |
//!
//! The loaded values seed a [`Settings`] handle, which is what overlays read
//! at call time. [`Settings::global`] is the process-wide instance.

use crate::error::Result;
use confique::Config;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// What a write of an unmapped symbolic key stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedKeyPolicy {
    /// Store an absent value.
    #[default]
    Clear,
    /// Leave the stored value untouched.
    Keep,
    /// Fail the write with [`EnumError::UnmappedKey`](crate::EnumError::UnmappedKey).
    Reject,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnumConfig {
    /// Return display names from reads without an explicit mode.
    #[config(default = false, env = "ENUMATTR_USE_NAME_AS_VALUE")]
    pub use_name_as_value: bool,

    /// Policy for writing a symbolic key that has no entry.
    #[config(default = "clear")]
    pub unmapped_key: UnmappedKeyPolicy,
}

impl Default for EnumConfig {
    fn default() -> Self {
        Self {
            use_name_as_value: false,
            unmapped_key: UnmappedKeyPolicy::Clear,
        }
    }
}

impl EnumConfig {
    /// Load from the environment, then `path` if given, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

/// Live, shareable view of an [`EnumConfig`].
#[derive(Debug)]
pub struct Settings {
    use_name_as_value: AtomicBool,
    unmapped_key: RwLock<UnmappedKeyPolicy>,
}

static GLOBAL: Lazy<Arc<Settings>> = Lazy::new(|| {
    let config = EnumConfig::load(None).unwrap_or_else(|err| {
        warn!(error = %err, "invalid enum configuration in environment, using defaults");
        EnumConfig::default()
    });
    Arc::new(Settings::new(&config))
});

impl Default for Settings {
    fn default() -> Self {
        Self::new(&EnumConfig::default())
    }
}

impl Settings {
    pub fn new(config: &EnumConfig) -> Self {
        Self {
            use_name_as_value: AtomicBool::new(config.use_name_as_value),
            unmapped_key: RwLock::new(config.unmapped_key),
        }
    }

    pub fn shared(config: &EnumConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// The process-wide settings, loaded from the environment on first use.
    pub fn global() -> Arc<Settings> {
        Arc::clone(&GLOBAL)
    }

    pub fn use_name_as_value(&self) -> bool {
        self.use_name_as_value.load(Ordering::Relaxed)
    }

    pub fn set_use_name_as_value(&self, value: bool) {
        self.use_name_as_value.store(value, Ordering::Relaxed);
    }

    pub fn unmapped_key(&self) -> UnmappedKeyPolicy {
        *self.unmapped_key.read()
    }

    pub fn set_unmapped_key(&self, policy: UnmappedKeyPolicy) {
        *self.unmapped_key.write() = policy;
    }

    /// Current values as a plain config.
    pub fn snapshot(&self) -> EnumConfig {
        EnumConfig {
            use_name_as_value: self.use_name_as_value(),
            unmapped_key: self.unmapped_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EnumConfig::default();
        assert!(!config.use_name_as_value);
        assert_eq!(config.unmapped_key, UnmappedKeyPolicy::Clear);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "unmapped_key = \"reject\"").unwrap();

        let config = EnumConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.unmapped_key, UnmappedKeyPolicy::Reject);
    }

    #[test]
    fn test_load_invalid_policy_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "unmapped_key = \"explode\"").unwrap();

        assert!(EnumConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_settings_mirror_config() {
        let settings = Settings::new(&EnumConfig {
            use_name_as_value: true,
            unmapped_key: UnmappedKeyPolicy::Keep,
        });
        assert!(settings.use_name_as_value());
        assert_eq!(settings.unmapped_key(), UnmappedKeyPolicy::Keep);
    }

    #[test]
    fn test_settings_can_be_flipped() {
        let settings = Settings::default();
        settings.set_use_name_as_value(true);
        settings.set_unmapped_key(UnmappedKeyPolicy::Reject);
        assert_eq!(
            settings.snapshot(),
            EnumConfig {
                use_name_as_value: true,
                unmapped_key: UnmappedKeyPolicy::Reject,
            }
        );
    }

    #[test]
    fn test_policy_serializes_snake_case() {
        let json = serde_json::to_string(&UnmappedKeyPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }
}
