//! Parley configuration system.
//!
//! Provides TOML-based configuration with validation. All config sections
//! use serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parley_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("provider: {}", config.provider.kind);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    AssistantConfig, ConversationConfig, LoggingConfig, ParleyConfig, PricingConfig,
    ProviderConfig, ProviderKind, SamplingConfig,
};

use std::path::Path;

use parley_common::ConfigError;

/// Load and validate the config.
///
/// With `path` set, that file must exist. Without it, `config.toml` is read
/// from the OS config directory and a documented default is written there
/// if none exists yet.
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sampling]\ntemperature = 1.5\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("sampling.temperature"));
    }

    #[test]
    fn load_config_with_explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
