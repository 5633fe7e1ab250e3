//! Full configuration validation.
//!
//! Validates numeric ranges and required strings. Each area has its own
//! submodule; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod misc;
mod sampling;


use crate::schema::ParleyConfig;
use parley_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sampling::validate_sampling(&mut errors, config);
    misc::validate_provider(&mut errors, config);
    misc::validate_assistant(&mut errors, config);
    misc::validate_conversation(&mut errors, config);
    misc::validate_pricing(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
