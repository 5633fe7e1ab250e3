//! Validators for provider, assistant, conversation and pricing sections.

use crate::schema::ParleyConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_provider(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_range(
        errors,
        "provider.timeout_secs",
        config.provider.timeout_secs,
        1,
        600,
    );
    if let Some(ref model) = config.provider.model {
        validate_non_empty(errors, "provider.model", model);
    }
}

pub(crate) fn validate_assistant(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_non_empty(errors, "assistant.name", &config.assistant.name);
}

pub(crate) fn validate_conversation(errors: &mut Vec<String>, config: &ParleyConfig) {
    validate_non_empty(
        errors,
        "conversation.save_path",
        &config.conversation.save_path,
    );
}

pub(crate) fn validate_pricing(errors: &mut Vec<String>, config: &ParleyConfig) {
    let cost = config.pricing.cost_per_1k_tokens;
    if !(cost.is_finite() && cost >= 0.0) {
        errors.push(format!(
            "pricing.cost_per_1k_tokens = {cost} must be a non-negative number"
        ));
    }
}
