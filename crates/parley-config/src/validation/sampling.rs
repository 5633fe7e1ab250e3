//! Sampling parameter validation.

use crate::schema::ParleyConfig;

use super::helpers::validate_optional_f64;

pub(crate) fn validate_sampling(errors: &mut Vec<String>, config: &ParleyConfig) {
    let s = &config.sampling;
    validate_optional_f64(errors, "sampling.temperature", s.temperature, 0.0, 1.0);
    validate_optional_f64(errors, "sampling.top_p", s.top_p, 0.0, 1.0);
    validate_optional_f64(
        errors,
        "sampling.frequency_penalty",
        s.frequency_penalty,
        -2.0,
        2.0,
    );
    validate_optional_f64(
        errors,
        "sampling.presence_penalty",
        s.presence_penalty,
        -2.0,
        2.0,
    );
    if s.max_tokens == Some(0) {
        errors.push("sampling.max_tokens must be at least 1".into());
    }
}
