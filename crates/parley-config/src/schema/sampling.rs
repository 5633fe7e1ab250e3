//! Sampling parameters forwarded with every completion request.

use serde::{Deserialize, Serialize};

/// Sampling configuration. Unset fields fall back to the provider default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Randomness (valid range: 0.0-1.0).
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold (valid range: 0.0-1.0).
    pub top_p: Option<f64>,
    /// Maximum output length in tokens (must be at least 1).
    pub max_tokens: Option<u32>,
    /// Valid range: -2.0-2.0.
    pub frequency_penalty: Option<f64>,
    /// Valid range: -2.0-2.0.
    pub presence_penalty: Option<f64>,
}
