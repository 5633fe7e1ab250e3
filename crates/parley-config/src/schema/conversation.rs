//! Conversation memory, persistence and cost settings.

use serde::{Deserialize, Serialize};

/// Conversation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Replay earlier turns with each request. When false every input is
    /// answered in a fresh single-turn conversation.
    pub memory: bool,
    /// Default file for the `save` command.
    pub save_path: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            memory: true,
            save_path: "conversation.json".into(),
        }
    }
}

/// Naive cost estimate applied to reported token usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// USD per 1000 tokens (must be non-negative).
    pub cost_per_1k_tokens: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cost_per_1k_tokens: 0.002,
        }
    }
}
