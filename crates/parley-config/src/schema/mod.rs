//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults documented on each field.

mod assistant;
mod conversation;
mod provider;
mod sampling;
mod system;

pub use assistant::*;
pub use conversation::*;
pub use provider::*;
pub use sampling::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Parley.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub provider: ProviderConfig,
    pub assistant: AssistantConfig,
    pub sampling: SamplingConfig,
    pub conversation: ConversationConfig,
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
