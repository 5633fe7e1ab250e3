//! Assistant persona configuration.

use serde::{Deserialize, Serialize};

/// How the assistant presents itself.
///
/// `name`, `personality` and `expertise` are rendered into a structured
/// system prompt unless `system_prompt` gives the text verbatim. An empty
/// `system_prompt` disables the system turn entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Display name, used as the reply prefix in the REPL.
    pub name: String,
    pub personality: String,
    pub expertise: String,
    pub system_prompt: Option<String>,
    /// Date shown in the generated prompt (`YYYY-MM-DD`). Defaults to today.
    pub current_date: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "Assistant".into(),
            personality: "helpful".into(),
            expertise: "general knowledge".into(),
            system_prompt: None,
            current_date: None,
        }
    }
}
