//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Parley Configuration
# Only override what you want to change -- missing fields use defaults.

[provider]
kind = "openai"          # openai, anthropic
# model = "gpt-3.5-turbo"
# timeout_secs = 120     # 1-600

[assistant]
# name = "Assistant"
# personality = "helpful"
# expertise = "general knowledge"
# current_date = "2025-03-08"
# Replaces the generated persona prompt. Set to "" to send no system turn.
# system_prompt = "You are a helpful assistant."

[sampling]
# Unset values use the provider's own defaults.
# temperature = 0.7        # 0.0-1.0
# top_p = 0.9              # 0.0-1.0
# max_tokens = 500
# frequency_penalty = 0.5  # -2.0-2.0 (openai only)
# presence_penalty = 0.5   # -2.0-2.0 (openai only)

[conversation]
# memory = true
# save_path = "conversation.json"

[pricing]
# cost_per_1k_tokens = 0.002

[logging]
# level = "parley=warn"
"##
    .to_string()
}
