//! Turn the loaded config into a session config and a completion service.

use std::sync::Arc;
use std::time::Duration;

use parley_ai::{
    AnthropicClient, AnthropicConfig, CompletionService, OpenAiClient, OpenAiConfig, Persona,
    SamplingParams, ServiceError, SessionConfig,
};
use parley_config::{AssistantConfig, ParleyConfig, ProviderKind, SamplingConfig};

use crate::credentials::Credentials;

/// Today's local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// System turn text: the literal override if configured, otherwise the
/// generated persona prompt.
pub fn persona_text(assistant: &AssistantConfig, today: &str) -> String {
    if let Some(ref prompt) = assistant.system_prompt {
        return prompt.clone();
    }
    Persona::new(
        assistant.name.as_str(),
        assistant.personality.as_str(),
        assistant.expertise.as_str(),
        assistant.current_date.as_deref().unwrap_or(today),
    )
    .system_prompt()
}

pub fn sampling_params(sampling: &SamplingConfig) -> SamplingParams {
    SamplingParams {
        temperature: sampling.temperature,
        top_p: sampling.top_p,
        max_tokens: sampling.max_tokens,
        frequency_penalty: sampling.frequency_penalty,
        presence_penalty: sampling.presence_penalty,
    }
}

pub fn session_config(config: &ParleyConfig, today: &str) -> SessionConfig {
    SessionConfig::new()
        .with_persona(persona_text(&config.assistant, today))
        .with_assistant_name(config.assistant.name.as_str())
        .with_sampling(sampling_params(&config.sampling))
        .with_cost_per_1k_tokens(config.pricing.cost_per_1k_tokens)
}

/// Construct the client for the configured provider.
pub fn build_service(
    config: &ParleyConfig,
    credentials: Credentials,
) -> Result<Arc<dyn CompletionService>, ServiceError> {
    let timeout = Duration::from_secs(config.provider.timeout_secs);
    let model = config.provider.model.as_deref();

    let service: Arc<dyn CompletionService> = match credentials.provider {
        ProviderKind::OpenAi => {
            let mut client_config = OpenAiConfig::new(credentials.api_key).with_timeout(timeout);
            if let Some(model) = model {
                client_config = client_config.with_model(model);
            }
            let client = OpenAiClient::new(client_config)?;
            tracing::info!(model = client.model(), "Using OpenAI");
            Arc::new(client)
        }
        ProviderKind::Anthropic => {
            let mut client_config =
                AnthropicConfig::new(credentials.api_key).with_timeout(timeout);
            if let Some(model) = model {
                client_config = client_config.with_model(model);
            }
            let client = AnthropicClient::new(client_config)?;
            tracing::info!(model = client.model(), "Using Anthropic");
            Arc::new(client)
        }
    };
    Ok(service)
}
