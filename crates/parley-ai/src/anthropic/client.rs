//! Anthropic client struct, request building, and response parsing.

use tracing::debug;

use crate::http::build_client;
use crate::{Completion, CompletionRequest, Role, ServiceError, TokenUsage};

use super::config::AnthropicConfig;

pub(crate) const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic API client.
pub struct AnthropicClient {
    pub(crate) config: AnthropicConfig,
    pub(crate) http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self, ServiceError> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the JSON request body for the Messages API.
    pub(crate) fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<_> = request
            .turns
            .iter()
            .filter(|t| t.role != Role::System)
            .map(|t| {
                serde_json::json!({
                    "role": t.role.as_str(),
                    "content": t.content,
                })
            })
            .collect();

        let sampling = &request.sampling;
        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": sampling.max_tokens.unwrap_or(self.config.default_max_tokens),
            "messages": messages,
        });

        if let Some(system) = request.system_prompt() {
            body["system"] = serde_json::json!(system);
        }
        if let Some(temperature) = sampling.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(top_p) = sampling.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }
        if sampling.has_penalties() {
            debug!("Messages API has no frequency/presence penalties, dropping them");
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<Completion, ServiceError> {
        if json["type"] == "error" {
            let message = json["error"]["message"].as_str().unwrap_or("unknown error");
            return Err(ServiceError::Api(message.to_string()));
        }

        let blocks = json["content"]
            .as_array()
            .ok_or_else(|| ServiceError::Parse("response has no content array".into()))?;
        let texts: Vec<&str> = blocks
            .iter()
            .filter(|b| b["type"] == "text")
            .filter_map(|b| b["text"].as_str())
            .collect();
        if texts.is_empty() {
            return Err(ServiceError::Parse("response contained no text block".into()));
        }

        let usage = json.get("usage").map(|u| TokenUsage {
            input_tokens: u["input_tokens"].as_u64().unwrap_or(0),
            output_tokens: u["output_tokens"].as_u64().unwrap_or(0),
        });

        Ok(Completion {
            text: texts.concat(),
            usage,
        })
    }
}
