//! OpenAI client struct, request building, and response parsing.

use crate::http::build_client;
use crate::{Completion, CompletionRequest, ServiceError, TokenUsage};

use super::config::OpenAiConfig;

/// OpenAI API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ServiceError> {
        let http = build_client(config.timeout)?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the JSON request body for the Chat Completions API.
    pub(crate) fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<_> = request
            .turns
            .iter()
            .map(|t| {
                serde_json::json!({
                    "role": t.role.as_str(),
                    "content": t.content,
                })
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
        });

        let sampling = &request.sampling;
        if let Some(temperature) = sampling.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        if let Some(top_p) = sampling.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }
        if let Some(max_tokens) = sampling.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        if let Some(penalty) = sampling.frequency_penalty {
            body["frequency_penalty"] = serde_json::json!(penalty);
        }
        if let Some(penalty) = sampling.presence_penalty {
            body["presence_penalty"] = serde_json::json!(penalty);
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<Completion, ServiceError> {
        if let Some(message) = json["error"]["message"].as_str() {
            return Err(ServiceError::Api(message.to_string()));
        }

        let text = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ServiceError::Parse("response has no message content".into()))?;

        let usage = json
            .get("usage")
            .filter(|u| u.is_object())
            .map(|u| TokenUsage {
                input_tokens: u["prompt_tokens"].as_u64().unwrap_or(0),
                output_tokens: u["completion_tokens"].as_u64().unwrap_or(0),
            });

        Ok(Completion {
            text: text.to_string(),
            usage,
        })
    }
}
