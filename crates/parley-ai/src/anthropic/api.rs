//! CompletionService implementation for AnthropicClient.

use async_trait::async_trait;
use tracing::debug;

use crate::http::post_json;
use crate::{Completion, CompletionRequest, CompletionService, ServiceError};

use super::client::{AnthropicClient, ANTHROPIC_API_URL, ANTHROPIC_VERSION};

#[async_trait]
impl CompletionService for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ServiceError> {
        let body = self.build_request_body(request);

        debug!(model = %self.config.model, "Anthropic API request");

        let builder = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);
        let json = post_json(builder, &body).await?;

        self.parse_response(json)
    }
}
