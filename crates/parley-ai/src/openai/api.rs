//! CompletionService implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::http::post_json;
use crate::{Completion, CompletionRequest, CompletionService, ServiceError};

use super::client::OpenAiClient;

#[async_trait]
impl CompletionService for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ServiceError> {
        let body = self.build_request_body(request);

        debug!(model = %self.config.model, "OpenAI API request");

        let builder = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key);
        let json = post_json(builder, &body).await?;

        self.parse_response(json)
    }
}
