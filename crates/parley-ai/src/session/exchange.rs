//! The request/response cycle.

use tracing::{debug, warn};

use crate::{Completion, CompletionRequest, ServiceError, Turn};

use super::error::ExchangeError;
use super::manager::{lock, ConversationSession};
use super::types::BusyGuard;

impl ConversationSession {
    /// Record `user_text`, send the whole transcript to the service, and
    /// record the reply.
    ///
    /// On failure the user turn stays in the transcript and no assistant
    /// turn follows it. A call made while another exchange is in flight
    /// returns [`ExchangeError::Busy`] without touching the transcript.
    pub async fn exchange(&self, user_text: impl Into<String>) -> Result<String, ExchangeError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let request = {
            let mut transcript = lock(&self.transcript);
            transcript.push(Turn::user(user_text));
            CompletionRequest {
                turns: transcript.turns().to_vec(),
                sampling: self.config.sampling.clone(),
            }
        };

        debug!(
            session = %self.id.short(),
            provider = self.service.name(),
            turns = request.turns.len(),
            "Sending completion request"
        );

        let completion = self.call_service(&request).await.map_err(|e| {
            warn!(session = %self.id.short(), error = %e, "Exchange failed");
            ExchangeError::from(e)
        })?;

        lock(&self.transcript).push(Turn::assistant(completion.text.clone()));
        if let Some(usage) = completion.usage {
            lock(&self.usage).record(&usage, self.config.cost_per_1k_tokens);
        } else {
            debug!(session = %self.id.short(), "No usage reported");
        }

        Ok(completion.text)
    }

    async fn call_service(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, ServiceError> {
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, self.service.complete(request))
                .await
                .unwrap_or(Err(ServiceError::Timeout)),
            None => self.service.complete(request).await,
        }
    }
}
