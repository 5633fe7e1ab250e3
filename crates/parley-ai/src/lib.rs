//! Conversation engine for Parley.
//!
//! Provides:
//! - `ConversationSession`: an ordered transcript replayed to a completion
//!   service on every exchange, with save/load and usage accounting
//! - `CompletionService`: the seam to a hosted model API
//! - OpenAI Chat Completions and Anthropic Messages clients

pub mod anthropic;
mod http;
pub mod openai;
pub mod persona;
pub mod sampling;
pub mod session;
pub mod transcript;
pub mod usage;

use std::fmt;

use async_trait::async_trait;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use persona::Persona;
pub use sampling::SamplingParams;
pub use session::{ConversationSession, ExchangeError, PersistenceError, SessionConfig};
pub use transcript::Transcript;
pub use usage::UsageStats;

/// A hosted text-completion API.
///
/// Implementations receive the whole projected transcript on every call
/// and must not keep conversation state of their own.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ServiceError>;
}

/// One recorded utterance.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a session hands to a [`CompletionService`] for one exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The full transcript, system turn first when present.
    pub turns: Vec<Turn>,
    pub sampling: SamplingParams,
}

impl CompletionRequest {
    /// Content of the leading system turn, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.turns
            .first()
            .filter(|t| t.role == Role::System)
            .map(|t| t.content.as_str())
    }
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Present when the provider reported metering.
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    Api(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("request timed out")]
    Timeout,
}
