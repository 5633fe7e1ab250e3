//! Anthropic Messages API client.
//!
//! Implements `CompletionService` for Claude models via
//! https://api.anthropic.com/v1/messages. The system turn travels in the
//! top-level `system` field rather than in `messages`.

mod api;
mod client;
mod config;

pub use client::AnthropicClient;
pub use config::AnthropicConfig;
