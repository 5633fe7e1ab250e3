//! OpenAI Chat Completions API client.
//!
//! Implements `CompletionService` via
//! https://api.openai.com/v1/chat/completions. The transcript is sent as-is,
//! system turn included, and all sampling parameters are supported.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
