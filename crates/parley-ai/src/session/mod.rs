//! Conversation session management.
//!
//! A `ConversationSession` holds the transcript and usage totals, replays
//! the transcript to its `CompletionService` on each exchange, and saves or
//! restores the transcript as JSON.

mod error;
mod exchange;
mod manager;
mod persistence;
mod types;

#[cfg(test)]
mod tests;

pub use error::{ExchangeError, PersistenceError};
pub use manager::ConversationSession;
pub use types::SessionConfig;
