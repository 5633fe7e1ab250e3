//! The ordered record of a conversation and its JSON form.
//!
//! On disk a transcript is a JSON array of `{"role", "content"}` records in
//! chronological order, the same shape the chat APIs accept.

use serde::{Deserialize, Serialize};

use crate::session::PersistenceError;
use crate::{Role, Turn};

/// Ordered turns. A system turn, if any, is the first and only one.
///
/// Consecutive turns of the same role are kept as recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript seeded with a system turn. An empty prompt seeds nothing.
    pub fn with_system_prompt(prompt: &str) -> Self {
        let mut transcript = Self::new();
        if !prompt.is_empty() {
            transcript.turns.push(Turn::system(prompt));
        }
        transcript
    }

    /// Build a transcript from existing turns, applying the checks used
    /// when restoring a saved file.
    pub fn from_turns(turns: Vec<Turn>) -> Result<Self, PersistenceError> {
        if let Some(pos) = turns
            .iter()
            .skip(1)
            .position(|t| t.role == Role::System)
        {
            return Err(PersistenceError::Malformed(format!(
                "system turn at index {} (only index 0 may be a system turn)",
                pos + 1
            )));
        }
        Ok(Self { turns })
    }

    /// Serialize as a pretty-printed JSON array.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec_pretty(&self.turns)
            .map_err(|e| PersistenceError::Encode(e.to_string()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let turns: Vec<Turn> = serde_json::from_slice(bytes)
            .map_err(|e| PersistenceError::Malformed(e.to_string()))?;
        Self::from_turns(turns)
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        debug_assert!(turn.role != Role::System || self.turns.is_empty());
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn has_system_prompt(&self) -> bool {
        self.turns.first().is_some_and(|t| t.role == Role::System)
    }
}
