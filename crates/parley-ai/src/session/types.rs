//! Session configuration and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::sampling::SamplingParams;

use super::error::ExchangeError;

/// Fixed at session creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// System turn text. Empty means no system turn.
    pub persona: String,
    /// Shown in front of replies by front ends.
    pub assistant_name: String,
    pub sampling: SamplingParams,
    /// Upper bound on one service call. `None` relies on the client's own
    /// timeout.
    pub timeout: Option<Duration>,
    /// USD per 1000 tokens for the cost estimate.
    pub cost_per_1k_tokens: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persona: String::new(),
            assistant_name: "Assistant".into(),
            sampling: SamplingParams::default(),
            timeout: None,
            cost_per_1k_tokens: 0.002,
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_assistant_name(mut self, name: impl Into<String>) -> Self {
        self.assistant_name = name.into();
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cost_per_1k_tokens(mut self, cost: f64) -> Self {
        self.cost_per_1k_tokens = cost;
        self
    }
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy lock. Returns `Err` if already busy.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, ExchangeError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ExchangeError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
