//! Session struct and transcript access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use parley_common::SessionId;
use tracing::debug;

use crate::transcript::Transcript;
use crate::usage::UsageStats;
use crate::{CompletionService, Turn};

use super::types::SessionConfig;

/// A conversation with one completion service.
///
/// Exchanges take `&self` so a session can be shared; only one may be in
/// flight at a time; a second concurrent call fails with
/// [`ExchangeError::Busy`](super::ExchangeError::Busy). Replacing the
/// transcript needs `&mut self`, which rules out an exchange running at the
/// same time.
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) config: SessionConfig,
    pub(super) service: Arc<dyn CompletionService>,
    pub(super) transcript: Mutex<Transcript>,
    pub(super) usage: Mutex<UsageStats>,
    /// Whether an exchange is currently in flight.
    pub(super) busy: AtomicBool,
}

impl ConversationSession {
    /// Start a session. A non-empty `config.persona` becomes turn 0.
    pub fn new(config: SessionConfig, service: Arc<dyn CompletionService>) -> Self {
        let transcript = Transcript::with_system_prompt(&config.persona);
        let id = SessionId::new();
        debug!(
            session = %id.short(),
            provider = service.name(),
            seeded = transcript.has_system_prompt(),
            "Session created"
        );
        Self {
            id,
            config,
            service,
            transcript: Mutex::new(transcript),
            usage: Mutex::new(UsageStats::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        lock(&self.transcript).clone()
    }

    /// Snapshot of the turns in order.
    pub fn turns(&self) -> Vec<Turn> {
        lock(&self.transcript).turns().to_vec()
    }

    pub fn turn_count(&self) -> usize {
        lock(&self.transcript).len()
    }

    pub fn usage(&self) -> UsageStats {
        *lock(&self.usage)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Lock a session mutex. The guarded data stays consistent even if a
/// holder panicked, since every critical section is a single push or copy.
pub(super) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
