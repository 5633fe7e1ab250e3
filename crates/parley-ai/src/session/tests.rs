//! Session behavior against in-process completion services.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::*;
use crate::{
    Completion, CompletionRequest, CompletionService, Role, SamplingParams, ServiceError,
    TokenUsage, Turn,
};

/// Replies from a script and records every request it receives.
struct ScriptedService {
    replies: Mutex<VecDeque<Result<Completion, ServiceError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    fn new(replies: Vec<Result<Completion, ServiceError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Api("script exhausted".into())))
    }
}

/// Blocks every call until released.
struct GatedService {
    gate: Notify,
    entered: Notify,
}

#[async_trait]
impl CompletionService for GatedService {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ServiceError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(reply("released"))
    }
}

/// Never answers.
struct SilentService;

#[async_trait]
impl CompletionService for SilentService {
    fn name(&self) -> &str {
        "silent"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion, ServiceError> {
        std::future::pending().await
    }
}

fn reply(text: &str) -> Completion {
    Completion {
        text: text.into(),
        usage: None,
    }
}

fn metered(text: &str, tokens: u64) -> Completion {
    Completion {
        text: text.into(),
        usage: Some(TokenUsage {
            input_tokens: tokens,
            output_tokens: 0,
        }),
    }
}

fn echo_config() -> SessionConfig {
    SessionConfig::new().with_persona("You are Echo.")
}

#[test]
fn new_session_seeds_persona() {
    let session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));
    assert_eq!(session.turns(), vec![Turn::system("You are Echo.")]);
    assert!(!session.is_busy());
}

#[test]
fn new_session_without_persona_is_empty() {
    let session = ConversationSession::new(SessionConfig::new(), ScriptedService::new(vec![]));
    assert_eq!(session.turn_count(), 0);
}

#[tokio::test]
async fn successful_exchange_records_both_turns() {
    let service = ScriptedService::new(vec![Ok(reply("hello"))]);
    let session = ConversationSession::new(echo_config(), service.clone());

    let answer = session.exchange("hi").await.unwrap();

    assert_eq!(answer, "hello");
    assert_eq!(
        session.turns(),
        vec![
            Turn::system("You are Echo."),
            Turn::user("hi"),
            Turn::assistant("hello"),
        ]
    );
}

#[tokio::test]
async fn failed_exchange_keeps_only_the_user_turn() {
    let service = ScriptedService::new(vec![
        Ok(reply("hello")),
        Err(ServiceError::Network("connection reset".into())),
    ]);
    let session = ConversationSession::new(echo_config(), service);

    session.exchange("hi").await.unwrap();
    let err = session.exchange("bye").await.unwrap_err();

    assert!(matches!(err, ExchangeError::Upstream(ref msg) if msg.contains("connection reset")));
    let turns = session.turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[3], Turn::user("bye"));
}

#[tokio::test]
async fn transcript_grows_by_two_per_exchange() {
    let replies = (0..5).map(|i| Ok(reply(&format!("r{i}")))).collect();
    let session = ConversationSession::new(echo_config(), ScriptedService::new(replies));

    for i in 0..5 {
        session.exchange(format!("q{i}")).await.unwrap();
        assert_eq!(session.turn_count(), 1 + 2 * (i + 1));
    }

    let turns = session.turns();
    for i in 0..5 {
        assert_eq!(turns[1 + 2 * i], Turn::user(format!("q{i}")));
        assert_eq!(turns[2 + 2 * i], Turn::assistant(format!("r{i}")));
    }
}

#[tokio::test]
async fn request_replays_whole_transcript_with_sampling() {
    let sampling = SamplingParams::default()
        .with_temperature(0.7)
        .with_max_tokens(500);
    let service = ScriptedService::new(vec![Ok(reply("a")), Ok(reply("b"))]);
    let session =
        ConversationSession::new(echo_config().with_sampling(sampling.clone()), service.clone());

    session.exchange("first").await.unwrap();
    session.exchange("second").await.unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].turns.len(), 2);
    assert_eq!(
        requests[1].turns,
        vec![
            Turn::system("You are Echo."),
            Turn::user("first"),
            Turn::assistant("a"),
            Turn::user("second"),
        ]
    );
    assert_eq!(requests[1].sampling, sampling);
}

#[tokio::test]
async fn unanswered_user_turn_is_replayed_next_time() {
    let service = ScriptedService::new(vec![Err(ServiceError::RateLimited), Ok(reply("ok"))]);
    let session = ConversationSession::new(SessionConfig::new(), service.clone());

    assert!(session.exchange("one").await.is_err());
    session.exchange("two").await.unwrap();

    let last = service.requests().pop().unwrap();
    assert_eq!(last.turns, vec![Turn::user("one"), Turn::user("two")]);
    assert_eq!(
        session.turns().iter().map(|t| t.role).collect::<Vec<_>>(),
        vec![Role::User, Role::User, Role::Assistant]
    );
}

#[tokio::test]
async fn usage_accumulates_over_successful_exchanges() {
    let service = ScriptedService::new(vec![
        Ok(metered("a", 10)),
        Err(ServiceError::Timeout),
        Ok(metered("b", 15)),
        Ok(reply("c")),
    ]);
    let session = ConversationSession::new(SessionConfig::new(), service);

    let mut last = 0;
    for text in ["1", "2", "3", "4"] {
        let _ = session.exchange(text).await;
        let total = session.usage().total_tokens();
        assert!(total >= last);
        last = total;
    }

    let usage = session.usage();
    assert_eq!(usage.total_tokens(), 25);
    assert_eq!(usage.exchanges(), 2);
    assert!((usage.total_cost() - 25.0 / 1000.0 * 0.002).abs() < 1e-12);
}

#[tokio::test]
async fn concurrent_exchange_is_rejected_as_busy() {
    let service = Arc::new(GatedService {
        gate: Notify::new(),
        entered: Notify::new(),
    });
    let session = ConversationSession::new(echo_config(), service.clone());

    let first = session.exchange("first");
    let second = async {
        service.entered.notified().await;
        assert!(session.is_busy());
        let result = session.exchange("second").await;
        service.gate.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap(), "released");
    assert_eq!(second.unwrap_err(), ExchangeError::Busy);
    assert_eq!(
        session.turns(),
        vec![
            Turn::system("You are Echo."),
            Turn::user("first"),
            Turn::assistant("released"),
        ]
    );
    assert!(!session.is_busy());
}

#[tokio::test(start_paused = true)]
async fn timeout_is_an_upstream_error() {
    let config = SessionConfig::new().with_timeout(Duration::from_secs(5));
    let session = ConversationSession::new(config, Arc::new(SilentService));

    let err = session.exchange("anyone there?").await.unwrap_err();

    assert_eq!(err, ExchangeError::Upstream("request timed out".into()));
    assert_eq!(session.turns(), vec![Turn::user("anyone there?")]);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn dropped_exchange_releases_busy_flag() {
    let session = ConversationSession::new(SessionConfig::new(), Arc::new(SilentService));

    let pending = session.exchange("hello");
    let _ = tokio::time::timeout(Duration::from_millis(10), pending).await;

    assert!(!session.is_busy());
}

#[tokio::test]
async fn serialize_then_restore_round_trips() {
    let service = ScriptedService::new(vec![Ok(reply("hello")), Err(ServiceError::RateLimited)]);
    let session = ConversationSession::new(echo_config(), service);
    session.exchange("hi").await.unwrap();
    let _ = session.exchange("again").await;

    let bytes = session.serialize().unwrap();
    let mut other = ConversationSession::new(SessionConfig::new(), ScriptedService::new(vec![]));
    other.restore(&bytes).unwrap();

    assert_eq!(other.transcript(), session.transcript());
}

#[tokio::test]
async fn restore_replaces_transcript_and_resets_usage() {
    let service = ScriptedService::new(vec![Ok(metered("hello", 42))]);
    let mut session = ConversationSession::new(echo_config(), service);
    session.exchange("hi").await.unwrap();
    assert_eq!(session.usage().total_tokens(), 42);

    session
        .restore(br#"[{"role": "user", "content": "from disk"}]"#)
        .unwrap();

    assert_eq!(session.turns(), vec![Turn::user("from disk")]);
    assert_eq!(session.usage().total_tokens(), 0);
}

#[test]
fn malformed_restore_leaves_session_unchanged() {
    let mut session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let err = session.restore(b"not a transcript").unwrap_err();

    assert!(matches!(err, PersistenceError::Malformed(_)));
    assert_eq!(session.turns(), vec![Turn::system("You are Echo.")]);
}

#[tokio::test]
async fn save_and_load_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.json");
    let session = ConversationSession::new(
        echo_config(),
        ScriptedService::new(vec![Ok(reply("hello"))]),
    );
    session.exchange("hi").await.unwrap();

    session.save_to_path(&path).unwrap();
    let mut loaded = ConversationSession::new(SessionConfig::new(), ScriptedService::new(vec![]));
    loaded.load_from_path(&path).unwrap();

    assert_eq!(loaded.transcript(), session.transcript());
    assert!(!dir.path().join("conversation.json.tmp").exists());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\n  {"), "expected 2-space indented JSON");
}

#[test]
fn save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.json");
    std::fs::write(&path, "old contents").unwrap();
    let session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    session.save_to_path(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, session.serialize().unwrap());
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let mut session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let err = session.load_from_path(&path).unwrap_err();

    assert!(matches!(err, PersistenceError::NotFound(ref p) if p == &path));
    assert_eq!(session.turn_count(), 1);
}

#[test]
fn load_garbage_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "not a transcript").unwrap();
    let mut session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let err = session.load_from_path(&path).unwrap_err();

    assert!(matches!(err, PersistenceError::Malformed(_)));
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("conversation.json");
    let session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let err = session.save_to_path(&path).unwrap_err();

    assert!(matches!(err, PersistenceError::Io { .. }));
}

#[test]
fn failed_in_place_write_removes_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.json");
    std::fs::create_dir(&path).unwrap();
    let session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let err = session.save_to_path(&path).unwrap_err();

    assert!(matches!(err, PersistenceError::Io { .. }));
    assert!(path.is_dir());
    assert!(!dir.path().join("conversation.json.tmp").exists());
}

#[test]
fn serialize_writes_role_content_records() {
    let session = ConversationSession::new(echo_config(), ScriptedService::new(vec![]));

    let value: serde_json::Value = serde_json::from_slice(&session.serialize().unwrap()).unwrap();

    assert_eq!(
        value,
        serde_json::json!([{"role": "system", "content": "You are Echo."}])
    );
}
