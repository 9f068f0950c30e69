//! Per-turn dispatch orchestration.
//!
//! `ChatController` owns the conversation log for one session and drives the
//! `Idle -> AwaitingResponse -> Idle` cycle for each user submission: it
//! classifies intent, invokes the matching remote operation, and appends the
//! resulting message(s). Every failure path recovers locally by appending
//! exactly one user-visible message; no remote failure can leave the log
//! inconsistent or escape to the rendering layer.

use crate::presets;
use saathi_core::chat::{ChatMessage, Connectivity, ConversationLog, WireMessage};
use saathi_core::intent;
use saathi_interaction::SaathiBackend;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Why a submission was rejected without touching the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty after trimming.
    EmptyInput,
    /// A previous turn is still awaiting its remote response.
    TurnInFlight,
}

/// How a submitted turn resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Submission was a no-op; nothing was appended.
    Rejected(RejectReason),
    /// Scan branch completed; a formatted report was appended.
    Scanned,
    /// Scan branch failed; a failure notice was appended.
    ScanFailed,
    /// Scan intent without a target URL; guidance appended, zero remote calls.
    GuidanceIssued,
    /// Chat branch got a model reply.
    Answered,
    /// Chat branch failed; the helpline fallback was appended.
    FallbackIssued,
}

/// Orchestrates one chat session against a backend.
///
/// The controller is the single writer of its log; turns are strictly
/// serialized by the pending-turn guard, so no two remote dispatches for
/// the same session are ever in flight at once. Connectivity is shared
/// with the health probe, which may run concurrently but only ever touches
/// that flag.
pub struct ChatController<B> {
    backend: Arc<B>,
    log: ConversationLog,
    pending_turn: bool,
    connectivity: Arc<RwLock<Connectivity>>,
}

impl<B: SaathiBackend> ChatController<B> {
    /// Creates a session seeded with the standard greeting.
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            log: ConversationLog::new(presets::GREETING),
            pending_turn: false,
            connectivity: Arc::new(RwLock::new(Connectivity::Connected)),
        }
    }

    /// Read-only view of the transcript.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// True while a remote chat or scan response is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending_turn
    }

    /// Shared connectivity flag, handed to the health probe.
    pub fn connectivity_handle(&self) -> Arc<RwLock<Connectivity>> {
        Arc::clone(&self.connectivity)
    }

    /// Current advisory connectivity state.
    pub async fn connectivity(&self) -> Connectivity {
        *self.connectivity.read().await
    }

    /// Resets the transcript to the single greeting message.
    pub fn clear(&mut self) {
        self.log.reset();
    }

    /// Runs one full turn for the given input.
    ///
    /// Empty-after-trim input and overlapping submissions are rejected as
    /// no-ops. Otherwise the user message is appended immediately, the
    /// turn is dispatched to the scan or chat branch, and the pending flag
    /// is cleared again on every path.
    pub async fn submit(&mut self, input: &str) -> TurnOutcome {
        if input.trim().is_empty() {
            return TurnOutcome::Rejected(RejectReason::EmptyInput);
        }
        if self.pending_turn {
            tracing::debug!("[ChatController] submission rejected: turn in flight");
            return TurnOutcome::Rejected(RejectReason::TurnInFlight);
        }

        self.log.append(ChatMessage::user(input));
        self.pending_turn = true;

        let outcome = if intent::is_url_scan_request(input) {
            match intent::extract_url(input) {
                Some(url) => {
                    let url = url.to_string();
                    self.run_scan(&url).await
                }
                None => {
                    self.log.append(ChatMessage::info(presets::NO_URL_GUIDANCE));
                    TurnOutcome::GuidanceIssued
                }
            }
        } else {
            self.run_chat().await
        };

        self.pending_turn = false;
        outcome
    }

    async fn run_scan(&mut self, url: &str) -> TurnOutcome {
        self.log
            .append(ChatMessage::info(presets::scanning_notice(url)));

        match self.backend.scan_url(url).await {
            Ok(result) => {
                self.log.append(ChatMessage::scan_result(result.to_report()));
                TurnOutcome::Scanned
            }
            Err(e) => {
                tracing::warn!("[ChatController] URL scan failed: {e}");
                self.log
                    .append(ChatMessage::info(presets::scan_failure_notice(&e)));
                TurnOutcome::ScanFailed
            }
        }
    }

    async fn run_chat(&mut self) -> TurnOutcome {
        let mut messages = Vec::with_capacity(self.log.len() + 1);
        messages.push(WireMessage::system(presets::SYSTEM_PROMPT));
        messages.extend(self.log.to_wire());

        match self.backend.chat(&messages).await {
            Ok(reply) => {
                self.log.append(ChatMessage::assistant(reply));
                TurnOutcome::Answered
            }
            Err(e) => {
                tracing::warn!("[ChatController] chat completion failed: {e}");
                self.log.append(ChatMessage::emergency(presets::CHAT_FALLBACK));
                TurnOutcome::FallbackIssued
            }
        }
    }

    #[cfg(test)]
    fn force_pending(&mut self, pending: bool) {
        self.pending_turn = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use saathi_core::chat::{MessageKind, Sender, WireRole};
    use saathi_core::scan::{RiskLevel, ScanDetails, UrlScanResult};
    use saathi_core::{Result, SaathiError};
    use saathi_interaction::dto::{HealthReport, NewsArticle};
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every remote call; replies are canned per operation.
    struct MockBackend {
        calls: Mutex<Vec<String>>,
        chat_reply: Result<String>,
        scan_reply: Result<UrlScanResult>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                chat_reply: Ok("Stay safe online!".to_string()),
                scan_reply: Ok(sample_scan(RiskLevel::Safe)),
            }
        }

        fn with_chat_failure(mut self) -> Self {
            self.chat_reply = Err(SaathiError::backend("model unavailable"));
            self
        }

        fn with_scan_result(mut self, result: UrlScanResult) -> Self {
            self.scan_reply = Ok(result);
            self
        }

        fn with_scan_failure(mut self) -> Self {
            self.scan_reply = Err(SaathiError::timeout(30));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn sample_scan(risk: RiskLevel) -> UrlScanResult {
        UrlScanResult {
            url: "https://example.com".into(),
            status: "completed".into(),
            risk_level: risk,
            threats: vec![],
            scan_time: Utc::now(),
            details: ScanDetails::default(),
        }
    }

    #[async_trait]
    impl SaathiBackend for MockBackend {
        async fn chat(&self, messages: &[WireMessage]) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("chat:{}", messages.len()));
            // First element must always be the system instruction.
            assert_eq!(messages[0].role, WireRole::System);
            self.chat_reply.clone()
        }

        async fn scan_url(&self, url: &str) -> Result<UrlScanResult> {
            self.calls.lock().unwrap().push(format!("scan:{url}"));
            self.scan_reply.clone()
        }

        async fn health(&self) -> Result<HealthReport> {
            self.calls.lock().unwrap().push("health".into());
            Err(SaathiError::transport("unreachable"))
        }

        async fn transcribe(&self, _audio: &Path) -> Result<String> {
            Ok("transcribed".into())
        }

        async fn news(&self) -> Result<Vec<NewsArticle>> {
            Ok(vec![])
        }
    }

    fn controller(mock: MockBackend) -> (ChatController<MockBackend>, Arc<MockBackend>) {
        let backend = Arc::new(mock);
        (ChatController::new(Arc::clone(&backend)), backend)
    }

    #[tokio::test]
    async fn test_empty_input_is_a_no_op() {
        let (mut ctrl, backend) = controller(MockBackend::new());
        let before = ctrl.log().len();

        assert_eq!(
            ctrl.submit("   ").await,
            TurnOutcome::Rejected(RejectReason::EmptyInput)
        );
        assert_eq!(ctrl.log().len(), before);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pending_turn_rejects_second_submit() {
        let (mut ctrl, backend) = controller(MockBackend::new());
        let before = ctrl.log().len();

        ctrl.force_pending(true);
        assert_eq!(
            ctrl.submit("hello").await,
            TurnOutcome::Rejected(RejectReason::TurnInFlight)
        );
        assert_eq!(ctrl.log().len(), before);
        assert!(backend.calls().is_empty());

        ctrl.force_pending(false);
        assert_eq!(ctrl.submit("hello").await, TurnOutcome::Answered);
    }

    #[tokio::test]
    async fn test_chat_turn_appends_user_then_reply() {
        let (mut ctrl, backend) = controller(MockBackend::new());

        let outcome = ctrl.submit("how do I spot phishing?").await;
        assert_eq!(outcome, TurnOutcome::Answered);
        assert!(!ctrl.is_pending());

        let messages = ctrl.log().all();
        // greeting + user + assistant
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].content, "how do I spot phishing?");
        assert_eq!(messages[2].sender, Sender::Assistant);
        assert_eq!(messages[2].content, "Stay safe online!");

        // system prompt + greeting + user message on the wire
        assert_eq!(backend.calls(), vec!["chat:3"]);
    }

    #[tokio::test]
    async fn test_scan_turn_appends_interim_then_report() {
        let mock = MockBackend::new().with_scan_result(sample_scan(RiskLevel::Dangerous));
        let (mut ctrl, backend) = controller(mock);

        let outcome = ctrl.submit("scan url https://example.com").await;
        assert_eq!(outcome, TurnOutcome::Scanned);

        let messages = ctrl.log().all();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].kind, MessageKind::Info);
        assert!(messages[2].content.contains("Scanning URL"));
        assert_eq!(messages[3].kind, MessageKind::UrlScanResult);
        assert!(messages[3].content.contains("DANGEROUS"));

        assert_eq!(backend.calls(), vec!["scan:https://example.com"]);
    }

    #[tokio::test]
    async fn test_scan_intent_without_url_makes_no_remote_call() {
        let (mut ctrl, backend) = controller(MockBackend::new());

        let outcome = ctrl.submit("scan this site").await;
        assert_eq!(outcome, TurnOutcome::GuidanceIssued);

        let messages = ctrl.log().all();
        // greeting + user + exactly one guidance message
        assert_eq!(messages.len(), 3);
        assert!(messages[2].content.contains("No valid URL found"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_scan_failure_appends_one_notice() {
        let (mut ctrl, _backend) = controller(MockBackend::new().with_scan_failure());

        let outcome = ctrl.submit("check website https://down.example").await;
        assert_eq!(outcome, TurnOutcome::ScanFailed);
        assert!(!ctrl.is_pending());

        let messages = ctrl.log().all();
        assert_eq!(messages.len(), 4);
        assert!(messages[3].content.contains("Scan Error"));
        assert!(messages[3].content.contains("internet connection"));
    }

    #[tokio::test]
    async fn test_chat_failure_appends_helpline_fallback() {
        let (mut ctrl, _backend) = controller(MockBackend::new().with_chat_failure());

        let outcome = ctrl.submit("tell me about ransomware").await;
        assert_eq!(outcome, TurnOutcome::FallbackIssued);
        assert!(!ctrl.is_pending());

        let messages = ctrl.log().all();
        // greeting + user + exactly one fallback
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].kind, MessageKind::Emergency);
        assert!(messages[2].content.contains(presets::EMERGENCY_HELPLINE));
        // Low-level detail must not leak
        assert!(!messages[2].content.contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_history_is_replayed_in_full() {
        let (mut ctrl, backend) = controller(MockBackend::new());

        ctrl.submit("first question").await;
        ctrl.submit("second question").await;

        // Turn 1: system + greeting + user = 3
        // Turn 2: system + greeting + user + assistant + user = 5
        assert_eq!(backend.calls(), vec!["chat:3", "chat:5"]);
    }

    #[tokio::test]
    async fn test_clear_resets_to_single_greeting() {
        let (mut ctrl, _backend) = controller(MockBackend::new());

        ctrl.submit("hello there").await;
        assert!(ctrl.log().len() > 1);

        ctrl.clear();
        assert_eq!(ctrl.log().len(), 1);
        assert!(ctrl.log().all()[0].content.contains("CyberSaathi"));
    }
}
