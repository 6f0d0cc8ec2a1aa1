//! The active view controller.
//!
//! Owns the single current-result slot, the transient modal selection and the
//! pending notice. A validation runs `normalize → render → append to history`
//! in sequence; a report opened from history skips the append. At most one
//! validation is in flight: a second submit while one is pending is dropped.

use crate::analysis::{AnalysisClient, AnalysisError};
use crate::domain::{Report, SectionKey};
use crate::export::{render_document, ExportScope, PrintDocument};
use crate::history::{HistoryEntry, HistoryStore};
use crate::render::{card_grid, history_panel, modal_view, CardGrid, HistoryPanel, ModalView};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

/// Transient, non-blocking message for the user. Shown once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Fresh,
    History { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentResult {
    pub report: Report,
    pub origin: Origin,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing to send; the input is kept as is.
    EmptyIdea,
    /// Another validation is still pending.
    Busy,
    Failed(Notice),
    Completed(Presented),
}

#[derive(Debug, Clone)]
pub struct Presented {
    pub cards: CardGrid,
    /// Set when the report was appended to history.
    pub history_entry: Option<HistoryEntry>,
}

/// Everything the outer view needs for one paint.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub loading: bool,
    pub draft: String,
    pub cards: Option<CardGrid>,
    pub modal: Option<ModalView>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Default)]
struct ViewState {
    current: Option<CurrentResult>,
    modal: Option<SectionKey>,
    notice: Option<Notice>,
    draft: String,
}

pub struct Session {
    client: Arc<dyn AnalysisClient>,
    history: HistoryStore,
    state: Mutex<ViewState>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(client: Arc<dyn AnalysisClient>, history: HistoryStore) -> Self {
        Self {
            client,
            history,
            state: Mutex::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, idea: &str) -> SubmitOutcome {
        let trimmed = idea.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::EmptyIdea;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("validation already in flight; submit ignored");
            return SubmitOutcome::Busy;
        }
        let _guard = InFlight(&self.in_flight);

        self.state().draft = idea.to_string();
        tracing::info!(
            service = self.client.service_name(),
            idea_len = trimmed.len(),
            "validation started"
        );

        let result = match self.client.validate(trimmed).await {
            Ok(response) => response.into_report(trimmed),
            Err(err) => Err(err),
        };

        match result {
            Ok(report) => SubmitOutcome::Completed(self.present(report, Origin::Fresh).await),
            Err(err) => {
                let message = match err.downcast_ref::<AnalysisError>() {
                    Some(analysis) => analysis.user_message(),
                    None => format!("{err:#}"),
                };
                tracing::warn!(error = %err, "validation failed");
                let notice = Notice::error(message);
                self.state().notice = Some(notice.clone());
                SubmitOutcome::Failed(notice)
            }
        }
    }

    /// Loads a stored entry into the current slot without re-adding it.
    pub async fn view_history(&self, id: &str) -> Option<CardGrid> {
        let id = id.to_string();
        let entry = self.on_history("get", move |h| h.get(&id)).await.flatten()?;
        let report = entry.to_report();
        let presented = self
            .present(
                report,
                Origin::History {
                    id: entry.id.clone(),
                },
            )
            .await;
        Some(presented.cards)
    }

    async fn present(&self, report: Report, origin: Origin) -> Presented {
        let cards = card_grid(&report);

        let history_entry = match &origin {
            Origin::Fresh => {
                let (idea, sections) = (report.idea.clone(), report.sections.clone());
                self.on_history("append", move |h| h.append(&idea, &sections))
                    .await
            }
            Origin::History { .. } => None,
        };

        let mut state = self.state();
        state.current = Some(CurrentResult { report, origin });
        state.modal = None;

        Presented {
            cards,
            history_entry,
        }
    }

    /// Returns to the input view, discarding the current result.
    pub fn back(&self) {
        let mut state = self.state();
        state.current = None;
        state.modal = None;
        state.draft.clear();
    }

    pub fn current(&self) -> Option<CurrentResult> {
        self.state().current.clone()
    }

    pub fn open_section(&self, key: SectionKey) -> Option<ModalView> {
        let mut state = self.state();
        let view = modal_view(&state.current.as_ref()?.report, key);
        state.modal = Some(key);
        Some(view)
    }

    pub fn close_section(&self) {
        self.state().modal = None;
    }

    pub fn export(&self, scope: ExportScope) -> Result<PrintDocument, Notice> {
        self.export_on(scope, chrono::Local::now().date_naive())
    }

    pub fn export_on(
        &self,
        scope: ExportScope,
        generated_on: NaiveDate,
    ) -> Result<PrintDocument, Notice> {
        let mut state = self.state();
        let report = state.current.as_ref().map(|c| &c.report);
        match render_document(report, scope, generated_on) {
            Ok(doc) => Ok(doc),
            Err(err) => {
                tracing::warn!(error = %err, "export aborted");
                let notice = Notice::error(err.user_message());
                state.notice = Some(notice.clone());
                Err(notice)
            }
        }
    }

    pub async fn history_panel(&self, now: DateTime<Utc>) -> HistoryPanel {
        let entries = self
            .on_history("list", |h| h.list())
            .await
            .unwrap_or_default();
        history_panel(&entries, now)
    }

    pub async fn delete_history(&self, id: &str) {
        let id = id.to_string();
        self.on_history("remove", move |h| h.remove(&id)).await;
    }

    /// Clears history only when the user confirmed. Returns whether it ran.
    pub async fn clear_history(&self, confirmed: bool) -> bool {
        if !confirmed {
            tracing::debug!("history clear not confirmed");
            return false;
        }
        self.on_history("clear", |h| h.clear()).await;
        self.state().notice = Some(Notice::info("History cleared"));
        true
    }

    pub fn take_notice(&self) -> Option<Notice> {
        self.state().notice.take()
    }

    /// Current view; the pending notice is consumed.
    pub fn snapshot(&self) -> ViewSnapshot {
        let mut state = self.state();
        let cards = state.current.as_ref().map(|c| card_grid(&c.report));
        let modal = match (&state.current, state.modal) {
            (Some(current), Some(key)) => Some(modal_view(&current.report, key)),
            _ => None,
        };
        ViewSnapshot {
            loading: self.is_loading(),
            draft: state.draft.clone(),
            cards,
            modal,
            notice: state.notice.take(),
        }
    }

    /// History storage does blocking file I/O, so it runs on the blocking pool.
    /// `None` only when the task itself died; storage errors are handled inside.
    async fn on_history<T, F>(&self, op: &'static str, f: F) -> Option<T>
    where
        F: FnOnce(&HistoryStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let history = self.history.clone();
        match tokio::task::spawn_blocking(move || f(&history)).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(error = %err, op, "history task failed");
                None
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::ValidateResponse;
    use crate::domain::SectionBody;
    use crate::storage::{KeyValueStore, MemoryStore, StorageError};
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::thread::ThreadId;
    use tokio::sync::Notify;

    struct StubClient {
        response: anyhow::Result<ValidateResponse>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl StubClient {
        fn replying(v: serde_json::Value) -> Self {
            Self {
                response: Ok(serde_json::from_value(v).unwrap()),
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl AnalysisClient for StubClient {
        fn service_name(&self) -> &'static str {
            "stub"
        }

        async fn validate(&self, _idea: &str) -> anyhow::Result<ValidateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.response {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(AnalysisError::Network {
                    detail: e.to_string(),
                }
                .into()),
            }
        }
    }

    fn success() -> serde_json::Value {
        json!({
            "status": "success",
            "results": {
                "market_analysis": "## Market\n- Growing",
                "risk_analysis": "",
                "monetization_strategy": "Subscriptions",
                "investor_view": "6/10"
            }
        })
    }

    fn session(client: StubClient) -> (Arc<StubClient>, Session) {
        let client = Arc::new(client);
        let history = HistoryStore::new(Arc::new(MemoryStore::new()));
        (client.clone(), Session::new(client, history))
    }

    #[tokio::test]
    async fn successful_validation_renders_and_appends_history() {
        let (_, session) = session(StubClient::replying(success()));

        let SubmitOutcome::Completed(presented) = session.submit("  Meal kits for dogs ").await
        else {
            panic!("expected completion");
        };
        assert_eq!(presented.cards.idea, "Meal kits for dogs");
        assert_eq!(presented.cards.cards.len(), 4);

        let entry = presented.history_entry.unwrap();
        assert_eq!(session.history().list(), vec![entry.clone()]);

        let current = session.current().unwrap();
        assert_eq!(current.origin, Origin::Fresh);
        assert_eq!(current.report.section(SectionKey::Risk), &SectionBody::Pending);
    }

    #[tokio::test]
    async fn empty_idea_never_calls_the_service() {
        let (client, session) = session(StubClient::replying(success()));
        assert!(matches!(session.submit("   ").await, SubmitOutcome::EmptyIdea));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejection_keeps_input_and_state() {
        let (_, session) = session(StubClient::replying(
            json!({"status": "error", "message": "Rate limited"}),
        ));

        let SubmitOutcome::Failed(notice) = session.submit("idea").await else {
            panic!("expected failure");
        };
        assert_eq!(notice.message, "Rate limited");

        let snap = session.snapshot();
        assert_eq!(snap.draft, "idea");
        assert!(snap.cards.is_none());
        assert_eq!(snap.notice, Some(notice));
        assert!(session.snapshot().notice.is_none());
        assert!(session.history().list().is_empty());
    }

    #[tokio::test]
    async fn malformed_response_is_reported_like_a_network_failure() {
        let (_, session) = session(StubClient::replying(json!({"status": "success"})));
        let SubmitOutcome::Failed(notice) = session.submit("idea").await else {
            panic!("expected failure");
        };
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Network error: "));
        assert!(session.history().list().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_becomes_notice() {
        let (_, session) = session(StubClient {
            response: Err(anyhow::anyhow!("connection refused")),
            calls: AtomicUsize::new(0),
            gate: None,
        });
        let SubmitOutcome::Failed(notice) = session.submit("idea").await else {
            panic!("expected failure");
        };
        assert_eq!(notice.message, "Network error: connection refused");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn second_submit_while_pending_is_dropped() {
        let gate = Arc::new(Notify::new());
        let (client, session) = session(StubClient {
            response: Ok(serde_json::from_value(success()).unwrap()),
            calls: AtomicUsize::new(0),
            gate: Some(gate.clone()),
        });
        let session = Arc::new(session);

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("first").await }
        });
        while !session.is_loading() {
            tokio::task::yield_now().await;
        }

        assert!(matches!(session.submit("second").await, SubmitOutcome::Busy));

        gate.notify_one();
        assert!(matches!(first.await.unwrap(), SubmitOutcome::Completed(_)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.history().list().len(), 1);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn viewing_history_does_not_re_append_or_alias() {
        let (_, session) = session(StubClient::replying(success()));
        let SubmitOutcome::Completed(presented) = session.submit("idea").await else {
            panic!("expected completion");
        };
        let id = presented.history_entry.unwrap().id;
        session.back();
        assert!(session.current().is_none());

        let cards = session.view_history(&id).await.unwrap();
        assert_eq!(cards.idea, "idea");
        assert_eq!(session.history().list().len(), 1);

        let mut current = session.current().unwrap();
        assert_eq!(current.origin, Origin::History { id: id.clone() });
        current.report.sections.set(SectionKey::Market, "tampered");
        assert_eq!(
            session.history().get(&id).unwrap().sections.get(SectionKey::Market).as_str(),
            "## Market\n- Growing"
        );
        assert!(session.view_history("missing").await.is_none());
    }

    #[tokio::test]
    async fn modal_selection_is_transient() {
        let (_, session) = session(StubClient::replying(success()));
        assert!(session.open_section(SectionKey::Money).is_none());

        session.submit("idea").await;
        let view = session.open_section(SectionKey::Money).unwrap();
        assert_eq!(view.key, SectionKey::Money);
        let view = session.open_section(SectionKey::Investor).unwrap();
        assert_eq!(session.snapshot().modal, Some(view));

        session.close_section();
        assert!(session.snapshot().modal.is_none());
    }

    #[tokio::test]
    async fn export_of_empty_section_yields_notice_only() {
        let (_, session) = session(StubClient::replying(success()));
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            session.export_on(ExportScope::All, day).unwrap_err().message,
            "No results to export"
        );

        session.submit("idea").await;
        let notice = session
            .export_on(ExportScope::Section(SectionKey::Risk), day)
            .unwrap_err();
        assert_eq!(notice.message, "No content available for this section");
        assert_eq!(session.take_notice(), Some(notice));

        let doc = session
            .export_on(ExportScope::Section(SectionKey::Money), day)
            .unwrap();
        assert!(doc.html.contains("Subscriptions"));
    }

    /// Records which thread touched the slot.
    #[derive(Default)]
    struct ThreadTrackingStore {
        inner: MemoryStore,
        threads: Mutex<Vec<ThreadId>>,
    }

    impl ThreadTrackingStore {
        fn track(&self) {
            self.threads.lock().unwrap().push(std::thread::current().id());
        }
    }

    impl KeyValueStore for ThreadTrackingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.track();
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.track();
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.track();
            self.inner.remove(key)
        }
    }

    #[tokio::test]
    async fn history_io_runs_off_the_async_thread() {
        let kv = Arc::new(ThreadTrackingStore::default());
        let session = Session::new(
            Arc::new(StubClient::replying(success())),
            HistoryStore::new(kv.clone()),
        );

        let SubmitOutcome::Completed(presented) = session.submit("idea").await else {
            panic!("expected completion");
        };
        let id = presented.history_entry.unwrap().id;
        assert!(session.view_history(&id).await.is_some());
        assert_eq!(session.history_panel(Utc::now()).await.items.len(), 1);
        session.delete_history(&id).await;
        assert!(session.clear_history(true).await);

        let runtime_thread = std::thread::current().id();
        let threads = kv.threads.lock().unwrap();
        assert!(!threads.is_empty());
        assert!(threads.iter().all(|t| *t != runtime_thread));
    }

    #[tokio::test]
    async fn clear_requires_confirmation() {
        let (_, session) = session(StubClient::replying(success()));
        session.submit("idea").await;

        assert!(!session.clear_history(false).await);
        assert_eq!(session.history().list().len(), 1);

        assert!(session.clear_history(true).await);
        assert!(session.history().list().is_empty());
        assert!(session.history_panel(Utc::now()).await.items.is_empty());
    }
}
