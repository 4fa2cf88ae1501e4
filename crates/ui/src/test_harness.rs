use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{Question, QuizSettings};
use quiz_core::time::fixed_clock;
use services::{MoviesLoaderError, QuestionSource, QuestionSourceError};
use storage::{InMemoryRepository, StatisticsStore};
use tokio::sync::Notify;

use crate::ports::{AlertChannel, RenderTarget};
use crate::presenter::{QuizPresenter, QuizSession, SessionSnapshot};
use crate::vm::{AlertRequest, QuizStepVm};

pub const POSTER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
pub const PACING: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Show(QuizStepVm),
    ClearHighlight,
    Highlight(bool),
    ShowBusy,
    HideBusy,
    InputEnabled(bool),
}

#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn push(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&ViewCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn shown(&self) -> Vec<QuizStepVm> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                ViewCall::Show(step) => Some(step.clone()),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for RecordingView {
    fn show(&self, step: &QuizStepVm) {
        self.push(ViewCall::Show(step.clone()));
    }

    fn clear_highlight(&self) {
        self.push(ViewCall::ClearHighlight);
    }

    fn highlight(&self, is_correct: bool) {
        self.push(ViewCall::Highlight(is_correct));
    }

    fn show_busy_indicator(&self) {
        self.push(ViewCall::ShowBusy);
    }

    fn hide_busy_indicator(&self) {
        self.push(ViewCall::HideBusy);
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.push(ViewCall::InputEnabled(enabled));
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<AlertRequest>>,
}

impl RecordingAlerts {
    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    /// Title and message of every alert shown so far.
    pub fn texts(&self) -> Vec<(String, String)> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .map(|a| (a.title.clone(), a.message.clone()))
            .collect()
    }

    /// Remove the oldest alert so the test can press its button.
    pub fn take_first(&self) -> AlertRequest {
        self.alerts.lock().unwrap().remove(0)
    }
}

impl AlertChannel for RecordingAlerts {
    fn show_alert(&self, alert: AlertRequest) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// Question source driven by queued results.
///
/// Empty queues fall back to a successful load and a question whose correct
/// answer is `default_answer`.
pub struct ScriptedSource {
    loads: Mutex<VecDeque<Result<(), QuestionSourceError>>>,
    questions: Mutex<VecDeque<Result<Option<Question>, QuestionSourceError>>>,
    default_answer: bool,
    load_gate: Option<Arc<Notify>>,
    load_calls: AtomicU32,
    next_calls: AtomicU32,
}

impl ScriptedSource {
    pub fn answering(default_answer: bool) -> Self {
        Self {
            loads: Mutex::new(VecDeque::new()),
            questions: Mutex::new(VecDeque::new()),
            default_answer,
            load_gate: None,
            load_calls: AtomicU32::new(0),
            next_calls: AtomicU32::new(0),
        }
    }

    /// Hold `load_data` until the returned `Notify` is signalled.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.load_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn push_load(self, result: Result<(), QuestionSourceError>) -> Self {
        self.loads.lock().unwrap().push_back(result);
        self
    }

    pub fn push_question(self, result: Result<Option<Question>, QuestionSourceError>) -> Self {
        self.questions.lock().unwrap().push_back(result);
        self
    }

    pub fn load_calls(&self) -> u32 {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn next_calls(&self) -> u32 {
        self.next_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for ScriptedSource {
    async fn load_data(&self) -> Result<(), QuestionSourceError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.load_gate {
            gate.notified().await;
        }
        self.loads.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn next_question(&self) -> Result<Option<Question>, QuestionSourceError> {
        self.next_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.questions.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(Some(question(self.default_answer))))
    }
}

pub fn question(correct_answer: bool) -> Question {
    Question::new(
        "Is the rating of this movie greater than 7?",
        POSTER.to_vec(),
        correct_answer,
    )
}

pub fn load_error() -> QuestionSourceError {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    QuestionSourceError::Load(MoviesLoaderError::Decode(err))
}

pub struct QuizHarness {
    pub session: QuizSession,
    pub view: Arc<RecordingView>,
    pub alerts: Arc<RecordingAlerts>,
    pub source: Arc<ScriptedSource>,
    pub games: InMemoryRepository,
}

impl QuizHarness {
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot().await.expect("presenter running")
    }

    /// Poll until `condition` holds, panicking after two seconds.
    pub async fn eventually(&self, what: &str, condition: impl Fn(&Self) -> bool) {
        let waited = tokio::time::timeout(Duration::from_secs(2), async {
            while !condition(self) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await;
        assert!(waited.is_ok(), "timed out waiting for {what}");
    }

    pub async fn wait_for_question(&self, count: usize) {
        self.eventually("question to be shown", |h| h.view.shown().len() >= count)
            .await;
    }

    pub async fn wait_for_alert(&self, count: usize) {
        self.eventually("alert to be shown", |h| h.alerts.count() >= count)
            .await;
    }
}

pub fn setup_quiz_harness(source: ScriptedSource, total_questions: u32) -> QuizHarness {
    setup_quiz_harness_paced(source, total_questions, PACING)
}

pub fn setup_quiz_harness_paced(
    source: ScriptedSource,
    total_questions: u32,
    pacing: Duration,
) -> QuizHarness {
    let games = InMemoryRepository::new();
    let statistics: Arc<dyn StatisticsStore> = Arc::new(games.clone());
    build_harness(source, total_questions, pacing, games, statistics)
}

pub fn setup_quiz_harness_with_store(
    source: ScriptedSource,
    total_questions: u32,
    games: InMemoryRepository,
    statistics: Arc<dyn StatisticsStore>,
) -> QuizHarness {
    build_harness(source, total_questions, PACING, games, statistics)
}

fn build_harness(
    source: ScriptedSource,
    total_questions: u32,
    pacing: Duration,
    games: InMemoryRepository,
    statistics: Arc<dyn StatisticsStore>,
) -> QuizHarness {
    let view = Arc::new(RecordingView::default());
    let alerts = Arc::new(RecordingAlerts::default());
    let source = Arc::new(source);
    let settings = QuizSettings::new(total_questions, pacing).expect("valid settings");

    let session = QuizPresenter::new(
        Arc::clone(&source) as Arc<dyn QuestionSource>,
        statistics,
        Arc::clone(&view) as Arc<dyn RenderTarget>,
        Arc::clone(&alerts) as Arc<dyn AlertChannel>,
    )
    .with_settings(settings)
    .with_clock(fixed_clock())
    .spawn();

    QuizHarness {
        session,
        view,
        alerts,
        source,
        games,
    }
}
