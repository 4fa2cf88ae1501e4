//! Quiz session presenter.
//!
//! The presenter is a single tokio task that owns the session state and the
//! current question. Question loading, fetching and the pacing delay run as
//! separate tasks that post their completion back into the presenter's queue,
//! so every state change and every render happens in queue order.
//!
//! Only `QuizSession` holds a strong sender. Answer handles and alert
//! continuations hold weak senders and become no-ops once the session is gone.

mod events;
mod runtime;


use std::fmt;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::QuizSettings;
use services::QuestionSource;
use storage::StatisticsStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::ports::{AlertChannel, RenderTarget};

pub(crate) use events::{AlertAction, QuizEvent};
pub use events::SessionPhase;

/// Point-in-time view of the presenter's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub question_index: u32,
    pub correct_count: u32,
    pub total_questions: u32,
    /// How many times the source answered a request with no question.
    pub empty_deliveries: u32,
}

/// Post an event if the presenter is still alive.
pub(crate) fn post(events: &mpsc::WeakUnboundedSender<QuizEvent>, event: QuizEvent) -> bool {
    match events.upgrade() {
        Some(tx) => tx.send(event).is_ok(),
        None => {
            tracing::debug!(?event, "presenter is gone; dropping event");
            false
        }
    }
}

/// One-shot continuation attached to an alert.
///
/// Consuming `acknowledge` guarantees it fires at most once.
pub struct Acknowledge {
    events: mpsc::WeakUnboundedSender<QuizEvent>,
    action: AlertAction,
}

impl Acknowledge {
    pub(crate) fn new(events: mpsc::WeakUnboundedSender<QuizEvent>, action: AlertAction) -> Self {
        Self { events, action }
    }

    /// Run the continuation. Returns `false` if the session no longer exists.
    pub fn acknowledge(self) -> bool {
        post(&self.events, QuizEvent::Acknowledged(self.action))
    }
}

impl fmt::Debug for Acknowledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Acknowledge")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// Non-owning answer entry points for the render target.
#[derive(Clone)]
pub struct QuizHandle {
    events: mpsc::WeakUnboundedSender<QuizEvent>,
}

impl QuizHandle {
    /// The user guessed "yes". Returns `false` if the session is gone.
    pub fn yes_pressed(&self) -> bool {
        post(&self.events, QuizEvent::Answer(true))
    }

    /// The user guessed "no". Returns `false` if the session is gone.
    pub fn no_pressed(&self) -> bool {
        post(&self.events, QuizEvent::Answer(false))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.events.upgrade().is_some()
    }
}

/// Owner of a running presenter task.
///
/// Dropping it stops the task once already queued events are processed.
pub struct QuizSession {
    events: mpsc::UnboundedSender<QuizEvent>,
    task: JoinHandle<()>,
}

impl QuizSession {
    #[must_use]
    pub fn handle(&self) -> QuizHandle {
        QuizHandle {
            events: self.events.downgrade(),
        }
    }

    /// Current phase and counters, or `None` if the task has stopped.
    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.events.send(QuizEvent::Snapshot(reply)).ok()?;
        rx.await.ok()
    }

    /// Stop the presenter and wait for its task to finish.
    pub async fn shutdown(self) {
        let _ = self.events.send(QuizEvent::Shutdown);
        drop(self.events);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "presenter task ended abnormally");
        }
    }
}

/// Collaborators and knobs for a quiz session.
pub struct QuizPresenter {
    settings: QuizSettings,
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    statistics: Arc<dyn StatisticsStore>,
    view: Arc<dyn RenderTarget>,
    alerts: Arc<dyn AlertChannel>,
}

impl QuizPresenter {
    #[must_use]
    pub fn new(
        questions: Arc<dyn QuestionSource>,
        statistics: Arc<dyn StatisticsStore>,
        view: Arc<dyn RenderTarget>,
        alerts: Arc<dyn AlertChannel>,
    ) -> Self {
        Self {
            settings: QuizSettings::default(),
            clock: Clock::default_clock(),
            questions,
            statistics,
            view,
            alerts,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Start the session on the current tokio runtime.
    ///
    /// Shows the busy indicator and starts loading question data right away.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> QuizSession {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = runtime::PresenterTask::new(self, tx.downgrade());
        let task = tokio::spawn(task.run(rx));
        QuizSession { events: tx, task }
    }
}
