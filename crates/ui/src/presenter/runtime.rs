use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{
    AggregateStatistics, GameRecordError, Question, QuizSettings, SessionState,
};
use services::{QuestionSource, QuestionSourceError};
use storage::{StatisticsStore, StorageError};
use thiserror::Error;
use tokio::sync::mpsc;

use super::{
    Acknowledge, AlertAction, QuizEvent, QuizPresenter, SessionPhase, SessionSnapshot, post,
};
use crate::ports::{AlertChannel, RenderTarget};
use crate::vm::{
    QuizStepVm, compose_result_message, compose_score_only_message, error_alert, results_alert,
};

#[derive(Debug, Error)]
enum FinishError {
    #[error(transparent)]
    Record(#[from] GameRecordError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// State owned by the presenter task.
pub(super) struct PresenterTask {
    settings: QuizSettings,
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    statistics: Arc<dyn StatisticsStore>,
    view: Arc<dyn RenderTarget>,
    alerts: Arc<dyn AlertChannel>,
    events: mpsc::WeakUnboundedSender<QuizEvent>,

    state: SessionState,
    phase: SessionPhase,
    current_question: Option<Question>,
    busy: bool,
    empty_deliveries: u32,
}

impl PresenterTask {
    pub(super) fn new(
        presenter: QuizPresenter,
        events: mpsc::WeakUnboundedSender<QuizEvent>,
    ) -> Self {
        let QuizPresenter {
            settings,
            clock,
            questions,
            statistics,
            view,
            alerts,
        } = presenter;

        Self {
            state: SessionState::new(&settings),
            settings,
            clock,
            questions,
            statistics,
            view,
            alerts,
            events,
            phase: SessionPhase::Initializing,
            current_question: None,
            busy: false,
            empty_deliveries: 0,
        }
    }

    pub(super) async fn run(mut self, mut rx: mpsc::UnboundedReceiver<QuizEvent>) {
        self.load_data();

        while let Some(event) = rx.recv().await {
            if matches!(event, QuizEvent::Shutdown) {
                break;
            }
            self.handle(event).await;
        }

        tracing::debug!("presenter stopped");
    }

    async fn handle(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::LoadCompleted => self.on_load_completed(),
            QuizEvent::LoadFailed(err) => self.on_load_failed(&err),
            QuizEvent::DataError(message) => self.on_data_error(message),
            QuizEvent::QuestionReceived(question) => self.on_question_received(question),
            QuizEvent::Answer(guess) => self.on_answer(guess),
            QuizEvent::PacingElapsed => self.on_pacing_elapsed().await,
            QuizEvent::Acknowledged(action) => self.on_acknowledged(action),
            QuizEvent::Snapshot(reply) => {
                let _ = reply.send(self.snapshot());
            }
            QuizEvent::Shutdown => {}
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            question_index: self.state.question_index(),
            correct_count: self.state.correct_count(),
            total_questions: self.state.total_questions(),
            empty_deliveries: self.empty_deliveries,
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "presenter phase");
        self.phase = phase;
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy == busy {
            return;
        }
        self.busy = busy;
        if busy {
            self.view.show_busy_indicator();
        } else {
            self.view.hide_busy_indicator();
        }
    }

    fn acknowledge(&self, action: AlertAction) -> Acknowledge {
        Acknowledge::new(self.events.clone(), action)
    }

    //
    // ─── ASYNC WORK ────────────────────────────────────────────────────────────
    //

    fn load_data(&mut self) {
        self.set_phase(SessionPhase::Initializing);
        self.set_busy(true);

        let source = Arc::clone(&self.questions);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match source.load_data().await {
                Ok(()) => QuizEvent::LoadCompleted,
                Err(QuestionSourceError::Data(message)) => QuizEvent::DataError(message),
                Err(err) => QuizEvent::LoadFailed(err),
            };
            post(&events, event);
        });
    }

    fn request_next_question(&mut self) {
        self.set_phase(SessionPhase::AwaitingQuestion);

        let source = Arc::clone(&self.questions);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match source.next_question().await {
                Ok(question) => QuizEvent::QuestionReceived(question),
                Err(QuestionSourceError::Data(message)) => QuizEvent::DataError(message),
                Err(err) => QuizEvent::DataError(err.to_string()),
            };
            post(&events, event);
        });
    }

    fn schedule_advance(&self) {
        let delay = self.settings.pacing_delay();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            post(&events, QuizEvent::PacingElapsed);
        });
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    fn on_load_completed(&mut self) {
        tracing::info!("question data loaded");
        self.set_busy(false);
        self.request_next_question();
    }

    fn on_load_failed(&mut self, err: &QuestionSourceError) {
        tracing::warn!(error = %err, "question data failed to load");
        self.set_busy(false);
        self.set_phase(SessionPhase::ErrorPresented);
        let alert = error_alert(err.to_string(), self.acknowledge(AlertAction::Reload));
        self.alerts.show_alert(alert);
    }

    fn on_data_error(&mut self, message: String) {
        tracing::warn!(%message, "question source reported a data error");
        self.set_busy(false);
        self.set_phase(SessionPhase::ErrorPresented);
        let alert = error_alert(message, self.acknowledge(AlertAction::Reload));
        self.alerts.show_alert(alert);
    }

    fn on_question_received(&mut self, question: Option<Question>) {
        let Some(question) = question else {
            // Only reachable if the source runs dry mid-round.
            self.empty_deliveries += 1;
            tracing::warn!(
                index = self.state.question_index(),
                "question source delivered no question"
            );
            return;
        };

        let step = QuizStepVm::from_question(&question, &self.state);
        self.current_question = Some(question);
        self.view.clear_highlight();
        self.view.show(&step);
        self.set_phase(SessionPhase::AwaitingAnswer);
    }

    fn on_answer(&mut self, guess: bool) {
        if self.phase != SessionPhase::AwaitingAnswer {
            tracing::debug!(phase = ?self.phase, "ignoring answer");
            return;
        }
        let Some(question) = &self.current_question else {
            return;
        };
        let is_correct = question.is_correct(guess);
        let Some(outcome) = self.state.record_answer(is_correct) else {
            return;
        };

        self.set_phase(SessionPhase::Scoring);
        self.view.set_input_enabled(false);
        self.view.highlight(outcome.is_correct());
        self.schedule_advance();
    }

    async fn on_pacing_elapsed(&mut self) {
        if self.state.advance() {
            self.request_next_question();
        } else {
            self.finish().await;
        }
        self.view.set_input_enabled(true);
    }

    async fn finish(&mut self) {
        self.set_phase(SessionPhase::Finished);

        let message = match self.persist_result().await {
            Ok(stats) => compose_result_message(&self.state, &stats),
            Err(err) => {
                tracing::warn!(error = %err, "failed to record game statistics");
                compose_score_only_message(&self.state)
            }
        };
        tracing::info!(
            correct = self.state.correct_count(),
            total = self.state.total_questions(),
            "round finished"
        );

        let alert = results_alert(message, self.acknowledge(AlertAction::Restart));
        self.alerts.show_alert(alert);
    }

    async fn persist_result(&self) -> Result<AggregateStatistics, FinishError> {
        let record = self.state.to_game_record(self.clock.now())?;
        self.statistics.store(&record).await?;
        Ok(self.statistics.statistics().await?)
    }

    fn on_acknowledged(&mut self, action: AlertAction) {
        match action {
            AlertAction::Restart => {
                self.state.reset();
                self.request_next_question();
            }
            AlertAction::Reload => self.load_data(),
        }
    }
}
