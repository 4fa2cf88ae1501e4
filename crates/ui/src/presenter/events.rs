use quiz_core::model::Question;
use services::QuestionSourceError;
use tokio::sync::oneshot;

use super::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    AwaitingQuestion,
    AwaitingAnswer,
    Scoring,
    Finished,
    ErrorPresented,
}

/// What an alert button does once pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertAction {
    /// Start a new round with the data already loaded.
    Restart,
    /// Show the busy indicator and load the data again.
    Reload,
}

/// Everything that can re-enter the presenter task.
#[derive(Debug)]
pub(crate) enum QuizEvent {
    LoadCompleted,
    LoadFailed(QuestionSourceError),
    DataError(String),
    QuestionReceived(Option<Question>),
    Answer(bool),
    PacingElapsed,
    Acknowledged(AlertAction),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}
