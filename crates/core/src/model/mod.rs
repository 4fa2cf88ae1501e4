mod game;
mod question;
mod session;
mod settings;

pub use game::{AggregateStatistics, GameRecord, GameRecordError, accuracy_percent};
pub use question::Question;
pub use session::{AnswerOutcome, SessionState};
pub use settings::{QuizSettings, SettingsError};
