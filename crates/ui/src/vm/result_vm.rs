use quiz_core::model::{AggregateStatistics, SessionState};

fn score_line(state: &SessionState) -> String {
    format!(
        "Your result: {}/{}",
        state.correct_count(),
        state.total_questions()
    )
}

/// Multi-line summary shown when a round ends.
#[must_use]
pub fn compose_result_message(state: &SessionState, stats: &AggregateStatistics) -> String {
    let record = match &stats.best_game {
        Some(best) => format!(
            "Record: {}/{} ({})",
            best.correct(),
            best.total(),
            best.date_time_string()
        ),
        None => "Record: none yet".to_owned(),
    };

    [
        score_line(state),
        format!("Quizzes played: {}", stats.games_count),
        record,
        format!("Average accuracy: {:.2}%", stats.total_accuracy),
    ]
    .join("\n")
}

/// Fallback summary when statistics could not be stored or read.
#[must_use]
pub fn compose_score_only_message(state: &SessionState) -> String {
    format!("{}\nStatistics are unavailable right now", score_line(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{GameRecord, QuizSettings};
    use quiz_core::time::fixed_now;

    fn finished_state(correct: u32) -> SessionState {
        let mut state = SessionState::new(&QuizSettings::default());
        for index in 0..state.total_questions() {
            state.record_answer(index < correct);
            state.advance();
        }
        state
    }

    #[test]
    fn includes_score_games_record_and_accuracy() {
        let best = GameRecord::new(9, 10, fixed_now()).unwrap();
        let stats = AggregateStatistics::new(3, Some(best), 82.5);

        let message = compose_result_message(&finished_state(7), &stats);

        assert!(message.contains("7/10"));
        assert!(message.contains("3"));
        assert!(message.contains("9/10"));
        assert!(message.contains("82.50%"));
        assert!(message.contains(&best.date_time_string()));
        assert_eq!(message.lines().count(), 4);
    }

    #[test]
    fn accuracy_always_has_two_decimals() {
        let stats = AggregateStatistics::new(1, None, 100.0 / 3.0);
        let message = compose_result_message(&finished_state(0), &stats);
        assert!(message.ends_with("Average accuracy: 33.33%"));
        assert!(message.contains("Record: none yet"));
    }

    #[test]
    fn score_only_message_keeps_score() {
        let message = compose_score_only_message(&finished_state(4));
        assert!(message.starts_with("Your result: 4/10"));
    }
}
