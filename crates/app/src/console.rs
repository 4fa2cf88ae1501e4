//! Line-oriented terminal front end.
//!
//! Renders go to stdout. Logs go to stderr so they never interleave with the
//! question text.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};
use ui::{Acknowledge, AlertChannel, AlertRequest, QuizHandle, QuizStepVm, RenderTarget, StepImage};

pub struct ConsoleState {
    input_enabled: AtomicBool,
    pending_alert: Mutex<Option<Acknowledge>>,
}

impl ConsoleState {
    /// Answers are accepted until the presenter disables input.
    pub fn new() -> Self {
        Self {
            input_enabled: AtomicBool::new(true),
            pending_alert: Mutex::new(None),
        }
    }

    fn take_alert(&self) -> Option<Acknowledge> {
        match self.pending_alert.lock() {
            Ok(mut slot) => slot.take(),
            Err(e) => {
                tracing::warn!(error = %e, "alert slot poisoned");
                None
            }
        }
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConsoleRenderTarget {
    state: Arc<ConsoleState>,
}

impl ConsoleRenderTarget {
    pub fn new(state: Arc<ConsoleState>) -> Self {
        Self { state }
    }
}

impl RenderTarget for ConsoleRenderTarget {
    fn show(&self, step: &QuizStepVm) {
        let poster = match &step.image {
            StepImage::Poster(bytes) => format!("[poster, {} bytes]", bytes.len()),
            StepImage::Placeholder => "[no poster]".to_owned(),
        };
        println!();
        println!("Question {}", step.question_number);
        println!("{poster}");
        println!("{}", step.question);
        println!("Answer with y or n:");
    }

    fn clear_highlight(&self) {}

    fn highlight(&self, is_correct: bool) {
        if is_correct {
            println!("Correct!");
        } else {
            println!("Wrong.");
        }
    }

    fn show_busy_indicator(&self) {
        println!("Loading movies...");
    }

    fn hide_busy_indicator(&self) {}

    fn set_input_enabled(&self, enabled: bool) {
        self.state.input_enabled.store(enabled, Ordering::SeqCst);
    }
}

pub struct ConsoleAlertChannel {
    state: Arc<ConsoleState>,
}

impl ConsoleAlertChannel {
    pub fn new(state: Arc<ConsoleState>) -> Self {
        Self { state }
    }
}

impl AlertChannel for ConsoleAlertChannel {
    fn show_alert(&self, alert: AlertRequest) {
        println!();
        println!("== {} ==", alert.title);
        println!("{}", alert.message);
        println!("Press Enter to {}", alert.button_text.to_lowercase());

        match self.state.pending_alert.lock() {
            Ok(mut slot) => *slot = Some(alert.on_acknowledge),
            Err(e) => tracing::warn!(error = %e, "alert slot poisoned; dropping alert"),
        }
    }
}

/// What a single line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Yes,
    No,
    Quit,
    Other,
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Input::Yes,
        "n" | "no" => Input::No,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Other,
    }
}

/// Feed stdin into the session until the user quits or input ends.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read.
pub async fn run_input_loop(state: Arc<ConsoleState>, handle: QuizHandle) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = parse_input(&line);
        if input == Input::Quit {
            break;
        }

        if let Some(ack) = state.take_alert() {
            if !ack.acknowledge() {
                break;
            }
            continue;
        }

        if !state.input_enabled.load(Ordering::SeqCst) {
            continue;
        }

        let delivered = match input {
            Input::Yes => handle.yes_pressed(),
            Input::No => handle.no_pressed(),
            Input::Quit | Input::Other => {
                println!("Type y, n or q.");
                true
            }
        };
        if !delivered {
            break;
        }
    }

    Ok(())
}
