//! Surfaces the presenter drives.
//!
//! Every call is fire-and-forget and is made from the presenter task, so
//! implementations never see interleaved renders.

use crate::vm::{AlertRequest, QuizStepVm};

pub trait RenderTarget: Send + Sync {
    fn show(&self, step: &QuizStepVm);
    fn clear_highlight(&self);
    fn highlight(&self, is_correct: bool);
    fn show_busy_indicator(&self);
    fn hide_busy_indicator(&self);
    fn set_input_enabled(&self, enabled: bool);
}

pub trait AlertChannel: Send + Sync {
    /// Present a modal with a single button.
    ///
    /// The implementation calls `alert.on_acknowledge.acknowledge()` once the
    /// user presses the button, and never otherwise.
    fn show_alert(&self, alert: AlertRequest);
}
