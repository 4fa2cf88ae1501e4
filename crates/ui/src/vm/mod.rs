mod alert_vm;
mod quiz_step_vm;
mod result_vm;

pub use alert_vm::{AlertRequest, error_alert, results_alert};
pub use quiz_step_vm::{QuizStepVm, StepImage};
pub use result_vm::{compose_result_message, compose_score_only_message};
