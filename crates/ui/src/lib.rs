#![forbid(unsafe_code)]

pub mod ports;
pub mod presenter;
pub mod vm;

#[cfg(test)]
mod test_harness;

pub use ports::{AlertChannel, RenderTarget};
pub use presenter::{
    Acknowledge, QuizHandle, QuizPresenter, QuizSession, SessionPhase, SessionSnapshot,
};
pub use vm::{AlertRequest, QuizStepVm, StepImage};
