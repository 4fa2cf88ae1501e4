use crate::presenter::Acknowledge;

const ERROR_TITLE: &str = "Error";
const RETRY_BUTTON: &str = "Try again";
const RESULTS_TITLE: &str = "This round is over!";
const PLAY_AGAIN_BUTTON: &str = "Play again";

/// A one-button modal and the continuation its button triggers.
#[derive(Debug)]
pub struct AlertRequest {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub on_acknowledge: Acknowledge,
}

#[must_use]
pub fn error_alert(message: impl Into<String>, on_acknowledge: Acknowledge) -> AlertRequest {
    AlertRequest {
        title: ERROR_TITLE.to_owned(),
        message: message.into(),
        button_text: RETRY_BUTTON.to_owned(),
        on_acknowledge,
    }
}

#[must_use]
pub fn results_alert(message: impl Into<String>, on_acknowledge: Acknowledge) -> AlertRequest {
    AlertRequest {
        title: RESULTS_TITLE.to_owned(),
        message: message.into(),
        button_text: PLAY_AGAIN_BUTTON.to_owned(),
        on_acknowledge,
    }
}
