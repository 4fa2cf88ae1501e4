use quiz_core::model::{Question, SessionState};

/// Poster shown next to the question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepImage {
    Poster(Vec<u8>),
    /// Used when the bytes are not a recognised image format.
    Placeholder,
}

impl StepImage {
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if infer::is_image(bytes) {
            Self::Poster(bytes.to_vec())
        } else {
            Self::Placeholder
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizStepVm {
    pub image: StepImage,
    pub question: String,
    pub question_number: String,
}

impl QuizStepVm {
    #[must_use]
    pub fn from_question(question: &Question, state: &SessionState) -> Self {
        Self {
            image: StepImage::from_bytes(question.image()),
            question: question.text().to_owned(),
            question_number: state.question_number(),
        }
    }
}
