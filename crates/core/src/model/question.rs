/// A single yes/no quiz question with its poster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    image: Vec<u8>,
    correct_answer: bool,
}

impl Question {
    #[must_use]
    pub fn new(text: impl Into<String>, image: Vec<u8>, correct_answer: bool) -> Self {
        Self {
            text: text.into(),
            image,
            correct_answer,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw image bytes as delivered by the question source.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }

    /// Returns true if `guess` matches the expected answer.
    #[must_use]
    pub fn is_correct(&self, guess: bool) -> bool {
        self.correct_answer == guess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_guess_with_expected_answer() {
        let question = Question::new("Is the rating greater than 7?", vec![], true);
        assert!(question.is_correct(true));
        assert!(!question.is_correct(false));
    }
}
