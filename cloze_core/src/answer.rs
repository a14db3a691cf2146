//! Answer checking for fill-in-the-blank exercises

#[cfg(feature = "python")]
use pyo3::prelude::*;

use crate::config::FeedbackMessages;

/// Result of comparing a typed answer with the expected word
#[cfg_attr(feature = "python", pyclass(get_all, frozen))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub feedback: String,
}

/// Lowercase with surrounding whitespace removed
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Exact match after normalization. An exercise without a word never matches.
pub fn check_answer(user_input: &str, expected: &str, messages: &FeedbackMessages) -> AnswerCheck {
    let expected_normalized = normalize(expected);
    let is_correct = !expected_normalized.is_empty() && expected_normalized == normalize(user_input);

    let feedback = if is_correct {
        messages.correct.clone()
    } else {
        messages.incorrect_for(expected)
    };

    AnswerCheck { is_correct, feedback }
}
