//! Drill configuration: column layout, feedback texts and ordering

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DrillResult;

/// Column index mapping for drill spreadsheets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub id: usize,
    pub pronunciation: usize,
    pub meaning: usize,
    pub example: usize,
    pub word: usize,
    pub blanked_word: usize,
    pub hint: usize,
    pub question: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            id: 0,
            pronunciation: 2,
            meaning: 3,
            example: 4,
            word: 5,
            blanked_word: 6,
            hint: 7,
            question: 8,
        }
    }
}

/// Feedback shown after an answer is checked. `{word}` is replaced with the expected word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackMessages {
    pub correct: String,
    pub incorrect: String,
}

impl Default for FeedbackMessages {
    fn default() -> Self {
        FeedbackMessages {
            correct: "Correct!".to_string(),
            incorrect: "Incorrect. The correct answer is: {word}".to_string(),
        }
    }
}

impl FeedbackMessages {
    pub fn incorrect_for(&self, word: &str) -> String {
        self.incorrect.replace("{word}", word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub columns: ColumnLayout,
    pub feedback: FeedbackMessages,
    /// Randomize exercise order on load
    pub shuffle: bool,
}

impl Default for DrillConfig {
    fn default() -> Self {
        DrillConfig {
            columns: ColumnLayout::default(),
            feedback: FeedbackMessages::default(),
            shuffle: true,
        }
    }
}

impl DrillConfig {
    /// Parse a (possibly partial) JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> DrillResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> DrillResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
