//! Conversion of spreadsheet rows into fill-in-the-blank exercises

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ColumnLayout;
use crate::excel::Row;

/// One drill item
#[cfg_attr(feature = "python", pyclass(get_all, frozen))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    /// Expected answer
    pub word: String,
    pub hint: String,
    /// Prompt text containing the blank
    pub sentence: String,
    /// Display form of the word with letters hidden
    pub blanked_word: String,
    pub meaning: String,
    pub pronunciation: String,
}

impl Exercise {
    pub fn new(id: impl Into<String>, word: impl Into<String>, sentence: impl Into<String>) -> Self {
        Exercise {
            id: id.into(),
            word: word.into(),
            hint: String::new(),
            sentence: sentence.into(),
            blanked_word: String::new(),
            meaning: String::new(),
            pronunciation: String::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>, pronunciation: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self.pronunciation = pronunciation.into();
        self
    }
}

/// Parse data rows (row 0 is the header) into exercises, in input order.
///
/// Rows without cells are skipped. Nothing else is validated: a row with no
/// word still becomes an exercise, which simply can never be answered correctly.
pub fn parse_rows(rows: &[Row], columns: &ColumnLayout) -> Vec<Exercise> {
    rows.iter()
        .skip(1)
        .filter(|row| !row.is_empty())
        .map(|row| parse_row(row, columns))
        .collect()
}

fn parse_row(row: &[String], columns: &ColumnLayout) -> Exercise {
    let cell = |i: usize| row.get(i).cloned().unwrap_or_default();

    let example = cell(columns.example);
    let question = cell(columns.question);

    Exercise {
        id: cell(columns.id),
        word: cell(columns.word),
        hint: cell(columns.hint),
        sentence: derive_sentence(&question, &example),
        blanked_word: cell(columns.blanked_word),
        meaning: cell(columns.meaning),
        pronunciation: cell(columns.pronunciation),
    }
}

/// Text before the first line break of a question cell is a label and is dropped.
/// Falls back to the example text when nothing is left.
pub fn derive_sentence(question: &str, example: &str) -> String {
    let sentence = match question.split_once('\n') {
        Some((_label, rest)) => rest,
        None => question,
    };

    if sentence.is_empty() {
        example.to_string()
    } else {
        sentence.to_string()
    }
}
