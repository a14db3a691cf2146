//! ClozeDrill Core - Rust core for spreadsheet-driven vocabulary drills
//!
//! Turns uploaded spreadsheets into fill-in-the-blank exercises and runs the
//! drill session (answer checking, navigation, scoring) behind a small API
//! that the UI drives with intents and renders from snapshots.

pub mod answer;
pub mod config;
pub mod error;
pub mod excel;
pub mod exercise;
pub mod exercise_set;
pub mod keymap;
pub mod score;
pub mod session;
pub mod view;

#[cfg(feature = "python")]
mod python;

pub use answer::{check_answer, normalize, AnswerCheck};
pub use config::{ColumnLayout, DrillConfig, FeedbackMessages};
pub use error::{DrillError, DrillResult};
pub use excel::{read_rows, read_rows_from_path, Row, SheetFormat};
pub use exercise::{derive_sentence, parse_rows, Exercise};
pub use exercise_set::ExerciseSet;
pub use keymap::{Key, KeyCommand};
pub use score::Score;
pub use session::{AttemptState, Intent, Mode, Session};
pub use view::SessionView;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// ClozeDrill Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn cloze_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // File parsing
    m.add_function(wrap_pyfunction!(python::py_parse_exercises, m)?)?;

    // Answer checking
    m.add_function(wrap_pyfunction!(python::py_check_answer, m)?)?;

    // Register classes
    m.add_class::<python::PyDrillSession>()?;
    m.add_class::<Exercise>()?;
    m.add_class::<AnswerCheck>()?;
    m.add_class::<Score>()?;

    Ok(())
}
