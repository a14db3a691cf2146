//! Session score tracking

#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::Serialize;

/// Correct / total answers for the current session
#[cfg_attr(feature = "python", pyclass(get_all))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl Score {
    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    /// Rounded percentage correct; 0 before any answer
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.correct as f64 / self.total as f64).round() as u32
    }

    pub fn reset(&mut self) {
        *self = Score::default();
    }
}
