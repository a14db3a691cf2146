//! Python bindings used by the drill UI

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::answer::{check_answer, AnswerCheck};
use crate::config::{DrillConfig, FeedbackMessages};
use crate::excel::read_rows_from_path;
use crate::exercise::{parse_rows, Exercise};
use crate::keymap::{Key, KeyCommand};
use crate::score::Score;
use crate::session::{Intent, Session};
use crate::view::SessionView;

#[pymethods]
impl Exercise {
    fn __repr__(&self) -> String {
        format!("Exercise(id='{}', word='{}')", self.id, self.word)
    }
}

#[pymethods]
impl AnswerCheck {
    fn __repr__(&self) -> String {
        format!("AnswerCheck(is_correct={}, feedback='{}')", self.is_correct, self.feedback)
    }
}

#[pymethods]
impl Score {
    #[getter]
    fn percentage_value(&self) -> u32 {
        self.percentage()
    }

    fn __repr__(&self) -> String {
        format!("Score(correct={}, total={})", self.correct, self.total)
    }
}

/// One learner's drill session, driven by UI events
#[pyclass(name = "DrillSession")]
pub struct PyDrillSession {
    inner: Session,
}

#[pymethods]
impl PyDrillSession {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => DrillConfig::from_json_str(json)
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            None => DrillConfig::default(),
        };
        Ok(PyDrillSession {
            inner: Session::new(config),
        })
    }

    /// File-selected event: raw upload bytes plus the original file name
    fn load_file(&mut self, file_name: &str, data: &[u8]) {
        self.inner.load_file(file_name, data);
    }

    fn set_answer(&mut self, text: &str) -> bool {
        self.inner.apply(Intent::SetAnswer(text.to_string()))
    }

    fn submit(&mut self) -> bool {
        self.inner.apply(Intent::Submit)
    }

    fn next(&mut self) -> bool {
        self.inner.apply(Intent::Next)
    }

    fn previous(&mut self) -> bool {
        self.inner.apply(Intent::Previous)
    }

    fn retry(&mut self) -> bool {
        self.inner.apply(Intent::Retry)
    }

    fn toggle_meaning(&mut self) -> bool {
        self.inner.apply(Intent::ToggleMeaning)
    }

    fn restart(&mut self) -> bool {
        self.inner.apply(Intent::Restart)
    }

    /// Returns "focus_answer" when the UI should focus the answer field
    fn press_key(&mut self, key: &str) -> Option<&'static str> {
        let key = Key::from_name(key)?;
        match self.inner.press_key(key)? {
            KeyCommand::FocusAnswer => Some("focus_answer"),
            KeyCommand::Apply(_) => None,
        }
    }

    fn score(&self) -> Score {
        self.inner.score()
    }

    /// JSON snapshot of everything the UI renders
    fn view_json(&self) -> PyResult<String> {
        SessionView::of(&self.inner)
            .to_json()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }
}

#[pyfunction]
#[pyo3(name = "parse_exercises")]
pub fn py_parse_exercises(file_path: &str) -> PyResult<Vec<Exercise>> {
    let rows = read_rows_from_path(file_path)
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    Ok(parse_rows(&rows, &DrillConfig::default().columns))
}

#[pyfunction]
#[pyo3(name = "check_answer")]
pub fn py_check_answer(user_input: &str, expected: &str) -> AnswerCheck {
    check_answer(user_input, expected, &FeedbackMessages::default())
}
