//! Render snapshot handed to the presentation layer

use serde::Serialize;

use crate::score::Score;
use crate::session::{Mode, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// `loading`, `active`, `review` or `failed`
    pub mode: &'static str,
    pub error: Option<String>,
    pub progress: ProgressView,
    pub exercise: Option<ExerciseView>,
    pub attempt: AttemptView,
    pub score: ScoreView,
    pub can_submit: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub position: usize,
    pub total: usize,
}

/// Visible fields of the current exercise. Meaning and pronunciation stay
/// hidden until revealed; the word itself is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseView {
    pub sentence: String,
    pub hint: String,
    pub blanked_word: String,
    pub pronunciation: Option<String>,
    pub meaning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptView {
    pub user_answer: String,
    pub is_correct: Option<bool>,
    pub feedback: Option<String>,
    pub meaning_revealed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreView {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

impl From<Score> for ScoreView {
    fn from(score: Score) -> Self {
        ScoreView {
            correct: score.correct,
            total: score.total,
            percentage: score.percentage(),
        }
    }
}

impl SessionView {
    pub fn of(session: &Session) -> Self {
        let (mode, error) = match session.mode() {
            Mode::Loading => ("loading", None),
            Mode::Active => ("active", None),
            Mode::Review => ("review", None),
            Mode::Failed { message } => ("failed", Some(message.clone())),
        };

        let attempt = session.attempt();
        let revealed = attempt.meaning_revealed;

        let exercise = match session.mode() {
            Mode::Active => session.current().map(|ex| ExerciseView {
                sentence: ex.sentence.clone(),
                hint: ex.hint.clone(),
                blanked_word: ex.blanked_word.clone(),
                pronunciation: revealed.then(|| ex.pronunciation.clone()),
                meaning: revealed.then(|| ex.meaning.clone()),
            }),
            _ => None,
        };

        let (position, total) = session.progress();

        SessionView {
            mode,
            error,
            progress: ProgressView { position, total },
            exercise,
            attempt: AttemptView {
                user_answer: attempt.user_answer.clone(),
                is_correct: attempt.is_correct,
                feedback: attempt.feedback.clone(),
                meaning_revealed: revealed,
            },
            score: session.score().into(),
            can_submit: session.can_submit(),
            can_go_previous: session.can_go_previous(),
            can_go_next: session.can_go_next(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
