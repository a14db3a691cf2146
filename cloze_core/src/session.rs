//! Drill session state machine
//!
//! A `Session` owns everything the UI renders: mode, exercise set, the attempt
//! on the current exercise and the score. It only changes through the
//! per-intent methods (or `apply`), each of which is a synchronous transition.

use rand::Rng;

use crate::answer::check_answer;
use crate::config::DrillConfig;
use crate::error::DrillResult;
use crate::excel::{read_rows, Row};
use crate::exercise::{parse_rows, Exercise};
use crate::exercise_set::ExerciseSet;
use crate::keymap::{self, Key, KeyCommand};
use crate::score::Score;

/// Session lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for an upload
    Loading,
    Active,
    /// Past the last exercise; left only through `restart`
    Review,
    /// The upload could not be decoded
    Failed { message: String },
}

/// The learner's attempt on the current exercise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptState {
    pub user_answer: String,
    /// `None` until the answer is checked
    pub is_correct: Option<bool>,
    pub feedback: Option<String>,
    pub meaning_revealed: bool,
}

impl AttemptState {
    pub fn is_answered(&self) -> bool {
        self.is_correct.is_some()
    }
}

/// Discrete user intents forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetAnswer(String),
    Submit,
    Next,
    Previous,
    Retry,
    ToggleMeaning,
    Restart,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: DrillConfig,
    mode: Mode,
    exercises: ExerciseSet,
    attempt: AttemptState,
    score: Score,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(DrillConfig::default())
    }
}

impl Session {
    pub fn new(config: DrillConfig) -> Self {
        Session {
            config,
            mode: Mode::Loading,
            exercises: ExerciseSet::default(),
            attempt: AttemptState::default(),
            score: Score::default(),
        }
    }

    // ============= Queries =============

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn exercises(&self) -> &ExerciseSet {
        &self.exercises
    }

    pub fn current(&self) -> Option<&Exercise> {
        self.exercises.current()
    }

    pub fn attempt(&self) -> &AttemptState {
        &self.attempt
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_answered(&self) -> bool {
        self.attempt.is_answered()
    }

    /// (1-based position, number of exercises); position is 0 for an empty set
    pub fn progress(&self) -> (usize, usize) {
        let len = self.exercises.len();
        if len == 0 {
            (0, 0)
        } else {
            (self.exercises.cursor() + 1, len)
        }
    }

    /// Whether a submit would currently be accepted
    pub fn can_submit(&self) -> bool {
        self.has_current() && !self.is_answered() && !self.attempt.user_answer.trim().is_empty()
    }

    pub fn can_go_previous(&self) -> bool {
        self.mode == Mode::Active && self.exercises.cursor() > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.has_current()
    }

    fn has_current(&self) -> bool {
        self.mode == Mode::Active && !self.exercises.is_empty()
    }

    // ============= Loading =============

    /// Build a fresh set from decoded rows, shuffled with the thread RNG when configured
    pub fn load(&mut self, rows: &[Row]) {
        self.load_with_rng(rows, &mut rand::thread_rng());
    }

    /// Replace any previous set and score with exercises parsed from `rows`
    pub fn load_with_rng<R: Rng + ?Sized>(&mut self, rows: &[Row], rng: &mut R) {
        let exercises = parse_rows(rows, &self.config.columns);
        let set = if self.config.shuffle {
            ExerciseSet::shuffled(exercises, rng)
        } else {
            ExerciseSet::in_order(exercises)
        };
        self.start(set);
    }

    /// Start drilling an already built set
    pub fn start(&mut self, exercises: ExerciseSet) {
        log::info!("Loaded {} exercises", exercises.len());
        self.exercises = exercises;
        self.attempt = AttemptState::default();
        self.score.reset();
        self.mode = Mode::Active;
    }

    /// Continuation of an upload decode: rows start the drill, an error is
    /// surfaced as `Mode::Failed` instead of leaving the session loading.
    pub fn finish_decode(&mut self, decoded: DrillResult<Vec<Row>>) {
        match decoded {
            Ok(rows) => self.load(&rows),
            Err(e) => {
                log::warn!("Failed to decode upload: {}", e);
                self.exercises = ExerciseSet::default();
                self.attempt = AttemptState::default();
                self.score.reset();
                self.mode = Mode::Failed {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Decode an uploaded file and load it
    pub fn load_file(&mut self, file_name: &str, bytes: &[u8]) {
        self.finish_decode(read_rows(file_name, bytes));
    }

    // ============= Transitions =============

    /// Dispatch an intent. Returns whether the session changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        let changed = match &intent {
            Intent::SetAnswer(text) => self.set_answer(text),
            Intent::Submit => self.submit_answer(),
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::Retry => self.retry(),
            Intent::ToggleMeaning => self.toggle_meaning(),
            Intent::Restart => self.restart(),
        };
        if !changed {
            log::debug!("Ignored {:?} in {:?}", intent, self.mode);
        }
        changed
    }

    /// Resolve a key through the keymap and apply the resulting intent.
    /// `FocusAnswer` is handed back for the UI to act on.
    pub fn press_key(&mut self, key: Key) -> Option<KeyCommand> {
        let command = keymap::resolve(key, self)?;
        if let KeyCommand::Apply(intent) = &command {
            self.apply(intent.clone());
        }
        Some(command)
    }

    pub fn set_answer(&mut self, text: &str) -> bool {
        if !self.has_current() || self.is_answered() {
            return false;
        }
        self.attempt.user_answer = text.to_string();
        true
    }

    /// Check the typed answer and record it in the score.
    /// A whitespace-only answer counts as empty: nothing is checked or scored.
    pub fn submit_answer(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Some(exercise) = self.exercises.current() else {
            return false;
        };

        let check = check_answer(&self.attempt.user_answer, &exercise.word, &self.config.feedback);
        log::debug!(
            "Exercise {} answered {}",
            exercise.id,
            if check.is_correct { "correctly" } else { "incorrectly" }
        );

        self.score.record(check.is_correct);
        self.attempt.is_correct = Some(check.is_correct);
        self.attempt.feedback = Some(check.feedback);
        true
    }

    /// Advance, or enter review after the last exercise (cursor and score stay put)
    pub fn next(&mut self) -> bool {
        if !self.has_current() {
            return false;
        }
        if self.exercises.advance() {
            self.attempt = AttemptState::default();
        } else {
            log::info!(
                "Drill finished: {}/{} correct",
                self.score.correct,
                self.score.total
            );
            self.mode = Mode::Review;
        }
        true
    }

    /// Go back one exercise. Its earlier answer stays in the score, so
    /// answering it again counts a second time.
    pub fn previous(&mut self) -> bool {
        if self.mode != Mode::Active || !self.exercises.retreat() {
            return false;
        }
        self.attempt = AttemptState::default();
        true
    }

    /// Clear the attempt on the current exercise; score untouched
    pub fn retry(&mut self) -> bool {
        if !self.has_current() {
            return false;
        }
        self.attempt = AttemptState::default();
        true
    }

    pub fn toggle_meaning(&mut self) -> bool {
        if !self.has_current() {
            return false;
        }
        self.attempt.meaning_revealed = !self.attempt.meaning_revealed;
        true
    }

    /// Drop the set and score and wait for a new upload
    pub fn restart(&mut self) -> bool {
        if self.mode == Mode::Loading {
            return false;
        }
        log::info!("Session restarted");
        self.exercises = ExerciseSet::default();
        self.attempt = AttemptState::default();
        self.score.reset();
        self.mode = Mode::Loading;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrillError;

    fn drill(words: &[&str]) -> Session {
        let exercises = words
            .iter()
            .enumerate()
            .map(|(i, w)| Exercise::new(i.to_string(), *w, "___"))
            .collect();
        let mut session = Session::default();
        session.start(ExerciseSet::in_order(exercises));
        session
    }

    fn answer(session: &mut Session, text: &str) -> bool {
        session.set_answer(text);
        session.submit_answer()
    }

    #[test]
    fn test_starts_loading_and_ignores_intents() {
        let mut session = Session::default();

        assert_eq!(session.mode(), &Mode::Loading);
        for intent in [
            Intent::SetAnswer("x".into()),
            Intent::Submit,
            Intent::Next,
            Intent::Previous,
            Intent::Retry,
            Intent::ToggleMeaning,
            Intent::Restart,
        ] {
            assert!(!session.apply(intent));
        }
        assert_eq!(session.mode(), &Mode::Loading);
    }

    #[test]
    fn test_load_rows_activates_in_file_order_without_shuffle() {
        let config = DrillConfig {
            shuffle: false,
            ..DrillConfig::default()
        };
        let rows: Vec<Row> = vec![
            vec!["id".into()],
            vec!["1".into(), "".into(), "".into(), "".into(), "".into(), "cat".into()],
            vec!["2".into(), "".into(), "".into(), "".into(), "".into(), "dog".into()],
        ];
        let mut session = Session::new(config);
        session.load(&rows);

        assert_eq!(session.mode(), &Mode::Active);
        assert_eq!(session.progress(), (1, 2));
        assert_eq!(session.current().map(|e| e.word.as_str()), Some("cat"));
    }

    #[test]
    fn test_submit_records_score_and_feedback() {
        let mut session = drill(&["Apple", "pear"]);

        assert!(answer(&mut session, "  apple  "));
        assert_eq!(session.attempt().is_correct, Some(true));
        assert_eq!(session.attempt().feedback.as_deref(), Some("Correct!"));
        assert_eq!(session.score(), Score { correct: 1, total: 1 });

        session.next();
        assert!(answer(&mut session, "plum"));
        assert_eq!(session.attempt().is_correct, Some(false));
        assert_eq!(
            session.attempt().feedback.as_deref(),
            Some("Incorrect. The correct answer is: pear")
        );
        assert_eq!(session.score(), Score { correct: 1, total: 2 });
    }

    #[test]
    fn test_submit_requires_non_blank_answer() {
        let mut session = drill(&["cat"]);

        assert!(!session.submit_answer());
        session.set_answer("   ");
        assert!(!session.can_submit());
        assert!(!session.submit_answer());
        assert_eq!(session.score(), Score::default());
        assert!(!session.is_answered());
    }

    #[test]
    fn test_second_submit_is_ignored() {
        let mut session = drill(&["cat"]);

        assert!(answer(&mut session, "cat"));
        assert!(!session.submit_answer());
        assert!(!session.set_answer("dog"));
        assert_eq!(session.attempt().user_answer, "cat");
        assert_eq!(session.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn test_next_skips_unanswered_and_resets_attempt() {
        let mut session = drill(&["cat", "dog"]);
        session.set_answer("ca");
        session.toggle_meaning();

        assert!(session.next());
        assert_eq!(session.progress(), (2, 2));
        assert_eq!(session.attempt(), &AttemptState::default());
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn test_next_on_last_enters_review_and_freezes() {
        let mut session = drill(&["cat", "dog"]);
        session.next();
        answer(&mut session, "dog");

        assert!(session.next());
        assert_eq!(session.mode(), &Mode::Review);
        assert_eq!(session.progress(), (2, 2));
        assert_eq!(session.score(), Score { correct: 1, total: 1 });

        assert!(!session.next());
        assert!(!session.previous());
        assert!(!session.retry());
        assert!(!session.toggle_meaning());
        assert!(!session.submit_answer());
        assert_eq!(session.mode(), &Mode::Review);
        assert_eq!(session.progress(), (2, 2));
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut session = drill(&["cat", "dog"]);
        session.set_answer("ca");
        let before = session.attempt().clone();

        assert!(!session.previous());
        assert_eq!(session.progress(), (1, 2));
        assert_eq!(session.attempt(), &before);
    }

    #[test]
    fn test_revisiting_counts_answer_twice() {
        let mut session = drill(&["cat", "dog"]);
        answer(&mut session, "cat");
        session.next();

        assert!(session.previous());
        assert!(!session.is_answered());
        assert_eq!(session.score(), Score { correct: 1, total: 1 });

        answer(&mut session, "cat");
        assert_eq!(session.score(), Score { correct: 2, total: 2 });
    }

    #[test]
    fn test_retry_clears_attempt_only() {
        let mut session = drill(&["cat", "dog"]);
        session.next();
        session.toggle_meaning();
        answer(&mut session, "cow");

        assert!(session.retry());
        assert_eq!(session.attempt(), &AttemptState::default());
        assert_eq!(session.progress(), (2, 2));
        assert_eq!(session.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn test_toggle_meaning_leaves_answer_alone() {
        let mut session = drill(&["cat"]);
        answer(&mut session, "cat");

        assert!(session.toggle_meaning());
        assert!(session.attempt().meaning_revealed);
        assert!(session.toggle_meaning());
        assert!(!session.attempt().meaning_revealed);
        assert_eq!(session.attempt().is_correct, Some(true));
        assert_eq!(session.score(), Score { correct: 1, total: 1 });
    }

    #[test]
    fn test_restart_clears_everything() {
        let mut session = drill(&["cat", "dog"]);
        answer(&mut session, "cat");
        session.next();
        session.next();
        assert_eq!(session.mode(), &Mode::Review);

        assert!(session.restart());
        assert_eq!(session.mode(), &Mode::Loading);
        assert!(session.exercises().is_empty());
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.attempt(), &AttemptState::default());
        assert_eq!(session.progress(), (0, 0));
    }

    #[test]
    fn test_reload_discards_previous_set_and_score() {
        let mut session = drill(&["cat", "dog"]);
        answer(&mut session, "cat");

        session.start(ExerciseSet::in_order(vec![Exercise::new("9", "owl", "___")]));

        assert_eq!(session.mode(), &Mode::Active);
        assert_eq!(session.progress(), (1, 1));
        assert_eq!(session.score(), Score::default());
        assert!(!session.is_answered());
    }

    #[test]
    fn test_empty_set_is_active_but_inert() {
        let mut session = Session::default();
        session.load(&[vec!["header".to_string()]]);

        assert_eq!(session.mode(), &Mode::Active);
        assert_eq!(session.progress(), (0, 0));
        assert!(!session.set_answer("x"));
        assert!(!session.submit_answer());
        assert!(!session.next());
        assert!(!session.previous());
        assert!(!session.retry());
        assert!(!session.toggle_meaning());
        assert_eq!(session.score().percentage(), 0);
        assert!(session.restart());
    }

    #[test]
    fn test_decode_failure_surfaces_error() {
        let mut session = Session::default();
        session.finish_decode(Err(DrillError::EmptyWorkbook));

        match session.mode() {
            Mode::Failed { message } => assert_eq!(message, "No sheets found in workbook"),
            other => panic!("expected failed mode, got {:?}", other),
        }
        assert!(!session.next());
        assert!(session.restart());
        assert_eq!(session.mode(), &Mode::Loading);
    }

    #[test]
    fn test_load_file_with_unsupported_extension_fails() {
        let mut session = Session::default();
        session.load_file("words.docx", b"whatever");

        assert!(matches!(session.mode(), Mode::Failed { .. }));
    }

    #[test]
    fn test_empty_word_is_always_wrong() {
        let mut session = drill(&[""]);
        assert!(answer(&mut session, "anything"));
        assert_eq!(session.attempt().is_correct, Some(false));
        assert_eq!(session.score(), Score { correct: 0, total: 1 });
    }
}
