//! Ordered exercise collection with a cursor

use rand::seq::SliceRandom;
use rand::Rng;

use crate::exercise::Exercise;

/// Exercises in drill order plus the position of the current one.
/// The order is fixed when the set is built.
#[derive(Debug, Clone, Default)]
pub struct ExerciseSet {
    exercises: Vec<Exercise>,
    cursor: usize,
}

impl ExerciseSet {
    /// Uniformly random order (Fisher-Yates)
    pub fn shuffled<R: Rng + ?Sized>(mut exercises: Vec<Exercise>, rng: &mut R) -> Self {
        exercises.shuffle(rng);
        ExerciseSet { exercises, cursor: 0 }
    }

    pub fn in_order(exercises: Vec<Exercise>) -> Self {
        ExerciseSet { exercises, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Exercise> {
        self.exercises.get(self.cursor)
    }

    pub fn is_last(&self) -> bool {
        !self.is_empty() && self.cursor + 1 == self.len()
    }

    /// Move to the next exercise; false at the end or when empty
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous exercise; false at the start
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }
}
