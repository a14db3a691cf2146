//! Keyboard shortcuts, kept apart from the state machine

use crate::session::{Intent, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowRight,
    ArrowLeft,
    Tab,
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "Enter" => Some(Key::Enter),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "Tab" => Some(Key::Tab),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// What a bound key asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    /// Submit while unanswered, otherwise move on
    SubmitOrNext,
    Next,
    Previous,
    Retry,
    FocusAnswer,
}

const BINDINGS: &[(Key, Binding)] = &[
    (Key::Enter, Binding::SubmitOrNext),
    (Key::ArrowRight, Binding::Next),
    (Key::ArrowLeft, Binding::Previous),
    (Key::Char('r'), Binding::Retry),
    (Key::Char('R'), Binding::Retry),
    (Key::Tab, Binding::FocusAnswer),
];

/// Result of resolving a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCommand {
    Apply(Intent),
    /// Move keyboard focus to the answer field (UI only)
    FocusAnswer,
}

/// Map a key to a command for the session's current state; `None` when unbound
pub fn resolve(key: Key, session: &Session) -> Option<KeyCommand> {
    let binding = BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, binding)| *binding)?;

    let command = match binding {
        Binding::SubmitOrNext if session.is_answered() => KeyCommand::Apply(Intent::Next),
        Binding::SubmitOrNext => KeyCommand::Apply(Intent::Submit),
        Binding::Next => KeyCommand::Apply(Intent::Next),
        Binding::Previous => KeyCommand::Apply(Intent::Previous),
        Binding::Retry => KeyCommand::Apply(Intent::Retry),
        Binding::FocusAnswer => KeyCommand::FocusAnswer,
    };
    Some(command)
}
