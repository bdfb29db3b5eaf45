//! Keyboard decoding.
//!
//! Raw crossterm events become [`TuiEvent`]s: either a named key or one
//! printable ASCII character. Everything else is dropped here, so the
//! orchestrator only ever routes input it understands.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// A printable ASCII character (space through tilde).
    Char(char),
    Enter,
    /// Removes the character before the cursor (Backspace and Delete both
    /// land here, as on the terminals this console grew up on).
    Delete,
    Left,
    Right,
    Home,
    End,
    Escape,
    /// Ctrl+C.
    Quit,
}

pub fn decode(event: &Event) -> Option<TuiEvent> {
    let key = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key,
        _ => return None,
    };
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) && (' '..='~').contains(&c) => {
            Some(TuiEvent::Char(c))
        }
        (_, KeyCode::Enter) => Some(TuiEvent::Enter),
        (_, KeyCode::Backspace | KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::Left),
        (_, KeyCode::Right) => Some(TuiEvent::Right),
        (_, KeyCode::Home) => Some(TuiEvent::Home),
        (_, KeyCode::End) => Some(TuiEvent::End),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_printable_ascii_passes() {
        assert_eq!(
            decode(&press(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(TuiEvent::Char('a'))
        );
        assert_eq!(
            decode(&press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(TuiEvent::Char(' '))
        );
        assert_eq!(
            decode(&press(KeyCode::Char('~'), KeyModifiers::SHIFT)),
            Some(TuiEvent::Char('~'))
        );
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(decode(&press(KeyCode::Char('é'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_control_chords_are_not_text() {
        assert_eq!(
            decode(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        assert_eq!(decode(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(decode(&press(KeyCode::Enter, KeyModifiers::NONE)), Some(TuiEvent::Enter));
        assert_eq!(decode(&press(KeyCode::Backspace, KeyModifiers::NONE)), Some(TuiEvent::Delete));
        assert_eq!(decode(&press(KeyCode::Delete, KeyModifiers::NONE)), Some(TuiEvent::Delete));
        assert_eq!(decode(&press(KeyCode::Esc, KeyModifiers::NONE)), Some(TuiEvent::Escape));
        assert_eq!(decode(&press(KeyCode::Home, KeyModifiers::NONE)), Some(TuiEvent::Home));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(decode(&release), None);
    }
}
