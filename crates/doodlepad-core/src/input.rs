//! Input events delivered by the host shell.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Keyboard key, as far as text entry cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Enter,
    Backspace,
    Delete,
    /// A key that produces text. Multi-character values come from named
    /// keys the host could not map and are ignored by text entry.
    Character(String),
    /// Any other named key (arrows, modifiers, ...).
    Other(String),
}

impl Key {
    /// Map a DOM-style key name to a key.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            s if s.chars().count() == 1 => Key::Character(s.to_string()),
            s => Key::Other(s.to_string()),
        }
    }

    /// The single character this key types, if any.
    pub fn typed_char(&self) -> Option<char> {
        match self {
            Key::Character(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Events consumed by the editor, in arrival order.
///
/// Pointer positions are in surface-local logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp,
    /// The pointer left the surface. Ends a stroke like `PointerUp`.
    PointerLeave,
    Key { key: Key },
    /// Caret blink timer fired.
    Tick,
    /// The surface's display size or pixel density changed.
    Resize { size: Size, scale_factor: f64 },
}

impl InputEvent {
    pub fn down(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    pub fn key(name: &str) -> Self {
        InputEvent::Key {
            key: Key::from_name(name),
        }
    }

    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position } | InputEvent::PointerMove { position } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("a"), Key::Character("a".to_string()));
        assert_eq!(Key::from_name("é"), Key::Character("é".to_string()));
        assert_eq!(Key::from_name("Shift"), Key::Other("Shift".to_string()));
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(Key::from_name("x").typed_char(), Some('x'));
        assert_eq!(Key::from_name(" ").typed_char(), Some(' '));
        assert_eq!(Key::Character("ab".to_string()).typed_char(), None);
        assert_eq!(Key::Enter.typed_char(), None);
    }

    #[test]
    fn test_event_json_form() {
        let ev: InputEvent =
            serde_json::from_str(r#"{"event":"pointer_down","position":{"x":1.0,"y":2.0}}"#)
                .unwrap();
        assert_eq!(ev, InputEvent::down(1.0, 2.0));
        assert_eq!(ev.position(), Some(Point::new(1.0, 2.0)));

        let ev: InputEvent =
            serde_json::from_str(r#"{"event":"key","key":{"character":"h"}}"#).unwrap();
        assert_eq!(ev, InputEvent::key("h"));
        assert_eq!(ev.position(), None);
        assert_eq!(InputEvent::PointerUp.position(), None);
    }
}
