//! Recorded input sessions.
//!
//! A script is a JSON array of steps: input events, editor actions, runs of
//! typed text and pauses. A pause delivers one caret tick per elapsed blink
//! interval.
//!
//! ```json
//! [
//!   {"event": "pointer_down", "position": {"x": 0, "y": 0}},
//!   {"event": "pointer_move", "position": {"x": 10, "y": 0}},
//!   {"event": "pointer_up"},
//!   {"action": "toggle_text"},
//!   {"text": "Hi"},
//!   {"wait_ms": 1000},
//!   {"event": "key", "key": "enter"}
//! ]
//! ```

use crate::error::AppResult;
use doodlepad_core::tools::BLINK_INTERVAL;
use doodlepad_core::{EditorAction, InputEvent, Key};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Event(InputEvent),
    Action(EditorAction),
    /// Shorthand for one key press per character.
    Text { text: String },
    Wait { wait_ms: u64 },
}

impl ScriptStep {
    /// Key presses for a `Text` step.
    pub fn typed_keys(text: &str) -> impl Iterator<Item = InputEvent> + '_ {
        text.chars().map(|c| InputEvent::Key {
            key: Key::Character(c.to_string()),
        })
    }

    /// Caret ticks that fall within a pause of `wait_ms`.
    pub fn ticks_for(wait_ms: u64) -> u64 {
        wait_ms / BLINK_INTERVAL.as_millis() as u64
    }
}

/// A sequence of steps replayed in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json(&json)?;
        log::info!("Loaded {} script steps from {}", script.len(), path.display());
        Ok(script)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
