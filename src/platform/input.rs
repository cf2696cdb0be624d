//! Page-level input: keyboard and visibility
use serde::{Deserialize, Serialize};

/// Key names that toggle playback
pub const CONTROL_KEYS: [&str; 5] = ["Enter", "ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight"];

/// Legacy `keyCode` values for Enter and the four arrows
pub const CONTROL_KEY_CODES: [u32; 5] = [13, 37, 38, 39, 40];

/// A keydown event as reported by the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Symbolic key name, e.g. `"ArrowDown"`
    pub key: String,
    /// Legacy numeric key code (0 when the platform doesn't report one)
    #[serde(default)]
    pub key_code: u32,
}

impl KeyInput {
    pub fn new(key: &str, key_code: u32) -> Self {
        KeyInput { key: key.to_string(), key_code }
    }

    /// Build an event from the symbolic name alone
    pub fn named(key: &str) -> Self {
        Self::new(key, 0)
    }

    /// Build an event from the legacy code alone
    pub fn code(key_code: u32) -> Self {
        Self::new("", key_code)
    }

    /// Whether this key pauses or resumes playback. Either the name or the
    /// legacy code is enough.
    pub fn is_playback_control(&self) -> bool {
        CONTROL_KEYS.contains(&self.key.as_str()) || CONTROL_KEY_CODES.contains(&self.key_code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Visible,
    Hidden,
}
