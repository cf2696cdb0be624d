//! Platform surface: media element, countdown display, page input, clock
//!
//! This module contains the public types and traits the controller uses to
//! talk to the page. Each collaborator ships with an in-memory implementation
//! so hosts and tests can drive playback deterministically.

pub mod clock;
pub mod display;
pub mod input;
pub mod media;

pub use clock::{Clock, FixedClock, SystemClock};
pub use display::{CountdownDisplay, RecordingDisplay};
pub use input::{KeyInput, Visibility};
pub use media::{MediaBackend, MediaEvent, MediaState, ScriptedMedia};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_surfaces_start_idle() {
        let media = ScriptedMedia::new();
        assert_eq!(media.state(), MediaState::Paused);
        assert!(!media.is_visible());

        let display = RecordingDisplay::new();
        assert!(!display.is_visible());
        assert!(display.history().is_empty());

        assert_eq!(FixedClock(42).now_millis(), 42);
    }
}
