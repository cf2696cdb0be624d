//! RFox Playback
//!
//! A playback controller for an advertisement-style video element embedded in
//! a page. It autoplays the video, falls back to a canonical source when the
//! requested one fails to load, lets the viewer pause and resume with Enter or
//! the arrow keys, resumes automatically after a countdown, and pauses when
//! the page is hidden.
//!
//! # Features
//!
//! - **Deterministic core**: the controller owns a virtual-time scheduler, so
//!   hosts and tests decide when time passes
//! - **Pluggable page**: media element, countdown surface and clock are traits
//!   with in-memory implementations
//! - **Async facade** (`async` feature, default): a worker-thread backed
//!   [`Player`] driven by the wall clock
//!
//! # Example
//!
//! ```
//! use rfplayback::platform::{KeyInput, MediaState, RecordingDisplay, ScriptedMedia};
//! use rfplayback::{PlaybackController, PlayerConfig, PlayerEvent};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut player = PlaybackController::new(
//!     PlayerConfig::default(),
//!     ScriptedMedia::new(),
//!     RecordingDisplay::new(),
//! )?;
//! player.start();
//! player.dispatch(PlayerEvent::KeyDown(KeyInput::named("ArrowDown")));
//! assert_eq!(player.display().text(), "Video will resume in 15s");
//!
//! player.advance(Duration::from_secs(15));
//! assert!(!player.display().is_visible());
//! assert_eq!(player.snapshot().media_state, MediaState::Playing);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod controller;
pub mod events;
pub mod platform;
pub mod scheduler;
pub mod session;

// Async-friendly player API (worker-thread backed)
#[cfg(feature = "async")]
pub mod async_api;

pub use controller::{countdown_message, PlaybackController, COUNTDOWN_TICK};
pub use events::{PlaybackEvents, PlayerEvent};
pub use session::{PlaybackSession, SessionSnapshot};

#[cfg(feature = "async")]
pub use async_api::Player;

/// Configuration for a playback controller
///
/// The defaults reproduce the stock ad page:
/// - `fallback_source` is `video.mp4`, and is also the initial source
/// - every load gets a `v=<epoch millis>` cache-busting parameter
/// - a key-driven pause auto-resumes after 15 seconds
///
/// # Examples
///
/// ```
/// let cfg = rfplayback::PlayerConfig::default();
/// assert_eq!(cfg.resume_after_secs, 15);
/// assert_eq!(cfg.initial_source(), "video.mp4");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Canonical source filename, loaded when another source fails
    pub fallback_source: String,
    /// Source to load on start (defaults to `fallback_source`)
    pub initial_source: Option<String>,
    /// Query parameter name used for cache-busting
    pub cache_bust_param: String,
    /// MIME type given to attached sources
    pub source_mime: String,
    /// Seconds a key-driven pause lasts before playback resumes on its own
    pub resume_after_secs: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fallback_source: "video.mp4".to_string(),
            initial_source: None,
            cache_bust_param: "v".to_string(),
            source_mime: "video/mp4".to_string(),
            resume_after_secs: 15,
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: PlayerConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback_source.trim().is_empty() {
            return Err(Error::ConfigError("fallback_source must not be empty".into()));
        }
        if self.cache_bust_param.trim().is_empty() {
            return Err(Error::ConfigError("cache_bust_param must not be empty".into()));
        }
        if self.resume_after_secs == 0 {
            return Err(Error::ConfigError("resume_after_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn initial_source(&self) -> &str {
        self.initial_source
            .as_deref()
            .unwrap_or(self.fallback_source.as_str())
    }

    /// Delay of the one-shot auto-resume task
    pub fn resume_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.resume_after_secs))
    }
}
