//! Per-controller playback session state

use crate::platform::MediaState;
use crate::scheduler::TaskHandle;
use serde::Serialize;

/// A ticking countdown and the seconds it still has to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub handle: TaskHandle,
    pub remaining: u32,
}

/// Mutable state of one playback session.
///
/// `is_video_ready` and `video_ended` only ever go from false to true.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    pub(crate) is_video_ready: bool,
    pub(crate) video_ended: bool,
    pub(crate) resume_timer: Option<TaskHandle>,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) current_source_url: String,
    pub(crate) fallback_attempted: bool,
    pub(crate) last_error: Option<String>,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_video_ready(&self) -> bool {
        self.is_video_ready
    }

    pub fn video_ended(&self) -> bool {
        self.video_ended
    }

    pub fn resume_timer(&self) -> Option<TaskHandle> {
        self.resume_timer
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    pub fn current_source_url(&self) -> &str {
        &self.current_source_url
    }

    /// Whether the fallback source has been loaded in this session
    pub fn fallback_attempted(&self) -> bool {
        self.fallback_attempted
    }

    /// Most recent logged failure, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self, media_state: MediaState) -> SessionSnapshot {
        SessionSnapshot {
            is_video_ready: self.is_video_ready,
            video_ended: self.video_ended,
            resume_pending: self.resume_timer.is_some(),
            countdown_remaining: self.countdown.map(|c| c.remaining),
            current_source_url: self.current_source_url.clone(),
            fallback_attempted: self.fallback_attempted,
            last_error: self.last_error.clone(),
            media_state,
        }
    }
}

/// Point-in-time copy of a session, detached from the controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub is_video_ready: bool,
    pub video_ended: bool,
    pub resume_pending: bool,
    pub countdown_remaining: Option<u32>,
    pub current_source_url: String,
    pub fallback_attempted: bool,
    pub last_error: Option<String>,
    pub media_state: MediaState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_snapshot_serializes() {
        let s = PlaybackSession::new();
        let snap = s.snapshot(MediaState::Paused);
        assert!(!snap.is_video_ready);
        assert!(!snap.resume_pending);
        let js = serde_json::to_value(&snap).unwrap();
        assert_eq!(js["media_state"], "Paused");
        assert!(js["countdown_remaining"].is_null());
    }
}
