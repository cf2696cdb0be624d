//! Media backend contract and an in-memory backend for deterministic tests
use crate::{Error, Result};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MediaState {
    Playing,
    Paused,
    Ended,
}

/// Events a media backend queues for the controller to consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Enough data is buffered to start playback
    CanPlay,
    /// Playback transitioned to playing, whatever the cause
    PlayStarted,
    /// Playback reached the natural end of the media
    Ended,
    /// The attached source failed to load
    SourceError,
}

/// The media element the controller drives.
///
/// `play` reports its outcome directly; everything else the element has to
/// say arrives through `take_events`.
pub trait MediaBackend {
    /// Remove every attached source
    fn clear_sources(&mut self);

    /// Attach a source with the given MIME type
    fn attach_source(&mut self, url: &str, mime: &str);

    /// Begin (re)loading the attached sources
    fn load(&mut self);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn state(&self) -> MediaState;

    /// Show or hide the element on the page
    fn set_visible(&mut self, visible: bool);

    /// Drain queued media events in the order they were raised
    fn take_events(&mut self) -> Vec<MediaEvent>;

    fn is_paused(&self) -> bool {
        self.state() != MediaState::Playing
    }
}

/// In-memory backend with scriptable failures.
///
/// Loading a source queues `CanPlay` unless the URL contains one of the
/// configured failure patterns, in which case `SourceError` is queued and
/// play requests are rejected until a good source is loaded.
#[derive(Debug)]
pub struct ScriptedMedia {
    state: MediaState,
    visible: bool,
    sources: Vec<String>,
    loaded: Option<String>,
    source_playable: bool,
    failing_sources: Vec<String>,
    autoplay_blocked: bool,
    loads: Vec<String>,
    play_calls: usize,
    pause_calls: usize,
    events: VecDeque<MediaEvent>,
}

impl ScriptedMedia {
    pub fn new() -> Self {
        ScriptedMedia {
            state: MediaState::Paused,
            visible: false,
            sources: Vec::new(),
            loaded: None,
            source_playable: false,
            failing_sources: Vec::new(),
            autoplay_blocked: false,
            loads: Vec::new(),
            play_calls: 0,
            pause_calls: 0,
            events: VecDeque::new(),
        }
    }

    /// Make every source whose URL contains `pattern` fail to load
    pub fn fail_sources_matching(mut self, pattern: &str) -> Self {
        self.failing_sources.push(pattern.to_string());
        self
    }

    /// Reject every play request, as a browser autoplay policy would
    pub fn block_autoplay(&mut self, blocked: bool) {
        self.autoplay_blocked = blocked;
    }

    /// Simulate the media reaching its natural end
    pub fn finish(&mut self) {
        if self.state == MediaState::Playing {
            self.state = MediaState::Ended;
            self.events.push_back(MediaEvent::Ended);
        }
    }

    /// Queue an arbitrary event, for hosts that simulate backend quirks
    pub fn raise(&mut self, event: MediaEvent) {
        self.events.push_back(event);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Every URL passed to `load`, in order
    pub fn loads(&self) -> &[String] {
        &self.loads
    }

    pub fn play_calls(&self) -> usize {
        self.play_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.pause_calls
    }
}

impl Default for ScriptedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaBackend for ScriptedMedia {
    fn clear_sources(&mut self) {
        self.sources.clear();
    }

    fn attach_source(&mut self, url: &str, _mime: &str) {
        self.sources.push(url.to_string());
    }

    fn load(&mut self) {
        self.state = MediaState::Paused;
        self.loaded = self.sources.first().cloned();
        let Some(url) = self.loaded.clone() else {
            self.source_playable = false;
            return;
        };
        self.loads.push(url.clone());
        self.source_playable = !self.failing_sources.iter().any(|p| url.contains(p.as_str()));
        if self.source_playable {
            self.events.push_back(MediaEvent::CanPlay);
        } else {
            self.events.push_back(MediaEvent::SourceError);
        }
    }

    fn play(&mut self) -> Result<()> {
        self.play_calls += 1;
        if self.autoplay_blocked {
            return Err(Error::PlaybackRequestError("play() not allowed by autoplay policy".into()));
        }
        if !self.source_playable {
            return Err(Error::PlaybackRequestError("no supported source".into()));
        }
        if self.state != MediaState::Playing {
            self.state = MediaState::Playing;
            self.events.push_back(MediaEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        if self.state == MediaState::Playing {
            self.state = MediaState::Paused;
        }
    }

    fn state(&self) -> MediaState {
        self.state
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_media_transitions_state() {
        let mut m = ScriptedMedia::new();
        assert_eq!(m.state(), MediaState::Paused);
        m.attach_source("video.mp4", "video/mp4");
        m.load();
        m.play().unwrap();
        assert_eq!(m.state(), MediaState::Playing);
        m.pause();
        assert_eq!(m.state(), MediaState::Paused);
        assert_eq!(
            m.take_events(),
            vec![MediaEvent::CanPlay, MediaEvent::PlayStarted]
        );
    }

    #[test]
    fn failing_source_rejects_play() {
        let mut m = ScriptedMedia::new().fail_sources_matching("broken");
        m.attach_source("broken.mp4", "video/mp4");
        m.load();
        assert!(m.play().is_err());
        assert_eq!(m.take_events(), vec![MediaEvent::SourceError]);
    }

    #[test]
    fn play_while_playing_raises_no_event() {
        let mut m = ScriptedMedia::new();
        m.attach_source("video.mp4", "video/mp4");
        m.load();
        m.play().unwrap();
        m.take_events();
        m.play().unwrap();
        assert!(m.take_events().is_empty());
    }

    #[test]
    fn finish_counts_as_paused() {
        let mut m = ScriptedMedia::new();
        m.attach_source("video.mp4", "video/mp4");
        m.load();
        m.play().unwrap();
        m.finish();
        assert_eq!(m.state(), MediaState::Ended);
        assert!(m.is_paused());
    }
}
