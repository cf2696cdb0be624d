//! Event dispatch between the page and the controller.

use crate::platform::{KeyInput, MediaEvent, Visibility};

/// One handler per event kind the page can raise.
///
/// Handlers run to completion and never fail: problems are logged and show up
/// only as a state transition that did not happen.
pub trait PlaybackEvents {
    /// The media backend can start playing
    fn on_can_play(&mut self);

    /// Playback transitioned to playing, for any reason
    fn on_play_started(&mut self);

    /// Playback reached the natural end of the media
    fn on_ended(&mut self);

    /// The current source failed to load
    fn on_source_error(&mut self);

    fn on_key_down(&mut self, key: &KeyInput);

    fn on_visibility_change(&mut self, visibility: Visibility);
}

/// Any event the page can deliver to a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    CanPlay,
    PlayStarted,
    Ended,
    SourceError,
    KeyDown(KeyInput),
    VisibilityChange(Visibility),
}

impl PlayerEvent {
    /// Invoke the handler method matching this event
    pub fn dispatch_to<H: PlaybackEvents + ?Sized>(&self, handler: &mut H) {
        match self {
            PlayerEvent::CanPlay => handler.on_can_play(),
            PlayerEvent::PlayStarted => handler.on_play_started(),
            PlayerEvent::Ended => handler.on_ended(),
            PlayerEvent::SourceError => handler.on_source_error(),
            PlayerEvent::KeyDown(key) => handler.on_key_down(key),
            PlayerEvent::VisibilityChange(v) => handler.on_visibility_change(*v),
        }
    }
}

impl From<MediaEvent> for PlayerEvent {
    fn from(event: MediaEvent) -> Self {
        match event {
            MediaEvent::CanPlay => PlayerEvent::CanPlay,
            MediaEvent::PlayStarted => PlayerEvent::PlayStarted,
            MediaEvent::Ended => PlayerEvent::Ended,
            MediaEvent::SourceError => PlayerEvent::SourceError,
        }
    }
}

impl From<KeyInput> for PlayerEvent {
    fn from(key: KeyInput) -> Self {
        PlayerEvent::KeyDown(key)
    }
}

impl From<Visibility> for PlayerEvent {
    fn from(v: Visibility) -> Self {
        PlayerEvent::VisibilityChange(v)
    }
}
