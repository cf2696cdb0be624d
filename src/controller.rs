//! Playback controller: autoplay, source fallback, key-driven pause with
//! timed auto-resume, and visibility pausing.
//!
//! The controller owns its session, its scheduler and both page
//! collaborators. It is driven entirely from the outside: page events come in
//! through [`PlaybackEvents`] (or [`PlaybackController::dispatch`]) and time
//! moves forward through [`PlaybackController::advance`]. After every entry
//! point the media backend's queued events are drained and handled, the way a
//! page's event loop would deliver them.

use crate::events::{PlaybackEvents, PlayerEvent};
use crate::platform::{Clock, CountdownDisplay, KeyInput, MediaBackend, SystemClock, Visibility};
use crate::scheduler::{Scheduler, TaskHandle, TaskKind};
use crate::session::{Countdown, PlaybackSession, SessionSnapshot};
use crate::{Error, PlayerConfig, Result};
use log::{debug, error, info, warn};
use std::time::Duration;

/// Period of the countdown tick
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Text shown on the countdown surface
pub fn countdown_message(remaining: u32) -> String {
    format!("Video will resume in {}s", remaining)
}

pub struct PlaybackController<M, D> {
    config: PlayerConfig,
    session: PlaybackSession,
    scheduler: Scheduler,
    media: M,
    display: D,
    clock: Box<dyn Clock>,
}

impl<M: MediaBackend, D: CountdownDisplay> PlaybackController<M, D> {
    /// Create a controller. Fails only when `config` is invalid.
    pub fn new(config: PlayerConfig, media: M, display: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            session: PlaybackSession::new(),
            scheduler: Scheduler::new(),
            media,
            display,
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the clock used for cache-busting parameters
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot(self.media.state())
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    /// Mutable access to the backend, for hosts that feed it state changes.
    /// Call [`pump`](Self::pump) afterwards to deliver what it queued.
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Time until the next scheduled task is due
    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    /// Append the cache-busting parameter to `url`
    pub fn cache_busted(&self, url: &str) -> String {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            url,
            sep,
            self.config.cache_bust_param,
            self.clock.now_millis()
        )
    }

    /// Load the configured initial source with a fresh cache-busting parameter
    pub fn start(&mut self) {
        let url = self.cache_busted(self.config.initial_source());
        self.load_source(&url);
    }

    /// Replace the attached source with `url`, reload and try to play.
    ///
    /// A rejected play is logged and otherwise ignored; readiness comes from
    /// the backend's can-play event.
    pub fn load_source(&mut self, url: &str) {
        self.attach_and_load(url);
        self.pump();
    }

    fn attach_and_load(&mut self, url: &str) {
        self.media.clear_sources();
        self.media.attach_source(url, &self.config.source_mime);
        self.session.current_source_url = url.to_string();
        self.media.load();
        if let Err(e) = self.media.play() {
            self.record(format!("Initial play failed for {}: {}", url, e));
        }
    }

    /// Deliver an event, then drain whatever the backend queued in response
    pub fn dispatch(&mut self, event: PlayerEvent) {
        self.handle(&event);
        self.pump();
    }

    /// Handle every queued media event until the backend goes quiet
    pub fn pump(&mut self) {
        loop {
            let events = self.media.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle(&PlayerEvent::from(event));
            }
        }
    }

    fn handle(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::CanPlay => self.handle_can_play(),
            PlayerEvent::PlayStarted => self.handle_play_started(),
            PlayerEvent::Ended => self.handle_ended(),
            PlayerEvent::SourceError => self.handle_source_error(),
            PlayerEvent::KeyDown(key) => self.handle_key_down(key),
            PlayerEvent::VisibilityChange(v) => self.handle_visibility_change(*v),
        }
    }

    /// Move time forward by `elapsed`, running every task that falls due
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some((handle, kind)) = self.scheduler.pop_due(target) {
            match kind {
                TaskKind::Resume => self.on_resume_timer(handle),
                TaskKind::CountdownTick => self.on_countdown_tick(handle),
            }
            self.pump();
        }
        self.scheduler.advance_to(target);
    }

    /// Show the countdown and start ticking it down once per second.
    ///
    /// A zero-second countdown expires on the spot: nothing is shown and
    /// playback is resumed right away.
    pub fn start_countdown(&mut self, seconds: u32) {
        if let Some(prev) = self.session.countdown.take() {
            self.scheduler.cancel(prev.handle);
        }
        if seconds == 0 {
            self.expire_countdown();
            self.pump();
            return;
        }
        self.display.show(&countdown_message(seconds));
        let handle = self
            .scheduler
            .schedule_repeating(TaskKind::CountdownTick, COUNTDOWN_TICK);
        self.session.countdown = Some(Countdown {
            handle,
            remaining: seconds,
        });
    }

    /// Cancel any ticking countdown and hide the surface. Idempotent.
    pub fn stop_countdown(&mut self) {
        if let Some(countdown) = self.session.countdown.take() {
            self.scheduler.cancel(countdown.handle);
        }
        self.display.hide();
    }

    fn expire_countdown(&mut self) {
        self.stop_countdown();
        match self.media.play() {
            Ok(()) => info!("Auto-resumed video after countdown"),
            Err(e) => self.record(format!("Auto-resume failed: {}", e)),
        }
    }

    fn on_countdown_tick(&mut self, handle: TaskHandle) {
        let remaining = match self.session.countdown.as_mut() {
            Some(c) if c.handle == handle => {
                c.remaining = c.remaining.saturating_sub(1);
                c.remaining
            }
            _ => {
                self.scheduler.cancel(handle);
                return;
            }
        };
        self.display.show(&countdown_message(remaining));

        if remaining == 0 {
            self.expire_countdown();
        }
    }

    // The resume task only checks its own guard; it is cancelled by a real
    // play-started event and nothing else.
    fn on_resume_timer(&mut self, handle: TaskHandle) {
        if self.session.resume_timer == Some(handle) {
            self.session.resume_timer = None;
        }
        self.stop_countdown();
        if !self.session.video_ended && self.media.is_paused() {
            match self.media.play() {
                Ok(()) => info!(
                    "Auto-resumed video after {} seconds",
                    self.config.resume_after_secs
                ),
                Err(e) => self.record(format!("Auto-resume failed: {}", e)),
            }
        }
    }

    fn record(&mut self, message: String) {
        error!("{}", message);
        self.session.last_error = Some(message);
    }

    fn handle_can_play(&mut self) {
        match self.media.play() {
            Ok(()) => {
                self.session.is_video_ready = true;
                self.media.set_visible(true);
                debug!("Video ready: {}", self.session.current_source_url);
            }
            Err(e) => {
                warn!("Play on can-play rejected: {}", e);
                self.session.last_error = Some(e.to_string());
            }
        }
    }

    fn handle_play_started(&mut self) {
        if let Some(handle) = self.session.resume_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.stop_countdown();
    }

    fn handle_ended(&mut self) {
        self.session.video_ended = true;
        self.stop_countdown();
    }

    fn handle_source_error(&mut self) {
        let failed = self.session.current_source_url.clone();
        let err = Error::SourceLoadError(failed.clone());
        warn!("{}", err);
        self.session.last_error = Some(err.to_string());

        if failed.contains(self.config.fallback_source.as_str()) {
            debug!("Fallback source failed as well; giving up");
            return;
        }
        let fallback = self.cache_busted(&self.config.fallback_source);
        info!("Falling back to {}", fallback);
        self.session.fallback_attempted = true;
        self.attach_and_load(&fallback);
    }

    fn handle_key_down(&mut self, key: &KeyInput) {
        if !self.session.is_video_ready || self.session.video_ended {
            return;
        }
        if !key.is_playback_control() {
            return;
        }

        if self.media.is_paused() {
            match self.media.play() {
                Ok(()) => {
                    info!("Resumed by key");
                    self.stop_countdown();
                }
                Err(e) => self.record(format!("Resume by key failed: {}", e)),
            }
            return;
        }

        self.media.pause();
        info!("Paused by key");
        if self.session.resume_timer.is_none() {
            self.start_countdown(self.config.resume_after_secs);
            let handle = self
                .scheduler
                .schedule_once(TaskKind::Resume, self.config.resume_delay());
            self.session.resume_timer = Some(handle);
        }
    }

    fn handle_visibility_change(&mut self, visibility: Visibility) {
        if visibility == Visibility::Hidden && !self.media.is_paused() {
            self.media.pause();
            info!("Visibility change: paused video");
        }
    }
}

// Each handler drains the backend's queue before returning, same as `dispatch`.
impl<M: MediaBackend, D: CountdownDisplay> PlaybackEvents for PlaybackController<M, D> {
    fn on_can_play(&mut self) {
        self.handle_can_play();
        self.pump();
    }

    fn on_play_started(&mut self) {
        self.handle_play_started();
        self.pump();
    }

    fn on_ended(&mut self) {
        self.handle_ended();
        self.pump();
    }

    fn on_source_error(&mut self) {
        self.handle_source_error();
        self.pump();
    }

    fn on_key_down(&mut self, key: &KeyInput) {
        self.handle_key_down(key);
        self.pump();
    }

    fn on_visibility_change(&mut self, visibility: Visibility) {
        self.handle_visibility_change(visibility);
        self.pump();
    }
}
