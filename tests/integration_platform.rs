use rfplayback::platform::clock::FixedClock;
use rfplayback::platform::display::RecordingDisplay;
use rfplayback::platform::input::KeyInput;
use rfplayback::platform::media::ScriptedMedia;
use rfplayback::platform::{Clock, CountdownDisplay, MediaBackend, MediaEvent, MediaState};

#[test]
fn scripted_media_reports_source_errors_per_url() {
    let mut m = ScriptedMedia::new().fail_sources_matching("cdn.example");
    m.attach_source("https://cdn.example/ad.mp4", "video/mp4");
    m.load();
    assert_eq!(m.take_events(), vec![MediaEvent::SourceError]);
    assert!(m.play().is_err());

    m.clear_sources();
    m.attach_source("video.mp4?v=1", "video/mp4");
    m.load();
    assert_eq!(m.take_events(), vec![MediaEvent::CanPlay]);
    m.play().expect("good source should play");
    assert_eq!(m.state(), MediaState::Playing);
    assert_eq!(m.loads().len(), 2);
}

#[test]
fn scripted_media_autoplay_block_rejects_play() {
    let mut m = ScriptedMedia::new();
    m.attach_source("video.mp4", "video/mp4");
    m.load();
    m.block_autoplay(true);
    let err = m.play().unwrap_err();
    assert!(err.to_string().contains("autoplay"));
    assert_eq!(m.state(), MediaState::Paused);
}

#[test]
fn recording_display_keeps_last_text_when_hidden() {
    let mut d = RecordingDisplay::new();
    d.show("Video will resume in 1s");
    d.hide();
    assert!(!d.is_visible());
    assert_eq!(d.text(), "Video will resume in 1s");
}

#[test]
fn key_codes_and_clock() {
    assert!(KeyInput::code(13).is_playback_control());
    assert!(!KeyInput::code(27).is_playback_control());
    assert_eq!(FixedClock(7).now_millis(), 7);
}
