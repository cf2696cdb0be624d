#![cfg(feature = "async")]

use rfplayback::platform::{KeyInput, MediaState, RecordingDisplay, ScriptedMedia, Visibility};
use rfplayback::{Error, Player, PlayerConfig};
use std::time::Duration;

fn short_config() -> PlayerConfig {
    PlayerConfig {
        resume_after_secs: 1,
        ..Default::default()
    }
}

#[tokio::test]
async fn player_auto_resumes_on_wall_clock() -> anyhow::Result<()> {
    let player = Player::new(
        Some(short_config()),
        ScriptedMedia::new(),
        RecordingDisplay::new(),
    )
    .await?;

    let snap = player.start().await?;
    assert!(snap.is_video_ready);
    assert_eq!(snap.media_state, MediaState::Playing);

    let snap = player.key_down(KeyInput::named("ArrowDown")).await?;
    assert_eq!(snap.media_state, MediaState::Paused);
    assert_eq!(snap.countdown_remaining, Some(1));
    assert!(snap.resume_pending);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    let snap = player.snapshot().await?;
    assert_eq!(snap.media_state, MediaState::Playing);
    assert_eq!(snap.countdown_remaining, None);
    assert!(!snap.resume_pending);

    player.close().await?;
    Ok(())
}

#[tokio::test]
async fn player_visibility_pause_stays_paused() -> anyhow::Result<()> {
    let player = Player::new(
        Some(short_config()),
        ScriptedMedia::new(),
        RecordingDisplay::new(),
    )
    .await?;
    player.start().await?;

    let snap = player.set_visibility(Visibility::Hidden).await?;
    assert_eq!(snap.media_state, MediaState::Paused);
    assert!(!snap.resume_pending);

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(player.snapshot().await?.media_state, MediaState::Paused);

    player.close().await?;
    Ok(())
}

#[tokio::test]
async fn player_load_source_falls_back() -> anyhow::Result<()> {
    let media = ScriptedMedia::new().fail_sources_matching("promo");
    let player = Player::new(None, media, RecordingDisplay::new()).await?;

    let snap = player.load_source("promo.mp4?v=1").await?;
    assert!(snap.fallback_attempted);
    assert!(snap.current_source_url.starts_with("video.mp4?v="));
    assert!(snap.is_video_ready);

    player.close().await?;
    Ok(())
}

#[tokio::test]
async fn invalid_config_fails_player_creation() {
    let cfg = PlayerConfig {
        cache_bust_param: String::new(),
        ..Default::default()
    };
    let res = Player::new(Some(cfg), ScriptedMedia::new(), RecordingDisplay::new()).await;
    assert!(matches!(res, Err(Error::ConfigError(_))));
}

#[tokio::test]
async fn closed_player_rejects_requests() -> anyhow::Result<()> {
    let player = Player::new(None, ScriptedMedia::new(), RecordingDisplay::new()).await?;
    let other = player.clone();
    player.close().await?;

    let res = other.snapshot().await;
    assert!(matches!(res, Err(Error::Other(_))));
    Ok(())
}
