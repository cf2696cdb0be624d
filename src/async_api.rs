use crate::platform::{CountdownDisplay, KeyInput, MediaBackend, Visibility};
use crate::{Error, PlaybackController, PlayerConfig, PlayerEvent, Result, SessionSnapshot};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;
use tokio::sync::oneshot;

enum Command {
    Start(oneshot::Sender<SessionSnapshot>),
    LoadSource(String, oneshot::Sender<SessionSnapshot>),
    Dispatch(PlayerEvent, oneshot::Sender<SessionSnapshot>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Close(oneshot::Sender<SessionSnapshot>),
}

/// An async-friendly player backed by a dedicated worker thread.
///
/// The worker thread owns the `PlaybackController`, feeds it commands sent
/// from async tasks and advances its scheduler by wall-clock time, so the
/// countdown and auto-resume run without the caller polling.
#[derive(Clone)]
pub struct Player {
    cmd_tx: Sender<Command>,
}

impl Player {
    /// Create a player (spawns a background thread that owns the controller).
    pub async fn new<M, D>(config: Option<PlayerConfig>, media: M, display: D) -> Result<Self>
    where
        M: MediaBackend + Send + 'static,
        D: CountdownDisplay + Send + 'static,
    {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let mut controller = match PlaybackController::new(config, media, display) {
                Ok(c) => c,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            let mut last = Instant::now();
            loop {
                // Sleep until the next scheduled task unless a command arrives first
                let cmd = match controller.time_until_next_task() {
                    Some(wait) => match cmd_rx.recv_timeout(wait) {
                        Ok(cmd) => Some(cmd),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    },
                    None => match cmd_rx.recv() {
                        Ok(cmd) => Some(cmd),
                        Err(_) => break,
                    },
                };

                let now = Instant::now();
                controller.advance(now.duration_since(last));
                last = now;

                match cmd {
                    None => {}
                    Some(Command::Start(resp)) => {
                        controller.start();
                        let _ = resp.send(controller.snapshot());
                    }
                    Some(Command::LoadSource(url, resp)) => {
                        controller.load_source(&url);
                        let _ = resp.send(controller.snapshot());
                    }
                    Some(Command::Dispatch(event, resp)) => {
                        controller.dispatch(event);
                        let _ = resp.send(controller.snapshot());
                    }
                    Some(Command::Snapshot(resp)) => {
                        let _ = resp.send(controller.snapshot());
                    }
                    Some(Command::Close(resp)) => {
                        let _ = resp.send(controller.snapshot());
                        break;
                    }
                }
            }
            log::debug!("Player worker stopped");
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    async fn request(
        &self,
        what: &str,
        make: impl FnOnce(oneshot::Sender<SessionSnapshot>) -> Command,
    ) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(make(tx));
        rx.await
            .map_err(|e| Error::Other(format!("{} canceled: {}", what, e)))
    }

    /// Load the configured initial source
    pub async fn start(&self) -> Result<SessionSnapshot> {
        self.request("Start", Command::Start).await
    }

    pub async fn load_source(&self, url: &str) -> Result<SessionSnapshot> {
        let url = url.to_string();
        self.request("LoadSource", move |tx| Command::LoadSource(url, tx))
            .await
    }

    /// Deliver a page event and return the session state after handling it
    pub async fn dispatch(&self, event: PlayerEvent) -> Result<SessionSnapshot> {
        self.request("Dispatch", move |tx| Command::Dispatch(event, tx))
            .await
    }

    /// Convenience: deliver a keydown event
    pub async fn key_down(&self, key: KeyInput) -> Result<SessionSnapshot> {
        self.dispatch(PlayerEvent::KeyDown(key)).await
    }

    /// Convenience: deliver a visibility change
    pub async fn set_visibility(&self, visibility: Visibility) -> Result<SessionSnapshot> {
        self.dispatch(PlayerEvent::VisibilityChange(visibility)).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request("Snapshot", Command::Snapshot).await
    }

    /// Stop the worker thread, returning the final session state.
    pub async fn close(self) -> Result<SessionSnapshot> {
        self.request("Close", Command::Close).await
    }
}
