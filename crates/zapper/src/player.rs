//! External player process management.
//!
//! The launcher is fire-and-forget: the player is spawned detached and the
//! call returns after the channel duration has elapsed, not when the player
//! exits. VLC is invoked with `--one-instance` so the next launch replaces
//! the stream in the already-running player window instead of opening a new
//! one; nothing here ever tracks or kills a child process.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::ZapError;

#[async_trait]
pub trait ChannelPlayer: Send + Sync {
    /// Verifies the configured player binary exists on disk.
    fn check_player_path(&self) -> Result<(), ZapError>;

    /// Plays `url` for `duration` of wall-clock time, then returns.
    async fn play_for(&self, url: &str, duration: Duration) -> Result<(), ZapError>;
}

pub struct VlcLauncher {
    path: PathBuf,
}

impl VlcLauncher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ChannelPlayer for VlcLauncher {
    fn check_player_path(&self) -> Result<(), ZapError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(ZapError::player_not_found(&self.path))
        }
    }

    async fn play_for(&self, url: &str, duration: Duration) -> Result<(), ZapError> {
        debug!(player = %self.path.display(), url, "launching player");

        Command::new(&self.path)
            .arg("--one-instance")
            .arg("--no-video-title-show")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ZapError::player_launch(&self.path, source))?;

        tokio::time::sleep(duration).await;
        Ok(())
    }
}
