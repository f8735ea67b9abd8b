//! The round-robin rotation loop.
//!
//! The scheduler starts Idle, fetches the playlist exactly once, and on
//! success enters Rotating: play the current channel for the configured
//! duration, advance the index modulo the playlist length, repeat until the
//! cancellation token fires. Any startup failure is fatal and no `Init`
//! event is ever published; a player launch failure mid-rotation is logged
//! and the rotation simply moves on to the next channel.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::OrchestrationConfig;
use crate::error::ZapError;
use crate::events::{EventBus, LifecycleEvent};
use crate::player::ChannelPlayer;
use crate::playlist::{Channel, PlaylistSource, PlaylistTransport};

pub struct ChannelScheduler<P> {
    config: OrchestrationConfig,
    bus: Arc<EventBus>,
    player: P,
    channels: Vec<Channel>,
    current: usize,
}

impl<P: ChannelPlayer> ChannelScheduler<P> {
    pub fn new(config: OrchestrationConfig, bus: Arc<EventBus>, player: P) -> Self {
        Self {
            config,
            bus,
            player,
            channels: Vec::new(),
            current: 0,
        }
    }

    /// Index of the channel the next iteration will play.
    ///
    /// Invariant while rotating: `current < channels.len()`, wrapping to 0
    /// after the last channel.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Fetches the playlist once, validates the player path and rotates
    /// through the channels until `token` is cancelled.
    ///
    /// Cancellation is observed between iterations and during the
    /// per-channel wait; an already-spawned player process is left to
    /// normal OS cleanup.
    pub async fn run<T: PlaylistTransport>(
        &mut self,
        source: &PlaylistSource<T>,
        token: CancellationToken,
    ) -> Result<(), ZapError> {
        let channels = source.fetch_and_parse(&self.config.playlist_url).await?;
        if channels.is_empty() {
            return Err(ZapError::EmptyPlaylist);
        }
        self.player.check_player_path()?;

        self.channels = channels;
        self.current = 0;
        let total = self.channels.len();
        let duration = self.config.effective_channel_duration();

        self.bus.publish(LifecycleEvent::Init { total });
        info!(total, duration_ms = duration.as_millis() as u64, "entering rotation");

        while !token.is_cancelled() {
            let channel = self.channels[self.current].clone();
            self.bus.publish(LifecycleEvent::Progress {
                current: self.current,
                total,
                channel_url: channel.url.clone(),
                channel_title: channel.title.clone(),
            });

            tokio::select! {
                _ = token.cancelled() => break,
                result = self.player.play_for(&channel.url, duration) => {
                    if let Err(e) = result {
                        // Non-fatal: skip to the next channel.
                        warn!(channel = %channel.title, "player launch failed: {e}");
                    }
                }
            }

            self.current = (self.current + 1) % total;
        }

        info!("rotation stopped");
        Ok(())
    }
}
