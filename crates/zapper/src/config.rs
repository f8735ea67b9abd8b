//! Startup configuration for the orchestration: where the playlist lives,
//! which player binary to drive and how long each channel plays.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PLAYLIST_URL: &str = "http://mafreebox.freebox.fr/freeboxtv/playlist.m3u";

pub const DEFAULT_CHANNEL_DURATION_MS: i64 = 10_000;

/// Standard VLC install location for the current platform.
pub fn default_player_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Program Files (x86)\VideoLAN\VLC\vlc.exe")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Applications/VLC.app/Contents/MacOS/VLC")
    } else {
        PathBuf::from("/usr/bin/vlc")
    }
}

/// Supplied once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct OrchestrationConfig {
    pub player_path: PathBuf,
    pub channel_duration_ms: i64,
    pub playlist_url: String,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            player_path: default_player_path(),
            channel_duration_ms: DEFAULT_CHANNEL_DURATION_MS,
            playlist_url: DEFAULT_PLAYLIST_URL.to_string(),
        }
    }
}

impl OrchestrationConfig {
    /// Duration each channel plays before the rotation advances.
    ///
    /// Non-positive values fall back to the default so a zero wait can never
    /// collapse the rotation into a busy loop.
    pub fn effective_channel_duration(&self) -> Duration {
        if self.channel_duration_ms > 0 {
            Duration::from_millis(self.channel_duration_ms as u64)
        } else {
            Duration::from_millis(DEFAULT_CHANNEL_DURATION_MS as u64)
        }
    }
}
