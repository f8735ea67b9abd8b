use std::path::PathBuf;

use clap::Parser;
use zapper_engine::OrchestrationConfig;

#[derive(Debug, Parser)]
#[command(name = "zapper", version, about = "Rotate an external media player through every channel of an M3U playlist", long_about = None)]
pub struct Args {
    /// URL of the M3U playlist to download
    #[arg(short = 'u', long)]
    pub playlist_url: Option<String>,

    /// Path to the player executable
    #[arg(short = 'p', long)]
    pub player_path: Option<PathBuf>,

    /// Seconds each channel plays before rotating to the next
    #[arg(short = 'd', long)]
    pub channel_duration: Option<i64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn to_config(&self) -> OrchestrationConfig {
        let defaults = OrchestrationConfig::default();
        OrchestrationConfig {
            player_path: self.player_path.clone().unwrap_or(defaults.player_path),
            channel_duration_ms: self
                .channel_duration
                .map(|seconds| seconds.saturating_mul(1000))
                .unwrap_or(defaults.channel_duration_ms),
            playlist_url: self
                .playlist_url
                .clone()
                .unwrap_or(defaults.playlist_url),
        }
    }
}
