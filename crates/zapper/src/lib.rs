//! Channel-rotation engine.
//!
//! Downloads an M3U playlist, then cycles an external media player through
//! its channels: each channel plays for a fixed duration, the rotation wraps
//! to the first channel after the last and runs until cancelled. Progress is
//! published on a synchronous [`EventBus`] so a front end can render it
//! without the engine knowing anything about consoles or progress bars.

pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod playlist;
pub mod scheduler;

pub use config::{
    DEFAULT_CHANNEL_DURATION_MS, DEFAULT_PLAYLIST_URL, OrchestrationConfig, default_player_path,
};
pub use error::ZapError;
pub use events::{EventBus, LifecycleEvent};
pub use player::{ChannelPlayer, VlcLauncher};
pub use playlist::{Channel, HttpTransport, PlaylistSource, PlaylistTransport, TransportResponse};
pub use scheduler::ChannelScheduler;
