use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ZapError {
    #[error("playlist download failed with HTTP {status} for {url}")]
    Download { status: StatusCode, url: String },

    #[error("playlist request failed: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("playlist contains no playable entries")]
    EmptyPlaylist,

    #[error("player not found at `{}`", .path.display())]
    PlayerNotFound { path: PathBuf },

    #[error("failed to launch player `{}`: {source}", .path.display())]
    PlayerLaunch {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ZapError {
    pub fn download(status: StatusCode, url: impl Into<String>) -> Self {
        Self::Download {
            status,
            url: url.into(),
        }
    }

    pub fn player_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PlayerNotFound { path: path.into() }
    }

    pub fn player_launch(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PlayerLaunch {
            path: path.into(),
            source,
        }
    }

    /// Launch failures mid-rotation are tolerated; everything else aborts startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::PlayerLaunch { .. })
    }
}
