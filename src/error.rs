use std::path::PathBuf;

use color_grid::GridError;
use thiserror::Error;

/// Failure to read or reduce the tracked wallpaper.
///
/// Every variant is treated as transient by the reconciler and retried
/// within the same poll tick.
#[derive(Debug, Error)]
pub enum WallpaperError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decode error: not a JPEG ({jpeg}) or PNG ({png})")]
    Decode { jpeg: String, png: String },

    #[error("Extraction error: {0}")]
    Grid(#[from] GridError),

    #[error("Decode task failed: {0}")]
    Task(String),
}

impl WallpaperError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WallpaperError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure reported by, or while talking to, the lighting device.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Device rejected request: result {code}")]
    Rejected { code: i64 },

    #[error("Unexpected device response: {0}")]
    Protocol(String),

    #[error("No active lighting session")]
    NotRegistered,
}

/// Error that ends the reconciliation loop.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Lighting device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Wallpaper still unreadable after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: WallpaperError,
    },
}
