//! Wallpaper source: modification time and decoding of the tracked file.
//!
//! Windows rewrites its transcoded wallpaper in place and may hold a lock on
//! it for a moment while doing so. Both operations therefore report plain
//! errors and leave retrying to the reconciler.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use color_grid::Frame;
use image::ImageFormat;

use crate::error::WallpaperError;

/// Access to the tracked wallpaper image.
pub trait WallpaperSource: Send + Sync {
    /// Last modification time of the wallpaper
    fn modified(&self) -> Result<SystemTime, WallpaperError>;

    /// Read and decode the wallpaper
    fn load(&self) -> Result<Frame, WallpaperError>;
}

/// A wallpaper image on the local file system
#[derive(Debug, Clone)]
pub struct WallpaperFile {
    path: PathBuf,
}

impl WallpaperFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WallpaperSource for WallpaperFile {
    fn modified(&self) -> Result<SystemTime, WallpaperError> {
        std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| WallpaperError::io(&self.path, e))
    }

    fn load(&self) -> Result<Frame, WallpaperError> {
        // The handle is closed as soon as the read returns
        let bytes = std::fs::read(&self.path).map_err(|e| WallpaperError::io(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            "Read wallpaper"
        );
        decode_frame(&bytes)
    }
}

/// Decode JPEG or PNG bytes into an RGB frame.
///
/// JPEG is tried first since that is what Windows writes; PNG is the
/// fallback. Alpha is discarded.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, WallpaperError> {
    let image = match image::load_from_memory_with_format(bytes, ImageFormat::Jpeg) {
        Ok(image) => image,
        Err(jpeg) => match image::load_from_memory_with_format(bytes, ImageFormat::Png) {
            Ok(image) => image,
            Err(png) => {
                return Err(WallpaperError::Decode {
                    jpeg: jpeg.to_string(),
                    png: png.to_string(),
                })
            }
        },
    };

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::from_raw(width, height, rgb.into_raw())?)
}
