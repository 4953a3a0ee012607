use color_grid::{average_color, partition, Bgr, ColorGrid, Frame, GridError, GridShape};

use crate::error::WallpaperError;
use crate::models::LightingMode;

/// Colors derived from one wallpaper, ready to send to the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lighting {
    /// Dominant color per grid cell
    Grid(ColorGrid),
    /// Average color of the whole image
    Static(Bgr),
}

/// Reduce a decoded wallpaper according to `mode`.
pub fn extract(
    frame: &Frame,
    mode: LightingMode,
    shape: GridShape,
) -> Result<Lighting, WallpaperError> {
    match mode {
        LightingMode::Grid => Ok(Lighting::Grid(partition(frame, shape)?)),
        LightingMode::Static => average_color(frame, frame.bounds())
            .map(Lighting::Static)
            .ok_or_else(|| {
                GridError::ImageTooSmall {
                    width: frame.width(),
                    height: frame.height(),
                    rows: 1,
                    cols: 1,
                }
                .into()
            }),
    }
}
