//! Test fixtures: synthetic wallpapers, timestamps and fast settings.

use std::io::Cursor;
use std::time::{Duration, SystemTime};

use chroma_reflect::models::{ExhaustionPolicy, LightingMode};
use chroma_reflect::services::ReconcilerSettings;
use color_grid::{Bgr, ColorGrid, Frame, GridShape};
use image::{ImageFormat, RgbImage};

/// A distinct, easily recognisable color for cell `index`
pub fn cell_color(index: usize) -> [u8; 3] {
    let i = index as u8;
    [i.wrapping_mul(40).wrapping_add(15), 255 - i, i.wrapping_mul(97)]
}

/// Image made of `rows x cols` solid cells of `cell_w x cell_h` pixels,
/// plus the grid that extraction should produce from it.
pub fn solid_cells(shape: GridShape, cell_w: u32, cell_h: u32) -> (Frame, ColorGrid) {
    let cols = shape.cols as u32;
    let frame = Frame::from_fn(cell_w * cols, cell_h * shape.rows as u32, |x, y| {
        cell_color(((y / cell_h) * cols + x / cell_w) as usize)
    });
    let cells = (0..shape.len())
        .map(|i| Bgr::from_bytes(cell_color(i)))
        .collect();
    let grid = ColorGrid::from_cells(shape, cells).expect("cell count matches shape");
    (frame, grid)
}

/// Single-color image
pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    Frame::from_fn(width, height, |_, _| rgb)
}

/// Encode a frame as PNG or JPEG bytes
pub fn encode(frame: &Frame, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(frame.width(), frame.height(), |x, y| {
        image::Rgb(frame.rgb(x, y))
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).expect("encode test image");
    bytes.into_inner()
}

/// Fixed point in time plus `secs`
pub fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

/// Default settings with millisecond delays so retries don't slow tests down
pub fn fast_settings(shape: GridShape) -> ReconcilerSettings {
    ReconcilerSettings {
        poll_interval: Duration::from_millis(1),
        attempts: 3,
        retry_delay: Duration::from_millis(1),
        shape,
        mode: LightingMode::Grid,
        on_exhausted: ExhaustionPolicy::Exit,
        republish: false,
    }
}
