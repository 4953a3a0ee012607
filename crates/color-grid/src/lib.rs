//! color-grid: reduce an image to a fixed grid of packed BGR colors
//!
//! This library turns a decoded RGB image into the compact color data an
//! RGB-lighting device understands: either one summary color for the whole
//! image, or a fixed `rows x cols` grid of per-cell colors.
//!
//! # Quick Start
//!
//! ```
//! use color_grid::{partition, Bgr, Frame, GridShape};
//!
//! // 4x2 image: left half red, right half blue
//! let mut pixels = Vec::new();
//! for _y in 0..2 {
//!     pixels.extend_from_slice(&[255, 0, 0, 255, 0, 0, 0, 0, 255, 0, 0, 255]);
//! }
//! let frame = Frame::from_raw(4, 2, pixels).unwrap();
//!
//! let grid = partition(&frame, GridShape::new(1, 2)).unwrap();
//! assert_eq!(grid.get(0, 0), Some(Bgr::from_rgb(255, 0, 0)));
//! assert_eq!(grid.get(0, 1), Some(Bgr::from_rgb(0, 0, 255)));
//! ```
//!
//! # Color Values
//!
//! Every reducer produces a [`Bgr`]: three 8-bit channels packed into one
//! integer as `(B << 16) | (G << 8) | R`. This is the byte order lighting
//! SDKs such as Razer Chroma expect, so a grid can be serialized without any
//! further conversion.
//!
//! # Reducers
//!
//! | Reducer | Result | Used for |
//! |---------|--------|----------|
//! | [`average_color`] | per-channel integer mean | one summary color for the whole image |
//! | [`dominant_color`] | most frequent exact color | per-cell grid colors |
//!
//! Averaging a high-contrast cell blends its colors into a muddy mid-tone
//! that appears nowhere in the image. The grid therefore uses the mode
//! instead, so each key shows a color the user can actually see in that part
//! of the wallpaper.
//!
//! Ties in [`dominant_color`] are broken by scan order: the first color to
//! reach the winning count keeps the slot. Pixels are scanned column by
//! column (x outer, y inner), which makes the result deterministic for a
//! given image.
//!
//! # Partitioning
//!
//! [`partition`] divides the image into `rows x cols` cells of
//! `floor(width / cols) x floor(height / rows)` pixels. Trailing pixels that
//! do not fill a whole cell are ignored. Every cell is clipped to the image
//! bounds, so cells never overlap and never leave the image.

pub mod color;
pub mod error;
pub mod frame;
pub mod grid;
pub mod reduce;

pub use color::Bgr;
pub use error::GridError;
pub use frame::{Frame, Rect};
pub use grid::{cell_rects, partition, ColorGrid, GridShape};
pub use reduce::{average_color, dominant_color};
