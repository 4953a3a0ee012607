//! In-memory RGB image and pixel rectangles

use crate::color::Bgr;
use crate::error::GridError;

/// Half-open pixel rectangle `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    /// Create a rectangle from its corners. A rectangle whose max is not
    /// greater than its min is empty.
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Largest rectangle contained in both `self` and `other`.
    ///
    /// Disjoint rectangles produce an empty rectangle.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x).max(min_x);
        let max_y = self.max_y.min(other.max_y).max(min_y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// True if every pixel of `other` lies inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.min_x >= self.min_x
                && other.min_y >= self.min_y
                && other.max_x <= self.max_x
                && other.max_y <= self.max_y)
    }

    /// True if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }
}

/// A decoded image: `width * height` pixels of 8-bit RGB, row-major.
///
/// Alpha is not represented; callers decoding images with transparency drop
/// it before building a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap a raw RGB buffer of `width * height * 3` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::BufferSize`] if the buffer length does not match
    /// the dimensions.
    ///
    /// # Example
    /// ```
    /// use color_grid::Frame;
    /// let frame = Frame::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
    /// assert_eq!(frame.rgb(1, 0), [0, 255, 0]);
    /// ```
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(GridError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole image as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// `[R, G, B]` of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the frame.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Packed color of the pixel at `(x, y)`.
    #[inline]
    pub fn bgr(&self, x: u32, y: u32) -> Bgr {
        Bgr::from_bytes(self.rgb(x, y))
    }
}
