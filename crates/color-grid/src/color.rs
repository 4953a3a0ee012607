//! Packed BGR color value
//!
//! Lighting SDKs address colors as a single integer with blue in the high
//! byte. [`Bgr`] keeps that representation and offers channel accessors.

use std::fmt;

/// A color packed as `(B << 16) | (G << 8) | R`.
///
/// Only the low 24 bits are ever set.
///
/// # Example
/// ```
/// use color_grid::Bgr;
/// let orange = Bgr::from_rgb(255, 128, 0);
/// assert_eq!(orange.packed(), 0x00_80_FF);
/// assert_eq!(orange.rgb(), [255, 128, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bgr(u32);

impl Bgr {
    /// Black (all channels zero)
    pub const BLACK: Self = Self(0);

    /// White (all channels 255)
    pub const WHITE: Self = Self(0x00FF_FFFF);

    /// Pack 8-bit red, green and blue channels.
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    /// Pack an `[R, G, B]` byte triple.
    #[inline]
    pub fn from_bytes(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Wrap an already packed value. Bits above the low 24 are dropped.
    #[inline]
    pub fn from_packed(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// The packed integer, as sent to the lighting device.
    #[inline]
    pub fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn r(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    #[inline]
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn b(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Unpack to `[R, G, B]`.
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

/// Formats as an RGB hex string (`#RRGGBB`), the way colors are usually
/// written by people, regardless of the packed byte order.
impl fmt::Display for Bgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}

impl From<Bgr> for u32 {
    fn from(color: Bgr) -> Self {
        color.packed()
    }
}
