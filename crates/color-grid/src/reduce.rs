//! Color reducers: collapse a pixel region into a single [`Bgr`]
//!
//! Both reducers clip the region to the frame first, so an out-of-range
//! rectangle never panics. An empty region has no meaningful color and
//! yields `None`.

use std::collections::HashMap;

use crate::color::Bgr;
use crate::frame::{Frame, Rect};

/// Per-channel arithmetic mean over `region`, truncated to an integer.
///
/// Returns `None` if the region (after clipping) has no pixels.
///
/// # Example
/// ```
/// use color_grid::{average_color, Bgr, Frame};
/// let frame = Frame::from_raw(2, 1, vec![0, 0, 0, 255, 101, 10]).unwrap();
/// assert_eq!(
///     average_color(&frame, frame.bounds()),
///     Some(Bgr::from_rgb(127, 50, 5))
/// );
/// ```
pub fn average_color(frame: &Frame, region: Rect) -> Option<Bgr> {
    let region = frame.bounds().intersect(&region);
    let area = region.area();
    if area == 0 {
        return None;
    }

    let mut sums = [0u64; 3];
    for x in region.min_x..region.max_x {
        for y in region.min_y..region.max_y {
            let px = frame.rgb(x, y);
            sums[0] += px[0] as u64;
            sums[1] += px[1] as u64;
            sums[2] += px[2] as u64;
        }
    }

    // mean of u8 values always fits in u8
    let [r, g, b] = sums.map(|s| (s / area) as u8);
    Some(Bgr::from_rgb(r, g, b))
}

/// Most frequent exact color in `region`.
///
/// Pixels are scanned column by column (x outer, y inner). A color only
/// takes the lead when its count strictly exceeds the current best, so on a
/// tie the color that reached the winning count first is kept.
///
/// Returns `None` if the region (after clipping) has no pixels.
///
/// # Example
/// ```
/// use color_grid::{dominant_color, Bgr, Frame};
/// // two red pixels, one white
/// let frame = Frame::from_raw(3, 1, vec![255, 0, 0, 255, 255, 255, 255, 0, 0]).unwrap();
/// assert_eq!(
///     dominant_color(&frame, frame.bounds()),
///     Some(Bgr::from_rgb(255, 0, 0))
/// );
/// ```
pub fn dominant_color(frame: &Frame, region: Rect) -> Option<Bgr> {
    let region = frame.bounds().intersect(&region);
    if region.is_empty() {
        return None;
    }

    let mut bins: HashMap<Bgr, u64> = HashMap::new();
    let mut best = Bgr::BLACK;
    let mut best_count = 0u64;

    for x in region.min_x..region.max_x {
        for y in region.min_y..region.max_y {
            let color = frame.bgr(x, y);
            let count = bins.entry(color).or_insert(0);
            *count += 1;
            if *count > best_count {
                best = color;
                best_count = *count;
            }
        }
    }

    Some(best)
}
