//! Grid partitioning: split a frame into `rows x cols` cells and reduce
//! each cell to its dominant color

use crate::color::Bgr;
use crate::error::GridError;
use crate::frame::{Frame, Rect};
use crate::reduce::dominant_color;

/// Number of rows and columns in a color grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// A `rows x cols` array of colors, stored row-major.
///
/// The shape is fixed at construction; there is no way to resize a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    shape: GridShape,
    cells: Vec<Bgr>,
}

impl ColorGrid {
    /// A grid of the given shape with every cell set to `color`.
    pub fn filled(shape: GridShape, color: Bgr) -> Self {
        Self {
            shape,
            cells: vec![color; shape.len()],
        }
    }

    /// Build a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len()` does not equal `shape.len()`.
    pub fn from_cells(shape: GridShape, cells: Vec<Bgr>) -> Option<Self> {
        (cells.len() == shape.len()).then_some(Self { shape, cells })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Bgr> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        self.cells.get(row * self.shape.cols + col).copied()
    }

    /// Iterate over rows, each a slice of `cols` colors.
    pub fn rows(&self) -> impl Iterator<Item = &[Bgr]> {
        // chunks(0) panics; an empty shape simply has no rows
        self.cells.chunks(self.shape.cols.max(1))
    }

    /// Packed values as nested rows, the layout lighting APIs take.
    pub fn to_packed_rows(&self) -> Vec<Vec<u32>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.packed()).collect())
            .collect()
    }
}

/// Pixel rectangles for every cell of `shape` laid over `bounds`, row-major.
///
/// Cells are `floor(width / cols) x floor(height / rows)` and are clipped to
/// `bounds`. Pixels past the last whole cell on either axis belong to no cell.
///
/// Returns no rectangles for an empty shape, or for one with more rows or
/// columns than a `u32` pixel coordinate can address.
pub fn cell_rects(bounds: Rect, shape: GridShape) -> Vec<Rect> {
    let (Ok(rows), Ok(cols)) = (u32::try_from(shape.rows), u32::try_from(shape.cols)) else {
        return Vec::new();
    };
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let w = bounds.width() / cols;
    let h = bounds.height() / rows;

    let mut rects = Vec::with_capacity(shape.len());
    for row in 0..rows {
        for col in 0..cols {
            let cell = Rect::new(
                bounds.min_x + col * w,
                bounds.min_y + row * h,
                bounds.min_x + (col + 1) * w,
                bounds.min_y + (row + 1) * h,
            );
            rects.push(bounds.intersect(&cell));
        }
    }
    rects
}

/// Reduce `frame` to a grid of dominant colors.
///
/// # Errors
///
/// - [`GridError::EmptyShape`] if the shape has no rows or columns
/// - [`GridError::ImageTooSmall`] if the frame is narrower than `cols` or
///   shorter than `rows` pixels, which would leave cells without pixels
///
/// # Example
///
/// ```
/// use color_grid::{partition, Bgr, Frame, GridShape};
///
/// let frame = Frame::from_fn(6, 4, |x, _| if x < 3 { [0, 0, 0] } else { [255, 255, 255] });
/// let grid = partition(&frame, GridShape::new(2, 2)).unwrap();
///
/// assert_eq!(grid.shape(), GridShape::new(2, 2));
/// assert_eq!(grid.get(1, 0), Some(Bgr::BLACK));
/// assert_eq!(grid.get(1, 1), Some(Bgr::WHITE));
/// ```
pub fn partition(frame: &Frame, shape: GridShape) -> Result<ColorGrid, GridError> {
    if shape.is_empty() {
        return Err(GridError::EmptyShape);
    }
    if (frame.width() as usize) < shape.cols || (frame.height() as usize) < shape.rows {
        return Err(GridError::ImageTooSmall {
            width: frame.width(),
            height: frame.height(),
            rows: shape.rows,
            cols: shape.cols,
        });
    }

    let cells = cell_rects(frame.bounds(), shape)
        .into_iter()
        .map(|rect| dominant_color(frame, rect).unwrap_or_default())
        .collect();

    Ok(ColorGrid { shape, cells })
}
