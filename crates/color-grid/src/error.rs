//! Error types for frame construction and grid partitioning

use std::fmt;

/// Error type for building frames and partitioning them into grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Raw pixel buffer length does not match `width * height * 3`
    BufferSize {
        /// Bytes required by the declared dimensions
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
    /// Grid shape has zero rows or zero columns
    EmptyShape,
    /// Image has fewer pixels than the grid has cells along some axis,
    /// so at least one cell would be empty
    ImageTooSmall {
        width: u32,
        height: u32,
        rows: usize,
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::BufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer has {} bytes, dimensions require {}",
                    actual, expected
                )
            }
            GridError::EmptyShape => {
                write!(f, "grid must have at least one row and one column")
            }
            GridError::ImageTooSmall {
                width,
                height,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "image {}x{} is too small for a {}x{} grid",
                    width, height, rows, cols
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
