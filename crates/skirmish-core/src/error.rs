use std::fmt;

use crate::geom::Point;

/// Errors that can occur when building a [`PassGrid`](crate::PassGrid).
///
/// A malformed grid cannot be searched safely, so these are reported at
/// construction time and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or length is not strictly positive, or their product overflows.
    InvalidDimensions { width: i32, length: i32 },
    /// The passability sequence does not hold exactly `width * length` cells.
    LengthMismatch { expected: usize, actual: usize },
    /// ASCII map lines have inconsistent widths.
    InconsistentRows(String),
    /// An ASCII map contains a character other than `#` or `.`.
    InvalidChar { ch: char, pos: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, length } => {
                write!(f, "grid: invalid dimensions {width}x{length}")
            }
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "grid: passability has {actual} cells, expected {expected}"
            ),
            Self::InconsistentRows(s) => write!(f, "grid: inconsistent row widths:\n{s}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid map character {ch:?} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
