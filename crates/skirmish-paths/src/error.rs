use std::fmt;

use skirmish_core::Point;

/// Why a path query produced no path.
///
/// None of these are faults: blocked or mis-ordered units are routine, which
/// is why [`PathFinder::find`](crate::PathFinder::find) folds them into a
/// boolean. [`PathFinder::try_find`](crate::PathFinder::try_find) exposes the
/// reason.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathError {
    /// The world position maps to a cell outside the grid.
    OutOfBounds { x: f32, z: f32 },
    /// The start or goal cell is impassable.
    Impassable(Point),
    /// The frontier was exhausted without reaching the goal.
    Unreachable,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, z } => write!(f, "path: position ({x}, {z}) is outside the grid"),
            Self::Impassable(p) => write!(f, "path: cell {p} is impassable"),
            Self::Unreachable => f.write_str("path: goal is unreachable"),
        }
    }
}

impl std::error::Error for PathError {}
