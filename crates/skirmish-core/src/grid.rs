//! The [`PassGrid`] type: a rectangular boolean passability map.
//!
//! Cells are stored row-major, `true` meaning an agent may stand on the
//! cell. One cell covers one world unit; see [`Vec3::cell`](crate::Vec3::cell)
//! for how world positions map onto it.

use crate::error::GridError;
use crate::geom::{Point, Range};

/// A `width × length` passability map.
///
/// Pathfinders share a grid read-only (usually behind an `Arc`), so all
/// searches against one grid see the same terrain. Terrain edits produce a new
/// grid or go through [`set`](PassGrid::set) on an exclusively owned one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPassGrid")
)]
pub struct PassGrid {
    width: i32,
    length: i32,
    cells: Vec<bool>,
}

impl PassGrid {
    /// Build a grid from a row-major passability sequence.
    pub fn new(width: i32, length: i32, passability: Vec<bool>) -> Result<Self, GridError> {
        let expected = Self::cell_count(width, length)?;
        if passability.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: passability.len(),
            });
        }
        Ok(Self {
            width,
            length,
            cells: passability,
        })
    }

    /// A grid where every cell is passable.
    pub fn open(width: i32, length: i32) -> Result<Self, GridError> {
        let n = Self::cell_count(width, length)?;
        Ok(Self {
            width,
            length,
            cells: vec![true; n],
        })
    }

    /// Parse a map drawn with `#` (blocked) and `.` (passable), one line per
    /// row. Leading and trailing blank lines are ignored.
    pub fn from_ascii(map: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => Vec::new(),
        };

        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(GridError::InconsistentRows(rows.join("\n")));
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '.' => cells.push(true),
                    '#' => cells.push(false),
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
        }
        Self::new(width as i32, rows.len() as i32, cells)
    }

    fn cell_count(width: i32, length: i32) -> Result<usize, GridError> {
        if width <= 0 || length <= 0 {
            return Err(GridError::InvalidDimensions { width, length });
        }
        (width as usize)
            .checked_mul(length as usize)
            .ok_or(GridError::InvalidDimensions { width, length })
    }

    /// Number of columns (world `x`).
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows (world `z`).
    #[inline]
    pub fn length(&self) -> i32 {
        self.length
    }

    /// The grid rectangle, `[0, width) × [0, length)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.length)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.length
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Whether `p` is inside the grid and passable.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.index(p)]
    }

    /// Set the passability of `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, passable: bool) {
        if self.contains(p) {
            let i = self.index(p);
            self.cells[i] = passable;
        }
    }

    /// Count of passable cells.
    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major iterator over `(Point, passable)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPassGrid {
    width: i32,
    length: i32,
    cells: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPassGrid> for PassGrid {
    type Error = GridError;

    fn try_from(raw: RawPassGrid) -> Result<Self, GridError> {
        PassGrid::new(raw.width, raw.length, raw.cells)
    }
}
