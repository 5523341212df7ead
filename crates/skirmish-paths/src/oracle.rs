//! Passability oracle: which moves between cells are allowed.
//!
//! All functions here are pure and allocation-free; the search calls them
//! for every expanded node.

use skirmish_core::{PassGrid, Point};

/// The eight step directions, in the fixed order neighbours are expanded.
/// Orthogonal steps come first.
pub const DIRECTIONS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, -1),
    Point::new(1, 1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// Whether an agent may step directly from `from` to the adjacent cell `to`.
///
/// The destination must be passable. A diagonal step also needs both
/// orthogonal cells of the corner it cuts to be passable. Cells that are not
/// 8-neighbours never have a direct move.
#[inline]
pub fn is_passable(grid: &PassGrid, from: Point, to: Point) -> bool {
    if !from.is_adjacent(to) || !grid.is_open(to) {
        return false;
    }
    let d = to - from;
    if d.x != 0 && d.y != 0 {
        grid.is_open(from.shift(d.x, 0)) && grid.is_open(from.shift(0, d.y))
    } else {
        true
    }
}

/// Whether the straight segment between the centers of `a` and `b` stays on
/// passable ground.
///
/// Every cell the segment touches is visited in order and each step is
/// checked with [`is_passable`]; where the segment passes exactly through a
/// cell corner the step is diagonal and the corner rule applies.
pub fn line_of_sight(grid: &PassGrid, a: Point, b: Point) -> bool {
    if !grid.is_open(a) {
        return false;
    }
    let d = b - a;
    let step = d.signum();
    let nx = i64::from(d.x.abs());
    let ny = i64::from(d.y.abs());
    let (mut ix, mut iy) = (0i64, 0i64);
    let mut cur = a;

    while ix < nx || iy < ny {
        // Compare where the segment crosses the next vertical and horizontal
        // cell borders: (0.5 + ix) / nx against (0.5 + iy) / ny.
        let cross_x = (1 + 2 * ix) * ny;
        let cross_y = (1 + 2 * iy) * nx;
        let next = if cross_x == cross_y {
            ix += 1;
            iy += 1;
            cur.shift(step.x, step.y)
        } else if cross_x < cross_y {
            ix += 1;
            cur.shift(step.x, 0)
        } else {
            iy += 1;
            cur.shift(0, step.y)
        };
        if !is_passable(grid, cur, next) {
            return false;
        }
        cur = next;
    }
    true
}

/// Cached neighbour enumeration for the search loop.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Cells reachable from `p` in one step, in [`DIRECTIONS`] order.
    pub fn passable(&mut self, grid: &PassGrid, p: Point) -> &[Point] {
        self.buf.clear();
        for d in DIRECTIONS {
            let n = p + d;
            if is_passable(grid, p, n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
