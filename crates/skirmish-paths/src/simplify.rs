//! Path simplification by grid line of sight.
//!
//! A raw search path has one waypoint per cell. Units walk straight lines
//! between waypoints, so every waypoint that can be skipped without leaving
//! passable ground is dropped.

use skirmish_core::{PassGrid, Vec3};

use crate::oracle::line_of_sight;

/// Remove unneeded waypoints from `full_path`, writing the result to
/// `new_path`.
///
/// An "L" that a straight line can cut becomes a single segment, and runs of
/// collinear waypoints shrink to their two ends. The first and last waypoints
/// are always kept unchanged. Empty and single-waypoint paths are copied as
/// they are.
///
/// Visibility is judged between the cells the waypoints lie in, i.e. along
/// the segment joining those cells' centers. Paths from
/// [`PathFinder::find`](crate::PathFinder::find) consist of cell centers, so
/// for them every kept pair is in line of sight under the passability rules.
/// Waypoints off their cell's center are treated as if they were on it.
///
/// `full_path` is not modified; `new_path` is cleared first.
pub fn simplify_path(grid: &PassGrid, full_path: &[Vec3], new_path: &mut Vec<Vec3>) {
    simplify_by(full_path, new_path, |a, b| {
        line_of_sight(grid, a.cell(), b.cell())
    });
}

/// Greedy forward scan shared by the world and cell forms.
///
/// From the last kept waypoint the lookahead advances while the waypoint
/// after it is `visible`, and the waypoint it stops on is kept. Passes repeat
/// until one drops nothing, so simplifying the output again returns it
/// unchanged.
pub(crate) fn simplify_by<T: Copy>(full: &[T], out: &mut Vec<T>, visible: impl Fn(T, T) -> bool) {
    out.clear();
    out.extend_from_slice(full);
    while forward_pass(out, &visible) {}
}

/// One in-place forward pass. Returns whether any waypoint was dropped.
fn forward_pass<T: Copy>(points: &mut Vec<T>, visible: &impl Fn(T, T) -> bool) -> bool {
    let len = points.len();
    if len < 3 {
        return false;
    }
    let last = len - 1;
    let mut anchor = 0;
    let mut kept = 1;
    // `kept` never passes the lookahead, so unread waypoints are never
    // overwritten.
    while anchor < last {
        let from = points[anchor];
        let mut ahead = anchor + 1;
        while ahead < last && visible(from, points[ahead + 1]) {
            ahead += 1;
        }
        points[kept] = points[ahead];
        kept += 1;
        anchor = ahead;
    }
    points.truncate(kept);
    kept < len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::PathFinder;
    use skirmish_core::Point;
    use std::cell::Cell;
    use std::sync::Arc;

    fn at(x: i32, y: i32) -> Vec3 {
        Point::new(x, y).center()
    }

    fn simplify(grid: &PassGrid, path: &[Vec3]) -> Vec<Vec3> {
        let mut out = Vec::new();
        simplify_path(grid, path, &mut out);
        out
    }

    #[test]
    fn degenerate_inputs_pass_through() {
        let g = PassGrid::open(3, 3).unwrap();
        assert!(simplify(&g, &[]).is_empty());
        assert_eq!(simplify(&g, &[at(1, 1)]), vec![at(1, 1)]);
        assert_eq!(simplify(&g, &[at(0, 0), at(1, 0)]), vec![at(0, 0), at(1, 0)]);
    }

    #[test]
    fn straight_runs_collapse() {
        let g = PassGrid::open(6, 6).unwrap();
        let row: Vec<Vec3> = (0..6).map(|x| at(x, 2)).collect();
        assert_eq!(simplify(&g, &row), vec![at(0, 2), at(5, 2)]);
        let diag: Vec<Vec3> = (0..6).map(|i| at(i, 5 - i)).collect();
        assert_eq!(simplify(&g, &diag), vec![at(0, 5), at(5, 0)]);
    }

    #[test]
    fn l_shape_becomes_segment_when_open() {
        let g = PassGrid::open(4, 4).unwrap();
        let l = [at(0, 0), at(1, 0), at(2, 0), at(3, 0), at(3, 1), at(3, 2)];
        assert_eq!(simplify(&g, &l), vec![at(0, 0), at(3, 2)]);
    }

    #[test]
    fn keeps_turn_around_obstacle() {
        let g = PassGrid::from_ascii(
            "
....
###.
....",
        )
        .unwrap();
        let path = [
            at(0, 0),
            at(1, 0),
            at(2, 0),
            at(3, 0),
            at(3, 1),
            at(3, 2),
            at(2, 2),
            at(1, 2),
            at(0, 2),
        ];
        let s = simplify(&g, &path);
        assert_eq!(s, vec![at(0, 0), at(3, 0), at(3, 2), at(0, 2)]);
        for w in s.windows(2) {
            assert!(line_of_sight(&g, w[0].cell(), w[1].cell()));
        }
    }

    #[test]
    fn endpoints_kept_exactly() {
        let g = PassGrid::open(5, 5).unwrap();
        let start = Vec3::new(0.1, 3.0, 0.9);
        let end = Vec3::new(4.7, -1.0, 4.2);
        let path = [start, at(1, 1), at(2, 2), at(3, 3), end];
        assert_eq!(simplify(&g, &path), vec![start, end]);
    }

    #[test]
    fn idempotent_and_never_grows() {
        let g = PassGrid::from_ascii(
            "
.......
.##.##.
.......
.#####.
.......",
        )
        .unwrap();
        let path = [
            at(0, 0),
            at(0, 1),
            at(0, 2),
            at(1, 2),
            at(2, 2),
            at(3, 2),
            at(4, 2),
            at(5, 2),
            at(6, 2),
            at(6, 3),
            at(6, 4),
            at(5, 4),
            at(4, 4),
        ];
        let once = simplify(&g, &path);
        let twice = simplify(&g, &once);
        assert!(once.len() <= path.len());
        assert_eq!(once, twice);
    }

    #[test]
    fn invisible_successor_still_kept() {
        // Nothing to skip, and the blocked pair is still joined.
        let g = PassGrid::from_ascii(".#.").unwrap();
        let path = [at(0, 0), at(2, 0)];
        assert_eq!(simplify(&g, &path), path.to_vec());
    }

    #[test]
    fn offsets_within_cells_do_not_change_choice() {
        let g = PassGrid::from_ascii(
            "
....
###.
....",
        )
        .unwrap();
        let cells = [(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (2, 2)];
        let centered: Vec<Vec3> = cells.iter().map(|&(x, y)| at(x, y)).collect();
        let shifted: Vec<Vec3> = cells
            .iter()
            .map(|&(x, y)| Vec3::new(x as f32 + 0.1, 0.0, y as f32 + 0.9))
            .collect();
        let a: Vec<Point> = simplify(&g, &centered).iter().map(|v| v.cell()).collect();
        let b: Vec<Point> = simplify(&g, &shifted).iter().map(|v| v.cell()).collect();
        assert_eq!(a, b);
    }

    /// A maze of full-width corridors joined by gaps at alternating ends.
    fn serpentine(width: i32, corridors: i32) -> PassGrid {
        let mut rows = Vec::new();
        for i in 0..corridors {
            if i > 0 {
                let gap = if i % 2 == 1 { width - 1 } else { 0 };
                let wall: String = (0..width)
                    .map(|x| if x == gap { '.' } else { '#' })
                    .collect();
                rows.push(wall);
            }
            rows.push(".".repeat(width as usize));
        }
        PassGrid::from_ascii(&rows.join("\n")).unwrap()
    }

    #[test]
    fn long_paths_need_linear_sight_checks() {
        let grid = Arc::new(serpentine(41, 12));
        let mut finder = PathFinder::new(Arc::clone(&grid));
        let goal = Point::new(0, grid.length() - 1);
        let raw = finder.find_cells(Point::new(0, 0), goal).unwrap().to_vec();
        assert!(raw.len() > 12 * 41);

        let calls = Cell::new(0usize);
        let mut kept = Vec::new();
        simplify_by(&raw, &mut kept, |a, b| {
            calls.set(calls.get() + 1);
            line_of_sight(&grid, a, b)
        });

        assert_eq!(kept.first(), Some(&Point::new(0, 0)));
        assert_eq!(kept.last(), Some(&goal));
        assert!(kept.len() < raw.len() / 10);
        for w in kept.windows(2) {
            assert!(line_of_sight(&grid, w[0], w[1]));
        }
        assert!(
            calls.get() <= 2 * raw.len(),
            "{} sight checks for {} waypoints",
            calls.get(),
            raw.len()
        );
    }
}
