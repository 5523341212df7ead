//! Many independent path queries over one grid, spread across threads.

use std::sync::Arc;

use rayon::prelude::*;
use skirmish_core::{PassGrid, Vec3};

use crate::config::FinderConfig;
use crate::finder::PathFinder;

/// One query of a [`find_batch`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub start: Vec3,
    pub end: Vec3,
}

impl PathRequest {
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

/// Answer every request in parallel.
///
/// Each worker thread builds one [`PathFinder`] and reuses it for all the
/// requests it picks up. The result at index `i` is the path for
/// `requests[i]`, or `None` when that request has no path. Results are the
/// same as running the requests one by one through a single pathfinder.
pub fn find_batch(
    grid: &Arc<PassGrid>,
    config: FinderConfig,
    requests: &[PathRequest],
) -> Vec<Option<Vec<Vec3>>> {
    log::debug!(
        "batch of {} path requests on {}x{} grid",
        requests.len(),
        grid.width(),
        grid.length()
    );
    requests
        .par_iter()
        .map_init(
            || PathFinder::with_config(Arc::clone(grid), config),
            |finder, req| {
                let mut path = Vec::new();
                finder.find(&mut path, req.start, req.end).then_some(path)
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::Point;

    const MAP: &str = "
............
.####..####.
.#........#.
.#..####..#.
.#........#.
.####..####.
............";

    fn requests() -> Vec<PathRequest> {
        let cells = [
            (0, 0),
            (11, 6),
            (4, 2),
            (6, 4),
            (2, 3),
            (9, 3),
            (5, 0),
            (1, 1),
        ];
        let mut out = Vec::new();
        for &(ax, ay) in &cells {
            for &(bx, by) in &cells {
                out.push(PathRequest::new(
                    Point::new(ax, ay).center(),
                    Point::new(bx, by).center(),
                ));
            }
        }
        out
    }

    #[test]
    fn matches_sequential_results() {
        let grid = Arc::new(PassGrid::from_ascii(MAP).unwrap());
        for config in [
            FinderConfig::default(),
            FinderConfig::default().with_simplify(true),
        ] {
            let reqs = requests();
            let batch = find_batch(&grid, config, &reqs);
            assert_eq!(batch.len(), reqs.len());

            let mut seq = PathFinder::with_config(Arc::clone(&grid), config);
            for (req, got) in reqs.iter().zip(&batch) {
                let mut path = Vec::new();
                let found = seq.find(&mut path, req.start, req.end);
                assert_eq!(got.as_ref(), found.then_some(&path));
            }
        }
    }

    #[test]
    fn blocked_requests_are_none() {
        let grid = Arc::new(PassGrid::from_ascii(MAP).unwrap());
        let reqs = [
            PathRequest::new(Point::new(0, 0).center(), Point::new(1, 1).center()),
            PathRequest::new(Point::new(0, 0).center(), Vec3::new(40.0, 0.0, 0.5)),
            PathRequest::new(Point::new(0, 0).center(), Point::new(3, 2).center()),
        ];
        let out = find_batch(&grid, FinderConfig::default(), &reqs);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(out[2].is_some());
    }

    #[test]
    fn empty_batch() {
        let grid = Arc::new(PassGrid::open(2, 2).unwrap());
        assert!(find_batch(&grid, FinderConfig::default(), &[]).is_empty());
    }
}
