//! Instrumented pathfinder for profiling and search visualization.

use std::sync::Arc;
use std::time::Instant;

use skirmish_core::{PassGrid, Vec3};

use crate::config::FinderConfig;
use crate::finder::PathFinder;
use crate::nodes::NodeSnapshot;

/// A [`PathFinder`] that times every `find` call and keeps a copy of the
/// node store afterwards.
///
/// Paths and return values are exactly those of the wrapped pathfinder.
pub struct TimedPathFinder {
    inner: PathFinder,
    total_time: f32,
    snapshot: Option<Arc<NodeSnapshot>>,
}

impl TimedPathFinder {
    pub fn new(grid: Arc<PassGrid>) -> Self {
        Self::from(PathFinder::new(grid))
    }

    pub fn with_config(grid: Arc<PassGrid>, config: FinderConfig) -> Self {
        Self::from(PathFinder::with_config(grid, config))
    }

    /// Time a [`PathFinder::find`] call and capture the node store.
    pub fn find(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> bool {
        let started = Instant::now();
        let found = self.inner.find(path, start, end);
        self.total_time = started.elapsed().as_secs_f32();

        self.snapshot = Some(Arc::new(self.inner.nodes().snapshot()));

        log::debug!(
            "find {start} -> {end}: found={found} waypoints={} in {:.3}ms",
            path.len(),
            self.total_time * 1000.0
        );
        if let Some(limit) = self.inner.config().slow_search_secs {
            if self.total_time > limit {
                log::warn!(
                    "slow path search {start} -> {end}: {:.3}ms (limit {:.3}ms)",
                    self.total_time * 1000.0,
                    limit * 1000.0
                );
            }
        }
        found
    }

    /// Seconds the last [`find`](Self::find) call took. Zero before the first.
    #[inline]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Node store state after the last [`find`](Self::find) call.
    ///
    /// The snapshot is an independent value: later searches do not change a
    /// snapshot that has already been handed out.
    pub fn snapshot(&self) -> Option<Arc<NodeSnapshot>> {
        self.snapshot.clone()
    }

    pub fn simplify_path(&self, full_path: &[Vec3], new_path: &mut Vec<Vec3>) {
        self.inner.simplify_path(full_path, new_path);
    }

    /// The wrapped pathfinder.
    pub fn inner(&self) -> &PathFinder {
        &self.inner
    }

    /// Mutable access to the wrapped pathfinder, e.g. to swap its grid.
    pub fn inner_mut(&mut self) -> &mut PathFinder {
        &mut self.inner
    }

    pub fn into_inner(self) -> PathFinder {
        self.inner
    }
}

impl From<PathFinder> for TimedPathFinder {
    fn from(inner: PathFinder) -> Self {
        Self {
            inner,
            total_time: 0.0,
            snapshot: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeState;
    use skirmish_core::Point;

    const MAP: &str = "
..........
.#######..
.......#..
.#####.#..
..........";

    fn grid() -> Arc<PassGrid> {
        Arc::new(PassGrid::from_ascii(MAP).unwrap())
    }

    fn at(x: i32, y: i32) -> Vec3 {
        Point::new(x, y).center()
    }

    #[test]
    fn same_paths_as_plain_finder() {
        let mut plain = PathFinder::new(grid());
        let mut timed = TimedPathFinder::new(grid());
        let queries = [
            (at(0, 0), at(9, 4)),
            (at(2, 2), at(8, 0)),
            (at(0, 4), at(1, 1)),
            (at(6, 2), at(6, 2)),
        ];
        for (s, e) in queries {
            let (mut a, mut b) = (Vec::new(), Vec::new());
            assert_eq!(plain.find(&mut a, s, e), timed.find(&mut b, s, e));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn records_time_and_snapshot() {
        let mut timed = TimedPathFinder::new(grid());
        assert_eq!(timed.total_time(), 0.0);
        assert!(timed.snapshot().is_none());

        let mut path = Vec::new();
        assert!(timed.find(&mut path, at(0, 0), at(9, 4)));
        assert!(timed.total_time() >= 0.0);

        let snap = timed.snapshot().unwrap();
        assert_eq!(snap.run(), 1);
        assert_eq!(snap.at(Point::new(0, 0)).unwrap().cost, Some(0));
        assert_eq!(snap.at(Point::new(9, 4)).unwrap().state, NodeState::Closed);
        assert_eq!(snap.at(Point::new(1, 1)).unwrap().state, NodeState::Unvisited);
        for w in path.windows(2) {
            let parent = snap.at(w[1].cell()).unwrap().parent;
            assert_eq!(parent, Some(w[0].cell()));
        }
    }

    #[test]
    fn held_snapshot_survives_next_search() {
        let mut timed = TimedPathFinder::new(grid());
        let mut path = Vec::new();
        assert!(timed.find(&mut path, at(0, 0), at(9, 4)));
        let first = timed.snapshot().unwrap();
        let closed = first.count(NodeState::Closed);

        assert!(!timed.find(&mut path, at(0, 0), at(1, 1)));
        let second = timed.snapshot().unwrap();
        assert_eq!(first.run(), 1);
        assert_eq!(first.count(NodeState::Closed), closed);
        // A rejected query never starts a run.
        assert_eq!(second.run(), 1);
    }

    #[test]
    fn slow_threshold_does_not_change_results() {
        let cfg = FinderConfig::default().with_slow_search_secs(0.0);
        let mut timed = TimedPathFinder::with_config(grid(), cfg);
        let mut path = Vec::new();
        assert!(timed.find(&mut path, at(0, 0), at(9, 4)));
        assert_eq!(path.first(), Some(&at(0, 0)));
        assert_eq!(timed.into_inner().nodes().run(), 1);
    }
}
