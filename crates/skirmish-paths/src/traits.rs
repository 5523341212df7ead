use skirmish_core::Vec3;

use crate::finder::PathFinder;
use crate::timed::TimedPathFinder;

/// Path query interface shared by [`PathFinder`] and [`TimedPathFinder`], so
/// movement code can switch to the instrumented finder without changes.
pub trait FindPath {
    /// Fill `path` with waypoints from `start` to `end`. Returns `false` and
    /// leaves `path` empty when there is no path.
    fn find(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> bool;

    /// Write a simplified copy of `full_path` to `new_path`.
    fn simplify_path(&self, full_path: &[Vec3], new_path: &mut Vec<Vec3>);
}

impl FindPath for PathFinder {
    fn find(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> bool {
        PathFinder::find(self, path, start, end)
    }

    fn simplify_path(&self, full_path: &[Vec3], new_path: &mut Vec<Vec3>) {
        PathFinder::simplify_path(self, full_path, new_path)
    }
}

impl FindPath for TimedPathFinder {
    fn find(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> bool {
        TimedPathFinder::find(self, path, start, end)
    }

    fn simplify_path(&self, full_path: &[Vec3], new_path: &mut Vec<Vec3>) {
        TimedPathFinder::simplify_path(self, full_path, new_path)
    }
}
