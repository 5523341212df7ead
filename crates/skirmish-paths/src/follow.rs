//! Waypoint following for a single unit.
//!
//! Movement code asks a [`PathFollower`] for the waypoint to head towards and
//! order code polls [`is_following_path`](PathFollower::is_following_path) to
//! find out when a move has finished.

use std::collections::VecDeque;

use skirmish_core::Vec3;

use crate::traits::FindPath;

/// Squared ground distance at which a waypoint counts as reached.
pub const ARRIVAL_RADIUS_SQ: f32 = 1.1;

/// The remaining waypoints of one unit's path.
#[derive(Debug, Clone, Default)]
pub struct PathFollower {
    waypoints: VecDeque<Vec3>,
    scratch: Vec<Vec3>,
}

impl PathFollower {
    pub fn new(path: Vec<Vec3>) -> Self {
        Self {
            waypoints: path.into(),
            scratch: Vec::new(),
        }
    }

    /// Replace the current path.
    pub fn set_path(&mut self, path: impl IntoIterator<Item = Vec3>) {
        self.waypoints.clear();
        self.waypoints.extend(path);
    }

    /// Plan a new path from `position` to `goal` and start following it.
    ///
    /// Returns `false` and stops following when `finder` finds no path.
    pub fn plan(&mut self, finder: &mut impl FindPath, position: Vec3, goal: Vec3) -> bool {
        let found = finder.find(&mut self.scratch, position, goal);
        self.waypoints.clear();
        self.waypoints.extend(self.scratch.drain(..));
        found
    }

    /// Drop every leading waypoint that `position` has reached and return the
    /// one to head for next, or `None` once the path is done.
    pub fn advance(&mut self, position: Vec3) -> Option<Vec3> {
        while let Some(&next) = self.waypoints.front() {
            if position.xz_distance_squared(next) >= ARRIVAL_RADIUS_SQ {
                return Some(next);
            }
            self.waypoints.pop_front();
        }
        None
    }

    /// Whether any waypoints are left.
    #[inline]
    pub fn is_following_path(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// The waypoint currently being walked to.
    #[inline]
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.front().copied()
    }

    /// The final waypoint.
    #[inline]
    pub fn goal(&self) -> Option<Vec3> {
        self.waypoints.back().copied()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }

    /// Abandon the path.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }
}
