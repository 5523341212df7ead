use std::collections::BinaryHeap;
use std::sync::Arc;

use skirmish_core::{PassGrid, Point, Vec3};

use crate::config::FinderConfig;
use crate::costs;
use crate::error::PathError;
use crate::nodes::{NO_PARENT, NodeRef, NodeStore};
use crate::oracle::{self, Neighbors};
use crate::simplify;

/// A* pathfinder over one passability grid.
///
/// The pathfinder owns its [`NodeStore`] and scratch buffers, so repeated
/// queries allocate nothing after warm-up. It is `Send` but every query takes
/// `&mut self`: give each concurrent caller its own pathfinder (see
/// [`fork`](Self::fork)) or put a shared one behind a `Mutex`.
pub struct PathFinder {
    grid: Arc<PassGrid>,
    store: NodeStore,
    config: FinderConfig,
    open: BinaryHeap<NodeRef>,
    neighbors: Neighbors,
    cells: Vec<Point>,
    kept: Vec<Point>,
    seq: u64,
}

impl PathFinder {
    /// Create a pathfinder with the default configuration.
    pub fn new(grid: Arc<PassGrid>) -> Self {
        Self::with_config(grid, FinderConfig::default())
    }

    pub fn with_config(grid: Arc<PassGrid>, config: FinderConfig) -> Self {
        let store = NodeStore::new(grid.width(), grid.length());
        Self {
            grid,
            store,
            config,
            open: BinaryHeap::new(),
            neighbors: Neighbors::new(),
            cells: Vec::new(),
            kept: Vec::new(),
            seq: 0,
        }
    }

    /// A new pathfinder over the same grid with its own node store.
    pub fn fork(&self) -> Self {
        Self::with_config(Arc::clone(&self.grid), self.config)
    }

    #[inline]
    pub fn grid(&self) -> &Arc<PassGrid> {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FinderConfig) {
        self.config = config;
    }

    /// The node store as left by the last search.
    #[inline]
    pub fn nodes(&self) -> &NodeStore {
        &self.store
    }

    /// Install new terrain. Node storage is kept when the new grid fits.
    pub fn set_grid(&mut self, grid: Arc<PassGrid>) {
        log::debug!(
            "path grid replaced: {}x{} -> {}x{}",
            self.grid.width(),
            self.grid.length(),
            grid.width(),
            grid.length()
        );
        self.store.resize(grid.width(), grid.length());
        self.grid = grid;
    }

    /// Find a path between two world positions.
    ///
    /// The `y` components are ignored. On success `path` holds the centers of
    /// the cells from the start cell to the goal cell (simplified when the
    /// configuration asks for it). On failure `path` is left empty.
    ///
    /// Returns `false` when either position lies outside the grid or on an
    /// impassable cell, or when no route connects them.
    pub fn find(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> bool {
        self.try_find(path, start, end).is_ok()
    }

    /// Like [`find`](Self::find), reporting why no path was produced.
    pub fn try_find(
        &mut self,
        path: &mut Vec<Vec3>,
        start: Vec3,
        end: Vec3,
    ) -> Result<(), PathError> {
        path.clear();
        let result = self.find_world(path, start, end);
        if let Err(e) = &result {
            log::trace!("no path from {start} to {end}: {e}");
        }
        result
    }

    fn find_world(&mut self, path: &mut Vec<Vec3>, start: Vec3, end: Vec3) -> Result<(), PathError> {
        let from = self.store.cell_of(start)?;
        let to = self.store.cell_of(end)?;
        self.find_cells(from, to)?;

        if self.config.simplify {
            let grid = &self.grid;
            simplify::simplify_by(&self.cells, &mut self.kept, |a, b| {
                oracle::line_of_sight(grid, a, b)
            });
            path.extend(self.kept.iter().map(|c| c.center()));
        } else {
            path.extend(self.cells.iter().map(|c| c.center()));
        }
        Ok(())
    }

    /// Find the raw cell path between two grid cells.
    ///
    /// The returned slice runs from `from` to `to` inclusive, one step per
    /// cell, and is never simplified.
    pub fn find_cells(&mut self, from: Point, to: Point) -> Result<&[Point], PathError> {
        self.cells.clear();
        for p in [from, to] {
            if !self.grid.contains(p) {
                return Err(PathError::OutOfBounds {
                    x: p.x as f32,
                    z: p.y as f32,
                });
            }
            if !self.grid.is_open(p) {
                return Err(PathError::Impassable(p));
            }
        }
        self.search(from, to)?;
        Ok(&self.cells)
    }

    /// Run A* from `from` to `to` (both in bounds and passable) and leave the
    /// cell path in `self.cells`.
    fn search(&mut self, from: Point, to: Point) -> Result<(), PathError> {
        let (Some(start_idx), Some(goal_idx)) = (self.store.idx(from), self.store.idx(to)) else {
            return Err(PathError::Unreachable);
        };

        // Bump the run to lazily invalidate every node.
        self.store.begin_run();
        self.open.clear();
        self.seq = 0;

        {
            let node = self.store.touch(start_idx);
            node.cost = 0;
            node.parent = NO_PARENT;
        }
        self.open.push(NodeRef {
            idx: start_idx,
            f: costs::octile(from, to),
            cost: 0,
            seq: self.seq,
        });

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip entries superseded by a cheaper push or already expanded.
            let node = &self.store.nodes[ci];
            if node.closed || current.cost != node.cost {
                continue;
            }
            self.store.nodes[ci].closed = true;

            if ci == goal_idx {
                break 'search true;
            }

            let cp = self.store.point(ci);
            for &np in self.neighbors.passable(&self.grid, cp) {
                let Some(ni) = self.store.idx(np) else {
                    continue;
                };
                let tentative = current.cost + costs::step(cp, np);

                let n = self.store.touch(ni);
                if n.closed || tentative >= n.cost {
                    continue;
                }
                n.cost = tentative;
                n.parent = ci;

                self.seq += 1;
                self.open.push(NodeRef {
                    idx: ni,
                    f: tentative + costs::octile(np, to),
                    cost: tentative,
                    seq: self.seq,
                });
            }
        };

        if !found {
            return Err(PathError::Unreachable);
        }

        let mut ci = goal_idx;
        while ci != NO_PARENT {
            self.cells.push(self.store.point(ci));
            ci = self.store.nodes[ci].parent;
        }
        self.cells.reverse();
        Ok(())
    }

    /// Simplify `full_path` against this pathfinder's grid.
    ///
    /// See [`simplify_path`](crate::simplify_path).
    pub fn simplify_path(&self, full_path: &[Vec3], new_path: &mut Vec<Vec3>) {
        simplify::simplify_path(&self.grid, full_path, new_path);
    }
}
