use skirmish_core::{Point, Range, Vec3};

use crate::error::PathError;

/// Sentinel cost of a node no path has reached yet.
pub const UNREACHABLE: i64 = i64::MAX;

pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Internal node state
// ---------------------------------------------------------------------------

/// Per-cell search state. Only meaningful while `generation` equals the
/// store's current run; any other value means "never touched this run".
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) cost: i64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Frontier entry, ordered by priority `f` and then by discovery order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) cost: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed on both keys so BinaryHeap (max-heap) pops the smallest
        // f first and, among equal f, the entry pushed first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// Search status of one cell as of the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeState {
    /// Not reached by the run.
    Unvisited,
    /// Reached and still on the frontier when the run ended.
    Open,
    /// Expanded (finalized) by the run.
    Closed,
}

/// One cell of a [`NodeSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub state: NodeState,
    /// Best known fixed-point cost from the start (see [`crate::costs`]).
    pub cost: Option<i64>,
    pub parent: Option<Point>,
}

impl CellSnapshot {
    const UNVISITED: Self = Self {
        state: NodeState::Unvisited,
        cost: None,
        parent: None,
    };
}

/// Immutable copy of a node store, taken after a search completes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSnapshot {
    bounds: Range,
    run: u32,
    cells: Vec<CellSnapshot>,
}

impl NodeSnapshot {
    /// The grid rectangle the snapshot covers.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The run number the snapshot was taken after.
    pub fn run(&self) -> u32 {
        self.run
    }

    /// The state of `p`, or `None` outside the grid.
    pub fn at(&self, p: Point) -> Option<&CellSnapshot> {
        if !self.bounds.contains(p) {
            return None;
        }
        let i = p.y as usize * self.bounds.width() as usize + p.x as usize;
        self.cells.get(i)
    }

    /// Row-major iterator over `(Point, &CellSnapshot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &CellSnapshot)> {
        self.bounds.iter().zip(self.cells.iter())
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: NodeState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }
}

// ---------------------------------------------------------------------------
// NodeStore
// ---------------------------------------------------------------------------

/// Flat per-cell search state for one grid, reused across searches.
///
/// Each run bumps a generation counter instead of clearing the array; a node
/// stamped with an older generation reads as untouched. Storage grows when a
/// larger grid is installed and is otherwise never reallocated.
pub struct NodeStore {
    width: i32,
    length: i32,
    pub(crate) nodes: Vec<Node>,
    run: u32,
}

impl NodeStore {
    /// Create a store for a `width × length` grid.
    pub fn new(width: i32, length: i32) -> Self {
        let len = Range::new(0, 0, width.max(0), length.max(0)).len();
        Self {
            width: width.max(0),
            length: length.max(0),
            nodes: vec![Node::default(); len],
            run: 0,
        }
    }

    /// Re-target the store to a `width × length` grid.
    ///
    /// The node array is reallocated only when the new size does not fit in
    /// the existing allocation. Either way the run counter is bumped, so old
    /// state goes stale and [`run`](Self::run) keeps increasing.
    pub fn resize(&mut self, width: i32, length: i32) {
        let width = width.max(0);
        let length = length.max(0);
        let new_len = Range::new(0, 0, width, length).len();
        self.width = width;
        self.length = length;

        if new_len > self.nodes.len() {
            self.nodes.clear();
            self.nodes.resize(new_len, Node::default());
        }
        self.begin_run();
    }

    /// The grid rectangle being served.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.length)
    }

    /// Number of node slots allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// The current run number. Zero before the first search.
    #[inline]
    pub fn run(&self) -> u32 {
        self.run
    }

    /// Start a new run, implicitly invalidating every node.
    ///
    /// On counter wrap-around all stamps are cleared once, so a stale
    /// generation can never equal the current one.
    pub(crate) fn begin_run(&mut self) -> u32 {
        if self.run == u32::MAX {
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.run = 0;
        }
        self.run += 1;
        self.run
    }

    /// Grid cell under a world position.
    pub fn cell_of(&self, world: Vec3) -> Result<Point, PathError> {
        let out = PathError::OutOfBounds {
            x: world.x,
            z: world.z,
        };
        if !world.x.is_finite() || !world.z.is_finite() {
            return Err(out);
        }
        let p = world.cell();
        if self.bounds().contains(p) {
            Ok(p)
        } else {
            Err(out)
        }
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Whether the node was touched by the current run.
    #[inline]
    pub(crate) fn is_fresh(&self, idx: usize) -> bool {
        self.nodes[idx].generation == self.run
    }

    /// Stamp a node into the current run, resetting it if stale, and return it.
    #[inline]
    pub(crate) fn touch(&mut self, idx: usize) -> &mut Node {
        let run = self.run;
        let n = &mut self.nodes[idx];
        if n.generation != run {
            *n = Node {
                generation: run,
                ..Node::default()
            };
        }
        n
    }

    /// Search state of `p` as of the current run.
    pub fn state_at(&self, p: Point) -> Option<CellSnapshot> {
        let i = self.idx(p)?;
        Some(self.cell_snapshot(i))
    }

    fn cell_snapshot(&self, idx: usize) -> CellSnapshot {
        if self.run == 0 || !self.is_fresh(idx) {
            return CellSnapshot::UNVISITED;
        }
        let n = &self.nodes[idx];
        CellSnapshot {
            state: if n.closed {
                NodeState::Closed
            } else {
                NodeState::Open
            },
            cost: (n.cost != UNREACHABLE).then_some(n.cost),
            parent: (n.parent != NO_PARENT).then(|| self.point(n.parent)),
        }
    }

    /// Copy the current run's state of every cell.
    pub fn snapshot(&self) -> NodeSnapshot {
        let len = self.bounds().len();
        NodeSnapshot {
            bounds: self.bounds(),
            run: self.run,
            cells: (0..len).map(|i| self.cell_snapshot(i)).collect(),
        }
    }
}
