//! Pathfinding for unit movement on 2D passability grids.
//!
//! The crate answers "how does a unit get from here to there" queries on a
//! [`PassGrid`](skirmish_core::PassGrid):
//!
//! - **A\*** search with 8-way movement and no corner cutting ([`PathFinder::find`])
//! - **Path simplification** by grid line of sight ([`simplify_path`])
//! - **Instrumented search** with timing and node store snapshots ([`TimedPathFinder`])
//! - **Waypoint following** for movement code ([`PathFollower`])
//! - **Parallel batches** of independent queries ([`find_batch`])
//!
//! A [`PathFinder`] owns a reusable [`NodeStore`]. Nodes are invalidated by
//! bumping a run counter rather than by clearing, so repeated queries incur
//! zero allocations after warm-up.
//!
//! # Costs
//!
//! Step costs are fixed point ([`costs::ORTHOGONAL`] and [`costs::DIAGONAL`])
//! so search order never depends on float rounding.

mod batch;
mod config;
pub mod costs;
mod error;
mod finder;
mod follow;
mod nodes;
pub mod oracle;
mod simplify;
mod timed;
mod traits;

pub use batch::{PathRequest, find_batch};
pub use config::FinderConfig;
pub use error::PathError;
pub use finder::PathFinder;
pub use follow::{ARRIVAL_RADIUS_SQ, PathFollower};
pub use nodes::{CellSnapshot, NodeSnapshot, NodeState, NodeStore, UNREACHABLE};
pub use oracle::{Neighbors, is_passable, line_of_sight};
pub use simplify::simplify_path;
pub use timed::TimedPathFinder;
pub use traits::FindPath;
