//! Time-bounded pathfinding over voxel worlds.
//!
//! This crate provides an anytime A\* search ([`AStar`]) that can be run in
//! short slices from a game loop, along with the pieces it is built from:
//!
//! - **Priority queue** with decrease-key ([`PriorityQueue`])
//! - **Goals** ([`GoalY`], [`GoalBlock`], [`GoalXZ`], [`GoalNear`], [`GoalAny`], [`GoalAnyOf`])
//! - **Clocks** for wall-time and deterministic budgets ([`SystemClock`], [`ManualClock`])
//!
//! The search never inspects the world itself. Successor generation is
//! delegated to a [`CostModel`], and termination plus the heuristic to a
//! [`Goal`].
//!
//! # Example
//!
//! ```
//! use voxnav_core::{Move, Pos, CARDINALS};
//! use voxnav_paths::{search, CostModel, GoalXZ, SearchConfig, SearchStatus};
//!
//! struct Plane;
//!
//! impl CostModel for Plane {
//!     fn neighbors(&self, from: &Move, buf: &mut Vec<Move>) {
//!         for d in CARDINALS {
//!             buf.push(Move { cost: 1.0, ..Move::start(from.pos + d, 0) });
//!         }
//!     }
//! }
//!
//! let mut s = search(Move::start(Pos::ZERO, 0), Plane, GoalXZ::new(3, 2), SearchConfig::default()).unwrap();
//! let r = s.step();
//! assert_eq!(r.status, SearchStatus::Success);
//! assert_eq!(r.path.len(), 5);
//! ```

mod astar;
mod clock;
mod config;
mod distance;
mod goal;
mod heap;
mod node;
mod result;
mod traits;

pub use astar::{AStar, search};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{SearchConfig, SearchError};
pub use distance::{manhattan, octile};
pub use goal::{GoalAny, GoalAnyOf, GoalBlock, GoalNear, GoalXZ, GoalY};
pub use heap::PriorityQueue;
pub use node::SearchNode;
pub use result::{SearchResult, SearchStatus};
pub use traits::{CostModel, Goal};
