use std::fmt;
use std::time::Duration;

use voxnav_core::{Move, Pos};

/// How a call to [`AStar::step`](crate::AStar::step) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// A node satisfying the goal was popped.
    Success,
    /// The open set ran dry.
    NoPath,
    /// The absolute deadline passed.
    Timeout,
    /// The tick budget ran out; stepping again resumes the search.
    Partial,
    /// The search was aborted and its state discarded.
    Aborted,
}

impl SearchStatus {
    /// Whether further steps can change the outcome.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Partial)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::NoPath => "noPath",
            Self::Timeout => "timeout",
            Self::Partial => "partial",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Outcome of one search step.
///
/// For `Success` the path ends at the goal; for every other status it ends at
/// the node closest to the goal by heuristic estimate (the "best node"), which
/// is not necessarily the cheapest node found so far.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Accumulated cost of the path's last node.
    pub cost: f64,
    /// Time since the search was created.
    pub time: Duration,
    /// Number of expanded positions.
    pub visited_nodes: usize,
    /// Expanded plus pending positions.
    pub generated_nodes: usize,
    /// Moves from the start (exclusive) to the final node (inclusive).
    pub path: Vec<Move>,
}

impl SearchResult {
    /// The positions of the path, without action annotations.
    pub fn positions(&self) -> Vec<Pos> {
        self.path.iter().map(|m| m.pos).collect()
    }

    /// Destination of the path, if it is not empty.
    pub fn end(&self) -> Option<Pos> {
        self.path.last().map(|m| m.pos)
    }
}
