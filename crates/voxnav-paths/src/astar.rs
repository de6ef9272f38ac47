//! Anytime A* with cooperative time slicing.
//!
//! An [`AStar`] value owns the whole search state (node arena, open heap,
//! open map, closed set). Each call to [`AStar::step`] expands nodes until the
//! goal is popped, the open set runs dry, or a time budget runs out. When the
//! per-step budget runs out the result is [`SearchStatus::Partial`] and the
//! next `step` continues exactly where this one stopped.
//!
//! Closed positions are never reopened, even if a cheaper route to them turns
//! up later. That is exact for consistent heuristics and an approximation
//! otherwise (e.g. when clearing costs vary a lot between neighbours).

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use log::{debug, trace};
use voxnav_core::{Move, Pos};

use crate::clock::{Clock, SystemClock};
use crate::config::{SearchConfig, SearchError};
use crate::heap::PriorityQueue;
use crate::node::{NodeId, SearchNode, reconstruct_path};
use crate::result::{SearchResult, SearchStatus};
use crate::traits::{CostModel, Goal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Done(SearchStatus, NodeId),
    Aborted,
}

/// A resumable A* search.
pub struct AStar<M, G, C = SystemClock> {
    cost_model: M,
    goal: G,
    clock: C,
    config: SearchConfig,
    start_time: Duration,
    max_cost: Option<f64>,
    nodes: Vec<SearchNode>,
    open: PriorityQueue<NodeId>,
    open_map: HashMap<Pos, NodeId>,
    closed: HashSet<Pos>,
    visited_chunks: HashSet<(i32, i32)>,
    best: NodeId,
    state: State,
    last_status: Option<SearchStatus>,
    // scratch buffer for neighbor generation
    nbuf: Vec<Move>,
}

/// Start a search from `start` on the wall clock.
///
/// Nothing is expanded until the first [`AStar::step`].
pub fn search<M: CostModel, G: Goal>(
    start: Move,
    cost_model: M,
    goal: G,
    config: SearchConfig,
) -> Result<AStar<M, G>, SearchError> {
    AStar::new(start, cost_model, goal, config)
}

impl<M: CostModel, G: Goal> AStar<M, G, SystemClock> {
    /// Create a search timed by the wall clock.
    pub fn new(start: Move, cost_model: M, goal: G, config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_clock(start, cost_model, goal, config, SystemClock::new())
    }
}

impl<M: CostModel, G: Goal, C: Clock> AStar<M, G, C> {
    /// Create a search timed by `clock`.
    ///
    /// Fails if `config` is invalid or the goal's estimate for the start is
    /// not a finite non-negative number.
    pub fn with_clock(
        start: Move,
        cost_model: M,
        goal: G,
        config: SearchConfig,
        clock: C,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let h = goal.distance(start.pos);
        if !h.is_finite() || h < 0.0 {
            return Err(SearchError::NonFiniteHeuristic {
                pos: start.pos,
                value: h,
            });
        }

        debug!(
            "[AStar] new: start={} h={h:.2} blocks={} radius={:?}",
            start.pos, start.remaining_blocks, config.radius
        );

        let start_time = clock.now();
        let start_pos = start.pos;
        let mut open = PriorityQueue::new();
        open.push(0, h);
        let mut open_map = HashMap::new();
        open_map.insert(start_pos, 0);

        Ok(Self {
            cost_model,
            goal,
            clock,
            max_cost: config.radius.map(|r| h + r),
            config,
            start_time,
            nodes: vec![SearchNode::new(start, 0.0, h, None)],
            open,
            open_map,
            closed: HashSet::new(),
            visited_chunks: HashSet::new(),
            best: 0,
            state: State::Running,
            last_status: None,
            nbuf: Vec::with_capacity(24),
        })
    }

    /// Expand nodes until the goal is reached, the open set empties, or a
    /// budget runs out.
    ///
    /// Once a terminal status has been returned, later calls return the same
    /// status and path without expanding anything.
    pub fn step(&mut self) -> SearchResult {
        let state = self.state;
        let (status, id) = match state {
            State::Aborted => return self.aborted_result(),
            State::Done(status, id) => return self.result(status, id),
            State::Running => self.expand(),
        };
        if status.is_terminal() {
            debug!(
                "[AStar] {status}: visited={} generated={} cost={:.2}",
                self.closed.len(),
                self.closed.len() + self.open.len(),
                self.nodes[id].g
            );
            self.state = State::Done(status, id);
        } else {
            trace!(
                "[AStar] partial: visited={} open={}",
                self.closed.len(),
                self.open.len()
            );
        }
        self.last_status = Some(status);
        self.result(status, id)
    }

    fn expand(&mut self) -> (SearchStatus, NodeId) {
        let tick_start = self.clock.now();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            if self.open.is_empty() {
                break (SearchStatus::NoPath, self.best);
            }
            let now = self.clock.now();
            if now.saturating_sub(tick_start) > self.config.tick_timeout {
                break (SearchStatus::Partial, self.best);
            }
            if now.saturating_sub(self.start_time) > self.config.timeout {
                break (SearchStatus::Timeout, self.best);
            }

            let Some((ci, _)) = self.open.pop() else {
                break (SearchStatus::NoPath, self.best);
            };
            let current_pos = self.nodes[ci].mv.pos;
            if self.goal.is_end(current_pos) {
                break (SearchStatus::Success, ci);
            }

            self.open_map.remove(&current_pos);
            self.closed.insert(current_pos);
            self.visited_chunks.insert(current_pos.chunk());
            let current_g = self.nodes[ci].g;
            trace!("[AStar] expand {current_pos} g={current_g:.2}");

            nbuf.clear();
            self.cost_model.neighbors(&self.nodes[ci].mv, &mut nbuf);

            for mv in nbuf.drain(..) {
                if self.closed.contains(&mv.pos) {
                    continue;
                }
                debug_assert!(
                    mv.cost.is_finite() && mv.cost >= 0.0,
                    "transition to {} has invalid cost {}",
                    mv.pos,
                    mv.cost
                );

                let g = current_g + mv.cost;
                let h = self.goal.distance(mv.pos);
                // moves that exactly meet the bound stay in
                if let Some(max) = self.max_cost {
                    if g + h > max {
                        continue;
                    }
                }

                let ni = match self.open_map.get(&mv.pos) {
                    Some(&ni) => {
                        if self.nodes[ni].g <= g {
                            continue;
                        }
                        self.nodes[ni].relax(mv, g, h, ci);
                        self.open.update(&ni, g + h);
                        ni
                    }
                    None => {
                        let ni = self.nodes.len();
                        self.open_map.insert(mv.pos, ni);
                        self.nodes.push(SearchNode::new(mv, g, h, Some(ci)));
                        self.open.push(ni, g + h);
                        ni
                    }
                };
                if self.nodes[ni].h < self.nodes[self.best].h {
                    self.best = ni;
                }
            }
        };

        self.nbuf = nbuf;
        outcome
    }

    /// Stop the search for good and release its state.
    ///
    /// Every later [`step`](Self::step) returns [`SearchStatus::Aborted`].
    pub fn abort(&mut self) {
        if self.state == State::Aborted {
            return;
        }
        debug!(
            "[AStar] aborted after visiting {} positions",
            self.closed.len()
        );
        self.state = State::Aborted;
        self.nodes = Vec::new();
        self.open = PriorityQueue::new();
        self.open_map = HashMap::new();
        self.closed = HashSet::new();
        self.visited_chunks = HashSet::new();
        self.best = 0;
    }

    fn result(&self, status: SearchStatus, id: NodeId) -> SearchResult {
        let node = &self.nodes[id];
        SearchResult {
            status,
            cost: node.g,
            time: self.elapsed(),
            visited_nodes: self.closed.len(),
            generated_nodes: self.closed.len() + self.open.len(),
            path: reconstruct_path(&self.nodes, id),
        }
    }

    fn aborted_result(&self) -> SearchResult {
        SearchResult {
            status: SearchStatus::Aborted,
            cost: 0.0,
            time: self.elapsed(),
            visited_nodes: 0,
            generated_nodes: 0,
            path: Vec::new(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.start_time)
    }

    /// Status returned by the latest [`step`](Self::step), `None` before the
    /// first one.
    pub fn status(&self) -> Option<SearchStatus> {
        if self.state == State::Aborted {
            return Some(SearchStatus::Aborted);
        }
        self.last_status
    }

    /// Node with the lowest heuristic estimate generated so far.
    pub fn best_node(&self) -> Option<&SearchNode> {
        self.nodes.get(self.best)
    }

    /// Number of expanded positions.
    pub fn visited_nodes(&self) -> usize {
        self.closed.len()
    }

    /// Expanded plus pending positions.
    pub fn generated_nodes(&self) -> usize {
        self.closed.len() + self.open.len()
    }

    /// Positions currently pending expansion, in heap order.
    pub fn open_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.open.iter().map(|(&id, _)| self.nodes[id].mv.pos)
    }

    /// Column chunks `(x >> 4, z >> 4)` holding at least one expanded position.
    pub fn visited_chunks(&self) -> &HashSet<(i32, i32)> {
        &self.visited_chunks
    }

    pub fn goal(&self) -> &G {
        &self.goal
    }

    pub fn cost_model(&self) -> &M {
        &self.cost_model
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
