//! Goal variants.
//!
//! Each goal is a small data-carrying struct implementing [`Goal`]. New kinds
//! of goal only need a new implementation; the search never matches on them.

use voxnav_core::Pos;

use crate::distance::{manhattan, octile};
use crate::traits::Goal;

/// Always satisfied, zero estimate. Useful as a no-op default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalAny;

impl Goal for GoalAny {
    fn distance(&self, _p: Pos) -> f64 {
        0.0
    }

    fn is_end(&self, _p: Pos) -> bool {
        true
    }
}

/// Reach a given altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalY {
    pub y: i32,
}

impl GoalY {
    pub const fn new(y: i32) -> Self {
        Self { y }
    }
}

impl Goal for GoalY {
    fn distance(&self, p: Pos) -> f64 {
        (self.y - p.y).abs() as f64
    }

    fn is_end(&self, p: Pos) -> bool {
        p.y == self.y
    }
}

/// Stand next to a block.
///
/// The goal is adjacency, not occupancy: a position satisfies it when its
/// Manhattan distance to the block is exactly 1, where the vertical leg is
/// shortened by one when the agent is below the block (its head is one cell
/// above its feet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalBlock {
    pub pos: Pos,
}

impl GoalBlock {
    pub const fn new(pos: Pos) -> Self {
        Self { pos }
    }

    // Offset from the block, with the head-height bias applied below it.
    fn delta(&self, p: Pos) -> Pos {
        let d = p - self.pos;
        if d.y < 0 { d.up(1) } else { d }
    }
}

impl Goal for GoalBlock {
    fn distance(&self, p: Pos) -> f64 {
        let d = self.delta(p);
        octile(d.x, d.z) + d.y.abs() as f64
    }

    fn is_end(&self, p: Pos) -> bool {
        manhattan(self.delta(p), Pos::ZERO) == 1
    }
}

/// Reach a column, at any height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalXZ {
    pub x: i32,
    pub z: i32,
}

impl GoalXZ {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl Goal for GoalXZ {
    fn distance(&self, p: Pos) -> f64 {
        octile(p.x - self.x, p.z - self.z)
    }

    fn is_end(&self, p: Pos) -> bool {
        p.x == self.x && p.z == self.z
    }
}

/// Get within `range` (euclidean) of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalNear {
    pub pos: Pos,
    pub range: u32,
}

impl GoalNear {
    pub const fn new(pos: Pos, range: u32) -> Self {
        Self { pos, range }
    }
}

impl Goal for GoalNear {
    fn distance(&self, p: Pos) -> f64 {
        let d = p - self.pos;
        (octile(d.x, d.z) + d.y.abs() as f64 - self.range as f64).max(0.0)
    }

    fn is_end(&self, p: Pos) -> bool {
        let r = self.range as i64;
        p.distance_sq(self.pos) <= r * r
    }
}

/// Satisfied by any of its members; the estimate is the smallest member estimate.
#[derive(Default)]
pub struct GoalAnyOf {
    goals: Vec<Box<dyn Goal>>,
}

impl GoalAnyOf {
    pub fn new(goals: Vec<Box<dyn Goal>>) -> Self {
        Self { goals }
    }

    /// Add a member goal.
    pub fn push(&mut self, goal: impl Goal + 'static) {
        self.goals.push(Box::new(goal));
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl Goal for GoalAnyOf {
    fn distance(&self, p: Pos) -> f64 {
        self.goals
            .iter()
            .map(|g| g.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn is_end(&self, p: Pos) -> bool {
        self.goals.iter().any(|g| g.is_end(p))
    }
}
