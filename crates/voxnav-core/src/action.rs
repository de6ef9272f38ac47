//! Transitions produced by a movement model.
//!
//! A [`Move`] is a destination position annotated with what it takes to get
//! there: its cost, the cells to break first and the blocks to place. Moves
//! compare and hash by position only, so the annotations never split one
//! search key into several.

use std::hash::{Hash, Hasher};

use crate::geom::Pos;

/// A block placement required by a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Existing block the new one is placed against.
    pub reference: Pos,
    /// Unit offset of the face of `reference` that receives the block.
    pub face: Pos,
    /// Where the agent should stand while placing, if it has to step back.
    pub return_pos: Option<Pos>,
    /// The placement happens mid-jump (pillaring straight up).
    pub jump: bool,
}

impl Placement {
    /// Place against `reference` on `face`.
    pub const fn new(reference: Pos, face: Pos) -> Self {
        Self {
            reference,
            face,
            return_pos: None,
            jump: false,
        }
    }

    pub const fn with_return_pos(mut self, p: Pos) -> Self {
        self.return_pos = Some(p);
        self
    }

    pub const fn jumping(mut self) -> Self {
        self.jump = true;
        self
    }

    /// The cell that ends up filled.
    #[inline]
    pub fn target(&self) -> Pos {
        self.reference + self.face
    }
}

/// A transition to `pos`, with its cost and terrain actions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub pos: Pos,
    /// Scaffolding blocks left after performing this move.
    pub remaining_blocks: u32,
    /// Cost of this single transition (not accumulated).
    pub cost: f64,
    /// Cells to clear before moving, in order.
    pub to_break: Vec<Pos>,
    /// Blocks to place, in order.
    pub to_place: Vec<Placement>,
}

impl Move {
    /// The root of a search: no cost, no actions.
    pub fn start(pos: Pos, remaining_blocks: u32) -> Self {
        Self {
            pos,
            remaining_blocks,
            cost: 0.0,
            to_break: Vec::new(),
            to_place: Vec::new(),
        }
    }

    /// Whether walking this move modifies terrain.
    #[inline]
    pub fn has_actions(&self) -> bool {
        !self.to_break.is_empty() || !self.to_place.is_empty()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_ignores_actions() {
        let p = Pos::new(1, 2, 3);
        let plain = Move::start(p, 4);
        let busy = Move {
            pos: p,
            remaining_blocks: 3,
            cost: 7.5,
            to_break: vec![p.up(1)],
            to_place: vec![Placement::new(p.down(1), Pos::UP)],
        };
        assert_eq!(plain, busy);
        let set: HashSet<_> = [plain, busy].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn placement_target() {
        let pl = Placement::new(Pos::new(0, 63, 0), Pos::new(1, 0, 0)).with_return_pos(Pos::ZERO);
        assert_eq!(pl.target(), Pos::new(1, 63, 0));
        assert_eq!(pl.return_pos, Some(Pos::ZERO));
        assert!(!pl.jump);
        assert!(Placement::new(Pos::ZERO, Pos::UP).jumping().jump);
    }

    #[test]
    fn start_has_no_actions() {
        let m = Move::start(Pos::ZERO, 0);
        assert!(!m.has_actions());
        assert_eq!(m.cost, 0.0);
    }
}
