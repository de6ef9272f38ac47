use voxnav_core::{Move, Pos};

/// Transition generator: the edges of the search graph.
pub trait CostModel {
    /// Append every legal transition out of `from` into `buf`. The caller
    /// clears `buf` before calling.
    ///
    /// Each move's `cost` must be finite and non-negative, and its
    /// `remaining_blocks` must account for the placements it requires.
    fn neighbors(&self, from: &Move, buf: &mut Vec<Move>);
}

/// End test and heuristic of a search.
pub trait Goal {
    /// Estimate of the remaining cost from `p` to a satisfying position.
    /// Should never overestimate the true cost (admissible).
    fn distance(&self, p: Pos) -> f64;

    /// Whether `p` satisfies the goal.
    fn is_end(&self, p: Pos) -> bool;
}

impl<M: CostModel + ?Sized> CostModel for &M {
    fn neighbors(&self, from: &Move, buf: &mut Vec<Move>) {
        (**self).neighbors(from, buf)
    }
}

impl<G: Goal + ?Sized> Goal for &G {
    fn distance(&self, p: Pos) -> f64 {
        (**self).distance(p)
    }

    fn is_end(&self, p: Pos) -> bool {
        (**self).is_end(p)
    }
}

impl<G: Goal + ?Sized> Goal for Box<G> {
    fn distance(&self, p: Pos) -> f64 {
        (**self).distance(p)
    }

    fn is_end(&self, p: Pos) -> bool {
        (**self).is_end(p)
    }
}
