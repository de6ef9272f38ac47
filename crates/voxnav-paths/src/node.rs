use voxnav_core::Move;

/// Index of a node in the search arena.
pub(crate) type NodeId = usize;

/// A node of the search tree.
///
/// Nodes live in an arena owned by the search; `parent` indexes into it.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// The transition that reached this node.
    pub mv: Move,
    /// Accumulated cost from the start.
    pub g: f64,
    /// Heuristic estimate of the remaining cost.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    pub(crate) parent: Option<NodeId>,
}

impl SearchNode {
    pub(crate) fn new(mv: Move, g: f64, h: f64, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            g,
            h,
            f: g + h,
            parent,
        }
    }

    /// Overwrite cost and parent after a cheaper route was found.
    pub(crate) fn relax(&mut self, mv: Move, g: f64, h: f64, parent: NodeId) {
        self.mv = mv;
        self.g = g;
        self.h = h;
        self.f = g + h;
        self.parent = Some(parent);
    }

    /// Whether this is the root of the tree.
    #[inline]
    pub fn is_start(&self) -> bool {
        self.parent.is_none()
    }
}

/// Walk parent links from `id` back to the root and return the moves from
/// the root (exclusive) to `id` (inclusive).
pub(crate) fn reconstruct_path(nodes: &[SearchNode], id: NodeId) -> Vec<Move> {
    let mut path = Vec::new();
    let mut ci = id;
    while let Some(parent) = nodes[ci].parent {
        path.push(nodes[ci].mv.clone());
        debug_assert!(path.len() <= nodes.len(), "cycle in parent links");
        ci = parent;
    }
    path.reverse();
    path
}
