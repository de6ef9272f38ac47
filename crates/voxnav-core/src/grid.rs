//! The [`VoxelGrid`] type, a dense in-memory [`World`].
//!
//! Cells are stored in one flat buffer covering a [`Bounds`]; anything
//! outside the box reads as [`Material::Unloaded`].

use crate::block::{Block, Material, World};
use crate::geom::{Bounds, Pos};

/// A dense box of materials.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelGrid {
    bounds: Bounds,
    cells: Vec<Material>,
}

impl VoxelGrid {
    /// Create a grid covering `bounds`, filled with air.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![Material::Air; bounds.len()],
        }
    }

    /// The box covered by this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    fn index(&self, p: Pos) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let s = self.bounds.size();
        let d = p - self.bounds.min;
        Some(((d.y * s.z + d.z) * s.x + d.x) as usize)
    }

    /// Material at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<Material> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the material at `p`. Returns `false` (and does nothing) outside the grid.
    pub fn set(&mut self, p: Pos, m: Material) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = m;
                true
            }
            None => false,
        }
    }

    /// Fill the intersection of `region` and the grid with `m`.
    pub fn fill(&mut self, region: Bounds, m: Material) {
        for p in region.intersect(self.bounds) {
            self.set(p, m);
        }
    }

    /// Iterate over every cell as a [`Block`].
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.bounds
            .iter()
            .zip(self.cells.iter())
            .map(|(p, &m)| Block::new(p, m))
    }

    /// Number of cells holding `m`.
    pub fn count(&self, m: Material) -> usize {
        self.cells.iter().filter(|&&c| c == m).count()
    }
}

impl World for VoxelGrid {
    fn block_at(&self, p: Pos) -> Block {
        Block::new(p, self.get(p).unwrap_or(Material::Unloaded))
    }

    fn min_y(&self) -> i32 {
        self.bounds.min.y
    }
}
