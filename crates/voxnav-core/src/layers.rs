//! Voxel terrain built from text.
//!
//! [`Layers`] parses a stack of ASCII slices, bottom slice first, into
//! materials that can be written into a [`VoxelGrid`]. Within a slice, each
//! line is one `z` row and each character one `x` column.
//!
//! | Rune | Material |
//! |---|---|
//! | `.` | air |
//! | `#` | stone |
//! | `d` | dirt |
//! | `g` | grass |
//! | `s` | sand |
//! | `c` | cobblestone |
//! | `p` | planks |
//! | `o` | ore |
//! | `O` | obsidian |
//! | `B` | bedrock |
//! | `~` | water |
//! | `L` | lava |
//! | `^` | fire |
//! | `"` | tall grass |

use std::fmt;

use crate::block::Material;
use crate::geom::{Bounds, Pos};
use crate::grid::VoxelGrid;

/// Material for a layer rune, if the rune is known.
pub fn rune_material(ch: char) -> Option<Material> {
    let m = match ch {
        '.' => Material::Air,
        '#' => Material::Stone,
        'd' => Material::Dirt,
        'g' => Material::Grass,
        's' => Material::Sand,
        'c' => Material::Cobblestone,
        'p' => Material::Planks,
        'o' => Material::Ore,
        'O' => Material::Obsidian,
        'B' => Material::Bedrock,
        '~' => Material::Water,
        'L' => Material::Lava,
        '^' => Material::Fire,
        '"' => Material::TallGrass,
        _ => return None,
    };
    Some(m)
}

/// A parsed stack of terrain slices.
#[derive(Debug, Clone)]
pub struct Layers {
    cells: Vec<Material>,
    size: Pos,
}

impl Layers {
    /// Parse `slices`, bottom slice first.
    ///
    /// Every slice is trimmed as a whole; all lines of all slices must have
    /// the same width and every slice the same number of lines.
    pub fn parse(slices: &[&str]) -> Result<Self, LayersError> {
        let mut size: Option<(i32, i32)> = None;
        let mut cells = Vec::new();

        for (y, slice) in slices.iter().enumerate() {
            let y = y as i32;
            let lines: Vec<&str> = slice.trim().lines().map(str::trim).collect();
            let depth = lines.len() as i32;
            if depth == 0 {
                return Err(LayersError::Empty);
            }
            if size.is_some_and(|(_, d)| d != depth) {
                return Err(LayersError::InconsistentSize { layer: y });
            }
            for (z, line) in lines.iter().enumerate() {
                let z = z as i32;
                let width = line.chars().count() as i32;
                match size {
                    None => size = Some((width, depth)),
                    Some((w, d)) if w != width || d != depth => {
                        return Err(LayersError::InconsistentSize { layer: y });
                    }
                    Some(_) => {}
                }
                for (x, ch) in line.chars().enumerate() {
                    let m = rune_material(ch).ok_or(LayersError::InvalidRune {
                        ch,
                        pos: Pos::new(x as i32, y, z),
                    })?;
                    cells.push(m);
                }
            }
        }

        let Some((w, d)) = size.filter(|&(w, d)| w > 0 && d > 0) else {
            return Err(LayersError::Empty);
        };
        Ok(Self {
            cells,
            size: Pos::new(w, slices.len() as i32, d),
        })
    }

    /// Size as (width, height, depth).
    pub fn size(&self) -> Pos {
        self.size
    }

    /// Write the layers into a fresh grid whose minimum corner is `origin`.
    pub fn to_grid(&self, origin: Pos) -> VoxelGrid {
        let bounds = Bounds::new(origin, origin + self.size);
        let mut grid = VoxelGrid::new(bounds);
        for (p, &m) in bounds.iter().zip(self.cells.iter()) {
            grid.set(p, m);
        }
        grid
    }
}

impl VoxelGrid {
    /// Parse `slices` (bottom first) into a grid anchored at the origin.
    ///
    /// See [`Layers::parse`].
    pub fn from_layers(slices: &[&str]) -> Result<Self, LayersError> {
        Ok(Layers::parse(slices)?.to_grid(Pos::ZERO))
    }
}

/// Errors that can occur when parsing layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayersError {
    /// There were no slices, or a slice held no cells.
    Empty,
    /// A slice's width or depth differs from the first slice.
    InconsistentSize { layer: i32 },
    /// A character with no material mapping was found.
    InvalidRune { ch: char, pos: Pos },
}

impl fmt::Display for LayersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layers: no cells"),
            Self::InconsistentSize { layer } => {
                write!(f, "layers: slice {layer} has an inconsistent size")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layers contain invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayersError {}
