//! Terrain cells and the world query interface.
//!
//! A [`Block`] pairs a position with a [`Material`]; the material decides
//! every physical property the movement model asks about. [`World`] is the
//! boundary the search core uses to look terrain up.

use crate::geom::Pos;

/// Tool families that speed up digging of particular materials.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolKind {
    Pickaxe,
    Shovel,
    Axe,
}

/// Terrain material of a single voxel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    #[default]
    Air,
    Water,
    Lava,
    Fire,
    TallGrass,
    Dirt,
    Grass,
    Sand,
    Gravel,
    Stone,
    Cobblestone,
    Planks,
    Log,
    Ore,
    Obsidian,
    Bedrock,
    /// Outside the loaded part of the world.
    Unloaded,
}

impl Material {
    /// Air and fluids: nothing to stand on, nothing to collide with.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Air | Self::Water | Self::Lava)
    }

    /// Fluids.
    pub const fn is_liquid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }

    /// Full collision box: can be stood on, blocks movement.
    pub const fn is_physical(self) -> bool {
        matches!(
            self,
            Self::Dirt
                | Self::Grass
                | Self::Sand
                | Self::Gravel
                | Self::Stone
                | Self::Cobblestone
                | Self::Planks
                | Self::Log
                | Self::Ore
                | Self::Obsidian
                | Self::Bedrock
        )
    }

    /// Cells that hurt an agent standing in them.
    pub const fn is_hazardous(self) -> bool {
        matches!(self, Self::Lava | Self::Fire)
    }

    /// No collision box at all (the agent's body fits through).
    pub const fn is_passable(self) -> bool {
        matches!(
            self,
            Self::Air | Self::Water | Self::Lava | Self::Fire | Self::TallGrass
        )
    }

    /// A placed block simply overwrites the cell.
    pub const fn is_replaceable(self) -> bool {
        matches!(
            self,
            Self::Air | Self::Water | Self::Lava | Self::Fire | Self::TallGrass
        )
    }

    /// Hardness in the usual "seconds with bare hands / 1.5" scale, or
    /// `None` if the material cannot be broken.
    pub const fn hardness(self) -> Option<f32> {
        match self {
            Self::Air | Self::Fire | Self::TallGrass => Some(0.0),
            Self::Dirt | Self::Sand => Some(0.5),
            Self::Grass | Self::Gravel => Some(0.6),
            Self::Stone => Some(1.5),
            Self::Cobblestone | Self::Planks | Self::Log => Some(2.0),
            Self::Ore => Some(3.0),
            Self::Obsidian => Some(50.0),
            Self::Water | Self::Lava | Self::Bedrock | Self::Unloaded => None,
        }
    }

    /// The tool family that digs this material fastest.
    pub const fn preferred_tool(self) -> Option<ToolKind> {
        match self {
            Self::Stone | Self::Cobblestone | Self::Ore | Self::Obsidian => Some(ToolKind::Pickaxe),
            Self::Dirt | Self::Grass | Self::Sand | Self::Gravel => Some(ToolKind::Shovel),
            Self::Planks | Self::Log => Some(ToolKind::Axe),
            _ => None,
        }
    }

    /// Whether digging without the preferred tool is penalised.
    pub const fn requires_tool(self) -> bool {
        matches!(self.preferred_tool(), Some(ToolKind::Pickaxe))
    }
}

/// A terrain cell as seen by the movement model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub pos: Pos,
    pub material: Material,
}

impl Block {
    /// Create a new block.
    #[inline]
    pub const fn new(pos: Pos, material: Material) -> Self {
        Self { pos, material }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.material.is_empty()
    }

    #[inline]
    pub const fn is_liquid(&self) -> bool {
        self.material.is_liquid()
    }

    #[inline]
    pub const fn is_physical(&self) -> bool {
        self.material.is_physical()
    }

    #[inline]
    pub const fn is_hazardous(&self) -> bool {
        self.material.is_hazardous()
    }

    #[inline]
    pub const fn is_replaceable(&self) -> bool {
        self.material.is_replaceable()
    }

    /// Passable and harmless: an agent can occupy the cell without clearing it.
    #[inline]
    pub const fn is_safe(&self) -> bool {
        self.material.is_passable() && !self.material.is_hazardous()
    }

    /// See [`Material::hardness`].
    #[inline]
    pub const fn hardness(&self) -> Option<f32> {
        self.material.hardness()
    }
}

/// Terrain query interface consumed by the movement model.
///
/// Answers must stay stable for the duration of one search step.
pub trait World {
    /// The block at `p`. Cells outside the loaded area report
    /// [`Material::Unloaded`].
    fn block_at(&self, p: Pos) -> Block;

    /// Lowest y coordinate that can hold terrain. Landing scans stop here.
    fn min_y(&self) -> i32;
}

impl<W: World + ?Sized> World for &W {
    fn block_at(&self, p: Pos) -> Block {
        (**self).block_at(p)
    }

    fn min_y(&self) -> i32 {
        (**self).min_y()
    }
}
