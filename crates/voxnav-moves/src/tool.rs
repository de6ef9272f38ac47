//! Tools and digging time estimates.

use voxnav_core::{Block, ToolKind};

/// A digging tool held by the agent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tool {
    pub kind: ToolKind,
    /// Base speed multiplier on matching materials (bare hands are 1).
    pub speed: f32,
    /// Efficiency enchantment level.
    pub efficiency: u8,
}

impl Tool {
    pub const fn new(kind: ToolKind, speed: f32) -> Self {
        Self {
            kind,
            speed,
            efficiency: 0,
        }
    }

    pub const fn with_efficiency(mut self, level: u8) -> Self {
        self.efficiency = level;
        self
    }

    /// Speed multiplier including the efficiency bonus.
    pub fn effective_speed(&self) -> f32 {
        match self.efficiency {
            0 => self.speed,
            n => {
                let n = n as f32;
                self.speed + n * n + 1.0
            }
        }
    }

    /// Whether this tool speeds up digging `block`.
    pub fn matches(&self, block: &Block) -> bool {
        block.material.preferred_tool() == Some(self.kind)
    }
}

/// Picks the tool used to dig a block.
pub trait ToolSelector {
    /// The tool to dig `block` with, or `None` for bare hands.
    fn best_tool(&self, block: &Block) -> Option<Tool>;
}

impl<T: ToolSelector + ?Sized> ToolSelector for &T {
    fn best_tool(&self, block: &Block) -> Option<Tool> {
        (**self).best_tool(block)
    }
}

/// Digs everything by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BareHands;

impl ToolSelector for BareHands {
    fn best_tool(&self, _block: &Block) -> Option<Tool> {
        None
    }
}

/// A set of tools; the fastest matching one is chosen per block.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Toolbelt {
    tools: Vec<Tool>,
}

impl Toolbelt {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self { tools }
    }

    pub fn push(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }
}

impl ToolSelector for Toolbelt {
    fn best_tool(&self, block: &Block) -> Option<Tool> {
        self.tools
            .iter()
            .filter(|t| t.matches(block))
            .max_by(|a, b| a.effective_speed().total_cmp(&b.effective_speed()))
            .copied()
    }
}

/// Estimated milliseconds to dig `block` with `tool`.
///
/// A tool only helps on materials it matches. Materials that need a pickaxe
/// dig more than three times slower without one. Unbreakable blocks take
/// forever.
pub fn dig_time_ms(block: &Block, tool: Option<&Tool>) -> f64 {
    let Some(hardness) = block.hardness() else {
        return f64::INFINITY;
    };
    if hardness <= 0.0 {
        return 0.0;
    }
    let hardness = hardness as f64;
    match tool.filter(|t| t.matches(block)) {
        Some(t) => hardness * 1500.0 / t.effective_speed().max(1.0) as f64,
        None if block.material.requires_tool() => hardness * 5000.0,
        None => hardness * 1500.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav_core::{Material, Pos};

    fn block(m: Material) -> Block {
        Block::new(Pos::ZERO, m)
    }

    #[test]
    fn bare_hands() {
        assert_eq!(dig_time_ms(&block(Material::Air), None), 0.0);
        assert_eq!(dig_time_ms(&block(Material::Dirt), None), 750.0);
        assert_eq!(dig_time_ms(&block(Material::Stone), None), 7500.0);
        assert_eq!(dig_time_ms(&block(Material::Bedrock), None), f64::INFINITY);
        assert_eq!(BareHands.best_tool(&block(Material::Stone)), None);
    }

    #[test]
    fn matching_tool_is_faster() {
        let pick = Tool::new(ToolKind::Pickaxe, 4.0);
        let stone = block(Material::Stone);
        assert_eq!(dig_time_ms(&stone, Some(&pick)), 562.5);
        // a pickaxe does nothing for dirt
        assert_eq!(dig_time_ms(&block(Material::Dirt), Some(&pick)), 750.0);
    }

    #[test]
    fn efficiency_bonus() {
        let t = Tool::new(ToolKind::Shovel, 2.0).with_efficiency(2);
        assert_eq!(t.effective_speed(), 7.0);
        assert_eq!(Tool::new(ToolKind::Shovel, 2.0).effective_speed(), 2.0);
    }

    #[test]
    fn toolbelt_picks_fastest_match() {
        let belt = Toolbelt::new(vec![
            Tool::new(ToolKind::Pickaxe, 2.0),
            Tool::new(ToolKind::Shovel, 6.0),
            Tool::new(ToolKind::Pickaxe, 8.0),
        ]);
        let best = belt.best_tool(&block(Material::Ore)).unwrap();
        assert_eq!(best.speed, 8.0);
        let best = belt.best_tool(&block(Material::Sand)).unwrap();
        assert_eq!(best.kind, ToolKind::Shovel);
        assert_eq!(belt.best_tool(&block(Material::Log)), None);
        assert_eq!(belt.len(), 3);
    }
}
