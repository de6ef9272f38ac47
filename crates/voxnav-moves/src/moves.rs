//! Transitions of a two-cell-tall agent through voxel terrain.
//!
//! From a feet cell `o` the agent can walk level, step up one block, drop down
//! a few blocks, dig straight down or pillar straight up, in each case
//! breaking what is in the way and placing scaffolding where the ground is
//! missing. Every transition lists those terrain actions along with its cost.

use log::trace;
use voxnav_core::{Block, CARDINALS, Material, Move, Placement, Pos, World};
use voxnav_paths::CostModel;

use crate::config::{MoveConfig, MoveConfigError};
use crate::tool::{BareHands, ToolSelector, dig_time_ms};

/// Movement model over a [`World`].
#[derive(Debug, Clone)]
pub struct Moves<W, T = BareHands> {
    world: W,
    tools: T,
    config: MoveConfig,
}

// Cost and actions accumulated while evaluating one transition.
struct Plan {
    cost: f64,
    to_break: Vec<Pos>,
    to_place: Vec<Placement>,
}

impl Plan {
    fn new(base: f64) -> Self {
        Self {
            cost: base,
            to_break: Vec::new(),
            to_place: Vec::new(),
        }
    }

    fn place(&mut self, placement: Placement, cost: f64) {
        self.to_place.push(placement);
        self.cost += cost;
    }

    fn finish(self, from: &Move, pos: Pos) -> Option<Move> {
        let remaining = from
            .remaining_blocks
            .checked_sub(self.to_place.len() as u32)?;
        if !self.cost.is_finite() {
            return None;
        }
        Some(Move {
            pos,
            remaining_blocks: remaining,
            cost: self.cost,
            to_break: self.to_break,
            to_place: self.to_place,
        })
    }
}

impl<W: World> Moves<W, BareHands> {
    /// A movement model that digs by hand.
    pub fn new(world: W, config: MoveConfig) -> Result<Self, MoveConfigError> {
        Self::with_tools(world, BareHands, config)
    }
}

impl<W: World, T: ToolSelector> Moves<W, T> {
    pub fn with_tools(world: W, tools: T, config: MoveConfig) -> Result<Self, MoveConfigError> {
        config.validate()?;
        Ok(Self {
            world,
            tools,
            config,
        })
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    pub fn config(&self) -> &MoveConfig {
        &self.config
    }

    #[inline]
    fn block(&self, p: Pos) -> Block {
        self.world.block_at(p)
    }

    fn can_break(&self, b: &Block) -> bool {
        self.config.can_dig && !b.is_liquid() && b.hardness().is_some()
    }

    /// Cost of digging `block` with the best available tool.
    pub fn destroy_cost(&self, block: &Block) -> f64 {
        let tool = self.tools.best_tool(block);
        let ms = dig_time_ms(block, tool.as_ref());
        (1.0 + 3.0 * ms / 1000.0) * self.config.break_cost
    }

    // Make `p` occupiable, breaking it if needed. `None` if it can't be broken.
    fn clear(&self, plan: &mut Plan, p: Pos) -> Option<()> {
        let b = self.block(p);
        if b.is_safe() {
            return Some(());
        }
        if !self.can_break(&b) {
            return None;
        }
        plan.cost += self.destroy_cost(&b);
        plan.to_break.push(p);
        Some(())
    }

    // Empty a non-physical cell so a block can be placed in it.
    fn make_room(&self, plan: &mut Plan, b: &Block) -> Option<()> {
        if b.is_empty() {
            return Some(());
        }
        if !self.can_break(b) {
            return None;
        }
        plan.to_break.push(b.pos);
        Some(())
    }

    /// Feet cell after falling from `from` into the column at `from + dir`.
    ///
    /// Scans down from two cells below the column's top for the first
    /// physical block at or above the world floor. `None` if that block is
    /// more than `max_drop_down` below `from`, or the column is unloaded.
    pub fn landing_block(&self, from: Pos, dir: Pos) -> Option<Pos> {
        let max_drop = i64::from(self.config.max_drop_down);
        let floor = self.world.min_y();
        let mut p = (from + dir).down(2);
        while p.y >= floor {
            if i64::from(from.y) - i64::from(p.y) > max_drop {
                return None;
            }
            let b = self.block(p);
            if b.is_physical() {
                return Some(p.up(1));
            }
            if b.material == Material::Unloaded {
                return None;
            }
            p = p.down(1);
        }
        None
    }

    fn move_forward(&self, from: &Move, dir: Pos) -> Option<Move> {
        let o = from.pos;
        let dest = o + dir;
        let mut plan = Plan::new(1.0);

        let floor = self.block(dest.down(1));
        if !floor.is_physical() && !self.block(dest).is_liquid() {
            self.make_room(&mut plan, &floor)?;
            plan.place(Placement::new(o.down(1), dir), self.config.put_cost);
        }
        self.clear(&mut plan, dest.up(1))?;
        self.clear(&mut plan, dest)?;
        if self.block(o).is_liquid() {
            plan.cost += self.config.water_cost;
        }
        plan.finish(from, dest)
    }

    fn move_jump_up(&self, from: &Move, dir: Pos) -> Option<Move> {
        let o = from.pos;
        let step = o + dir;
        let dest = step.up(1);
        let mut plan = Plan::new(2.0);

        let arrival_floor = self.block(step);
        if !arrival_floor.is_physical() {
            let below = self.block(step.down(1));
            if !below.is_physical() {
                self.make_room(&mut plan, &below)?;
                plan.place(
                    Placement::new(o.down(1), dir).with_return_pos(o),
                    self.config.put_cost,
                );
            }
            self.make_room(&mut plan, &arrival_floor)?;
            plan.place(Placement::new(step.down(1), Pos::UP), self.config.put_cost);
        }
        self.clear(&mut plan, o.up(2))?;
        self.clear(&mut plan, dest.up(1))?;
        self.clear(&mut plan, dest)?;
        plan.finish(from, dest)
    }

    fn move_drop_down(&self, from: &Move, dir: Pos) -> Option<Move> {
        let o = from.pos;
        let edge = o + dir;
        let landing = self.landing_block(o, dir)?;
        // don't go underwater
        if self.block(edge).is_liquid() || self.block(landing).is_liquid() {
            return None;
        }

        let mut plan = Plan::new(1.0);
        self.clear(&mut plan, edge.up(1))?;
        self.clear(&mut plan, edge)?;
        self.clear(&mut plan, edge.down(1))?;
        plan.finish(from, landing)
    }

    fn move_down(&self, from: &Move) -> Option<Move> {
        let o = from.pos;
        if self.block(o).is_liquid() {
            return None;
        }
        let landing = self.landing_block(o, Pos::ZERO)?;
        if self.block(landing).is_liquid() {
            return None;
        }

        let mut plan = Plan::new(1.0);
        self.clear(&mut plan, o.down(1))?;
        if plan.cost > self.config.max_clear_cost {
            return None;
        }
        plan.finish(from, landing)
    }

    fn move_up(&self, from: &Move) -> Option<Move> {
        let o = from.pos;
        let feet = self.block(o);
        if feet.is_liquid() {
            return None;
        }

        let mut plan = Plan::new(1.0);
        self.clear(&mut plan, o.up(2))?;
        if !feet.is_replaceable() {
            if !self.can_break(&feet) {
                return None;
            }
            plan.to_break.push(o);
        }
        plan.place(
            Placement::new(o.down(1), Pos::UP).jumping(),
            self.config.put_cost,
        );
        plan.finish(from, o.up(1))
    }
}

fn offer(buf: &mut Vec<Move>, kind: &str, from: Pos, mv: Option<Move>) {
    match mv {
        Some(mv) => buf.push(mv),
        None => trace!("[Moves] {kind} from {from} rejected"),
    }
}

impl<W: World, T: ToolSelector> CostModel for Moves<W, T> {
    fn neighbors(&self, from: &Move, buf: &mut Vec<Move>) {
        let o = from.pos;
        for dir in CARDINALS {
            offer(buf, "forward", o, self.move_forward(from, dir));
            offer(buf, "jump up", o, self.move_jump_up(from, dir));
            offer(buf, "drop down", o, self.move_drop_down(from, dir));
        }
        offer(buf, "down", o, self.move_down(from));
        offer(buf, "up", o, self.move_up(from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{Tool, Toolbelt};
    use voxnav_core::{Bounds, ToolKind, VoxelGrid};

    fn grid(slices: &[&str]) -> VoxelGrid {
        VoxelGrid::from_layers(slices).unwrap()
    }

    fn moves(world: &VoxelGrid) -> Moves<&VoxelGrid> {
        Moves::new(world, MoveConfig::default()).unwrap()
    }

    fn neighbors<M: CostModel>(m: &M, pos: Pos, blocks: u32) -> Vec<Move> {
        let mut buf = Vec::new();
        m.neighbors(&Move::start(pos, blocks), &mut buf);
        buf
    }

    fn find(buf: &[Move], pos: Pos) -> Option<&Move> {
        buf.iter().find(|m| m.pos == pos)
    }

    const PLAIN: [&str; 4] = ["###\n###\n###", "...\n...\n...", "...\n...\n...", "...\n...\n..."];

    #[test]
    fn flat_ground_without_blocks() {
        let w = grid(&PLAIN);
        let buf = neighbors(&moves(&w), Pos::new(1, 1, 1), 0);
        let mut got: Vec<Pos> = buf.iter().map(|m| m.pos).collect();
        got.sort();
        let mut want = Pos::new(1, 1, 1).neighbors_4().to_vec();
        want.sort();
        assert_eq!(got, want);
        assert!(buf.iter().all(|m| m.cost == 1.0 && !m.has_actions()));
    }

    #[test]
    fn directions_are_in_cardinal_order() {
        let w = grid(&PLAIN);
        let buf = neighbors(&moves(&w), Pos::new(1, 1, 1), 0);
        let order: Vec<Pos> = buf.iter().map(|m| m.pos - Pos::new(1, 1, 1)).collect();
        assert_eq!(order, CARDINALS.to_vec());
    }

    #[test]
    fn bridging_a_gap_places_support() {
        let w = grid(&["#.#", "...", "...", "..."]);
        let m = moves(&w);
        let buf = neighbors(&m, Pos::new(0, 1, 0), 5);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        assert_eq!(mv.cost, 2.0);
        assert_eq!(mv.remaining_blocks, 4);
        assert_eq!(mv.to_place, vec![Placement::new(Pos::new(0, 0, 0), Pos::new(1, 0, 0))]);
        assert_eq!(mv.to_place[0].target(), Pos::new(1, 0, 0));

        // no blocks left, no bridge
        let buf = neighbors(&m, Pos::new(0, 1, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());
    }

    #[test]
    fn walking_into_a_wall_breaks_head_and_feet() {
        let w = grid(&["###", ".#.", ".#.", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        assert_eq!(mv.to_break, vec![Pos::new(1, 2, 0), Pos::new(1, 1, 0)]);
        // stone by hand: 1 + 3 * 7.5 per block
        assert_eq!(mv.cost, 1.0 + 2.0 * 23.5);

        let no_dig = Moves::new(&w, MoveConfig::default().with_can_dig(false)).unwrap();
        let buf = neighbors(&no_dig, Pos::new(0, 1, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());
    }

    #[test]
    fn tools_make_digging_cheaper() {
        let w = grid(&["###", ".#.", ".#.", "..."]);
        let belt = Toolbelt::new(vec![Tool::new(ToolKind::Pickaxe, 6.0)]);
        let m = Moves::with_tools(&w, belt, MoveConfig::default()).unwrap();
        let buf = neighbors(&m, Pos::new(0, 1, 0), 0);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        // 1.5 * 1500 / 6 = 375 ms per block
        assert_eq!(mv.cost, 1.0 + 2.0 * (1.0 + 3.0 * 0.375));
    }

    #[test]
    fn step_up_onto_a_block() {
        let w = grid(&["##", ".#", "..", "..", ".."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        let mv = find(&buf, Pos::new(1, 2, 0)).unwrap();
        assert_eq!(mv.cost, 2.0);
        assert!(!mv.has_actions());
    }

    #[test]
    fn step_up_over_nothing_needs_two_blocks() {
        let w = grid(&["#.", "..", "..", ".."]);
        let m = moves(&w);
        let buf = neighbors(&m, Pos::new(0, 1, 0), 5);
        let mv = find(&buf, Pos::new(1, 2, 0)).unwrap();
        assert_eq!(mv.cost, 4.0);
        assert_eq!(mv.remaining_blocks, 3);
        assert_eq!(
            mv.to_place,
            vec![
                Placement::new(Pos::new(0, 0, 0), Pos::new(1, 0, 0)).with_return_pos(Pos::new(0, 1, 0)),
                Placement::new(Pos::new(1, 0, 0), Pos::UP),
            ]
        );

        let buf = neighbors(&m, Pos::new(0, 1, 0), 1);
        assert!(find(&buf, Pos::new(1, 2, 0)).is_none());
    }

    #[test]
    fn drop_down_lands_on_first_ground() {
        let w = grid(&["##", "#.", "#.", "..", ".."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 3, 0), 0);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        assert_eq!(mv.cost, 1.0);
        assert!(!mv.has_actions());

        let short = Moves::new(&w, MoveConfig::default().with_max_drop_down(2)).unwrap();
        let buf = neighbors(&short, Pos::new(0, 3, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());
    }

    #[test]
    fn drop_into_water_rejected() {
        let w = grid(&["##", "#~", "#.", "..", ".."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 3, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());
        assert!(find(&buf, Pos::new(1, 2, 0)).is_none());
    }

    #[test]
    fn landing_scan() {
        let w = grid(&["##", "#.", "#.", "..", ".."]);
        let m = moves(&w);
        assert_eq!(m.landing_block(Pos::new(0, 3, 0), Pos::new(1, 0, 0)), Some(Pos::new(1, 1, 0)));
        // below the world floor there is nothing to land on
        assert_eq!(m.landing_block(Pos::new(0, 1, 0), Pos::new(1, 0, 0)), None);
        // unloaded column
        assert_eq!(m.landing_block(Pos::new(1, 3, 0), Pos::new(1, 0, 0)), None);
    }

    #[test]
    fn dig_straight_down() {
        let w = grid(&["#", "d", ".", ".", "."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 2, 0), 0);
        let mv = find(&buf, Pos::new(0, 1, 0)).unwrap();
        assert_eq!(mv.to_break, vec![Pos::new(0, 1, 0)]);
        assert_eq!(mv.cost, 1.0 + 1.0 + 3.0 * 0.75);

        let cheap = Moves::new(&w, MoveConfig::default().with_max_clear_cost(4.0)).unwrap();
        let buf = neighbors(&cheap, Pos::new(0, 2, 0), 0);
        assert!(find(&buf, Pos::new(0, 1, 0)).is_none());
    }

    #[test]
    fn obsidian_is_too_costly_to_dig_down() {
        let w = grid(&["#", "O", ".", ".", "."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 2, 0), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn pillar_up() {
        let w = grid(&PLAIN);
        let buf = neighbors(&moves(&w), Pos::new(1, 1, 1), 1);
        let mv = find(&buf, Pos::new(1, 2, 1)).unwrap();
        assert_eq!(mv.cost, 2.0);
        assert_eq!(mv.remaining_blocks, 0);
        assert_eq!(mv.to_place, vec![Placement::new(Pos::new(1, 0, 1), Pos::UP).jumping()]);
    }

    #[test]
    fn no_pillar_in_water() {
        let w = grid(&["###", "~~~", "...", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(1, 1, 0), 3);
        assert!(find(&buf, Pos::new(1, 2, 0)).is_none());
    }

    #[test]
    fn leaving_water_costs_extra() {
        let w = grid(&["###", "~..", "...", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        assert_eq!(mv.cost, 2.0);
    }

    #[test]
    fn lava_and_bedrock_block_the_way() {
        let w = grid(&["###", ".L.", ".L.", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());

        let w = grid(&["###", ".B.", ".B.", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        assert!(find(&buf, Pos::new(1, 1, 0)).is_none());
    }

    #[test]
    fn fire_is_cleared() {
        let w = grid(&["###", ".^.", "...", "..."]);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 0);
        let mv = find(&buf, Pos::new(1, 1, 0)).unwrap();
        assert_eq!(mv.to_break, vec![Pos::new(1, 1, 0)]);
        assert_eq!(mv.cost, 2.0);
    }

    #[test]
    fn unloaded_edges_are_walls() {
        let w = grid(&PLAIN);
        let buf = neighbors(&moves(&w), Pos::new(0, 1, 0), 10);
        assert!(buf.iter().all(|m| w.bounds().contains(m.pos)));
    }

    #[test]
    fn never_spends_missing_blocks() {
        let mut w = VoxelGrid::new(Bounds::sized(5, 6, 5));
        w.fill(Bounds::new(Pos::new(0, 0, 0), Pos::new(5, 1, 5)), Material::Stone);
        w.set(Pos::new(2, 0, 1), Material::Air);
        let m = moves(&w);
        for blocks in 0..3 {
            for mv in neighbors(&m, Pos::new(2, 1, 2), blocks) {
                assert_eq!(mv.remaining_blocks as usize + mv.to_place.len(), blocks as usize);
                assert!(mv.cost.is_finite() && mv.cost >= 1.0);
            }
        }
    }
}
