use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::content::hero_profile;
use crate::rules::SpawnPolicy;
use crate::types::*;

const PROSPECTOR_GOLD_FACTOR: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BossHealth {
    pub health: u32,
    pub max_health: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Normal,
    Boss(BossHealth),
    Rune(RuneKind),
    Stone,
}

impl TileKind {
    pub fn category(self) -> TileCategory {
        match self {
            TileKind::Normal => TileCategory::Normal,
            TileKind::Boss(_) => TileCategory::Boss,
            TileKind::Rune(kind) => TileCategory::Rune(kind),
            TileKind::Stone => TileCategory::Stone,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub pos: Pos,
    /// Zero for bosses, runes and stones.
    pub value: u32,
    pub kind: TileKind,
}

impl Tile {
    pub fn is_normal(&self) -> bool {
        self.kind == TileKind::Normal
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, TileKind::Boss(_))
    }
}

/// The set of tiles on one square board. Ids come from the slot map, so an id
/// removed by a merge or a kill is never handed out again by the same grid.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Grid {
    tiles: SlotMap<TileId, Tile>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pos: Pos, value: u32, kind: TileKind) -> TileId {
        self.tiles.insert_with_key(|id| Tile { id, pos, value, kind })
    }

    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        self.tiles.remove(id)
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id)
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.pos == pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn live_boss(&self) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.is_boss())
    }

    pub fn total_value(&self) -> u64 {
        self.tiles.values().map(|tile| u64::from(tile.value)).sum()
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.values().map(|tile| tile.value).max().unwrap_or(0)
    }

    /// Row-major cell lookup. Panics if a tile sits off the board or two tiles
    /// share a cell: both are caller invariant violations.
    pub fn occupancy(&self, board_size: usize) -> Vec<Option<TileId>> {
        assert!(board_size > 0, "board size must be positive");
        let mut cells = vec![None; board_size * board_size];
        for (id, tile) in &self.tiles {
            assert!(
                tile.pos.in_bounds(board_size),
                "tile at {:?} lies outside a {board_size}x{board_size} board",
                tile.pos
            );
            let slot = &mut cells[tile.pos.index(board_size)];
            assert!(slot.is_none(), "two tiles share cell {:?}", tile.pos);
            *slot = Some(id);
        }
        cells
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self, board_size: usize) -> Vec<Pos> {
        let cells = self.occupancy(board_size);
        let mut empty = Vec::with_capacity(cells.len() - self.len());
        for y in 0..board_size {
            for x in 0..board_size {
                if cells[y * board_size + x].is_none() {
                    empty.push(Pos { y: y as i32, x: x as i32 });
                }
            }
        }
        empty
    }

    /// Tiles sorted by position, for stable comparisons and hashing.
    pub fn tiles_by_position(&self) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().collect();
        tiles.sort_by_key(|tile| tile.pos);
        tiles
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.tiles.len() == other.tiles.len()
            && self.tiles.iter().all(|(id, tile)| other.tiles.get(id) == Some(tile))
    }
}

impl Eq for Grid {}

/// Turns left on each rune effect. Zero means inactive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectCounters {
    pub midas_turns: u32,
    pub chronos_turns: u32,
    pub void_turns: u32,
}

impl EffectCounters {
    pub fn arm(&mut self, kind: RuneKind, turns: u32) {
        let counter = match kind {
            RuneKind::Midas => &mut self.midas_turns,
            RuneKind::Chronos => &mut self.chronos_turns,
            RuneKind::Void => &mut self.void_turns,
        };
        *counter = (*counter).max(turns);
    }

    pub fn tick(&mut self) {
        self.midas_turns = self.midas_turns.saturating_sub(1);
        self.chronos_turns = self.chronos_turns.saturating_sub(1);
        self.void_turns = self.void_turns.saturating_sub(1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    pub damage_multiplier: f64,
    pub gold_multiplier: f64,
    pub experience_multiplier: f64,
    pub rune_bonus: f64,
}

impl Default for HeroStats {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            gold_multiplier: 1.0,
            experience_multiplier: 1.0,
            rune_bonus: 0.0,
        }
    }
}

/// Persisted meta-progression the engine reads but never writes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub account_level: u32,
    pub skills: Vec<PassiveSkill>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub grid: Grid,
    pub board_size: usize,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub hero_class: HeroClass,
    pub biome: Biome,
    pub seed: Option<u32>,
    pub score: u64,
    pub experience: u64,
    pub gold: u64,
    pub level: u32,
    pub moves: u64,
    pub bosses_defeated: u32,
    pub modifiers: Vec<DailyModifier>,
    pub effects: EffectCounters,
    pub ability_cooldown: u32,
    pub skills: Vec<PassiveSkill>,
    pub last_direction: Option<Direction>,
    pub game_over: bool,
}

impl EngineState {
    pub fn has_modifier(&self, modifier: DailyModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Class stats with passive skills folded in.
    pub fn hero_stats(&self) -> HeroStats {
        let mut stats = hero_profile(self.hero_class).stats;
        if self.skills.contains(&PassiveSkill::Prospector) {
            stats.gold_multiplier *= PROSPECTOR_GOLD_FACTOR;
        }
        stats
    }

    /// Policy for the ordinary end-of-turn spawn.
    pub fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            specials_enabled: self.mode.has_rpg_layer(),
            rune_bonus: self.hero_stats().rune_bonus,
            modifiers: self.modifiers.clone(),
            difficulty: self.difficulty,
            skills: self.skills.clone(),
            biome: self.biome,
            boss_scale_level: self.bosses_defeated,
            ..SpawnPolicy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_ids_are_not_reissued() {
        let mut grid = Grid::new();
        let first = grid.insert(Pos { y: 0, x: 0 }, 2, TileKind::Normal);
        grid.remove(first);
        let second = grid.insert(Pos { y: 0, x: 0 }, 2, TileKind::Normal);
        assert_ne!(first, second);
        assert!(grid.get(first).is_none());
    }

    #[test]
    fn empty_cells_are_listed_row_major() {
        let mut grid = Grid::new();
        grid.insert(Pos { y: 0, x: 1 }, 2, TileKind::Normal);
        grid.insert(Pos { y: 1, x: 0 }, 4, TileKind::Normal);
        let empty = grid.empty_cells(2);
        assert_eq!(empty, vec![Pos { y: 0, x: 0 }, Pos { y: 1, x: 1 }]);
    }

    #[test]
    #[should_panic(expected = "two tiles share cell")]
    fn duplicate_positions_fail_fast() {
        let mut grid = Grid::new();
        grid.insert(Pos { y: 1, x: 1 }, 2, TileKind::Normal);
        grid.insert(Pos { y: 1, x: 1 }, 4, TileKind::Normal);
        grid.occupancy(4);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn off_board_tiles_fail_fast() {
        let mut grid = Grid::new();
        grid.insert(Pos { y: 0, x: 4 }, 2, TileKind::Normal);
        grid.occupancy(4);
    }

    fn state_for(mode: GameMode) -> EngineState {
        EngineState {
            grid: Grid::new(),
            board_size: 4,
            mode,
            difficulty: Difficulty::Hard,
            hero_class: HeroClass::Rogue,
            biome: Biome::Forest,
            seed: None,
            score: 0,
            experience: 0,
            gold: 0,
            level: 1,
            moves: 0,
            bosses_defeated: 2,
            modifiers: vec![DailyModifier::Chaos],
            effects: EffectCounters::default(),
            ability_cooldown: 0,
            skills: vec![PassiveSkill::Prospector],
            last_direction: None,
            game_over: false,
        }
    }

    #[test]
    fn spawn_policy_mirrors_the_run() {
        let policy = state_for(GameMode::Daily).spawn_policy();
        assert!(policy.specials_enabled);
        assert_eq!(policy.boss_scale_level, 2);
        assert_eq!(policy.biome, Biome::Forest);
        assert_eq!(policy.modifiers, vec![DailyModifier::Chaos]);
        assert_eq!(policy.forced_category, None);

        assert!(!state_for(GameMode::Classic).spawn_policy().specials_enabled);
        assert!(!state_for(GameMode::Versus).spawn_policy().specials_enabled);
    }

    #[test]
    fn prospector_boosts_class_gold() {
        let stats = state_for(GameMode::Rpg).hero_stats();
        assert!((stats.gold_multiplier - 1.25 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn effect_counters_tick_down_and_keep_the_longer_arm() {
        let mut effects = EffectCounters::default();
        effects.arm(RuneKind::Midas, 5);
        effects.arm(RuneKind::Midas, 2);
        effects.arm(RuneKind::Void, 1);
        effects.tick();
        assert_eq!(effects.midas_turns, 4);
        assert_eq!(effects.void_turns, 0);
        effects.tick();
        assert_eq!(effects.chronos_turns, 0);
    }
}
