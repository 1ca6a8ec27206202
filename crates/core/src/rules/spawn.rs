//! Weighted placement of one new tile into a random empty cell.
//! This module owns the single-boss policy: a boss roll that would create a second live
//! boss is downgraded to a plain `2` tile and reported through `SpawnOutcome`.
//! It does not decide when spawns happen; the turn sequencer does.

use crate::content::{biome_base_boss_health, difficulty_boss_health_multiplier};
use crate::rng::RandomSource;
use crate::state::{BossHealth, Grid, TileKind};
use crate::types::*;

const TWO_PROBABILITY: f64 = 0.9;
const BOSS_MIN_LEVEL: u32 = 4;
const BOSS_CHANCE: f64 = 0.002;
const BOSS_RUSH_CHANCE: f64 = 0.05;
const BASE_RUNE_CHANCE: f64 = 0.01;
const CHAOS_RUNE_FACTOR: f64 = 3.0;
const RUNE_SEEKER_FACTOR: f64 = 1.2;
const MIDAS_SHARE: f64 = 0.4;
const CHRONOS_SHARE: f64 = 0.3;
const BOSS_HEALTH_GROWTH: f64 = 1.55;
const IRONCLAD_HEALTH_FACTOR: f64 = 1.5;
const BULWARK_HEALTH_FACTOR: f64 = 0.9;

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPolicy {
    pub forced_value: Option<u32>,
    pub forced_category: Option<TileCategory>,
    /// Off for classic and versus play.
    pub specials_enabled: bool,
    pub rune_bonus: f64,
    pub modifiers: Vec<DailyModifier>,
    pub difficulty: Difficulty,
    pub skills: Vec<PassiveSkill>,
    pub biome: Biome,
    pub boss_scale_level: u32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            forced_value: None,
            forced_category: None,
            specials_enabled: true,
            rune_bonus: 0.0,
            modifiers: Vec::new(),
            difficulty: Difficulty::Normal,
            skills: Vec::new(),
            biome: Biome::Dungeon,
            boss_scale_level: 0,
        }
    }
}

impl SpawnPolicy {
    /// Only `2`/`4` tiles; used for starting boards and rerolls.
    pub fn plain() -> Self {
        Self { specials_enabled: false, ..Self::default() }
    }

    pub fn forced(category: TileCategory, value: Option<u32>) -> Self {
        Self { forced_category: Some(category), forced_value: value, ..Self::plain() }
    }

    fn has_modifier(&self, modifier: DailyModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    fn has_skill(&self, skill: PassiveSkill) -> bool {
        self.skills.contains(&skill)
    }

    fn is_forced(&self) -> bool {
        self.forced_value.is_some() || self.forced_category.is_some()
    }

    fn boss_chance(&self, level: u32) -> Option<f64> {
        let boss_rush = self.has_modifier(DailyModifier::BossRush);
        if !boss_rush && level < BOSS_MIN_LEVEL {
            return None;
        }
        Some(if boss_rush { BOSS_RUSH_CHANCE } else { BOSS_CHANCE })
    }

    fn rune_chance(&self) -> f64 {
        let mut chance = BASE_RUNE_CHANCE + self.rune_bonus;
        if self.has_modifier(DailyModifier::Chaos) {
            chance *= CHAOS_RUNE_FACTOR;
        }
        if self.has_skill(PassiveSkill::RuneSeeker) {
            chance *= RUNE_SEEKER_FACTOR;
        }
        chance
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnOutcome {
    pub grid: Grid,
    /// `None` when the board was full.
    pub spawned: Option<TileId>,
    /// A boss was requested while another boss was alive.
    pub boss_downgraded: bool,
}

pub fn boss_max_health(policy: &SpawnPolicy) -> u32 {
    let mut health = biome_base_boss_health(policy.biome)
        * BOSS_HEALTH_GROWTH.powi(policy.boss_scale_level as i32);
    health *= difficulty_boss_health_multiplier(policy.difficulty);
    if policy.has_modifier(DailyModifier::Ironclad) {
        health *= IRONCLAD_HEALTH_FACTOR;
    }
    if policy.has_skill(PassiveSkill::Bulwark) {
        health *= BULWARK_HEALTH_FACTOR;
    }
    (health.floor() as u32).max(1)
}

pub fn spawn_tile(
    grid: Grid,
    board_size: usize,
    level: u32,
    policy: &SpawnPolicy,
    rng: &mut RandomSource,
) -> SpawnOutcome {
    let mut grid = grid;
    let empty = grid.empty_cells(board_size);
    if empty.is_empty() {
        return SpawnOutcome { grid, spawned: None, boss_downgraded: false };
    }

    let pos = empty[rng.index(empty.len())];
    let mut value = match policy.forced_value {
        Some(value) => value,
        None if rng.next_f64() < TWO_PROBABILITY => 2,
        None => 4,
    };

    let rolls_specials = policy.specials_enabled && !policy.is_forced();
    let mut category = policy.forced_category.unwrap_or(TileCategory::Normal);
    if rolls_specials
        && let Some(chance) = policy.boss_chance(level)
        && rng.next_f64() < chance
    {
        category = TileCategory::Boss;
    }

    let mut boss_downgraded = false;
    if category == TileCategory::Boss && grid.live_boss().is_some() {
        category = TileCategory::Normal;
        value = 2;
        boss_downgraded = true;
    }

    if rolls_specials
        && category == TileCategory::Normal
        && !boss_downgraded
        && rng.next_f64() < policy.rune_chance()
    {
        category = TileCategory::Rune(pick_rune_kind(rng));
    }

    let (value, kind) = match category {
        TileCategory::Normal => (value, TileKind::Normal),
        TileCategory::Boss => {
            let max_health = boss_max_health(policy);
            (0, TileKind::Boss(BossHealth { health: max_health, max_health }))
        }
        TileCategory::Rune(rune) => (0, TileKind::Rune(rune)),
        TileCategory::Stone => (0, TileKind::Stone),
    };
    let spawned = grid.insert(pos, value, kind);
    SpawnOutcome { grid, spawned: Some(spawned), boss_downgraded }
}

fn pick_rune_kind(rng: &mut RandomSource) -> RuneKind {
    let roll = rng.next_f64();
    if roll < MIDAS_SHARE {
        RuneKind::Midas
    } else if roll < MIDAS_SHARE + CHRONOS_SHARE {
        RuneKind::Chronos
    } else {
        RuneKind::Void
    }
}
