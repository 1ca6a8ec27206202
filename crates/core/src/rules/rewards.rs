//! Reward tables shared by move resolution and abilities.

pub const BOSS_ATTACK_MIN_VALUE: u32 = 16;
pub const DAMAGE_PER_TILE_VALUE: u32 = 10;

pub const BOSS_DEFEAT_SCORE: u64 = 1000;
pub const BOSS_DEFEAT_EXPERIENCE: u64 = 2000;
pub const BOSS_DEFEAT_GOLD: u64 = 500;

pub const GOLD_MERGE_MIN_VALUE: u32 = 64;
pub const MILESTONE_VALUE: u32 = 2048;

pub const HITSTOP_BOSS_DAMAGED_MS: u32 = 100;
pub const HITSTOP_BOSS_DEFEATED_MS: u32 = 200;
pub const HITSTOP_MILESTONE_MS: u32 = 300;

/// Reward scaling for the number of merges in one move. Applied once per turn.
pub fn combo_multiplier(combo: u32) -> f64 {
    match combo {
        0..=1 => 1.0,
        2..=4 => 1.5,
        5..=9 => 2.0,
        _ => 3.0,
    }
}

/// Base gold for a freshly merged tile, before multipliers.
pub fn merge_gold(value: u32) -> u64 {
    if value >= GOLD_MERGE_MIN_VALUE { u64::from(value / 2) } else { 0 }
}

pub(crate) fn scale(amount: u64, multiplier: f64) -> u64 {
    (amount as f64 * multiplier).floor() as u64
}
