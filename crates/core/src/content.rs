use crate::state::HeroStats;
use crate::types::{Ability, Biome, DailyModifier, Difficulty, HeroClass, RuneKind};

pub const DEFAULT_BOARD_SIZE: usize = 4;

pub const DAILY_MODIFIER_POOL: [DailyModifier; 6] = [
    DailyModifier::BossRush,
    DailyModifier::Chaos,
    DailyModifier::Ironclad,
    DailyModifier::GoldenAge,
    DailyModifier::Scholar,
    DailyModifier::Famine,
];
pub const DAILY_MODIFIER_COUNT: usize = 2;

pub const BOSS_RUSH_STARTING_LEVEL: u32 = 5;
pub const BOSS_RUSH_STARTING_GOLD: u64 = 500;
pub const GOLD_PER_ACCOUNT_LEVEL: u64 = 10;

pub const SMITE_DAMAGE_PER_LEVEL: u32 = 50;

pub struct HeroProfile {
    pub name: &'static str,
    pub stats: HeroStats,
    pub ability: Ability,
    pub ability_cooldown: u32,
}

pub fn hero_profile(class: HeroClass) -> HeroProfile {
    let base = HeroStats::default();
    match class {
        HeroClass::Adventurer => HeroProfile {
            name: "Adventurer",
            stats: base,
            ability: Ability::Reroll,
            ability_cooldown: 25,
        },
        HeroClass::Warrior => HeroProfile {
            name: "Warrior",
            stats: HeroStats { damage_multiplier: 1.25, ..base },
            ability: Ability::Smite,
            ability_cooldown: 30,
        },
        HeroClass::Rogue => HeroProfile {
            name: "Rogue",
            stats: HeroStats { gold_multiplier: 1.25, ..base },
            ability: Ability::Reroll,
            ability_cooldown: 20,
        },
        HeroClass::Mage => HeroProfile {
            name: "Mage",
            stats: HeroStats { experience_multiplier: 1.2, rune_bonus: 0.01, ..base },
            ability: Ability::Smite,
            ability_cooldown: 35,
        },
    }
}

pub fn biome_base_boss_health(biome: Biome) -> f64 {
    match biome {
        Biome::Dungeon => 500.0,
        Biome::Forest => 900.0,
        Biome::Volcano => 1500.0,
        Biome::Abyss => 2500.0,
    }
}

pub fn difficulty_boss_health_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.75,
        Difficulty::Normal => 1.0,
        Difficulty::Hard => 1.5,
    }
}

pub fn difficulty_experience_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.8,
        Difficulty::Normal => 1.0,
        Difficulty::Hard => 1.25,
    }
}

pub fn rune_duration(kind: RuneKind) -> u32 {
    match kind {
        RuneKind::Midas => 5,
        RuneKind::Chronos => 3,
        RuneKind::Void => 5,
    }
}

/// Total experience needed to leave `level`.
pub fn experience_to_leave_level(level: u32) -> u64 {
    250 * u64::from(level) * u64::from(level)
}
