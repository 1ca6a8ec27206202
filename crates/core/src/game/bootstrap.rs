//! Starting state construction for a new or restored run.
//! This module exists to isolate mode-specific starting resources from turn flow.
//! It does not own turn advancement once the run has started.

use serde::{Deserialize, Serialize};

use super::*;
use crate::content::{
    BOSS_RUSH_STARTING_GOLD, BOSS_RUSH_STARTING_LEVEL, DAILY_MODIFIER_COUNT, DAILY_MODIFIER_POOL,
    DEFAULT_BOARD_SIZE, GOLD_PER_ACCOUNT_LEVEL,
};
use crate::state::{EffectCounters, Profile};

const STARTING_TILES: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSetup {
    /// `false` builds an empty board for the caller to overlay a restored snapshot.
    pub is_new_run: bool,
    pub hero_class: HeroClass,
    pub mode: GameMode,
    pub seed: Option<u32>,
    pub difficulty: Difficulty,
    pub starting_theme: Option<Biome>,
    pub profile: Profile,
    pub board_size: usize,
}

impl Default for RunSetup {
    fn default() -> Self {
        Self {
            is_new_run: true,
            hero_class: HeroClass::default(),
            mode: GameMode::Rpg,
            seed: None,
            difficulty: Difficulty::default(),
            starting_theme: None,
            profile: Profile::default(),
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl RunSetup {
    pub fn seeded(mode: GameMode, seed: u32) -> Self {
        Self { mode, seed: Some(seed), ..Self::default() }
    }
}

pub fn initialize_game(setup: &RunSetup) -> Result<Game, EngineError> {
    if setup.mode == GameMode::Daily && setup.seed.is_none() {
        return Err(EngineError::MissingDailySeed);
    }
    assert!(setup.board_size > 0, "board size must be positive");

    let mut rng = match setup.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::new(),
    };

    let mut level = 1;
    let mut gold = 0;
    let mut modifiers = Vec::new();
    match setup.mode {
        GameMode::Daily => {
            let mut pool = DAILY_MODIFIER_POOL;
            rng.shuffle(&mut pool);
            modifiers.extend_from_slice(&pool[..DAILY_MODIFIER_COUNT]);
        }
        GameMode::BossRush => {
            level = BOSS_RUSH_STARTING_LEVEL;
            gold = BOSS_RUSH_STARTING_GOLD;
            modifiers.push(DailyModifier::BossRush);
        }
        GameMode::Rpg | GameMode::Classic | GameMode::Versus => {}
    }
    gold += GOLD_PER_ACCOUNT_LEVEL * u64::from(setup.profile.account_level);

    let state = EngineState {
        grid: Grid::new(),
        board_size: setup.board_size,
        mode: setup.mode,
        difficulty: setup.difficulty,
        hero_class: setup.hero_class,
        biome: setup.starting_theme.unwrap_or_default(),
        seed: setup.seed,
        score: 0,
        experience: 0,
        gold,
        level,
        moves: 0,
        bosses_defeated: 0,
        modifiers,
        effects: EffectCounters::default(),
        ability_cooldown: 0,
        skills: setup.profile.skills.clone(),
        last_direction: None,
        game_over: false,
    };

    let mut game = Game::from_parts(state, rng);
    game.log.push(LogEvent::RunStarted { mode: setup.mode, seeded: setup.seed.is_some() });
    if setup.is_new_run {
        for _ in 0..STARTING_TILES {
            game.spawn_with(&SpawnPolicy::plain());
        }
    }
    Ok(game)
}
