//! Turn sequencing for one run: resolve, commit, tick counters, spawn, detect game over.
//! This module exists to own the single mutable copy of `EngineState` and its Random Source.
//! It does not own the rule math, which lives in `crate::rules`.

use std::mem;

use crate::content::experience_to_leave_level;
use crate::rng::RandomSource;
use crate::rules::{
    CascadeStep, MAX_CASCADE_STEPS, MoveContext, MoveResult, SpawnPolicy, cascade_step,
    is_game_over, is_stone_locked, resolve_move, spawn_tile,
};
use crate::state::{EngineState, Grid, TileKind};
use crate::types::*;

mod actions;
mod bootstrap;
mod hash;

pub use bootstrap::{RunSetup, initialize_game};

/// What one accepted or rejected move did to the run.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Resolver output. Its grid is the board before the end-of-turn spawn.
    pub outcome: MoveResult,
    pub spawned: Option<TileId>,
    pub level_ups: u32,
    pub game_over: bool,
}

pub struct Game {
    state: EngineState,
    rng: RandomSource,
    log: Vec<LogEvent>,
    /// Next cascade step of the current chain. Only an accepted move starts a chain.
    next_cascade: Option<u32>,
}

impl Game {
    pub(crate) fn from_parts(state: EngineState, rng: RandomSource) -> Self {
        Self { state, rng, log: Vec::new(), next_cascade: None }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn is_seeded(&self) -> bool {
        self.rng.is_seeded()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Replaces the board with a restored snapshot and re-checks the stuck state.
    pub fn restore_grid(&mut self, grid: Grid) {
        grid.occupancy(self.state.board_size);
        self.state.grid = grid;
        self.next_cascade = None;
        self.refresh_game_over();
    }

    fn move_context(&self) -> MoveContext<'_> {
        MoveContext {
            mode: self.state.mode,
            effects: self.state.effects,
            modifiers: &self.state.modifiers,
            difficulty: self.state.difficulty,
            stats: self.state.hero_stats(),
        }
    }

    pub fn apply_move(&mut self, direction: Direction) -> Result<TurnReport, EngineError> {
        if self.state.game_over {
            return Err(EngineError::RunOver);
        }

        let chronos_active = self.state.effects.chronos_turns > 0;
        let outcome = resolve_move(
            self.state.grid.clone(),
            direction,
            self.state.board_size,
            &self.move_context(),
        );
        if !outcome.moved {
            self.next_cascade = None;
            self.log.push(LogEvent::MoveRejected { direction });
            return Ok(TurnReport { outcome, spawned: None, level_ups: 0, game_over: false });
        }

        self.state.grid = outcome.grid.clone();
        self.state.score += outcome.score;
        self.state.experience += outcome.experience;
        self.state.gold += outcome.gold;
        self.state.moves += 1;
        self.state.last_direction = Some(direction);
        self.log.push(LogEvent::MoveResolved {
            direction,
            combo: outcome.combo,
            score: outcome.score,
        });
        self.record_events(&outcome.events);
        if outcome.boss_defeated {
            self.advance_after_boss();
        }
        let level_ups = self.apply_level_ups();

        self.state.effects.tick();
        self.state.ability_cooldown = self.state.ability_cooldown.saturating_sub(1);

        let spawned =
            if chronos_active { None } else { self.spawn_with(&self.state.spawn_policy()) };
        let game_over = self.refresh_game_over();
        self.next_cascade = Some(0);

        Ok(TurnReport { outcome, spawned, level_ups, game_over })
    }

    /// Applies the next step of the chain started by the last accepted move.
    /// Once a step settles, or any other action intervenes, further calls are no-ops
    /// until the next accepted move.
    pub fn cascade(&mut self) -> Result<CascadeStep, EngineError> {
        if self.state.game_over {
            return Err(EngineError::RunOver);
        }
        let (Some(step), Some(direction)) = (self.next_cascade, self.state.last_direction) else {
            return Ok(CascadeStep::settled(self.state.grid.clone()));
        };
        if step >= MAX_CASCADE_STEPS {
            self.next_cascade = None;
            return Ok(CascadeStep::settled(self.state.grid.clone()));
        }

        let result = cascade_step(
            self.state.grid.clone(),
            direction,
            self.state.board_size,
            step,
            &self.move_context(),
        );
        if result.occurred {
            self.state.grid = result.grid.clone();
            self.state.score += result.rewards.score;
            self.state.experience += result.rewards.experience;
            self.state.gold += result.rewards.gold;
            self.log.push(LogEvent::CascadeStep { step, merges: result.merged_ids.len() });
            self.apply_level_ups();
            self.refresh_game_over();
            self.next_cascade = Some(step + 1);
        } else {
            self.next_cascade = None;
        }
        Ok(result)
    }

    /// Forced stone drop from a versus opponent.
    pub(crate) fn receive_stone(&mut self) -> Option<Pos> {
        self.next_cascade = None;
        let id = self.spawn_with(&SpawnPolicy::forced(TileCategory::Stone, None))?;
        let pos = self.state.grid.get(id)?.pos;
        self.log.push(LogEvent::StoneReceived { pos });
        self.refresh_game_over();
        Some(pos)
    }

    fn spawn_with(&mut self, policy: &SpawnPolicy) -> Option<TileId> {
        let grid = mem::take(&mut self.state.grid);
        let outcome =
            spawn_tile(grid, self.state.board_size, self.state.level, policy, &mut self.rng);
        self.state.grid = outcome.grid;

        let id = outcome.spawned?;
        let tile = self.state.grid.get(id)?;
        if outcome.boss_downgraded {
            self.log.push(LogEvent::BossSpawnDowngraded { pos: tile.pos });
        }
        self.log.push(match tile.kind {
            TileKind::Boss(health) => {
                LogEvent::BossSpawned { pos: tile.pos, max_health: health.max_health }
            }
            kind => LogEvent::TileSpawned {
                pos: tile.pos,
                category: kind.category(),
                value: tile.value,
            },
        });
        Some(id)
    }

    fn record_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::BossDamaged { pos, damage, .. } => {
                    self.log.push(LogEvent::BossDamaged { pos, damage });
                }
                GameEvent::BossDefeated { pos } => self.log.push(LogEvent::BossDefeated { pos }),
                GameEvent::Milestone { value } => self.log.push(LogEvent::Milestone { value }),
                GameEvent::Merged { .. } | GameEvent::Combo { .. } => {}
            }
        }
    }

    fn advance_after_boss(&mut self) {
        self.state.bosses_defeated += 1;
        let next = self.state.biome.next();
        if next != self.state.biome {
            self.state.biome = next;
            self.log.push(LogEvent::BiomeAdvanced { biome: next });
        }
    }

    fn apply_level_ups(&mut self) -> u32 {
        let mut gained = 0;
        while self.state.experience >= experience_to_leave_level(self.state.level) {
            self.state.level += 1;
            gained += 1;
            self.log.push(LogEvent::LevelUp { level: self.state.level });
        }
        gained
    }

    fn refresh_game_over(&mut self) -> bool {
        let (grid, board_size) = (&self.state.grid, self.state.board_size);
        let over = is_game_over(grid, board_size)
            || is_stone_locked(grid, board_size, &self.move_context());
        if over && !self.state.game_over {
            self.log.push(LogEvent::GameOver { score: self.state.score });
        }
        self.state.game_over = over;
        over
    }
}
