//! Player actions outside the slide loop: rune activation and hero abilities.
//! Neither action counts as a turn, so effect counters do not tick and nothing spawns
//! unless the ability itself says so.

use super::*;
use crate::content::{SMITE_DAMAGE_PER_LEVEL, hero_profile, rune_duration};
use crate::rules::rewards;
use crate::state::BossHealth;

const REROLL_TILES: usize = 2;

impl Game {
    /// Consumes the rune at `pos` and arms its effect counter.
    pub fn activate_rune(&mut self, pos: Pos) -> Result<RuneKind, EngineError> {
        if self.state.game_over {
            return Err(EngineError::RunOver);
        }
        let Some((id, kind)) = self.state.grid.tile_at(pos).and_then(|tile| match tile.kind {
            TileKind::Rune(kind) => Some((tile.id, kind)),
            _ => None,
        }) else {
            return Err(EngineError::NoRuneAt(pos));
        };

        self.state.grid.remove(id);
        self.next_cascade = None;
        self.state.effects.arm(kind, rune_duration(kind));
        self.log.push(LogEvent::RuneActivated { kind, pos });
        Ok(kind)
    }

    pub fn use_ability(&mut self) -> Result<Ability, EngineError> {
        if self.state.game_over {
            return Err(EngineError::RunOver);
        }
        if self.state.ability_cooldown > 0 {
            return Err(EngineError::AbilityOnCooldown { remaining: self.state.ability_cooldown });
        }

        let profile = hero_profile(self.state.hero_class);
        match profile.ability {
            Ability::Reroll => self.reroll(),
            Ability::Smite => self.smite()?,
        }

        self.next_cascade = None;
        self.state.ability_cooldown = profile.ability_cooldown;
        self.log.push(LogEvent::AbilityUsed { ability: profile.ability });
        self.refresh_game_over();
        Ok(profile.ability)
    }

    fn reroll(&mut self) {
        self.state.grid.clear();
        for _ in 0..REROLL_TILES {
            self.spawn_with(&SpawnPolicy::plain());
        }
    }

    fn smite(&mut self) -> Result<(), EngineError> {
        let Some((id, pos, health)) =
            self.state.grid.live_boss().and_then(|boss| match boss.kind {
                TileKind::Boss(health) => Some((boss.id, boss.pos, health)),
                _ => None,
            })
        else {
            return Err(EngineError::NoAbilityTarget);
        };

        let damage = SMITE_DAMAGE_PER_LEVEL.saturating_mul(self.state.level);
        let remaining = health.health.saturating_sub(damage);
        self.log.push(LogEvent::BossDamaged { pos, damage });
        if remaining > 0 {
            if let Some(boss) = self.state.grid.get_mut(id) {
                boss.kind = TileKind::Boss(BossHealth { health: remaining, ..health });
            }
            return Ok(());
        }

        self.state.grid.remove(id);
        self.state.score += rewards::BOSS_DEFEAT_SCORE;
        self.state.experience += rewards::BOSS_DEFEAT_EXPERIENCE;
        self.state.gold += rewards::BOSS_DEFEAT_GOLD;
        self.log.push(LogEvent::BossDefeated { pos });
        self.advance_after_boss();
        self.apply_level_ups();
        Ok(())
    }
}
