//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from turn sequencing.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    /// Hashes counters and every tile in position order. Tile ids are left out so two
    /// boards with the same layout hash alike regardless of merge history.
    pub fn snapshot_hash(&self) -> u64 {
        let state = &self.state;
        let mut hasher = Xxh3::new();
        match state.seed {
            Some(seed) => {
                hasher.write_u8(1);
                hasher.write_u32(seed);
            }
            None => hasher.write_u8(0),
        }
        hasher.write_u8(state.mode as u8);
        hasher.write_u8(state.difficulty as u8);
        hasher.write_u8(state.hero_class as u8);
        hasher.write_u8(state.biome as u8);
        hasher.write_u64(state.score);
        hasher.write_u64(state.experience);
        hasher.write_u64(state.gold);
        hasher.write_u32(state.level);
        hasher.write_u64(state.moves);
        hasher.write_u32(state.bosses_defeated);
        hasher.write_u32(state.effects.midas_turns);
        hasher.write_u32(state.effects.chronos_turns);
        hasher.write_u32(state.effects.void_turns);
        hasher.write_u32(state.ability_cooldown);
        hasher.write_u8(u8::from(state.game_over));
        hasher.write_u8(match state.last_direction {
            None => 0,
            Some(Direction::Up) => 1,
            Some(Direction::Down) => 2,
            Some(Direction::Left) => 3,
            Some(Direction::Right) => 4,
        });
        hasher.write_usize(state.modifiers.len());
        for modifier in &state.modifiers {
            hasher.write_u8(*modifier as u8);
        }

        hasher.write_usize(state.grid.len());
        for tile in state.grid.tiles_by_position() {
            hasher.write_i32(tile.pos.y);
            hasher.write_i32(tile.pos.x);
            hasher.write_u32(tile.value);
            match tile.kind {
                TileKind::Normal => hasher.write_u8(0),
                TileKind::Boss(health) => {
                    hasher.write_u8(1);
                    hasher.write_u32(health.health);
                    hasher.write_u32(health.max_health);
                }
                TileKind::Rune(kind) => {
                    hasher.write_u8(2);
                    hasher.write_u8(kind as u8);
                }
                TileKind::Stone => hasher.write_u8(3),
            }
        }
        hasher.finish()
    }
}
