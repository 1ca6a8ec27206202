//! Turn rules over a grid: spawning, move resolution, cascades and stuck detection.
//! Every function here is a pure, bounded computation over one board.
//! Randomness only enters through an explicit `RandomSource` argument.

pub mod cascade;
pub mod game_over;
pub mod resolve;
pub mod rewards;
pub mod spawn;

#[cfg(test)]
pub(crate) mod test_support;

pub use cascade::{CascadeRewards, CascadeStep, MAX_CASCADE_STEPS, cascade_step};
pub use game_over::{is_game_over, is_stone_locked};
pub use resolve::{MoveContext, MoveResult, TileMove, TurnEffects, resolve_move};
pub use spawn::{SpawnOutcome, SpawnPolicy, boss_max_health, spawn_tile};
