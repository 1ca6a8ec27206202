//! Caller-driven chain reactions after a resolved move.
//! Each call performs exactly one bounded step: gravity is re-applied in the last move
//! direction with boss attacks disabled, and the step only counts if something merged.
//! The caller owns the loop and any delay between steps.

use crate::state::Grid;
use crate::types::*;

use super::resolve::{MoveContext, resolve};

pub const MAX_CASCADE_STEPS: u32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CascadeRewards {
    pub score: u64,
    pub experience: u64,
    pub gold: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CascadeStep {
    pub occurred: bool,
    pub grid: Grid,
    pub rewards: CascadeRewards,
    pub merged_ids: Vec<TileId>,
}

impl CascadeStep {
    /// A step that changed nothing.
    pub fn settled(grid: Grid) -> Self {
        Self { occurred: false, grid, rewards: CascadeRewards::default(), merged_ids: Vec::new() }
    }
}

pub fn cascade_step(
    grid: Grid,
    direction: Direction,
    board_size: usize,
    step: u32,
    ctx: &MoveContext<'_>,
) -> CascadeStep {
    if step >= MAX_CASCADE_STEPS {
        return CascadeStep::settled(grid);
    }

    let result = resolve(grid.clone(), direction, board_size, ctx, false);
    if result.combo == 0 {
        return CascadeStep::settled(grid);
    }

    CascadeStep {
        occurred: true,
        grid: result.grid,
        rewards: CascadeRewards {
            score: result.score,
            experience: result.experience,
            gold: result.gold,
        },
        merged_ids: result.merged_ids,
    }
}
