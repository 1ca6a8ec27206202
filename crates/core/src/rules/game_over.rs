//! Stuck-board detection. Recomputed from scratch every turn.

use crate::state::{Grid, TileKind};
use crate::types::*;

use super::resolve::{MoveContext, resolve_move};
use super::rewards::BOSS_ATTACK_MIN_VALUE;

pub fn is_game_over(grid: &Grid, board_size: usize) -> bool {
    let cells = grid.occupancy(board_size);
    if cells.iter().any(Option::is_none) {
        return false;
    }

    for tile in grid.iter().filter(|tile| tile.is_normal()) {
        for direction in Direction::ALL {
            let neighbour = tile.pos.offset(direction.vector());
            if !neighbour.in_bounds(board_size) {
                continue;
            }
            let Some(other) = cells[neighbour.index(board_size)].and_then(|id| grid.get(id))
            else {
                continue;
            };
            if other.is_normal() && other.value == tile.value {
                return false;
            }
            if other.is_boss() && tile.value >= BOSS_ATTACK_MIN_VALUE {
                return false;
            }
        }
    }
    true
}

/// Stones never slide, so a board holding one can keep an empty cell that no tile can
/// ever reach. Such a board is stuck even though `is_game_over` sees room.
pub fn is_stone_locked(grid: &Grid, board_size: usize, ctx: &MoveContext<'_>) -> bool {
    grid.iter().any(|tile| tile.kind == TileKind::Stone)
        && Direction::ALL
            .into_iter()
            .all(|direction| !resolve_move(grid.clone(), direction, board_size, ctx).moved)
}
