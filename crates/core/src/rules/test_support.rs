//! Shared grid fixtures for rule and game test suites.
//! This module exists to keep board literals readable in tests.
//! It does not own production gameplay logic.

use crate::state::{BossHealth, Grid, TileKind};
use crate::types::*;

/// Builds a grid from row literals. Zero means an empty cell.
pub(crate) fn grid_from_rows(rows: &[&[u32]]) -> Grid {
    let mut grid = Grid::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value > 0 {
                grid.insert(Pos { y: y as i32, x: x as i32 }, value, TileKind::Normal);
            }
        }
    }
    grid
}

/// Reads normal tile values back as rows. Empty cells and special tiles read as zero.
pub(crate) fn value_rows(grid: &Grid, board_size: usize) -> Vec<Vec<u32>> {
    let mut rows = vec![vec![0; board_size]; board_size];
    for tile in grid.iter().filter(|tile| tile.is_normal()) {
        rows[tile.pos.y as usize][tile.pos.x as usize] = tile.value;
    }
    rows
}

pub(crate) fn place_boss(grid: &mut Grid, pos: Pos, health: u32) -> TileId {
    grid.insert(pos, 0, TileKind::Boss(BossHealth { health, max_health: health }))
}

pub(crate) fn place_stone(grid: &mut Grid, pos: Pos) -> TileId {
    grid.insert(pos, 0, TileKind::Stone)
}

pub(crate) fn place_rune(grid: &mut Grid, pos: Pos, kind: RuneKind) -> TileId {
    grid.insert(pos, 0, TileKind::Rune(kind))
}

/// A full board where no two orthogonal neighbours share a value.
pub(crate) fn locked_rows() -> Grid {
    grid_from_rows(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]])
}
