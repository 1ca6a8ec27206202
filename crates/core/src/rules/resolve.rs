//! Directional slide, merge and boss-attack resolution for one turn.
//! Transient per-turn facts (spawned, dying, merged lineage, damaged) are returned in
//! `TurnEffects` instead of being stored on tiles, so a grid never carries stale flags.
//! This module does not spawn tiles or decide whether the run is over.

use std::collections::{BTreeMap, BTreeSet};

use crate::content::difficulty_experience_multiplier;
use crate::state::{BossHealth, EffectCounters, Grid, HeroStats, Tile, TileKind};
use crate::types::*;

use super::rewards::{self, scale};

const VOID_DAMAGE_FACTOR: f64 = 2.0;
const MIDAS_GOLD_FACTOR: f64 = 2.0;
const GOLDEN_AGE_GOLD_FACTOR: f64 = 2.0;
const FAMINE_GOLD_FACTOR: f64 = 0.5;
const SCHOLAR_EXPERIENCE_FACTOR: f64 = 1.5;

/// Everything besides the grid that shapes one resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveContext<'a> {
    pub mode: GameMode,
    pub effects: EffectCounters,
    pub modifiers: &'a [DailyModifier],
    pub difficulty: Difficulty,
    pub stats: HeroStats,
}

impl Default for MoveContext<'_> {
    fn default() -> Self {
        Self {
            mode: GameMode::Rpg,
            effects: EffectCounters::default(),
            modifiers: &[],
            difficulty: Difficulty::Normal,
            stats: HeroStats::default(),
        }
    }
}

impl MoveContext<'_> {
    fn has_modifier(&self, modifier: DailyModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    fn damage_multiplier(&self) -> f64 {
        let mut multiplier = self.stats.damage_multiplier;
        if self.effects.void_turns > 0 {
            multiplier *= VOID_DAMAGE_FACTOR;
        }
        multiplier
    }

    fn experience_multiplier(&self) -> f64 {
        let mut multiplier =
            self.stats.experience_multiplier * difficulty_experience_multiplier(self.difficulty);
        if self.has_modifier(DailyModifier::Scholar) {
            multiplier *= SCHOLAR_EXPERIENCE_FACTOR;
        }
        multiplier
    }

    fn gold_multiplier(&self) -> f64 {
        let mut multiplier = self.stats.gold_multiplier;
        if self.has_modifier(DailyModifier::GoldenAge) {
            multiplier *= GOLDEN_AGE_GOLD_FACTOR;
        }
        if self.has_modifier(DailyModifier::Famine) {
            multiplier *= FAMINE_GOLD_FACTOR;
        }
        if self.effects.midas_turns > 0 {
            multiplier *= MIDAS_GOLD_FACTOR;
        }
        multiplier
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileMove {
    pub id: TileId,
    pub from: Pos,
    pub to: Pos,
}

/// Per-turn side output keyed by tile id. Valid only for the turn that produced it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnEffects {
    pub moves: Vec<TileMove>,
    /// Merged tile id to `[moving id, target id]`.
    pub merged_from: BTreeMap<TileId, [TileId; 2]>,
    /// Tiles consumed this turn: merge sources, spent attackers, slain bosses.
    pub dying: Vec<TileId>,
    /// Bosses hit this turn that are still alive.
    pub damaged: BTreeSet<TileId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveResult {
    pub grid: Grid,
    /// `false` means nothing changed and the caller must reject the turn.
    pub moved: bool,
    pub score: u64,
    pub experience: u64,
    pub gold: u64,
    pub merged_ids: Vec<TileId>,
    pub combo: u32,
    pub combo_multiplier: f64,
    pub loot: Vec<Loot>,
    pub boss_defeated: bool,
    pub hitstop_ms: u32,
    pub logs: Vec<String>,
    pub events: Vec<GameEvent>,
    pub effects: TurnEffects,
}

/// Running totals before the combo multiplier is applied.
#[derive(Default)]
struct Tally {
    moved: bool,
    score: u64,
    experience: u64,
    combo: u32,
    merged_ids: Vec<TileId>,
    loot: Vec<Loot>,
    boss_defeated: bool,
    hitstop_ms: u32,
    logs: Vec<String>,
    events: Vec<GameEvent>,
    effects: TurnEffects,
}

impl Tally {
    fn hitstop(&mut self, ms: u32) {
        self.hitstop_ms = self.hitstop_ms.max(ms);
    }
}

pub fn resolve_move(
    grid: Grid,
    direction: Direction,
    board_size: usize,
    ctx: &MoveContext<'_>,
) -> MoveResult {
    resolve(grid, direction, board_size, ctx, true)
}

pub(super) fn resolve(
    grid: Grid,
    direction: Direction,
    board_size: usize,
    ctx: &MoveContext<'_>,
    allow_attacks: bool,
) -> MoveResult {
    let mut grid = grid;
    let mut cells = grid.occupancy(board_size);
    let vector = direction.vector();
    let rpg = ctx.mode.has_rpg_layer();
    let allow_attacks = allow_attacks && rpg;
    let mut tally = Tally::default();

    for pos in traversal_order(direction, board_size) {
        let Some(id) = cells[pos.index(board_size)] else {
            continue;
        };
        let Some(tile) = grid.get(id).cloned() else {
            continue;
        };
        if tile.kind == TileKind::Stone {
            continue;
        }

        let (farthest, blocker) = find_farthest(&cells, pos, vector, board_size);
        let target = blocker
            .and_then(|cell| cells[cell.index(board_size)])
            .and_then(|target_id| grid.get(target_id).cloned());

        match target {
            Some(target) if can_merge(&tile, &target, &tally.effects) => {
                merge(&mut grid, &mut cells, board_size, &tile, &target, &mut tally);
            }
            Some(target)
                if allow_attacks
                    && tile.is_normal()
                    && tile.value >= rewards::BOSS_ATTACK_MIN_VALUE
                    && target.is_boss() =>
            {
                attack(&mut grid, &mut cells, board_size, &tile, &target, ctx, &mut tally);
            }
            _ => {
                if farthest != pos {
                    if let Some(moving) = grid.get_mut(id) {
                        moving.pos = farthest;
                    }
                    cells[pos.index(board_size)] = None;
                    cells[farthest.index(board_size)] = Some(id);
                    tally.effects.moves.push(TileMove { id, from: pos, to: farthest });
                    tally.moved = true;
                }
            }
        }
    }

    finish(grid, tally, ctx, rpg)
}

/// Cells ordered so tiles nearest the destination wall are processed first.
fn traversal_order(direction: Direction, board_size: usize) -> Vec<Pos> {
    let (dx, dy) = direction.vector();
    let size = board_size as i32;
    let xs: Vec<i32> = if dx > 0 { (0..size).rev().collect() } else { (0..size).collect() };
    let ys: Vec<i32> = if dy > 0 { (0..size).rev().collect() } else { (0..size).collect() };

    let mut order = Vec::with_capacity(board_size * board_size);
    for &y in &ys {
        for &x in &xs {
            order.push(Pos { y, x });
        }
    }
    order
}

/// Walks from `start` until the next cell is occupied or off the board. Returns the last
/// empty cell reached and the occupied cell that stopped the walk, if any.
fn find_farthest(
    cells: &[Option<TileId>],
    start: Pos,
    vector: (i32, i32),
    board_size: usize,
) -> (Pos, Option<Pos>) {
    let mut previous = start;
    loop {
        let next = previous.offset(vector);
        if !next.in_bounds(board_size) {
            return (previous, None);
        }
        if cells[next.index(board_size)].is_some() {
            return (previous, Some(next));
        }
        previous = next;
    }
}

/// A tile that already merged this turn is never a merge target again.
fn can_merge(tile: &Tile, target: &Tile, effects: &TurnEffects) -> bool {
    tile.is_normal()
        && target.is_normal()
        && tile.value == target.value
        && !effects.merged_from.contains_key(&target.id)
}

fn merge(
    grid: &mut Grid,
    cells: &mut [Option<TileId>],
    board_size: usize,
    tile: &Tile,
    target: &Tile,
    tally: &mut Tally,
) {
    let value = tile.value.saturating_mul(2);
    grid.remove(tile.id);
    grid.remove(target.id);
    cells[tile.pos.index(board_size)] = None;

    let merged = grid.insert(target.pos, value, TileKind::Normal);
    cells[target.pos.index(board_size)] = Some(merged);

    let effects = &mut tally.effects;
    effects.merged_from.insert(merged, [tile.id, target.id]);
    effects.dying.extend([tile.id, target.id]);
    effects.moves.push(TileMove { id: tile.id, from: tile.pos, to: target.pos });

    tally.score += u64::from(value);
    tally.experience += u64::from(value);
    tally.combo += 1;
    tally.merged_ids.push(merged);
    tally.events.push(GameEvent::Merged { pos: target.pos, value });
    tally.moved = true;

    if value >= rewards::MILESTONE_VALUE {
        tally.hitstop(rewards::HITSTOP_MILESTONE_MS);
        tally.events.push(GameEvent::Milestone { value });
        tally.logs.push(format!("Milestone reached: {value}!"));
    }
}

fn attack(
    grid: &mut Grid,
    cells: &mut [Option<TileId>],
    board_size: usize,
    tile: &Tile,
    boss: &Tile,
    ctx: &MoveContext<'_>,
    tally: &mut Tally,
) {
    let TileKind::Boss(health) = boss.kind else {
        return;
    };
    let base = u64::from(tile.value) * u64::from(rewards::DAMAGE_PER_TILE_VALUE);
    let damage = u32::try_from(scale(base, ctx.damage_multiplier())).unwrap_or(u32::MAX);

    grid.remove(tile.id);
    cells[tile.pos.index(board_size)] = None;
    tally.effects.dying.push(tile.id);
    tally.score += u64::from(damage);
    tally.experience += u64::from(damage);
    tally.moved = true;

    let remaining = health.health.saturating_sub(damage);
    if remaining == 0 {
        grid.remove(boss.id);
        cells[boss.pos.index(board_size)] = None;
        tally.effects.dying.push(boss.id);
        tally.boss_defeated = true;
        tally.loot.push(Loot {
            pos: boss.pos,
            amount: rewards::BOSS_DEFEAT_GOLD,
            kind: LootKind::Gold,
        });
        tally.events.push(GameEvent::BossDefeated { pos: boss.pos });
        tally.logs.push(format!("Boss defeated with a {damage} damage blow!"));
        tally.hitstop(rewards::HITSTOP_BOSS_DEFEATED_MS);
    } else {
        if let Some(wounded) = grid.get_mut(boss.id) {
            wounded.kind = TileKind::Boss(BossHealth { health: remaining, ..health });
        }
        tally.effects.damaged.insert(boss.id);
        tally.events.push(GameEvent::BossDamaged { pos: boss.pos, damage, remaining });
        tally.logs.push(format!("Boss took {damage} damage ({remaining} left)"));
        tally.hitstop(rewards::HITSTOP_BOSS_DAMAGED_MS);
    }
}

fn finish(grid: Grid, tally: Tally, ctx: &MoveContext<'_>, rpg: bool) -> MoveResult {
    let Tally {
        moved,
        score,
        experience,
        combo,
        merged_ids,
        mut loot,
        boss_defeated,
        hitstop_ms,
        mut logs,
        mut events,
        effects,
    } = tally;

    let combo_multiplier = rewards::combo_multiplier(combo);
    let mut score = scale(score, combo_multiplier);
    let mut experience = if rpg {
        scale(experience, combo_multiplier * ctx.experience_multiplier())
    } else {
        0
    };

    let mut gold = 0;
    if rpg {
        let gold_multiplier = ctx.gold_multiplier();
        for tile in merged_ids.iter().filter_map(|id| grid.get(*id)) {
            let amount = scale(rewards::merge_gold(tile.value), gold_multiplier);
            if amount > 0 {
                gold += amount;
                loot.push(Loot { pos: tile.pos, amount, kind: LootKind::Gold });
            }
        }
    }

    if boss_defeated {
        score += rewards::BOSS_DEFEAT_SCORE;
        experience += rewards::BOSS_DEFEAT_EXPERIENCE;
        gold += rewards::BOSS_DEFEAT_GOLD;
    }

    if combo >= 2 {
        events.push(GameEvent::Combo { count: combo });
        logs.push(format!("Combo x{combo}!"));
    }

    MoveResult {
        grid,
        moved,
        score,
        experience,
        gold,
        merged_ids,
        combo,
        combo_multiplier,
        loot,
        boss_defeated,
        hitstop_ms,
        logs,
        events,
        effects,
    }
}

#[cfg(test)]
mod tests;
