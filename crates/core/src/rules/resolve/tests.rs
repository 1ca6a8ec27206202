use super::*;
use crate::rules::test_support::*;

fn resolve_default(grid: Grid, direction: Direction) -> MoveResult {
    resolve_move(grid, direction, 4, &MoveContext::default())
}

fn pos(y: i32, x: i32) -> Pos {
    Pos { y, x }
}

#[test]
fn tiles_slide_to_the_far_wall() {
    let grid = grid_from_rows(&[&[0, 0, 0, 2], &[0, 4, 0, 0]]);
    let result = resolve_default(grid, Direction::Left);

    assert!(result.moved);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![2, 0, 0, 0]);
    assert_eq!(value_rows(&result.grid, 4)[1], vec![4, 0, 0, 0]);
    assert_eq!(result.score, 0);
    assert_eq!(result.effects.moves.len(), 2);
}

#[test]
fn equal_neighbours_merge_and_record_lineage() {
    let grid = grid_from_rows(&[&[2, 2, 0, 0]]);
    let moving = grid.tile_at(pos(0, 1)).map(|tile| tile.id).expect("moving tile");
    let target = grid.tile_at(pos(0, 0)).map(|tile| tile.id).expect("target tile");

    let result = resolve_default(grid, Direction::Left);

    assert_eq!(value_rows(&result.grid, 4)[0], vec![4, 0, 0, 0]);
    assert_eq!(result.score, 4);
    assert_eq!(result.experience, 4);
    assert_eq!(result.combo, 1);
    let merged = result.merged_ids[0];
    assert_eq!(result.effects.merged_from.get(&merged), Some(&[moving, target]));
    assert!(result.effects.dying.contains(&moving));
    assert!(result.effects.dying.contains(&target));
    assert!(result.grid.get(moving).is_none());
    assert_ne!(merged, moving);
    assert_ne!(merged, target);
}

#[test]
fn a_merged_tile_does_not_merge_again_in_the_same_move() {
    let result = resolve_default(grid_from_rows(&[&[2, 2, 2, 0]]), Direction::Left);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![4, 2, 0, 0]);

    let result = resolve_default(grid_from_rows(&[&[4, 2, 2, 0]]), Direction::Left);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![4, 4, 0, 0]);
    assert_eq!(result.combo, 1);
}

#[test]
fn four_equal_tiles_form_two_pairs() {
    let result = resolve_default(grid_from_rows(&[&[2, 2, 2, 2]]), Direction::Left);

    assert_eq!(value_rows(&result.grid, 4)[0], vec![4, 4, 0, 0]);
    assert_eq!(result.combo, 2);
    assert_eq!(result.combo_multiplier, 1.5);
    assert_eq!(result.score, 12);
    assert_eq!(result.effects.merged_from.len(), 2);
    assert_eq!(result.effects.dying.len(), 4);

    let mut sources: Vec<TileId> =
        result.effects.merged_from.values().flat_map(|pair| pair.iter().copied()).collect();
    sources.sort();
    sources.dedup();
    assert_eq!(sources.len(), 4, "no tile may feed two merges");
}

#[test]
fn traversal_starts_from_the_destination_side() {
    let result = resolve_default(grid_from_rows(&[&[2, 2, 2, 0]]), Direction::Right);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![0, 0, 2, 4]);
}

#[test]
fn vertical_moves_resolve_columns() {
    let up = resolve_default(
        grid_from_rows(&[&[0, 0, 0, 0], &[2, 0, 0, 0], &[0, 0, 0, 0], &[2, 0, 0, 0]]),
        Direction::Up,
    );
    assert_eq!(value_rows(&up.grid, 4)[0][0], 4);
    assert_eq!(up.grid.len(), 1);

    let down = resolve_default(
        grid_from_rows(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[4, 0, 0, 0]]),
        Direction::Down,
    );
    let column: Vec<u32> = value_rows(&down.grid, 4).iter().map(|row| row[0]).collect();
    assert_eq!(column, vec![0, 0, 4, 4]);
}

#[test]
fn blocked_move_changes_nothing() {
    let grid = grid_from_rows(&[&[2, 4, 8, 16]]);
    let result = resolve_default(grid.clone(), Direction::Left);

    assert!(!result.moved);
    assert_eq!(result.grid, grid);
    assert_eq!(result.score, 0);
    assert_eq!(result.effects, TurnEffects::default());
    assert!(result.events.is_empty());
}

#[test]
fn combo_multiplier_scales_the_turn_subtotal() {
    let grid = grid_from_rows(&[&[1, 1, 1, 1], &[1, 1, 1, 1], &[1, 1, 0, 0]]);
    let result = resolve_default(grid, Direction::Left);

    assert_eq!(result.combo, 5);
    assert_eq!(result.combo_multiplier, 2.0);
    assert_eq!(result.score, 20);
    assert_eq!(result.experience, 20);
    assert!(result.events.contains(&GameEvent::Combo { count: 5 }));
    assert!(result.logs.iter().any(|line| line.contains("Combo x5")));
}

#[test]
fn lethal_attack_removes_boss_and_attacker_and_pays_flat_rewards() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 16]]);
    let boss = place_boss(&mut grid, pos(0, 0), 50);

    let result = resolve_default(grid, Direction::Left);

    assert!(result.moved);
    assert!(result.boss_defeated);
    assert!(result.grid.is_empty(), "attacker and boss are both consumed");
    assert!(result.effects.dying.contains(&boss));
    assert_eq!(result.score, 160 + 1000);
    assert_eq!(result.experience, 160 + 2000);
    assert_eq!(result.gold, 500);
    assert_eq!(result.loot, vec![Loot { pos: pos(0, 0), amount: 500, kind: LootKind::Gold }]);
    assert_eq!(result.hitstop_ms, 200);
    assert!(result.events.contains(&GameEvent::BossDefeated { pos: pos(0, 0) }));
}

#[test]
fn surviving_boss_keeps_its_remaining_health() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 16]]);
    let boss = place_boss(&mut grid, pos(0, 0), 500);

    let result = resolve_default(grid, Direction::Left);

    assert!(!result.boss_defeated);
    assert_eq!(result.grid.len(), 1);
    let tile = result.grid.get(boss).expect("boss survives");
    assert_eq!(tile.kind, TileKind::Boss(BossHealth { health: 340, max_health: 500 }));
    assert!(result.effects.damaged.contains(&boss));
    assert_eq!(result.score, 160);
    assert_eq!(result.gold, 0);
    assert_eq!(result.hitstop_ms, 100);
    assert!(
        result
            .events
            .contains(&GameEvent::BossDamaged { pos: pos(0, 0), damage: 160, remaining: 340 })
    );
}

#[test]
fn small_tiles_stop_in_front_of_a_boss() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 8]]);
    let boss = place_boss(&mut grid, pos(0, 0), 500);

    let result = resolve_default(grid, Direction::Left);

    assert!(result.moved);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![0, 8, 0, 0]);
    assert_eq!(
        result.grid.get(boss).map(|tile| tile.kind),
        Some(TileKind::Boss(BossHealth { health: 500, max_health: 500 }))
    );
    assert!(result.effects.damaged.is_empty());
}

#[test]
fn damage_multipliers_stack_with_void() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 16]]);
    let boss = place_boss(&mut grid, pos(0, 0), 1000);
    let ctx = MoveContext {
        effects: EffectCounters { void_turns: 2, ..EffectCounters::default() },
        stats: HeroStats { damage_multiplier: 1.25, ..HeroStats::default() },
        ..MoveContext::default()
    };

    let result = resolve_move(grid, Direction::Left, 4, &ctx);

    let tile = result.grid.get(boss).expect("boss survives");
    assert_eq!(tile.kind, TileKind::Boss(BossHealth { health: 600, max_health: 1000 }));
}

#[test]
fn classic_mode_only_scores() {
    let mut grid = grid_from_rows(&[&[0, 0, 2, 2], &[0, 0, 0, 16]]);
    let boss = place_boss(&mut grid, pos(1, 0), 100);
    let ctx = MoveContext { mode: GameMode::Classic, ..MoveContext::default() };

    let result = resolve_move(grid, Direction::Left, 4, &ctx);

    assert_eq!(result.score, 4);
    assert_eq!(result.experience, 0);
    assert_eq!(result.gold, 0);
    assert!(result.grid.get(boss).is_some(), "no attacks without the rpg layer");
    assert_eq!(value_rows(&result.grid, 4)[1], vec![0, 16, 0, 0]);
}

#[test]
fn large_merges_drop_gold_scaled_by_modifiers() {
    let result = resolve_default(grid_from_rows(&[&[64, 64]]), Direction::Left);
    assert_eq!(result.gold, 64);
    assert_eq!(result.loot, vec![Loot { pos: pos(0, 0), amount: 64, kind: LootKind::Gold }]);

    let midas = MoveContext {
        effects: EffectCounters { midas_turns: 1, ..EffectCounters::default() },
        ..MoveContext::default()
    };
    let result = resolve_move(grid_from_rows(&[&[64, 64]]), Direction::Left, 4, &midas);
    assert_eq!(result.gold, 128);

    let famine = [DailyModifier::Famine];
    let starved = MoveContext { modifiers: &famine, ..MoveContext::default() };
    let result = resolve_move(grid_from_rows(&[&[64, 64]]), Direction::Left, 4, &starved);
    assert_eq!(result.gold, 32);

    let result = resolve_default(grid_from_rows(&[&[16, 16]]), Direction::Left);
    assert_eq!(result.gold, 0);
    assert!(result.loot.is_empty());
}

#[test]
fn experience_multipliers_combine() {
    let scholar = [DailyModifier::Scholar];
    let ctx = MoveContext {
        modifiers: &scholar,
        difficulty: Difficulty::Hard,
        ..MoveContext::default()
    };
    let result = resolve_move(grid_from_rows(&[&[2, 2]]), Direction::Left, 4, &ctx);
    // 4 * 1.5 * 1.25, floored.
    assert_eq!(result.experience, 7);
    assert_eq!(result.score, 4);
}

#[test]
fn reaching_2048_is_a_milestone() {
    let result = resolve_default(grid_from_rows(&[&[1024, 1024]]), Direction::Left);

    assert_eq!(result.hitstop_ms, 300);
    assert!(result.events.contains(&GameEvent::Milestone { value: 2048 }));
    assert_eq!(result.gold, 1024);
}

#[test]
fn stones_never_move_and_block_merges() {
    let mut grid = grid_from_rows(&[&[0, 2, 0, 0]]);
    let stone = place_stone(&mut grid, pos(0, 2));
    let result = resolve_default(grid, Direction::Left);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![2, 0, 0, 0]);
    assert_eq!(result.grid.get(stone).map(|tile| tile.pos), Some(pos(0, 2)));

    let mut grid = grid_from_rows(&[&[2, 0, 2, 0]]);
    place_stone(&mut grid, pos(0, 1));
    let result = resolve_default(grid.clone(), Direction::Left);
    assert!(!result.moved, "a stone separates equal tiles");
    assert_eq!(result.grid, grid);
}

#[test]
fn runes_slide_but_never_merge() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 2]]);
    let rune = place_rune(&mut grid, pos(0, 2), RuneKind::Midas);

    let result = resolve_default(grid, Direction::Left);

    assert_eq!(result.grid.get(rune).map(|tile| tile.pos), Some(pos(0, 0)));
    assert_eq!(value_rows(&result.grid, 4)[0], vec![0, 2, 0, 0]);
    assert_eq!(result.combo, 0);
}

#[test]
fn attacks_can_be_disabled_for_cascades() {
    let mut grid = grid_from_rows(&[&[0, 0, 0, 16]]);
    let boss = place_boss(&mut grid, pos(0, 0), 50);

    let result = resolve(grid, Direction::Left, 4, &MoveContext::default(), false);

    assert!(result.grid.get(boss).is_some());
    assert!(!result.boss_defeated);
    assert_eq!(value_rows(&result.grid, 4)[0], vec![0, 16, 0, 0]);
}
