use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use game_core::{
    Direction, EngineError, GameMode, InputJournal, RunSetup, TileKind, initialize_game,
    is_game_over,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u32,
    #[arg(short, long, default_value_t = 1000)]
    moves: u32,
    /// Daily and boss rush runs exercise modifiers; classic disables the rpg layer
    #[arg(long, default_value = "rpg")]
    mode: String,
    /// Write the recorded journal here so the run can be replayed
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

fn parse_mode(raw: &str) -> Result<GameMode> {
    Ok(match raw.to_ascii_lowercase().as_str() {
        "rpg" => GameMode::Rpg,
        "classic" => GameMode::Classic,
        "daily" => GameMode::Daily,
        "boss-rush" | "bossrush" => GameMode::BossRush,
        other => bail!("unknown mode {other:?}; expected rpg, classic, daily or boss-rush"),
    })
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode = parse_mode(&args.mode)?;

    println!("Starting fuzz harness on seed {} for max {} moves...", args.seed, args.moves);
    let setup = RunSetup::seeded(mode, args.seed);
    let mut game = initialize_game(&setup).map_err(|e| anyhow!("{e:?}"))?;
    let mut journal = InputJournal::new(setup);
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(args.seed));

    for _ in 0..args.moves {
        if game.is_game_over() {
            let state = game.state();
            println!("Run ended after {} moves with score {}", state.moves, state.score);
            break;
        }

        if rng.next_u64() % 20 == 0 {
            match game.use_ability() {
                Ok(ability) => {
                    journal.append_ability();
                    println!("Used {ability:?} on move {}", game.state().moves);
                }
                Err(EngineError::AbilityOnCooldown { .. } | EngineError::NoAbilityTarget) => {}
                Err(e) => bail!("ability failed unexpectedly: {e:?}"),
            }
            continue;
        }

        // Bias towards two directions, the way players hug a corner
        let direction = choose(
            &mut rng,
            &[
                Direction::Left,
                Direction::Down,
                Direction::Left,
                Direction::Down,
                Direction::Right,
                Direction::Up,
            ],
        );
        let report = game.apply_move(direction).expect("fuzz applied a move to a finished run");
        journal.append_move(direction);
        if report.outcome.moved {
            while !game.is_game_over() {
                let step = game.cascade().expect("cascade on a live run");
                journal.append_cascade();
                if !step.occurred {
                    break;
                }
            }
        }

        // Assert invariants
        let state = game.state();
        let grid = game.grid();
        grid.occupancy(state.board_size);
        assert!(
            grid.iter().filter(|tile| tile.is_boss()).count() <= 1,
            "Invariant failed: two live bosses"
        );
        assert!(
            grid.iter()
                .filter(|tile| tile.kind == TileKind::Normal)
                .all(|tile| tile.value.is_power_of_two()),
            "Invariant failed: non power of two tile"
        );
        assert_eq!(
            state.game_over,
            is_game_over(grid, state.board_size),
            "Invariant failed: stale game over flag"
        );
    }

    if let Some(path) = &args.journal_out {
        let raw = journal.to_json().context("Failed to serialize journal")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        println!("Journal written to {} ({} inputs)", path.display(), journal.inputs.len());
    }

    println!("Final snapshot hash: {}", game.snapshot_hash());
    println!("Fuzzing completed successfully.");
    Ok(())
}
