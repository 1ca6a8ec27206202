use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use game_core::{InputJournal, ReplayResult, replay::replay_to_end};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: String,
}

fn replay_file(path: &Path) -> Result<ReplayResult> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal: InputJournal =
        serde_json::from_str(&journal_data).context("Failed to deserialize journal JSON")?;

    replay_to_end(&journal).map_err(|e| anyhow!("Replay failed during execution: {e:?}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let result = replay_file(Path::new(&args.journal))?;

    println!("Replay complete.");
    println!("Final Score: {}", result.final_score);
    println!("Moves: {}", result.final_moves);
    println!("Game Over: {}", result.game_over);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
