use crate::{
    game::{Game, initialize_game},
    journal::{InputJournal, InputPayload},
    types::EngineError,
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    /// Without a seed the spawn sequence cannot be reproduced.
    UnseededJournal,
    Bootstrap(EngineError),
    RejectedInput { seq: u64, reason: EngineError },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_score: u64,
    pub final_moves: u64,
    pub game_over: bool,
    pub final_snapshot_hash: u64,
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let game = replay_game(journal)?;
    Ok(ReplayResult {
        final_score: game.state().score,
        final_moves: game.state().moves,
        game_over: game.is_game_over(),
        final_snapshot_hash: game.snapshot_hash(),
    })
}

/// Rebuilds the run and feeds every recorded input back in order.
pub fn replay_game(journal: &InputJournal) -> Result<Game, ReplayError> {
    if journal.seed().is_none() {
        return Err(ReplayError::UnseededJournal);
    }
    let mut game = initialize_game(&journal.setup).map_err(ReplayError::Bootstrap)?;

    for record in &journal.inputs {
        let applied = match record.payload {
            InputPayload::Move(direction) => game.apply_move(direction).map(drop),
            InputPayload::ActivateRune { pos } => game.activate_rune(pos).map(drop),
            InputPayload::UseAbility => game.use_ability().map(drop),
            InputPayload::Cascade => game.cascade().map(drop),
        };
        applied.map_err(|reason| ReplayError::RejectedInput { seq: record.seq, reason })?;
    }
    Ok(game)
}
