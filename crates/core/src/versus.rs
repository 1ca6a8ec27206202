//! Two-player versus pairing over independent classic-scored boards.
//! Each player owns a separate `Game` and Random Source, so one board's spawns never
//! shift the other's sequence. This module does not own turn order; callers interleave.

use serde::{Deserialize, Serialize};

use crate::game::{Game, RunSetup, TurnReport, initialize_game};
use crate::rng::mix_seed;
use crate::types::*;

/// Merges in one move needed to drop a stone on the opponent.
pub const STONE_COMBO_THRESHOLD: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VersusTurn {
    pub report: TurnReport,
    /// Where the stone landed on the opponent's board, if one was dropped.
    pub stone_dropped: Option<Pos>,
    pub winner: Option<Player>,
}

pub struct VersusMatch {
    one: Game,
    two: Game,
    winner: Option<Player>,
}

impl VersusMatch {
    /// Player two's seed is derived from player one's so both boards replay together.
    pub fn new(seed: u32) -> Result<Self, EngineError> {
        let second_seed = mix_seed(u64::from(seed)) as u32;
        Ok(Self {
            one: initialize_game(&RunSetup::seeded(GameMode::Versus, seed))?,
            two: initialize_game(&RunSetup::seeded(GameMode::Versus, second_seed))?,
            winner: None,
        })
    }

    pub fn game(&self, player: Player) -> &Game {
        match player {
            Player::One => &self.one,
            Player::Two => &self.two,
        }
    }

    fn game_mut(&mut self, player: Player) -> &mut Game {
        match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn apply_move(
        &mut self,
        player: Player,
        direction: Direction,
    ) -> Result<VersusTurn, EngineError> {
        if self.winner.is_some() {
            return Err(EngineError::RunOver);
        }

        let report = self.game_mut(player).apply_move(direction)?;
        let opponent = player.opponent();
        let stone_dropped = if report.outcome.combo >= STONE_COMBO_THRESHOLD {
            self.game_mut(opponent).receive_stone()
        } else {
            None
        };

        if self.game(opponent).is_game_over() {
            self.winner = Some(player);
        } else if self.game(player).is_game_over() {
            self.winner = Some(opponent);
        }

        Ok(VersusTurn { report, stone_dropped, winner: self.winner })
    }
}
