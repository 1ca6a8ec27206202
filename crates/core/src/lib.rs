pub mod content;
pub mod game;
pub mod journal;
pub mod replay;
pub mod rng;
pub mod rules;
pub mod state;
pub mod types;
pub mod versus;

pub use game::{Game, RunSetup, TurnReport, initialize_game};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use replay::*;
pub use rng::RandomSource;
pub use rules::{
    CascadeStep, MoveContext, MoveResult, SpawnOutcome, SpawnPolicy, TurnEffects, cascade_step,
    is_game_over, is_stone_locked, resolve_move, spawn_tile,
};
pub use state::{BossHealth, EngineState, Grid, Profile, Tile, TileKind};
pub use types::*;
pub use versus::{Player, VersusMatch, VersusTurn};
