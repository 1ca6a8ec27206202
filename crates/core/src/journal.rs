use serde::{Deserialize, Serialize};

use crate::game::RunSetup;
use crate::types::{Direction, Pos};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every player input of one run, in order, plus what is needed to rebuild its start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub setup: RunSetup,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Move(Direction),
    ActivateRune { pos: Pos },
    UseAbility,
    /// One step of the chain started by the previous move.
    Cascade,
}

impl InputJournal {
    pub fn new(setup: RunSetup) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, setup, inputs: Vec::new() }
    }

    pub fn append(&mut self, payload: InputPayload) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
        seq
    }

    pub fn append_move(&mut self, direction: Direction) -> u64 {
        self.append(InputPayload::Move(direction))
    }

    pub fn append_rune(&mut self, pos: Pos) -> u64 {
        self.append(InputPayload::ActivateRune { pos })
    }

    pub fn append_ability(&mut self) -> u64 {
        self.append(InputPayload::UseAbility)
    }

    pub fn append_cascade(&mut self) -> u64 {
        self.append(InputPayload::Cascade)
    }

    pub fn seed(&self) -> Option<u32> {
        self.setup.seed
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameMode;

    #[test]
    fn sequence_numbers_follow_append_order() {
        let mut journal = InputJournal::new(RunSetup::seeded(GameMode::Rpg, 5));
        assert_eq!(journal.append_move(Direction::Left), 0);
        assert_eq!(journal.append_rune(Pos { y: 1, x: 2 }), 1);
        assert_eq!(journal.append_ability(), 2);
        assert_eq!(journal.append_cascade(), 3);
        assert_eq!(journal.seed(), Some(5));
        assert_eq!(journal.format_version, JOURNAL_FORMAT_VERSION);
    }

    #[test]
    fn json_keeps_every_field() {
        let mut journal = InputJournal::new(RunSetup::seeded(GameMode::Daily, 20240101));
        journal.append_move(Direction::Up);
        journal.append_rune(Pos { y: 3, x: 0 });
        journal.append_cascade();

        let raw = journal.to_json().expect("journal serializes");
        assert!(raw.contains("\"Move\""));
        let parsed = InputJournal::from_json(&raw).expect("journal parses");
        assert_eq!(parsed, journal);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(InputJournal::from_json("{\"format_version\": 1").is_err());
    }
}
