use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct TileId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn in_bounds(self, board_size: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as usize) < board_size
            && (self.y as usize) < board_size
    }

    /// Row-major cell index. Callers must check `in_bounds` first.
    pub fn index(self, board_size: usize) -> usize {
        (self.y as usize) * board_size + (self.x as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step as `(dx, dy)`; `y` grows downwards.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Rpg,
    Classic,
    Versus,
    Daily,
    BossRush,
}

impl GameMode {
    /// Modes where bosses, runes, experience and gold exist at all.
    pub fn has_rpg_layer(self) -> bool {
        !matches!(self, GameMode::Classic | GameMode::Versus)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    #[default]
    Adventurer,
    Warrior,
    Rogue,
    Mage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Reroll,
    Smite,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Biome {
    #[default]
    Dungeon,
    Forest,
    Volcano,
    Abyss,
}

impl Biome {
    pub fn next(self) -> Self {
        match self {
            Biome::Dungeon => Biome::Forest,
            Biome::Forest => Biome::Volcano,
            Biome::Volcano | Biome::Abyss => Biome::Abyss,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuneKind {
    Midas,
    Chronos,
    Void,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DailyModifier {
    BossRush,
    Chaos,
    Ironclad,
    GoldenAge,
    Scholar,
    Famine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PassiveSkill {
    RuneSeeker,
    Bulwark,
    Prospector,
}

/// Fieldless tile category, used where a spawn is forced to a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    Normal,
    Boss,
    Rune(RuneKind),
    Stone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Gold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub pos: Pos,
    pub amount: u64,
    pub kind: LootKind,
}

/// Presentation-facing events emitted by one resolved move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Merged { pos: Pos, value: u32 },
    BossDamaged { pos: Pos, damage: u32, remaining: u32 },
    BossDefeated { pos: Pos },
    Milestone { value: u32 },
    Combo { count: u32 },
}

/// Append-only run log kept by [`crate::Game`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RunStarted { mode: GameMode, seeded: bool },
    MoveRejected { direction: Direction },
    MoveResolved { direction: Direction, combo: u32, score: u64 },
    TileSpawned { pos: Pos, category: TileCategory, value: u32 },
    BossSpawned { pos: Pos, max_health: u32 },
    BossSpawnDowngraded { pos: Pos },
    BossDamaged { pos: Pos, damage: u32 },
    BossDefeated { pos: Pos },
    Milestone { value: u32 },
    LevelUp { level: u32 },
    BiomeAdvanced { biome: Biome },
    RuneActivated { kind: RuneKind, pos: Pos },
    AbilityUsed { ability: Ability },
    CascadeStep { step: u32, merges: usize },
    StoneReceived { pos: Pos },
    GameOver { score: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    RunOver,
    MissingDailySeed,
    NoRuneAt(Pos),
    AbilityOnCooldown { remaining: u32 },
    NoAbilityTarget,
}
