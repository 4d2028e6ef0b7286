/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    /// No round in progress; input is dropped and nothing spawns.
    Idle,
    Running,
}

/// The character palette a player token is drawn from.  A death swaps the
/// token for a different character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerSprite {
    Boy,
    CatGirl,
    HornGirl,
    PinkGirl,
    PrincessGirl,
}

impl PlayerSprite {
    pub const ALL: [PlayerSprite; 5] = [
        PlayerSprite::Boy,
        PlayerSprite::CatGirl,
        PlayerSprite::HornGirl,
        PlayerSprite::PinkGirl,
        PlayerSprite::PrincessGirl,
    ];
}

/// Opaque sprite identity handed to the render sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Bug,
    Player(PlayerSprite),
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// Player position is in tiles, not pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub sprite: PlayerSprite,
    /// False while parked off the board between rounds.
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Tile row, always one of the interior rows.
    pub row: i32,
    /// Left edge in pixels.  Only ever increases.
    pub x: f64,
    /// Speed units; multiplied by `PIXELS_PER_SPEED_UNIT` per second.
    pub speed: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire round state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub lives: u32,
    /// Consecutive-goal streak bonus, back to 1 on every death.
    pub multiplier: u32,
    pub status: RoundStatus,
}
