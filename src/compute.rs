/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::board::{self, BOARD_WIDTH, START_TILE, TILE_WIDTH};
use crate::entities::{Direction, Enemy, GameState, Player, PlayerSprite, RoundStatus};

// ── Gameplay constants ────────────────────────────────────────────────────────

pub const ENEMY_SPEED_MIN: i32 = 3;
pub const ENEMY_SPEED_MAX: i32 = 5;

/// One speed unit moves an enemy this many pixels per second.
pub const PIXELS_PER_SPEED_UNIT: f64 = 100.0;

/// How far a bug may overlap into the player's tile before it counts as a hit.
pub const COLLISION_OVERLAP_PX: f64 = 20.0;

pub const SPAWN_PERIOD: Duration = Duration::from_millis(700);

/// Longest frame the simulation will integrate in one go.  At top speed a
/// bug covers 50 px in this time, well inside the 162 px hit window.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);

pub const STARTING_LIVES: u32 = 5;
pub const BASE_GOAL_SCORE: u32 = 100;

// ── Sprites ───────────────────────────────────────────────────────────────────

pub fn random_sprite(rng: &mut impl Rng) -> PlayerSprite {
    PlayerSprite::ALL[rng.gen_range(0..PlayerSprite::ALL.len())]
}

/// Draw sprites until one differs from `current`.
pub fn reselect_sprite(current: PlayerSprite, rng: &mut impl Rng) -> PlayerSprite {
    loop {
        let next = random_sprite(rng);
        if next != current {
            return next;
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh, visible player on the start tile with a random character.
pub fn new_player(rng: &mut impl Rng) -> Player {
    Player {
        x: START_TILE.0,
        y: START_TILE.1,
        sprite: random_sprite(rng),
        visible: true,
    }
}

/// The state before any round has been played: idle, player parked.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        player: hide(&new_player(rng)),
        enemies: Vec::new(),
        score: 0,
        lives: 0,
        multiplier: 1,
        status: RoundStatus::Idle,
    }
}

/// A new bug just off the left edge, on a random interior row.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    Enemy {
        row: rng.gen_range(1..=board::ROWS - 2),
        x: -(TILE_WIDTH as f64),
        speed: rng.gen_range(ENEMY_SPEED_MIN..=ENEMY_SPEED_MAX) as f64,
    }
}

// ── Player transitions ───────────────────────────────────────────────────────

pub fn go_to_start(player: &Player) -> Player {
    Player {
        x: START_TILE.0,
        y: START_TILE.1,
        visible: true,
        ..player.clone()
    }
}

/// Park the player off the board between rounds.
pub fn hide(player: &Player) -> Player {
    Player {
        visible: false,
        ..player.clone()
    }
}

/// The tile one step from the player's current tile.
pub fn step_target(player: &Player, direction: Direction) -> (i32, i32) {
    match direction {
        Direction::Left => (player.x - 1, player.y),
        Direction::Right => (player.x + 1, player.y),
        Direction::Up => (player.x, player.y - 1),
        Direction::Down => (player.x, player.y + 1),
    }
}

/// Move one tile.  Dropped entirely unless a round is running.
pub fn handle_input(state: &GameState, direction: Direction) -> GameState {
    if state.status != RoundStatus::Running {
        return state.clone();
    }
    let (col, row) = step_target(&state.player, direction);
    attempt_move(state, col, row)
}

/// The goal row is never occupied: stepping onto it scores and resets.
/// Off-board targets are ignored.
pub fn attempt_move(state: &GameState, col: i32, row: i32) -> GameState {
    if board::is_goal_row(row) {
        return reach_goal(state);
    }
    if !board::is_within_bounds(col, row) {
        return state.clone();
    }
    GameState {
        player: Player {
            x: col,
            y: row,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn reach_goal(state: &GameState) -> GameState {
    let scored = add_score(state);
    GameState {
        player: go_to_start(&scored.player),
        ..scored
    }
}

/// Back to the start tile as a different character, minus one life.
pub fn die(state: &GameState, rng: &mut impl Rng) -> GameState {
    let player = Player {
        sprite: reselect_sprite(state.player.sprite, rng),
        ..go_to_start(&state.player)
    };
    debug!("player died at ({}, {}), {} lives before", state.player.x, state.player.y, state.lives);
    // Last, because losing the final life parks the player again.
    lose_life(&GameState {
        player,
        ..state.clone()
    })
}

// ── Round bookkeeping ────────────────────────────────────────────────────────

pub fn add_score(state: &GameState) -> GameState {
    GameState {
        score: state.score + BASE_GOAL_SCORE * state.multiplier,
        multiplier: state.multiplier + 1,
        ..state.clone()
    }
}

pub fn lose_life(state: &GameState) -> GameState {
    let next = GameState {
        multiplier: 1,
        lives: state.lives.saturating_sub(1),
        ..state.clone()
    };
    if next.lives == 0 {
        end_round(&next)
    } else {
        next
    }
}

/// Reset score, lives and streak; clear the road and put the player on
/// the start tile.  Also restarts a round that is already running.
pub fn start_round(state: &GameState) -> GameState {
    GameState {
        player: go_to_start(&state.player),
        enemies: Vec::new(),
        score: 0,
        lives: STARTING_LIVES,
        multiplier: 1,
        status: RoundStatus::Running,
    }
}

/// No-op when already idle.
pub fn end_round(state: &GameState) -> GameState {
    if state.status == RoundStatus::Idle {
        return state.clone();
    }
    GameState {
        player: hide(&state.player),
        enemies: Vec::new(),
        status: RoundStatus::Idle,
        ..state.clone()
    }
}

pub fn add_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status != RoundStatus::Running {
        return state.clone();
    }
    let mut enemies = state.enemies.clone();
    enemies.push(spawn_enemy(rng));
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Enemy motion & collision ─────────────────────────────────────────────────

/// Move right by `speed * PIXELS_PER_SPEED_UNIT * dt` pixels, `dt` in seconds.
pub fn advance_enemy(enemy: &Enemy, dt: f64) -> Enemy {
    Enemy {
        x: enemy.x + enemy.speed * PIXELS_PER_SPEED_UNIT * dt,
        ..enemy.clone()
    }
}

/// Same row, and horizontally inside the player's tile once
/// `COLLISION_OVERLAP_PX` is shaved off each side.
pub fn collides_with(enemy: &Enemy, player: &Player) -> bool {
    let player_x = (player.x * TILE_WIDTH) as f64;
    let tile = TILE_WIDTH as f64;
    enemy.row == player.y
        && enemy.x > player_x - tile + COLLISION_OVERLAP_PX
        && enemy.x < player_x + tile - COLLISION_OVERLAP_PX
}

pub fn is_off_board(enemy: &Enemy) -> bool {
    enemy.x >= BOARD_WIDTH as f64
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt` seconds.  All enemies move first, then
/// collisions are checked against the new positions.  At most one life is
/// lost per tick however many bugs overlap the player.
pub fn tick(state: &GameState, dt: f64, rng: &mut impl Rng) -> GameState {
    if state.status != RoundStatus::Running {
        return state.clone();
    }

    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| advance_enemy(e, dt))
        .filter(|e| !is_off_board(e))
        .collect();

    let hit = state.player.visible && enemies.iter().any(|e| collides_with(e, &state.player));

    let next = GameState {
        enemies,
        ..state.clone()
    };
    if hit {
        die(&next, rng)
    } else {
        next
    }
}
