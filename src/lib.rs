//! Single-screen crossing game: walk the token from the grass to the water
//! while bugs crawl across the stone rows.
//!
//! - `board`: tile/pixel coordinate model and board constants
//! - `entities`: plain data for player, enemies and round state
//! - `compute`: pure state transitions and the per-frame tick
//! - `timer`: cancelable periodic ticker for enemy spawns
//! - `game`: round controller, notifications and the render seam
//! - `input`: key → direction mapping and key-up detection

pub mod board;
pub mod compute;
pub mod entities;
pub mod game;
pub mod input;
pub mod timer;

pub use entities::{Direction, GameState, PlayerSprite, RoundStatus, SpriteId};
pub use game::{Game, GameEvent, RenderSink};
