/// Key handling shared by the terminal front end.
///
/// The game moves one tile per key-up.  Terminals speaking the kitty
/// keyboard protocol report releases; everything else only reports presses
/// (auto-repeat arrives as more presses), so there a press is the key-up.

use crossterm::event::{KeyCode, KeyEventKind};

use crate::entities::Direction;

/// Arrow keys → move direction.  Everything else is not a move.
pub fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Down => Some(Direction::Down),
        _ => None,
    }
}

/// Whether `kind` should count as the key being let go.  `enhanced` must
/// reflect what the terminal actually supports, not merely that the
/// enhancement flags were written.
pub fn is_key_up(kind: KeyEventKind, enhanced: bool) -> bool {
    match kind {
        KeyEventKind::Release => enhanced,
        KeyEventKind::Press => !enhanced,
        KeyEventKind::Repeat => false,
    }
}
