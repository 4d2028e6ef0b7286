/// Board geometry and the tile ↔ pixel coordinate model.
///
/// The player lives in tile space (integer column/row), enemies live in
/// pixel space (continuous x, row-derived y).  Everything that converts
/// between the two goes through this module.

// ── Fixed board constants ─────────────────────────────────────────────────────

pub const TILE_WIDTH: i32 = 101;
pub const TILE_HEIGHT: i32 = 82;

/// Sprites are drawn this many pixels above their tile so they sit on it.
pub const SPRITE_Y_OFFSET: i32 = -20;

pub const COLS: i32 = 5;
pub const ROWS: i32 = 6;

/// Board width in pixels.  An enemy whose left edge reaches this is gone.
pub const BOARD_WIDTH: i32 = COLS * TILE_WIDTH;
pub const BOARD_HEIGHT: i32 = ROWS * TILE_HEIGHT;

/// The tile every player attempt starts from: bottom row, centre column.
pub const START_TILE: (i32, i32) = ((COLS + 1) / 2 - 1, ROWS - 1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    Water,
    Stone,
    Grass,
}

// ── Coordinate model ──────────────────────────────────────────────────────────

/// Top-left pixel of the sprite standing on tile `(col, row)`.
pub fn tile_to_pixel(col: i32, row: i32) -> (f64, f64) {
    (
        (col * TILE_WIDTH) as f64,
        (row * TILE_HEIGHT + SPRITE_Y_OFFSET) as f64,
    )
}

pub fn is_within_bounds(col: i32, row: i32) -> bool {
    (0..COLS).contains(&col) && (0..ROWS).contains(&row)
}

pub fn is_goal_row(row: i32) -> bool {
    row == 0
}

/// Background terrain of a row: water on top, two grass rows at the bottom,
/// stone in between.
pub fn terrain(row: i32) -> Terrain {
    if is_goal_row(row) {
        Terrain::Water
    } else if row >= ROWS - 2 {
        Terrain::Grass
    } else {
        Terrain::Stone
    }
}
