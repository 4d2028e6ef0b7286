/// Rendering layer — all terminal I/O lives here.
///
/// The game speaks pixels; this module scales them down to terminal cells.
/// Each tile becomes `CELL_COLS × CELL_ROWS` characters.  No game logic is
/// performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;

use crossing_game::board::{self, Terrain, COLS, ROWS, SPRITE_Y_OFFSET, TILE_HEIGHT, TILE_WIDTH};
use crossing_game::{Game, PlayerSprite, RenderSink, SpriteId};

// ── Layout ────────────────────────────────────────────────────────────────────

const CELL_COLS: i32 = 10;
const CELL_ROWS: i32 = 3;

/// Terminal position of the board's top-left cell (inside the border).
const ORIGIN_X: i32 = 1;
const ORIGIN_Y: i32 = 2;

const BOARD_COLS: i32 = COLS * CELL_COLS;
const BOARD_ROWS: i32 = ROWS * CELL_ROWS;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_STREAK: Color = Color::Cyan;
const C_WATER: Color = Color::Blue;
const C_STONE: Color = Color::DarkGrey;
const C_GRASS: Color = Color::DarkGreen;
const C_BUG: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Render sink ───────────────────────────────────────────────────────────────

/// Draws sprites at their scaled-down pixel position, clipped to the board.
struct TerminalSink<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> RenderSink for TerminalSink<'_, W> {
    fn draw(&mut self, sprite: SpriteId, pixel_x: f64, pixel_y: f64) -> std::io::Result<()> {
        let (glyph, color) = sprite_glyph(sprite);
        let col = (pixel_x * CELL_COLS as f64 / TILE_WIDTH as f64).floor() as i32;
        // Undo the sprite offset and land on the tile's middle line.
        let row = ((pixel_y - SPRITE_Y_OFFSET as f64) * CELL_ROWS as f64 / TILE_HEIGHT as f64)
            .round() as i32
            + CELL_ROWS / 2;
        if !(0..BOARD_ROWS).contains(&row) {
            return Ok(());
        }

        // Centre the glyph in its tile-wide footprint.
        let width = glyph.chars().count() as i32;
        let left = col + (CELL_COLS - width) / 2;
        let terrain = board::terrain(row / CELL_ROWS);
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(style::SetBackgroundColor(terrain_color(terrain)))?;
        for (i, ch) in glyph.chars().enumerate() {
            let c = left + i as i32;
            if (0..BOARD_COLS).contains(&c) {
                self.out
                    .queue(cursor::MoveTo((ORIGIN_X + c) as u16, (ORIGIN_Y + row) as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn sprite_glyph(sprite: SpriteId) -> (&'static str, Color) {
    match sprite {
        SpriteId::Bug => ("<(oo)=", C_BUG),
        SpriteId::Player(PlayerSprite::Boy) => ("[B]", Color::White),
        SpriteId::Player(PlayerSprite::CatGirl) => ("[C]", Color::Yellow),
        SpriteId::Player(PlayerSprite::HornGirl) => ("[H]", Color::Magenta),
        SpriteId::Player(PlayerSprite::PinkGirl) => ("[P]", Color::Magenta),
        SpriteId::Player(PlayerSprite::PrincessGirl) => ("[Q]", Color::Cyan),
    }
}

fn terrain_color(terrain: Terrain) -> Color {
    match terrain {
        Terrain::Water => C_WATER,
        Terrain::Stone => C_STONE,
        Terrain::Grass => C_GRASS,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Smallest terminal that fits the board, border, HUD and hint line.
pub fn required_size() -> (u16, u16) {
    ((BOARD_COLS + 2) as u16, (BOARD_ROWS + 4) as u16)
}

/// Render one complete frame.  `final_score` is the result of the last
/// finished round, shown while idle.
pub fn render<W: Write, R: Rng>(
    out: &mut W,
    game: &Game<R>,
    final_score: Option<u32>,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;
    draw_terrain(out)?;
    draw_hud(out, game)?;

    game.render(&mut TerminalSink { out: &mut *out })?;

    draw_controls_hint(out, game, final_score)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (ORIGIN_Y + BOARD_ROWS + 2) as u16))?;
    out.flush()?;
    Ok(())
}

// ── Border & terrain ──────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = BOARD_COLS as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, (ORIGIN_Y - 1) as u16))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, (ORIGIN_Y + BOARD_ROWS) as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in 0..BOARD_ROWS {
        let y = (ORIGIN_Y + row) as u16;
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo((ORIGIN_X + BOARD_COLS) as u16, y))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_terrain<W: Write>(out: &mut W) -> std::io::Result<()> {
    let blank = " ".repeat(BOARD_COLS as usize);
    for row in 0..BOARD_ROWS {
        let terrain = board::terrain(row / CELL_ROWS);
        out.queue(cursor::MoveTo(ORIGIN_X as u16, (ORIGIN_Y + row) as u16))?;
        out.queue(style::SetBackgroundColor(terrain_color(terrain)))?;
        out.queue(Print(&blank))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write, R: Rng>(out: &mut W, game: &Game<R>) -> std::io::Result<()> {
    let state = game.state();

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", state.score)))?;

    if state.multiplier > 1 {
        out.queue(style::SetForegroundColor(C_HUD_STREAK))?;
        out.queue(Print(format!("  x{}", state.multiplier)))?;
    }

    let hearts = "♥".repeat(state.lives as usize);
    let rx = (BOARD_COLS + 1).saturating_sub(hearts.chars().count() as i32) as u16;
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hearts))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write, R: Rng>(
    out: &mut W,
    game: &Game<R>,
    final_score: Option<u32>,
) -> std::io::Result<()> {
    let hint = match final_score {
        _ if game.is_running() => "← ↑ → ↓ : Move   Q : Quit".to_string(),
        Some(score) => format!("GAME OVER {score}   SPACE : Play Again   Q : Quit"),
        None => "SPACE : Start   Q : Quit".to_string(),
    };
    out.queue(cursor::MoveTo(1, (ORIGIN_Y + BOARD_ROWS + 1) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
