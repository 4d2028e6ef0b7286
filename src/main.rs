mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info};

use crossing_game::input::{direction_for, is_key_up};
use crossing_game::{Game, GameEvent};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Moves fire on key release, one tile per release, so holding a key does
/// not auto-repeat.  Terminals without keyboard enhancement never report
/// releases; there a press stands in for the release.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
) -> std::io::Result<()> {
    let mut game = Game::new();
    let mut final_score: Option<u32> = None;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start - last_frame;
        last_frame = frame_start;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut events = Vec::new();
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            let key_up = is_key_up(kind, keyboard_enhanced);
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                    if kind == KeyEventKind::Press =>
                {
                    return Ok(());
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char(' ') | KeyCode::Enter
                    if key_up && !game.is_running() =>
                {
                    events.extend(game.start());
                }
                _ if key_up => {
                    if let Some(direction) = direction_for(code) {
                        events.extend(game.input(direction));
                    }
                }
                _ => {}
            }
        }

        events.extend(game.update(dt));

        for event in &events {
            match event {
                GameEvent::RoundStarted => final_score = None,
                GameEvent::RoundEnded => {
                    info!("game over, final score {}", game.state().score);
                    final_score = Some(game.state().score);
                }
                GameEvent::ScoreChanged(score) => debug!("score {}", score),
                GameEvent::LivesChanged(lives) => debug!("lives {}", lives),
                _ => {}
            }
        }

        display::render(out, &game, final_score)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (width, height) = terminal::size().context("failed to query terminal size")?;
    let (need_w, need_h) = display::required_size();
    if width < need_w || height < need_h {
        bail!("terminal is {width}x{height}, need at least {need_w}x{need_h}");
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events, but only from terminals that answer the
    // kitty-protocol query.  Writing the flags succeeds everywhere, so its
    // result says nothing about support.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("game loop failed")
}
