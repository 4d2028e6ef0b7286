use std::io;
use std::time::Duration;

use crossing_game::board::START_TILE;
use crossing_game::entities::{Direction, Enemy, GameState, RoundStatus, SpriteId};
use crossing_game::{Game, GameEvent, RenderSink};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_game() -> Game<StdRng> {
    Game::with_rng(StdRng::seed_from_u64(7))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<(SpriteId, f64, f64)>,
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, sprite: SpriteId, pixel_x: f64, pixel_y: f64) -> io::Result<()> {
        self.calls.push((sprite, pixel_x, pixel_y));
        Ok(())
    }
}

/// Feed `total_ms` of wall time in frames of at most 100 ms.
fn run_for(game: &mut Game<StdRng>, total_ms: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut left = total_ms;
    while left > 0 {
        let step = left.min(100);
        events.extend(game.update(ms(step)));
        left -= step;
    }
    events
}

fn spawned(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
        .count()
}

// ── lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn new_game_is_idle() {
    let game = seeded_game();
    assert!(!game.is_running());
    assert!(!game.state().player.visible);
}

#[test]
fn start_announces_round() {
    let mut game = seeded_game();
    let events = game.start();
    assert_eq!(
        events,
        vec![
            GameEvent::RoundStarted,
            GameEvent::ScoreChanged(0),
            GameEvent::LivesChanged(5),
        ]
    );
    assert!(game.is_running());
    let p = &game.state().player;
    assert_eq!((p.x, p.y), START_TILE);
}

#[test]
fn end_twice_is_noop() {
    let mut game = seeded_game();
    game.start();
    assert_eq!(game.end(), vec![GameEvent::RoundEnded]);
    assert!(game.end().is_empty());
    assert!(!game.is_running());
}

#[test]
fn end_on_fresh_game_is_noop() {
    let mut game = seeded_game();
    assert!(game.end().is_empty());
}

// ── input ─────────────────────────────────────────────────────────────────────

#[test]
fn input_ignored_before_start() {
    let mut game = seeded_game();
    let before = game.state().player.clone();
    assert!(game.input(Direction::Up).is_empty());
    assert_eq!(game.state().player, before);
}

#[test]
fn crossing_scores_and_bumps_multiplier() {
    let mut game = seeded_game();
    game.start();
    let mut events = Vec::new();
    for _ in 0..5 {
        events.extend(game.input(Direction::Up));
    }
    assert_eq!(
        events,
        vec![GameEvent::GoalReached { points: 100 }, GameEvent::ScoreChanged(100)]
    );
    let s = game.state();
    assert_eq!(s.score, 100);
    assert_eq!(s.multiplier, 2);
    assert_eq!((s.player.x, s.player.y), (2, 5));

    for _ in 0..5 {
        game.input(Direction::Up);
    }
    assert_eq!(game.state().score, 300);
    assert_eq!(game.state().multiplier, 3);
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawns_every_period_while_running() {
    let mut game = seeded_game();
    game.start();
    assert_eq!(spawned(&run_for(&mut game, 699)), 0);
    assert_eq!(spawned(&game.update(ms(1))), 1);
    assert_eq!(spawned(&run_for(&mut game, 1400)), 2);
}

#[test]
fn nothing_spawns_while_idle() {
    let mut game = seeded_game();
    assert_eq!(spawned(&game.update(ms(5000))), 0);
    assert!(game.state().enemies.is_empty());
}

#[test]
fn restart_does_not_catch_up_spawns() {
    let mut game = seeded_game();
    game.start();
    run_for(&mut game, 600);
    game.end();
    run_for(&mut game, 5000);
    game.start();
    assert_eq!(spawned(&run_for(&mut game, 200)), 0);
    assert_eq!(spawned(&run_for(&mut game, 500)), 1);
}

#[test]
fn restart_while_running_resets_round() {
    let mut state = seeded_game().state().clone();
    state.status = RoundStatus::Running;
    state.player.visible = true;
    state.score = 500;
    state.lives = 2;
    state.multiplier = 3;
    state.enemies.push(Enemy { row: 1, x: 50.0, speed: 3.0 });
    let mut game = rigged_game(state);
    // 600 ms into the current spawn period
    run_for(&mut game, 600);
    game.input(Direction::Left);

    let events = game.start();
    assert_eq!(
        events,
        vec![
            GameEvent::RoundStarted,
            GameEvent::ScoreChanged(0),
            GameEvent::LivesChanged(5),
        ]
    );
    let s = game.state();
    assert!(s.enemies.is_empty());
    assert_eq!((s.score, s.lives, s.multiplier), (0, 5, 1));
    assert_eq!((s.player.x, s.player.y), START_TILE);

    // The next bug is a full period away, not 100 ms.
    assert_eq!(spawned(&run_for(&mut game, 699)), 0);
    assert_eq!(spawned(&game.update(ms(1))), 1);
}

// ── stalled frames ────────────────────────────────────────────────────────────

#[test]
fn stalled_frame_cannot_carry_bug_past_player() {
    let mut state = seeded_game().state().clone();
    state.status = RoundStatus::Running;
    state.lives = 5;
    state.player.visible = true;
    state.player.x = 2;
    state.player.y = 3; // hit window 121..283
    state.enemies.push(Enemy { row: 3, x: 100.0, speed: 5.0 });
    let mut game = rigged_game(state);

    // Uncapped, 400 ms would put the bug at x=300, beyond the window.
    let events = game.update(ms(400));
    assert!(events.contains(&GameEvent::PlayerDied));
    assert_eq!(game.state().lives, 4);
}

#[test]
fn stalled_frame_spawns_at_most_one_bug() {
    let mut game = seeded_game();
    game.start();
    assert_eq!(spawned(&game.update(ms(3500))), 0);

    run_for(&mut game, 550);
    let events = game.update(ms(3500));
    assert_eq!(spawned(&events), 1);
    assert_eq!(game.state().enemies.len(), 1);
}

// ── collisions through the controller ───────────────────────────────────────

#[test]
fn collision_scenario() {
    let mut game = seeded_game();
    game.start();
    for _ in 0..3 {
        game.input(Direction::Up);
    }
    game.input(Direction::Right);
    game.input(Direction::Right);
    assert_eq!((game.state().player.x, game.state().player.y), (4, 2));

    // Bug at x=390 against the player's 404.
    let mut rigged = game.state().clone();
    rigged.enemies.push(Enemy { row: 2, x: 390.0, speed: 3.0 });
    let mut game = rigged_game(rigged);

    let events = game.update(ms(16));
    assert!(events.contains(&GameEvent::PlayerDied));
    assert!(events.contains(&GameEvent::LivesChanged(4)));
    let s = game.state();
    assert_eq!(s.lives, 4);
    assert_eq!(s.multiplier, 1);
    assert_eq!((s.player.x, s.player.y), START_TILE);
}

#[test]
fn losing_all_lives_ends_round_and_stops_spawns() {
    let mut game = seeded_game();
    game.start();
    let mut state = game.state().clone();
    state.lives = 1;
    state.player.y = 1;
    state.enemies.push(Enemy { row: 1, x: 202.0, speed: 4.0 });
    let mut game = rigged_game(state);

    let events = game.update(ms(16));
    assert!(events.contains(&GameEvent::LivesChanged(0)));
    assert!(events.contains(&GameEvent::RoundEnded));
    assert_eq!(game.state().status, RoundStatus::Idle);

    assert_eq!(spawned(&run_for(&mut game, 14_000)), 0);
    assert!(game.state().enemies.is_empty());
}

fn rigged_game(state: GameState) -> Game<StdRng> {
    Game::with_state(state, StdRng::seed_from_u64(7))
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_draws_enemies_then_player() {
    let mut game = seeded_game();
    game.start();
    run_for(&mut game, 700);
    let mut sink = RecordingSink::default();
    game.render(&mut sink).unwrap();

    assert_eq!(sink.calls.len(), 2);
    let (sprite, _, y) = sink.calls[0];
    assert_eq!(sprite, SpriteId::Bug);
    let row = game.state().enemies[0].row;
    assert_eq!(y, (row * 82 - 20) as f64);

    let (sprite, x, y) = sink.calls[1];
    assert_eq!(sprite, SpriteId::Player(game.state().player.sprite));
    assert_eq!((x, y), (202.0, 390.0));
}

#[test]
fn render_skips_parked_player() {
    let game = seeded_game();
    let mut sink = RecordingSink::default();
    game.render(&mut sink).unwrap();
    assert!(sink.calls.is_empty());
}

#[test]
fn with_state_running_arms_spawner() {
    let mut state = seeded_game().state().clone();
    state.status = RoundStatus::Running;
    state.lives = 3;
    let mut game = rigged_game(state);
    assert!(game.is_running());
    assert_eq!(spawned(&run_for(&mut game, 700)), 1);
}
