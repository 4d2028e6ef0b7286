/// Round controller — the stateful shell around `compute`.
///
/// `Game` owns the round state, the enemy spawn ticker and the RNG.  The
/// front end drives it with `update(dt)` once per frame and `input(dir)` per
/// resolved key press; every call returns the notifications it produced.
/// Drawing goes out through a `RenderSink`.

use std::io;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::tile_to_pixel;
use crate::compute::{self, MAX_FRAME_DT, SPAWN_PERIOD};
use crate::entities::{Direction, GameState, RoundStatus, SpriteId};
use crate::timer::Ticker;

/// Notifications for UI collaborators (score box, hearts, start button).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    RoundEnded,
    ScoreChanged(u32),
    LivesChanged(u32),
    EnemySpawned { row: i32 },
    PlayerDied,
    GoalReached { points: u32 },
}

/// Receives one draw call per visible entity per frame.
pub trait RenderSink {
    fn draw(&mut self, sprite: SpriteId, pixel_x: f64, pixel_y: f64) -> io::Result<()>;
}

pub struct Game<R: Rng = StdRng> {
    state: GameState,
    spawner: Ticker,
    rng: R,
}

impl Game<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// An idle controller.  Pass a seeded RNG for reproducible rounds.
    pub fn with_rng(mut rng: R) -> Self {
        let state = compute::init_state(&mut rng);
        Self {
            state,
            spawner: Ticker::new(SPAWN_PERIOD),
            rng,
        }
    }

    /// Build a controller around an existing state.  A running state starts
    /// spawning a full period from now.
    pub fn with_state(state: GameState, rng: R) -> Self {
        let mut spawner = Ticker::new(SPAWN_PERIOD);
        if state.status == RoundStatus::Running {
            spawner.start();
        }
        Self { state, spawner, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.status == RoundStatus::Running
    }

    /// Begin a fresh round, restarting one already in progress.
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.state = compute::start_round(&self.state);
        self.spawner.start();
        info!("round started with {} lives", self.state.lives);
        vec![
            GameEvent::RoundStarted,
            GameEvent::ScoreChanged(self.state.score),
            GameEvent::LivesChanged(self.state.lives),
        ]
    }

    /// Stop the round.  Calling this while idle does nothing.
    pub fn end(&mut self) -> Vec<GameEvent> {
        let next = compute::end_round(&self.state);
        self.commit(next)
    }

    /// Dropped unless a round is running.
    pub fn input(&mut self, direction: Direction) -> Vec<GameEvent> {
        let next = compute::handle_input(&self.state, direction);
        self.commit(next)
    }

    /// Advance one frame: move and collide first, then spawn if the ticker
    /// is due.  A round that ends during the tick spawns nothing.
    ///
    /// `dt` is capped at `MAX_FRAME_DT`, so after a stall the world resumes
    /// slowed down rather than skipping bugs past the player.
    pub fn update(&mut self, dt: Duration) -> Vec<GameEvent> {
        let dt = dt.min(MAX_FRAME_DT);
        let next = compute::tick(&self.state, dt.as_secs_f64(), &mut self.rng);
        let mut events = self.commit(next);

        if self.spawner.advance(dt) {
            self.state = compute::add_enemy(&self.state, &mut self.rng);
            if let Some(enemy) = self.state.enemies.last() {
                debug!("spawned bug on row {} at speed {}", enemy.row, enemy.speed);
                events.push(GameEvent::EnemySpawned { row: enemy.row });
            }
        }
        events
    }

    /// Enemies first, player on top.  A parked player is not drawn.
    pub fn render(&self, sink: &mut impl RenderSink) -> io::Result<()> {
        for enemy in &self.state.enemies {
            let (_, y) = tile_to_pixel(0, enemy.row);
            sink.draw(SpriteId::Bug, enemy.x, y)?;
        }
        let player = &self.state.player;
        if player.visible {
            let (x, y) = tile_to_pixel(player.x, player.y);
            sink.draw(SpriteId::Player(player.sprite), x, y)?;
        }
        Ok(())
    }

    /// Swap in `next` and report what changed.
    fn commit(&mut self, next: GameState) -> Vec<GameEvent> {
        let events = diff(&self.state, &next);
        if next.status == RoundStatus::Idle {
            self.spawner.cancel();
        }
        if events.contains(&GameEvent::RoundEnded) {
            info!("round ended with score {}", next.score);
        }
        self.state = next;
        events
    }
}

fn diff(prev: &GameState, next: &GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if next.score > prev.score {
        let points = next.score - prev.score;
        debug!("goal reached for {} points", points);
        events.push(GameEvent::GoalReached { points });
    }
    if next.score != prev.score {
        events.push(GameEvent::ScoreChanged(next.score));
    }
    if next.lives < prev.lives {
        events.push(GameEvent::PlayerDied);
    }
    if next.lives != prev.lives {
        events.push(GameEvent::LivesChanged(next.lives));
    }
    if prev.status == RoundStatus::Running && next.status == RoundStatus::Idle {
        events.push(GameEvent::RoundEnded);
    }
    events
}
