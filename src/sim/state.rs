//! Game state and presentation snapshot
//!
//! One `GameState` is one session: it exclusively owns the snake, the apple
//! and the seeded RNG used for apple placement.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::apple::Apple;
use super::grid::{Cell, Field, Heading};
use super::snake::Snake;

/// Undrained events kept per session; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the snake
    Running,
    /// Snake hit itself. Terminal.
    GameOver,
}

/// Something the presentation layer may want to react to (sound, flash, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DirectionChanged { heading: Heading },
    /// Head bounced off a wall and landed at `at`
    Reflected {
        at: Cell,
        flipped_x: bool,
        flipped_y: bool,
    },
    AppleEaten { at: Cell, length: usize },
    AppleRelocated { at: Cell },
    SelfCollision { at: Cell },
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Body cells, head first
    pub body: Vec<Cell>,
    pub apple: Cell,
    pub length: usize,
    /// Apples eaten
    pub score: u32,
    pub ticks: u64,
    pub invulnerable: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub field: Field,
    pub snake: Snake,
    pub apple: Apple,
    pub phase: GamePhase,
    /// Apples eaten
    pub score: u32,
    /// Committed moves
    pub time_ticks: u64,
    rng: Pcg32,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a new session on `field` with the given seed
    pub fn new(field: Field, seed: u64) -> Self {
        log::info!(
            "New game on {}x{} field (cell {}), seed {}",
            field.width,
            field.height,
            field.cell_size,
            seed
        );
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = Snake::new(field.center());
        let apple = Apple::spawn(&field, &snake.body(), &mut rng);

        Self {
            seed,
            field,
            snake,
            apple,
            phase: GamePhase::Running,
            score: 0,
            time_ticks: 0,
            rng,
            events: VecDeque::new(),
        }
    }

    /// New session on the default 800x600 field
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Field::default(), seed)
    }

    /// Start over on the same field
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(self.field, seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Queue a heading change for the next tick. Ignored once the game is over.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if self.is_game_over() {
            log::debug!("Game over, ignoring steer to {heading}");
            return false;
        }
        let previous = self.snake.heading();
        let applied = self.snake.steer(heading);
        if applied && heading != previous {
            self.push_event(GameEvent::DirectionChanged { heading });
        }
        applied
    }

    /// Resample the apple away from the current body
    pub fn respawn_apple(&mut self) -> Cell {
        let body = self.snake.body();
        self.apple.relocate(&self.field, &body, &mut self.rng)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            body: self.snake.body(),
            apple: self.apple.position(),
            length: self.snake.len(),
            score: self.score,
            ticks: self.time_ticks,
            invulnerable: self.snake.is_invulnerable(),
            game_over: self.is_game_over(),
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
            log::debug!("Event queue full, dropped oldest event");
        }
        self.events.push_back(event);
    }

    /// Take all events raised since the last drain. Only the newest
    /// `MAX_PENDING_EVENTS` are kept between drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}
