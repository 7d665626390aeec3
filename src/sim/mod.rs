//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete move per tick
//! - Seeded RNG only
//! - No rendering, timing or platform dependencies

pub mod apple;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use apple::Apple;
pub use grid::{Cell, Field, Heading, InvalidHeading};
pub use snake::{MoveOutcome, Reflection, Snake};
pub use state::{GameEvent, GamePhase, GameSnapshot, GameState};
pub use tick::{TickInput, advance, autopilot, tick};
