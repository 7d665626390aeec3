//! Bounce Snake - grid snake that reflects off walls instead of dying
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake, apple, tick driver)
//! - `settings`: Field geometry and the 3-level speed selector
//! - `input`: Key-name to command mapping for a UI shell
//! - `pacing`: Converts frame time into due simulation ticks
//!
//! Windowing, drawing and the animation loop itself belong to the shell.

pub mod input;
pub mod pacing;
pub mod settings;
pub mod sim;

pub use input::KeyCommand;
pub use pacing::TickPacer;
pub use settings::{Settings, SpeedTier};

/// Game configuration constants
pub mod consts {
    /// Side of one grid cell in pixels
    pub const CELL_SIZE: i32 = 20;

    /// Default field dimensions
    pub const FIELD_WIDTH: i32 = 800;
    pub const FIELD_HEIGHT: i32 = 600;

    /// Ticks of self-collision immunity after a wall bounce
    pub const INVULNERABILITY_TICKS: u32 = 3;
}
