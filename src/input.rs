//! Key mapping for the UI shell
//!
//! W/A/S/D steer; the Up/Down arrows cycle the speed tier instead of moving.
//! Key names follow the DOM `KeyboardEvent.key` spelling.

use crate::settings::SpeedTier;
use crate::sim::{GameState, Heading};

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Steer(Heading),
    SpeedUp,
    SpeedDown,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(KeyCommand::Steer(Heading::UP)),
            "s" | "S" => Some(KeyCommand::Steer(Heading::DOWN)),
            "a" | "A" => Some(KeyCommand::Steer(Heading::LEFT)),
            "d" | "D" => Some(KeyCommand::Steer(Heading::RIGHT)),
            "ArrowUp" => Some(KeyCommand::SpeedUp),
            "ArrowDown" => Some(KeyCommand::SpeedDown),
            _ => None,
        }
    }

    /// Apply between ticks. Returns the speed tier to use from now on.
    pub fn apply(self, state: &mut GameState, speed: SpeedTier) -> SpeedTier {
        if state.is_game_over() {
            return speed;
        }
        match self {
            KeyCommand::Steer(heading) => {
                state.steer(heading);
                speed
            }
            KeyCommand::SpeedUp => {
                let next = speed.faster();
                log::info!("Speed: {}", next.as_str());
                next
            }
            KeyCommand::SpeedDown => {
                let next = speed.slower();
                log::info!("Speed: {}", next.as_str());
                next
            }
        }
    }
}
