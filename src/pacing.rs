//! Tick pacing for an external frame loop
//!
//! The shell feeds wall-clock frame deltas; the pacer answers how many
//! simulation ticks are due at the current speed tier.

use std::time::Duration;

use crate::settings::SpeedTier;

/// Maximum ticks run for a single frame, so a stalled frame doesn't
/// fast-forward the snake
pub const MAX_CATCH_UP_TICKS: u32 = 4;

/// Longest frame delta honoured
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct TickPacer {
    speed: SpeedTier,
    accumulator: Duration,
}

impl TickPacer {
    pub fn new(speed: SpeedTier) -> Self {
        Self {
            speed,
            accumulator: Duration::ZERO,
        }
    }

    pub fn speed(&self) -> SpeedTier {
        self.speed
    }

    /// Switch tiers. Time already accumulated carries over.
    pub fn set_speed(&mut self, speed: SpeedTier) {
        self.speed = speed;
    }

    /// Add a frame's elapsed time; returns the number of ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_DELTA);
        let interval = self.speed.tick_interval();

        let mut due = 0;
        while self.accumulator >= interval && due < MAX_CATCH_UP_TICKS {
            self.accumulator -= interval;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
