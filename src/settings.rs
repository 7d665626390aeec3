//! Game settings and speed selection
//!
//! Loaded from JSON by the shell; nothing is persisted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::Field;

/// Tick-rate selector, cycled with the Up/Down keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedTier {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl SpeedTier {
    const CYCLE: [SpeedTier; 3] = [SpeedTier::Slow, SpeedTier::Medium, SpeedTier::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedTier::Slow => "Slow",
            SpeedTier::Medium => "Medium",
            SpeedTier::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedTier::Slow),
            "medium" | "med" => Some(SpeedTier::Medium),
            "fast" => Some(SpeedTier::Fast),
            _ => None,
        }
    }

    /// Simulation ticks per second for this tier
    pub fn ticks_per_second(&self) -> u32 {
        match self {
            SpeedTier::Slow => 5,
            SpeedTier::Medium => 10,
            SpeedTier::Fast => 15,
        }
    }

    /// Time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.ticks_per_second()))
    }

    fn index(&self) -> usize {
        match self {
            SpeedTier::Slow => 0,
            SpeedTier::Medium => 1,
            SpeedTier::Fast => 2,
        }
    }

    /// Next tier up, wrapping from Fast to Slow
    pub fn faster(&self) -> Self {
        Self::CYCLE[(self.index() + 1) % 3]
    }

    /// Next tier down, wrapping from Slow to Fast
    pub fn slower(&self) -> Self {
        Self::CYCLE[(self.index() + 2) % 3]
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Field width in pixels
    pub field_width: i32,
    /// Field height in pixels
    pub field_height: i32,
    /// Side of one grid cell in pixels
    pub cell_size: i32,
    /// Starting speed tier
    pub speed: SpeedTier,
    /// Fixed run seed; the shell picks one when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            cell_size: CELL_SIZE,
            speed: SpeedTier::Medium,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Repair geometry the grid can't represent
    pub fn validated(mut self) -> Self {
        if self.cell_size <= 0 {
            log::warn!("Invalid cell size {}, using {}", self.cell_size, CELL_SIZE);
            self.cell_size = CELL_SIZE;
        }
        self.field_width = Self::snap_extent("width", self.field_width, self.cell_size);
        self.field_height = Self::snap_extent("height", self.field_height, self.cell_size);
        self
    }

    /// At least one cell, and a whole number of cells
    fn snap_extent(name: &str, extent: i32, cell_size: i32) -> i32 {
        if extent < cell_size {
            log::warn!("Field {name} {extent} is smaller than one cell, using {cell_size}");
            return cell_size;
        }
        let snapped = extent / cell_size * cell_size;
        if snapped != extent {
            log::warn!("Field {name} {extent} is not a multiple of {cell_size}, using {snapped}");
        }
        snapped
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height, self.cell_size)
    }
}
