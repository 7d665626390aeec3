//! Apple placement and consumption
//!
//! Placement samples uniformly among the free grid cells. The RNG is passed in
//! by the caller so a seeded generator reproduces the exact same placements.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Field};

/// The single apple on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Create an apple on a random free cell
    pub fn spawn<R: Rng>(field: &Field, occupied: &[Cell], rng: &mut R) -> Self {
        log::info!("Spawning apple on a {}x{} field", field.width, field.height);
        let mut apple = Self::new(Cell::ORIGIN);
        apple.relocate(field, occupied, rng);
        apple
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move the apple to a random cell not in `occupied`.
    ///
    /// When every cell is occupied the apple falls back to `(0, 0)`, which may
    /// sit inside the snake.
    pub fn relocate<R: Rng>(&mut self, field: &Field, occupied: &[Cell], rng: &mut R) -> Cell {
        let taken: HashSet<Cell> = occupied.iter().copied().collect();
        let free: Vec<Cell> = field.cells().filter(|cell| !taken.contains(cell)).collect();
        log::debug!("{} grid cells, {} free", field.cell_count(), free.len());

        self.position = if free.is_empty() {
            log::warn!("No free cells left, apple placed at {}", Cell::ORIGIN);
            Cell::ORIGIN
        } else {
            let position = free[rng.random_range(0..free.len())];
            log::info!("Apple placed at {position}");
            position
        };
        self.position
    }

    /// Check if the snake head sits on the apple
    pub fn is_eaten(&self, head: Cell) -> bool {
        let eaten = self.position == head;
        if eaten {
            log::info!("Apple eaten at {}", self.position);
        }
        eaten
    }
}
