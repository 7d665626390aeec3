//! Grid geometry shared by every simulation entity
//!
//! Coordinates are pixel-equivalent integers and every in-bounds cell sits on a
//! multiple of the field's cell size:
//! - `Cell`: one grid position (structural equality)
//! - `Heading`: one of the four cardinal unit vectors
//! - `Field`: the `width x height` playfield and its cell size

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH};

/// A grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Fallback position used when no free cell exists
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This cell shifted by a pixel offset
    #[inline]
    pub fn offset(self, delta: IVec2) -> Self {
        Self::from(self.as_ivec2() + delta)
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Manhattan distance in pixels
    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<IVec2> for Cell {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement direction (never the zero vector, never diagonal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IVec2")]
pub struct Heading(IVec2);

/// Raw vector that is not one of the four cardinal unit vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHeading(pub IVec2);

impl fmt::Display for InvalidHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) is not a cardinal unit vector", self.0.x, self.0.y)
    }
}

impl std::error::Error for InvalidHeading {}

impl TryFrom<IVec2> for Heading {
    type Error = InvalidHeading;

    fn try_from(v: IVec2) -> Result<Self, Self::Error> {
        Heading::new(v.x, v.y).ok_or(InvalidHeading(v))
    }
}

impl Heading {
    pub const UP: Heading = Heading(IVec2::NEG_Y);
    pub const DOWN: Heading = Heading(IVec2::Y);
    pub const LEFT: Heading = Heading(IVec2::NEG_X);
    pub const RIGHT: Heading = Heading(IVec2::X);

    /// All headings, in a stable order
    pub const ALL: [Heading; 4] = [Heading::UP, Heading::DOWN, Heading::LEFT, Heading::RIGHT];

    /// Build a heading from raw components. Returns `None` unless `(dx, dy)`
    /// is one of the four cardinal unit vectors.
    pub fn new(dx: i32, dy: i32) -> Option<Self> {
        if dx.abs() + dy.abs() == 1 {
            Some(Self(IVec2::new(dx, dy)))
        } else {
            None
        }
    }

    /// Unit delta in cell units
    #[inline]
    pub fn delta(self) -> IVec2 {
        self.0
    }

    pub fn reversed(self) -> Self {
        Self(-self.0)
    }

    /// True if turning from `self` to `other` would be a 180-degree turn
    pub fn is_opposite(self, other: Heading) -> bool {
        self.0 == -other.0
    }

    /// Negate the X component (wall bounce on a vertical edge)
    pub fn flip_x(self) -> Self {
        Self(IVec2::new(-self.0.x, self.0.y))
    }

    /// Negate the Y component (wall bounce on a horizontal edge)
    pub fn flip_y(self) -> Self {
        Self(IVec2::new(self.0.x, -self.0.y))
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT, CELL_SIZE)
    }
}

impl Field {
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    #[inline]
    pub fn contains_x(&self, x: i32) -> bool {
        (0..self.width).contains(&x)
    }

    #[inline]
    pub fn contains_y(&self, y: i32) -> bool {
        (0..self.height).contains(&y)
    }

    /// Check if a cell lies within `[0, width) x [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        self.contains_x(cell.x) && self.contains_y(cell.y)
    }

    /// Pixel offset of one step along `heading`
    #[inline]
    pub fn step(&self, heading: Heading) -> IVec2 {
        heading.delta() * self.cell_size
    }

    /// Number of whole cells across
    pub fn columns(&self) -> i32 {
        self.width.checked_div(self.cell_size).unwrap_or(0).max(0)
    }

    /// Number of whole cells down
    pub fn rows(&self) -> i32 {
        self.height.checked_div(self.cell_size).unwrap_or(0).max(0)
    }

    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Every grid cell, column by column (x outer, y inner)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.cell_size;
        let rows = self.rows();
        (0..self.columns()).flat_map(move |col| (0..rows).map(move |row| Cell::new(col * size, row * size)))
    }

    /// Field midpoint snapped down to the grid
    pub fn center(&self) -> Cell {
        let snap = |v: i32| {
            if self.cell_size > 0 {
                v / self.cell_size * self.cell_size
            } else {
                v
            }
        };
        Cell::new(snap(self.width / 2), snap(self.height / 2))
    }
}
