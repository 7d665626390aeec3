//! Snake movement, wall reflection and self-collision
//!
//! The snake never dies on a wall. A head that would leave the field bounces:
//! the offending heading component is negated, the new head is recomputed from
//! the old one, and self-collision is suppressed for a few ticks so the bounce
//! cannot immediately kill it.

use std::collections::VecDeque;

use serde::Serialize;

use super::grid::{Cell, Field, Heading};
use crate::consts::INVULNERABILITY_TICKS;

/// Which axes were flipped by a wall bounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reflection {
    pub flipped_x: bool,
    pub flipped_y: bool,
}

/// Result of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move committed; head is the new head
    Moved {
        head: Cell,
        reflection: Option<Reflection>,
    },
    /// Head would land on the body. Nothing was committed.
    SelfCollision { at: Cell },
    /// Empty body, nothing to move
    Stalled,
}

impl MoveOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, MoveOutcome::SelfCollision { .. })
    }
}

/// The player's snake
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snake {
    /// Body segments, head first
    body: VecDeque<Cell>,
    heading: Heading,
    invulnerable: bool,
    /// Ticks left before self-collision checks resume
    invulnerability_ticks: u32,
}

impl Snake {
    /// One-cell snake heading right
    pub fn new(start: Cell) -> Self {
        log::info!("Snake created at {start}");
        Self::from_body([start], Heading::RIGHT)
    }

    /// Snake with an explicit body (head first)
    pub fn from_body(body: impl IntoIterator<Item = Cell>, heading: Heading) -> Self {
        Self {
            body: body.into_iter().collect(),
            heading,
            invulnerable: false,
            invulnerability_ticks: 0,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn tail(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    /// Copy of the body, head first
    pub fn body(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Current direction as a raw unit vector
    pub fn direction(&self) -> glam::IVec2 {
        self.heading.delta()
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn invulnerability_ticks(&self) -> u32 {
        self.invulnerability_ticks
    }

    /// Check if any segment, head included, covers `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if `cell` hits the body behind the head
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == cell)
    }

    /// Request a new heading from raw components.
    ///
    /// Returns false (and keeps the current heading) for an exact reversal or
    /// for anything that is not a cardinal unit vector.
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> bool {
        match Heading::new(dx, dy) {
            Some(heading) => self.steer(heading),
            None => {
                log::warn!("Ignoring non-unit direction ({dx}, {dy})");
                false
            }
        }
    }

    /// Request a new heading. A 180-degree turn into the neck is ignored.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading.is_opposite(self.heading) {
            log::debug!("Ignoring 180-degree turn to {heading}");
            return false;
        }
        if heading != self.heading {
            log::info!("Direction changed to {heading}");
        }
        self.heading = heading;
        true
    }

    /// Advance one cell. Returns true on self-collision (game over).
    pub fn move_in(&mut self, field: &Field) -> bool {
        self.step(field).is_game_over()
    }

    /// Advance one cell, reporting what happened
    pub fn step(&mut self, field: &Field) -> MoveOutcome {
        let Some(head) = self.head() else {
            log::error!("Snake body is empty, move skipped");
            return MoveOutcome::Stalled;
        };

        let mut new_head = head.offset(field.step(self.heading));
        let mut reflection = None;

        if !field.contains(new_head) {
            log::info!("Boundary hit at {new_head}, reflecting");
            reflection = Some(self.reflect(new_head, field));
            new_head = head.offset(field.step(self.heading));
        }

        if !self.invulnerable && self.collides_with_body(new_head) {
            log::error!("Snake ran into itself at {new_head}, game over");
            return MoveOutcome::SelfCollision { at: new_head };
        }

        self.body.push_front(new_head);
        self.body.pop_back();

        // The bouncing move keeps the full window
        if reflection.is_none() && self.invulnerability_ticks > 0 {
            self.invulnerability_ticks -= 1;
            if self.invulnerability_ticks == 0 {
                self.invulnerable = false;
                log::debug!("Invulnerability ended");
            }
        }

        log::trace!("Snake moved to {new_head}");
        MoveOutcome::Moved {
            head: new_head,
            reflection,
        }
    }

    /// Flip whichever heading components carried `candidate` out of bounds
    fn reflect(&mut self, candidate: Cell, field: &Field) -> Reflection {
        let flipped_x = !field.contains_x(candidate.x);
        let flipped_y = !field.contains_y(candidate.y);

        if flipped_x {
            self.heading = self.heading.flip_x();
            log::debug!("X direction flipped to {}", self.heading.delta().x);
        }
        if flipped_y {
            self.heading = self.heading.flip_y();
            log::debug!("Y direction flipped to {}", self.heading.delta().y);
        }

        self.invulnerable = true;
        self.invulnerability_ticks = INVULNERABILITY_TICKS;
        log::info!("Invulnerable for {INVULNERABILITY_TICKS} ticks");

        Reflection {
            flipped_x,
            flipped_y,
        }
    }

    /// Append a copy of the tail
    pub fn grow(&mut self) {
        let Some(tail) = self.tail() else {
            log::warn!("Tried to grow an empty snake");
            return;
        };
        self.body.push_back(tail);
        log::info!("Snake grew to length {}", self.body.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIDTH: i32 = 800;
    const HEIGHT: i32 = 600;
    const SEGMENT: i32 = 20;

    fn field() -> Field {
        Field::new(WIDTH, HEIGHT, SEGMENT)
    }

    #[test]
    fn test_snake_initialization() {
        let snake = Snake::new(Cell::new(100, 100));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Some(Cell::new(100, 100)));
        assert_eq!(snake.heading(), Heading::RIGHT);
        assert!(!snake.is_invulnerable());
        assert_eq!(snake.invulnerability_ticks(), 0);
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Cell::new(100, 100));
        assert!(!snake.move_in(&field()));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Some(Cell::new(120, 100)));
    }

    #[test]
    fn test_body_is_a_copy() {
        let snake = Snake::new(Cell::new(100, 100));
        let mut body = snake.body();
        body.push(Cell::new(0, 0));
        body[0] = Cell::new(1, 1);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Some(Cell::new(100, 100)));
    }

    #[test]
    fn test_grow_duplicates_tail() {
        let mut snake = Snake::from_body([Cell::new(40, 0), Cell::new(20, 0)], Heading::RIGHT);
        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Some(Cell::new(20, 0)));
        assert_eq!(snake.body()[1], Cell::new(20, 0));
    }

    #[test]
    fn test_left_wall_reflection() {
        let mut snake = Snake::from_body([Cell::new(0, 100)], Heading::LEFT);
        assert_eq!(snake.direction(), glam::IVec2::new(-1, 0));

        assert!(!snake.move_in(&field()));
        assert_eq!(snake.direction(), glam::IVec2::new(1, 0));
        assert_eq!(snake.head(), Some(Cell::new(20, 100)));
        assert!(snake.is_invulnerable());
        assert_eq!(snake.invulnerability_ticks(), 3);
    }

    #[test]
    fn test_all_walls_reflect_instead_of_killing() {
        let cases = [
            (Cell::new(0, 100), Heading::LEFT, Heading::RIGHT, Cell::new(20, 100)),
            (Cell::new(WIDTH - SEGMENT, 100), Heading::RIGHT, Heading::LEFT, Cell::new(760, 100)),
            (Cell::new(100, 0), Heading::UP, Heading::DOWN, Cell::new(100, 20)),
            (Cell::new(100, HEIGHT - SEGMENT), Heading::DOWN, Heading::UP, Cell::new(100, 560)),
        ];

        for (start, heading, bounced, head) in cases {
            let mut snake = Snake::from_body([start], heading);
            assert!(!snake.move_in(&field()), "wall at {start} should bounce");
            assert_eq!(snake.heading(), bounced);
            assert_eq!(snake.head(), Some(head));
        }
    }

    #[test]
    fn test_reflection_reports_axes() {
        let mut snake = Snake::from_body([Cell::new(0, 100)], Heading::LEFT);
        let outcome = snake.step(&field());
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                head: Cell::new(20, 100),
                reflection: Some(Reflection {
                    flipped_x: true,
                    flipped_y: false
                }),
            }
        );
    }

    #[test]
    fn test_invulnerability_counts_down() {
        let mut snake = Snake::from_body([Cell::new(0, 100)], Heading::LEFT);
        snake.move_in(&field());
        assert_eq!(snake.invulnerability_ticks(), 3);

        snake.move_in(&field());
        assert_eq!(snake.invulnerability_ticks(), 2);
        assert!(snake.is_invulnerable());

        snake.move_in(&field());
        assert_eq!(snake.invulnerability_ticks(), 1);
        assert!(snake.is_invulnerable());

        snake.move_in(&field());
        assert_eq!(snake.invulnerability_ticks(), 0);
        assert!(!snake.is_invulnerable());
    }

    #[test]
    fn test_snake_dies_on_self_collision() {
        let mut snake = Snake::new(Cell::new(100, 100));
        for _ in 0..3 {
            snake.grow();
        }
        assert_eq!(snake.len(), 4);

        snake.set_direction(1, 0);
        assert!(!snake.move_in(&field()));
        snake.set_direction(0, 1);
        assert!(!snake.move_in(&field()));
        snake.set_direction(-1, 0);
        assert!(!snake.move_in(&field()));
        snake.set_direction(0, -1);
        let before = snake.body();
        assert!(snake.move_in(&field()));

        // Game-over moves are not committed
        assert_eq!(snake.body(), before);
    }

    #[test]
    fn test_no_self_collision_while_invulnerable() {
        // Head in the top-left corner moving up; the bounce lands on body[2]
        let mut snake = Snake::from_body(
            [Cell::new(0, 0), Cell::new(20, 0), Cell::new(0, 20), Cell::new(20, 20)],
            Heading::UP,
        );
        assert!(!snake.move_in(&field()));
        assert_eq!(snake.head(), Some(Cell::new(0, 20)));
        assert!(snake.is_invulnerable());
    }

    #[test]
    fn test_self_collision_suppressed_until_window_expires() {
        // Straight column under the top wall; after the bounce the head runs
        // back down over its own body.
        let mut snake = Snake::from_body((0..=10).map(|i| Cell::new(20, i * SEGMENT)), Heading::UP);

        assert!(!snake.move_in(&field()));
        assert_eq!(snake.heading(), Heading::DOWN);
        assert_eq!(snake.invulnerability_ticks(), 3);

        for remaining in [2, 1, 0] {
            let next = snake.head().unwrap().offset(field().step(snake.heading()));
            assert!(snake.collides_with_body(next));
            assert!(!snake.move_in(&field()), "no game over with {remaining} ticks left");
            assert_eq!(snake.invulnerability_ticks(), remaining);
        }
        assert!(!snake.is_invulnerable());
        assert_eq!(snake.head(), Some(Cell::new(20, 80)));

        let before = snake.body();
        assert!(snake.move_in(&field()));
        assert_eq!(snake.body(), before);
    }

    #[test]
    fn test_each_axis_flips_independently() {
        let mut snake = Snake::from_body([Cell::new(780, 0)], Heading::UP);
        snake.move_in(&field());
        assert_eq!(snake.heading(), Heading::DOWN);
        snake.steer(Heading::RIGHT);
        snake.move_in(&field());
        assert_eq!(snake.heading(), Heading::LEFT);
        assert_eq!(snake.head(), Some(Cell::new(760, 20)));
    }

    #[test]
    fn test_reject_180_degree_turn() {
        let mut snake = Snake::new(Cell::new(100, 100));
        assert!(!snake.set_direction(-1, 0));
        assert_eq!(snake.heading(), Heading::RIGHT);

        assert!(snake.set_direction(0, 1));
        assert_eq!(snake.heading(), Heading::DOWN);
    }

    #[test]
    fn test_reject_non_unit_direction() {
        let mut snake = Snake::new(Cell::new(100, 100));
        assert!(!snake.set_direction(1, 1));
        assert!(!snake.set_direction(0, 0));
        assert!(!snake.set_direction(3, 0));
        assert_eq!(snake.heading(), Heading::RIGHT);
    }

    #[test]
    fn test_empty_body_is_a_no_op() {
        let mut snake = Snake::from_body([], Heading::RIGHT);
        assert_eq!(snake.step(&field()), MoveOutcome::Stalled);
        assert!(!snake.move_in(&field()));
        snake.grow();
        assert!(snake.is_empty());
        assert_eq!(snake.head(), None);
    }

    fn in_bounds_cell() -> impl Strategy<Value = Cell> {
        (0..WIDTH / SEGMENT, 0..HEIGHT / SEGMENT).prop_map(|(c, r)| Cell::new(c * SEGMENT, r * SEGMENT))
    }

    /// Cells on the edge that `heading` runs into
    fn edge_cell(heading: Heading) -> impl Strategy<Value = Cell> {
        let last_col = WIDTH - SEGMENT;
        let last_row = HEIGHT - SEGMENT;
        (0..WIDTH / SEGMENT, 0..HEIGHT / SEGMENT).prop_map(move |(c, r)| {
            if heading == Heading::LEFT {
                Cell::new(0, r * SEGMENT)
            } else if heading == Heading::RIGHT {
                Cell::new(last_col, r * SEGMENT)
            } else if heading == Heading::UP {
                Cell::new(c * SEGMENT, 0)
            } else {
                Cell::new(c * SEGMENT, last_row)
            }
        })
    }

    fn any_heading() -> impl Strategy<Value = Heading> {
        prop::sample::select(Heading::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_in_bounds_move_shifts_head(start in in_bounds_cell(), heading in any_heading()) {
            let field = field();
            let expected = start.offset(field.step(heading));
            prop_assume!(field.contains(expected));

            let mut snake = Snake::from_body([start], heading);
            prop_assert!(!snake.move_in(&field));
            prop_assert_eq!(snake.len(), 1);
            prop_assert_eq!(snake.head(), Some(expected));
            prop_assert_eq!(snake.heading(), heading);
        }

        #[test]
        fn prop_out_of_bounds_move_reflects((heading, start) in any_heading().prop_flat_map(|h| (Just(h), edge_cell(h)))) {
            let field = field();
            prop_assert!(!field.contains(start.offset(field.step(heading))));

            let mut snake = Snake::from_body([start], heading);
            prop_assert!(!snake.move_in(&field));
            prop_assert_eq!(snake.heading(), heading.reversed());
            prop_assert_eq!(snake.head(), Some(start.offset(field.step(heading.reversed()))));
            prop_assert!(snake.is_invulnerable());
            prop_assert_eq!(snake.invulnerability_ticks(), 3);
        }

        #[test]
        fn prop_grow_adds_tail_copy(start in in_bounds_cell(), grows in 0usize..10) {
            let mut snake = Snake::new(start);
            for _ in 0..grows {
                snake.grow();
            }
            let tail = snake.tail();
            let len = snake.len();
            snake.grow();
            prop_assert_eq!(snake.len(), len + 1);
            prop_assert_eq!(snake.tail(), tail);
        }

        #[test]
        fn prop_set_direction(current in any_heading(), requested in any_heading()) {
            let mut snake = Snake::from_body([Cell::new(100, 100)], current);
            let delta = requested.delta();
            let applied = snake.set_direction(delta.x, delta.y);
            if requested == current.reversed() {
                prop_assert!(!applied);
                prop_assert_eq!(snake.heading(), current);
            } else {
                prop_assert!(applied);
                prop_assert_eq!(snake.heading(), requested);
            }
        }
    }
}
