//! Discrete simulation tick
//!
//! One tick: move the snake, stop on self-collision, otherwise check the apple
//! and grow + respawn it when eaten.

use super::grid::Heading;
use super::snake::MoveOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Heading requested since the last tick
    pub steer: Option<Heading>,
    /// Idle/demo mode - the autopilot steers toward the apple
    pub idle_mode: bool,
}

/// Advance the session by one move. Returns true once the game is over.
///
/// Events raised here queue on the state until `GameState::drain_events`;
/// shells that ignore them can leave them, the queue is bounded.
pub fn advance(state: &mut GameState) -> bool {
    if state.phase == GamePhase::GameOver {
        return true;
    }

    let head = match state.snake.step(&state.field) {
        MoveOutcome::SelfCollision { at } => {
            state.phase = GamePhase::GameOver;
            state.push_event(GameEvent::SelfCollision { at });
            log::info!(
                "Game over at length {} after {} ticks",
                state.snake.len(),
                state.time_ticks
            );
            return true;
        }
        MoveOutcome::Stalled => return false,
        MoveOutcome::Moved { head, reflection } => {
            if let Some(r) = reflection {
                state.push_event(GameEvent::Reflected {
                    at: head,
                    flipped_x: r.flipped_x,
                    flipped_y: r.flipped_y,
                });
            }
            head
        }
    };

    state.time_ticks += 1;

    if state.apple.is_eaten(head) {
        state.snake.grow();
        state.score += 1;
        state.push_event(GameEvent::AppleEaten {
            at: head,
            length: state.snake.len(),
        });
        let at = state.respawn_apple();
        state.push_event(GameEvent::AppleRelocated { at });
    }

    false
}

/// Apply the tick's input, then advance
pub fn tick(state: &mut GameState, input: &TickInput) -> bool {
    let steer = if input.idle_mode {
        autopilot(state).or(input.steer)
    } else {
        input.steer
    };

    if let Some(heading) = steer {
        state.steer(heading);
    }

    advance(state)
}

/// Greedy demo steering: among the legal turns whose next cell is inside the
/// field and off the body, take the one closest to the apple. `None` means keep
/// going straight.
pub fn autopilot(state: &GameState) -> Option<Heading> {
    let head = state.snake.head()?;
    let current = state.snake.heading();
    let apple = state.apple.position();

    // Current heading first so ties keep going straight
    let mut candidates = vec![current];
    candidates.extend(Heading::ALL.into_iter().filter(|&h| h != current && !h.is_opposite(current)));

    let best = candidates
        .into_iter()
        .map(|h| (h, head.offset(state.field.step(h))))
        .filter(|&(_, next)| state.field.contains(next) && !state.snake.collides_with_body(next))
        .min_by_key(|&(_, next)| next.manhattan(apple))
        .map(|(h, _)| h)?;

    (best != current).then_some(best)
}
