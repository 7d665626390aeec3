//! Bounce Snake headless runner
//!
//! Plays one autopilot session on a simulated 60 Hz frame clock and prints
//! the final snapshot as JSON. Set `RUST_LOG` to watch the simulation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bounce_snake::sim::{GameEvent, GameState, TickInput, tick};
use bounce_snake::{Settings, TickPacer};

/// Simulated frame length
const FRAME: Duration = Duration::from_micros(16_667);

/// Give up after this many frames (about five minutes)
const MAX_FRAMES: u32 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bounce Snake (headless) starting...");

    let settings = Settings::default().validated();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(seed_from_clock)
            .unwrap_or(0)
    });

    let mut state = GameState::new(settings.field(), seed);
    let mut pacer = TickPacer::new(settings.speed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    'frames: for _ in 0..MAX_FRAMES {
        for _ in 0..pacer.advance(FRAME) {
            if tick(&mut state, &input) {
                break 'frames;
            }
        }
        for event in state.drain_events() {
            if let GameEvent::AppleEaten { length, .. } = event {
                log::info!("Length {length}");
            }
        }
    }

    let snapshot = state.snapshot();
    log::info!(
        "Session over: length {}, score {}, {} ticks",
        snapshot.length,
        snapshot.score,
        snapshot.ticks
    );
    match snapshot.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

/// Wall-clock milliseconds as a run seed, saturating instead of truncating
#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock(since_epoch: Duration) -> u64 {
    u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives the library directly
}
