use std::time::{Duration, Instant};

use breakout::breakout::mechanics::{BreakoutMechanics, GameInput, TIME_GRANULARITY};

pub const MAX_FRAMES: usize = 100_000;

#[ctor::ctor]
fn init() {
    breakout::util::init_logging();
}

/// Steps frame by frame until `done` holds; returns the time of the last frame.
pub fn run_until(
    mechanics: &mut BreakoutMechanics,
    mut now: Instant,
    input: GameInput,
    done: impl Fn(&BreakoutMechanics) -> bool,
) -> Instant {
    for _ in 0..MAX_FRAMES {
        now += TIME_GRANULARITY;
        mechanics.time_step(input, now);
        if done(mechanics) {
            return now;
        }
    }
    panic!("condition not reached within {MAX_FRAMES} frames");
}

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}
