//! The per-tick simulation pipeline
//!
//! One tick runs to completion before the next is scheduled:
//! spawn -> move -> collide -> drain/accumulate -> evaluate.
//! Simulated time advances by a nominal 16 ms per tick regardless of the
//! actual frame delta; the drift at non-60fps refresh rates is accepted.

use rand::Rng;

use super::collision::resolve_collisions;
use super::spawn::maybe_spawn;
use super::state::{HikeOutcome, HikeResult, HikeState};
use crate::consts::*;

/// Advance the hike by one tick.
///
/// Returns `Some` exactly once, at the tick that detects a terminal
/// condition; that tick also clears `running`, and any further calls are
/// no-ops. Exhaustion takes priority when both conditions hold on the same
/// tick.
pub fn tick(state: &mut HikeState, rng: &mut impl Rng) -> Option<HikeOutcome> {
    if !state.running {
        return None;
    }

    if state.flash_ticks > 0 {
        state.flash_ticks -= 1;
    }

    // Spawn
    maybe_spawn(state, rng);

    // Motion: converge on the requested lane position, scroll the trail
    state.player_x += (state.target_x - state.player_x) * MOVE_LERP;
    for obs in &mut state.obstacles {
        obs.pos.y += state.speed;
    }
    state.obstacles.retain(|obs| !obs.is_off_screen());

    // Collisions
    resolve_collisions(state);

    // Ambient drain and accumulators
    state.stamina -= STAMINA_DRAIN;
    state.distance += state.speed / SPEED_TO_METERS;
    state.elapsed_ms += TICK_MS;

    // Terminal conditions - exhaustion wins a tie
    if state.stamina <= 0.0 {
        state.running = false;
        Some(HikeOutcome::Exhausted)
    } else if state.distance >= GOAL_DISTANCE {
        state.running = false;
        Some(HikeOutcome::Summited(HikeResult {
            distance: state.displayed_distance(),
            time_ms: state.elapsed_ms,
            collected: state.collected,
        }))
    } else {
        None
    }
}
