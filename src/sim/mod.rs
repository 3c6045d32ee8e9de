//! Deterministic hike simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick runs to completion before the next is scheduled
//! - Injected, seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, player_hitbox, resolve_collisions};
pub use spawn::{kind_for_roll, maybe_spawn, spawn_interval_ms};
pub use state::{HikeOutcome, HikeParams, HikeResult, HikeState, Obstacle, ObstacleKind};
pub use tick::tick;
