//! Summit Run - a lane-runner hiking mini-game
//!
//! Core modules:
//! - `sim`: Deterministic hike simulation (movement, spawning, collisions, stamina)
//! - `hud`: Throttled publication of vitals to the surrounding UI
//! - `render`: Virtual-to-physical viewport scaling and the canvas draw pass

pub mod hud;
pub mod render;
pub mod sim;

pub use hud::{HudSnapshot, HudSync};
pub use sim::{HikeOutcome, HikeParams, HikeResult, HikeState, Obstacle, ObstacleKind};

/// Game configuration constants
pub mod consts {
    /// Virtual coordinate space - all physics math happens in these units
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// The field divides into 5 equal lanes (obstacle placement only;
    /// the player is not lane-locked)
    pub const LANE_COUNT: u32 = 5;
    pub const LANE_WIDTH: f32 = FIELD_WIDTH / LANE_COUNT as f32;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Fixed vertical position of the player hitbox near the bottom of the field
    pub const PLAYER_Y: f32 = 650.0;
    /// Horizontal hitbox inset from each side
    pub const PLAYER_HITBOX_INSET: f32 = 5.0;
    /// How far one move-left/move-right intent shifts the target
    pub const MOVE_STEP: f32 = 80.0;
    /// Exponential smoothing factor pulling player_x toward target_x each tick
    pub const MOVE_LERP: f32 = 0.15;

    /// Forward speed: base plus agility contribution
    pub const BASE_SPEED: f32 = 4.0;
    pub const AGILITY_SPEED_FACTOR: f32 = 2.0;
    /// Agility below this is clamped up rather than faulted
    pub const MIN_AGILITY: f32 = 0.1;

    /// Nominal tick duration; simulated time advances by this regardless of
    /// the actual frame delta
    pub const TICK_MS: f64 = 16.0;
    /// Ambient stamina drain per tick
    pub const STAMINA_DRAIN: f32 = 0.5;
    /// distance gained per tick = speed / SPEED_TO_METERS
    pub const SPEED_TO_METERS: f32 = 10.0;
    /// Hike succeeds when distance reaches this many virtual meters
    pub const GOAL_DISTANCE: f32 = 2000.0;

    /// Obstacles enter above the visible field and are pruned past the
    /// bottom with the same margin
    pub const SPAWN_Y: f32 = -100.0;
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Spawn gate: interval_ms = 1000 / (speed * SPAWN_RATE_FACTOR).
    /// Uncapped - very high speeds produce spawn storms (known balance bug).
    pub const SPAWN_RATE_FACTOR: f32 = 0.2;
    /// Type selection thresholds, strict `>`, checked Oxygen first
    pub const OXYGEN_THRESHOLD: f32 = 0.95;
    pub const WATER_THRESHOLD: f32 = 0.8;

    /// Collision effects
    pub const ROCK_STAMINA_PENALTY: f32 = 200.0;
    pub const WATER_STAMINA_REFILL: f32 = 150.0;
    pub const OXYGEN_SPEED_BOOST: f32 = 0.5;

    /// Impact flash duration in ticks
    pub const FLASH_TICKS: u8 = 3;

    /// Kitchen boundary formula (host-side parameter derivation)
    pub const STAMINA_PER_ENERGY: f32 = 10.0;
    pub const WEIGHT_DRAG_DIVISOR: f32 = 15.0;
}

/// Center x of a lane in virtual units
#[inline]
pub fn lane_center(lane: u32) -> f32 {
    lane as f32 * consts::LANE_WIDTH + consts::LANE_WIDTH / 2.0
}

/// Clamp a horizontal position so the player stays fully on the field
#[inline]
pub fn clamp_player_x(x: f32) -> f32 {
    x.clamp(0.0, consts::FIELD_WIDTH - consts::PLAYER_SIZE)
}
