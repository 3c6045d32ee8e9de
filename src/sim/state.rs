//! Hike state and core simulation types
//!
//! Everything the tick mutates lives here, in one exclusively-owned record.
//! Input handlers only ever write `target_x`; the tick is the sole authority
//! that integrates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_player_x;
use crate::consts::*;

/// Kinds of things that come down the trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Hitting one costs a chunk of stamina
    Rock,
    /// Refills stamina up to the ceiling
    Water,
    /// Permanently raises forward speed
    Oxygen,
}

impl ObstacleKind {
    /// Horizontal extent in virtual units
    pub fn width(&self) -> f32 {
        match self {
            ObstacleKind::Rock => 60.0,
            ObstacleKind::Water | ObstacleKind::Oxygen => 40.0,
        }
    }

    /// Vertical extent in virtual units
    pub fn height(&self) -> f32 {
        match self {
            ObstacleKind::Rock => 50.0,
            ObstacleKind::Water | ObstacleKind::Oxygen => 40.0,
        }
    }

    /// Whether consuming this counts toward the pickup tally
    pub fn is_supply(&self) -> bool {
        !matches!(self, ObstacleKind::Rock)
    }
}

/// A trail entity. Immutable after spawn except for `pos.y`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    /// Spawn off-screen above the visible field at the given x
    pub fn new(id: u32, kind: ObstacleKind, x: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, SPAWN_Y),
            width: kind.width(),
            height: kind.height(),
        }
    }

    /// True once the obstacle has fully left the field past the bottom
    pub fn is_off_screen(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT + OFFSCREEN_MARGIN
    }
}

/// Immutable inputs supplied by the host once at hike start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HikeParams {
    /// Starting stamina and the refill ceiling
    pub max_stamina: f32,
    /// Scalar in (0, 1], higher is faster; clamped at construction
    pub agility: f32,
}

impl HikeParams {
    pub fn new(max_stamina: f32, agility: f32) -> Self {
        Self {
            max_stamina,
            agility: agility.max(MIN_AGILITY),
        }
    }

    /// Derive parameters from the kitchen's provisioning totals
    pub fn from_provisions(total_energy: f32, total_weight: f32) -> Self {
        Self::new(
            total_energy * STAMINA_PER_ENERGY,
            1.0 - total_weight / WEIGHT_DRAG_DIVISOR,
        )
    }

    /// Forward speed at the trailhead
    pub fn initial_speed(&self) -> f32 {
        BASE_SPEED + self.agility * AGILITY_SPEED_FACTOR
    }
}

/// Result of a successful hike, produced exactly once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikeResult {
    /// Whole meters covered
    pub distance: u32,
    /// Simulated time on the trail
    pub time_ms: f64,
    /// Supply pickups consumed along the way
    pub collected: u32,
}

/// Terminal signal raised to the host
#[derive(Debug, Clone, PartialEq)]
pub enum HikeOutcome {
    /// Stamina ran out; no payload
    Exhausted,
    /// Distance goal reached
    Summited(HikeResult),
}

/// Complete hike state (owned by the loop, mutated only inside a tick)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HikeState {
    pub params: HikeParams,
    /// Current horizontal position, converging toward `target_x`
    pub player_x: f32,
    /// Desired horizontal position, written by input handlers (last-write-wins)
    pub target_x: f32,
    /// Forward scroll speed; Oxygen only ever adds to it
    pub speed: f32,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Spawner gate on the simulated clock
    pub last_spawn_ms: f64,
    /// Internal value may dip negative on the terminal tick
    pub stamina: f32,
    /// Monotone accumulator, terminal at the goal distance
    pub distance: f32,
    /// Nominal simulated time, +16 per tick
    pub elapsed_ms: f64,
    /// True while the loop is active; cleared exactly once
    pub running: bool,
    /// Supply pickups consumed so far
    pub collected: u32,
    /// Rock-impact feedback, consumed by the render pass
    pub flash_ticks: u8,
    /// Next obstacle ID
    next_id: u32,
}

impl HikeState {
    /// Start a hike at the center of the field
    pub fn new(params: HikeParams) -> Self {
        let start_x = FIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
        Self {
            params,
            player_x: start_x,
            target_x: start_x,
            speed: params.initial_speed(),
            obstacles: Vec::new(),
            last_spawn_ms: 0.0,
            stamina: params.max_stamina,
            distance: 0.0,
            elapsed_ms: 0.0,
            running: true,
            collected: 0,
            flash_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Shift the movement target one step left. Safe to call repeatedly
    /// between ticks; the clamp is idempotent.
    pub fn move_left(&mut self) {
        self.target_x = clamp_player_x(self.target_x - MOVE_STEP);
    }

    /// Shift the movement target one step right
    pub fn move_right(&mut self) {
        self.target_x = clamp_player_x(self.target_x + MOVE_STEP);
    }

    /// Stamina as shown to the player - floored at zero
    pub fn displayed_stamina(&self) -> f32 {
        self.stamina.max(0.0)
    }

    /// Distance as shown to the player - whole meters
    pub fn displayed_distance(&self) -> u32 {
        self.distance.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agility_clamped_to_minimum() {
        let params = HikeParams::new(100.0, -0.5);
        assert_eq!(params.agility, MIN_AGILITY);
        let params = HikeParams::new(100.0, 0.0);
        assert_eq!(params.agility, MIN_AGILITY);
    }

    #[test]
    fn test_initial_speed_from_agility() {
        let params = HikeParams::new(100.0, 0.5);
        assert_eq!(params.initial_speed(), 5.0);
    }

    #[test]
    fn test_provisions_formula() {
        // 12 energy, 3 weight: stamina 120, agility 0.8
        let params = HikeParams::from_provisions(12.0, 3.0);
        assert_eq!(params.max_stamina, 120.0);
        assert!((params.agility - 0.8).abs() < 1e-6);

        // Overloaded pack still yields the minimum agility
        let heavy = HikeParams::from_provisions(12.0, 30.0);
        assert_eq!(heavy.agility, MIN_AGILITY);
    }

    #[test]
    fn test_move_left_clamps_at_edge() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        state.target_x = 160.0;
        state.move_left();
        assert_eq!(state.target_x, 80.0);
        state.move_left();
        assert_eq!(state.target_x, 0.0);
        state.move_left();
        assert_eq!(state.target_x, 0.0);
    }

    #[test]
    fn test_move_right_noop_at_right_edge() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        state.target_x = 360.0;
        state.move_right();
        assert_eq!(state.target_x, 360.0);
    }

    #[test]
    fn test_double_move_accumulates_before_tick() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        state.target_x = 300.0;
        state.move_left();
        state.move_left();
        assert_eq!(state.target_x, 140.0);
    }

    #[test]
    fn test_displayed_stamina_floors_at_zero() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        state.stamina = -100.0;
        assert_eq!(state.displayed_stamina(), 0.0);
        assert!(state.stamina < 0.0);
    }

    #[test]
    fn test_obstacle_dimensions_by_kind() {
        let rock = Obstacle::new(1, ObstacleKind::Rock, 10.0);
        assert_eq!((rock.width, rock.height), (60.0, 50.0));
        let water = Obstacle::new(2, ObstacleKind::Water, 10.0);
        assert_eq!((water.width, water.height), (40.0, 40.0));
        assert_eq!(rock.pos.y, SPAWN_Y);
    }

    #[test]
    fn test_obstacle_ids_are_unique() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        let a = state.next_obstacle_id();
        let b = state.next_obstacle_id();
        assert_ne!(a, b);
    }
}
