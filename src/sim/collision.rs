//! Collision detection and response
//!
//! Axis-aligned bounding boxes only. The player hitbox is fixed in a
//! vertical band near the bottom of the field and inset horizontally so
//! near-misses feel fair.

use super::state::{HikeState, ObstacleKind};
use crate::consts::*;

/// An axis-aligned box in virtual units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict-inequality overlap: exact edge contact does not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// The player's hitbox at the given horizontal position
#[inline]
pub fn player_hitbox(player_x: f32) -> Rect {
    Rect::new(
        player_x + PLAYER_HITBOX_INSET,
        PLAYER_Y,
        PLAYER_SIZE - 2.0 * PLAYER_HITBOX_INSET,
        PLAYER_SIZE,
    )
}

/// Test every active obstacle against the player and apply type effects.
///
/// Iterates in reverse spawn order so consumed obstacles can be removed in
/// place; each obstacle is evaluated and removed at most once per tick, and
/// survivors keep their relative order.
pub fn resolve_collisions(state: &mut HikeState) {
    let hitbox = player_hitbox(state.player_x);

    for i in (0..state.obstacles.len()).rev() {
        let obs = &state.obstacles[i];
        let obs_rect = Rect::new(obs.pos.x, obs.pos.y, obs.width, obs.height);
        if !hitbox.overlaps(&obs_rect) {
            continue;
        }

        let obs = state.obstacles.remove(i);
        match obs.kind {
            ObstacleKind::Rock => {
                state.stamina -= ROCK_STAMINA_PENALTY;
                state.flash_ticks = FLASH_TICKS;
            }
            ObstacleKind::Water => {
                state.stamina =
                    (state.stamina + WATER_STAMINA_REFILL).min(state.params.max_stamina);
            }
            ObstacleKind::Oxygen => {
                state.speed += OXYGEN_SPEED_BOOST;
            }
        }
        if obs.kind.is_supply() {
            state.collected += 1;
        }
    }
}
