//! Throttled publication of vitals to the surrounding UI
//!
//! The sim ticks every frame; the HUD only needs eventual consistency.
//! A fixed every-N-ticks cadence replaces per-tick publication, with a
//! forced final snapshot so the terminal values always land on screen.

use serde::Serialize;

use crate::sim::HikeState;

/// What the surrounding UI gets to see
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    /// Floored at zero - the internal value may be negative on the last tick
    pub stamina: f32,
    pub max_stamina: f32,
    /// Whole meters
    pub distance_m: u32,
}

impl HudSnapshot {
    fn of(state: &HikeState) -> Self {
        Self {
            stamina: state.displayed_stamina(),
            max_stamina: state.params.max_stamina,
            distance_m: state.displayed_distance(),
        }
    }
}

/// Fixed-cadence HUD throttle
#[derive(Debug)]
pub struct HudSync {
    interval: u32,
    ticks_since: u32,
}

impl HudSync {
    /// Publishing every 6 ticks keeps the HUD at ~10 Hz
    pub const DEFAULT_INTERVAL: u32 = 6;

    pub fn new(interval: u32) -> Self {
        let interval = interval.max(1);
        Self {
            interval,
            // First poll publishes immediately
            ticks_since: interval,
        }
    }

    /// Call once per tick; yields a snapshot when the cadence is due
    pub fn poll(&mut self, state: &HikeState) -> Option<HudSnapshot> {
        self.ticks_since += 1;
        if self.ticks_since < self.interval {
            return None;
        }
        self.ticks_since = 0;
        Some(HudSnapshot::of(state))
    }

    /// Unthrottled snapshot for the terminal tick
    pub fn force(&mut self, state: &HikeState) -> HudSnapshot {
        self.ticks_since = 0;
        HudSnapshot::of(state)
    }
}

impl Default for HudSync {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HikeParams;

    #[test]
    fn test_first_poll_publishes() {
        let state = HikeState::new(HikeParams::new(100.0, 0.5));
        let mut hud = HudSync::new(6);
        assert!(hud.poll(&state).is_some());
    }

    #[test]
    fn test_cadence_every_n_ticks() {
        let state = HikeState::new(HikeParams::new(100.0, 0.5));
        let mut hud = HudSync::new(4);

        assert!(hud.poll(&state).is_some());
        let mut published = 0;
        for _ in 0..12 {
            if hud.poll(&state).is_some() {
                published += 1;
            }
        }
        assert_eq!(published, 3);
    }

    #[test]
    fn test_snapshot_floors_negative_stamina() {
        let mut state = HikeState::new(HikeParams::new(100.0, 0.5));
        state.stamina = -42.0;
        state.distance = 123.9;

        let snap = HudSync::default().force(&state);
        assert_eq!(snap.stamina, 0.0);
        assert_eq!(snap.distance_m, 123);
        assert_eq!(snap.max_stamina, 100.0);
    }

    #[test]
    fn test_force_resets_cadence() {
        let state = HikeState::new(HikeParams::new(100.0, 0.5));
        let mut hud = HudSync::new(4);
        let _ = hud.force(&state);
        assert!(hud.poll(&state).is_none());
    }

    #[test]
    fn test_zero_interval_treated_as_every_tick() {
        let state = HikeState::new(HikeParams::new(100.0, 0.5));
        let mut hud = HudSync::new(0);
        assert!(hud.poll(&state).is_some());
        assert!(hud.poll(&state).is_some());
    }
}
