//! Frame rendering
//!
//! The draw pass is a pure projection of `HikeState`: it scales the 400x800
//! virtual space to the physical canvas and never mutates simulation state.
//! On wasm it targets a 2d canvas context; the `Viewport` math is platform
//! independent so it can be tested natively.

use crate::consts::*;

/// Per-axis scale from virtual units to physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Viewport {
    pub fn new(physical_width: f32, physical_height: f32) -> Self {
        Self {
            scale_x: physical_width / FIELD_WIDTH,
            scale_y: physical_height / FIELD_HEIGHT,
        }
    }

    /// Virtual x to physical pixels (canvas APIs take f64)
    #[inline]
    pub fn x(&self, vx: f32) -> f64 {
        (vx * self.scale_x) as f64
    }

    /// Virtual y to physical pixels
    #[inline]
    pub fn y(&self, vy: f32) -> f64 {
        (vy * self.scale_y) as f64
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::draw_frame;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::f64::consts::TAU;

    use web_sys::CanvasRenderingContext2d;

    use super::Viewport;
    use crate::consts::*;
    use crate::sim::{HikeState, ObstacleKind};

    /// Draw one frame of the hike onto a 2d canvas context
    pub fn draw_frame(
        ctx: &CanvasRenderingContext2d,
        state: &HikeState,
        physical_width: f32,
        physical_height: f32,
    ) {
        let vp = Viewport::new(physical_width, physical_height);
        let w = physical_width as f64;
        let h = physical_height as f64;

        // Night-sky background
        ctx.set_fill_style_str("#000");
        ctx.fill_rect(0.0, 0.0, w, h);

        draw_lane_guides(ctx, &vp, h);
        draw_obstacles(ctx, state, &vp);
        draw_player(ctx, state, &vp);

        // Rock-impact feedback
        if state.flash_ticks > 0 {
            ctx.set_fill_style_str("#fff");
            ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    fn draw_lane_guides(ctx: &CanvasRenderingContext2d, vp: &Viewport, height: f64) {
        ctx.set_stroke_style_str("#333");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for lane in 1..LANE_COUNT {
            let x = vp.x(lane as f32 * LANE_WIDTH);
            ctx.move_to(x, 0.0);
            ctx.line_to(x, height);
        }
        ctx.stroke();
    }

    fn draw_player(ctx: &CanvasRenderingContext2d, state: &HikeState, vp: &Viewport) {
        let px = vp.x(state.player_x);
        let py = vp.y(PLAYER_Y);
        let size = vp.x(PLAYER_SIZE);

        ctx.set_fill_style_str("#fff");
        ctx.begin_path();
        ctx.move_to(px + size / 2.0, py);
        ctx.line_to(px + size, py + size);
        ctx.line_to(px, py + size);
        ctx.fill();

        // Glow pass
        ctx.set_shadow_color("#84cc16");
        ctx.set_shadow_blur(20.0);
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }

    fn draw_obstacles(ctx: &CanvasRenderingContext2d, state: &HikeState, vp: &Viewport) {
        for obs in &state.obstacles {
            let ox = vp.x(obs.pos.x);
            let oy = vp.y(obs.pos.y);
            let ow = vp.x(obs.width);
            let oh = vp.y(obs.height);

            match obs.kind {
                ObstacleKind::Rock => {
                    ctx.set_fill_style_str("#3f3f46");
                    ctx.fill_rect(ox, oy, ow, oh);
                    ctx.set_stroke_style_str("#52525b");
                    ctx.begin_path();
                    ctx.move_to(ox, oy);
                    ctx.line_to(ox + ow, oy + oh);
                    ctx.move_to(ox + ow, oy);
                    ctx.line_to(ox, oy + oh);
                    ctx.stroke();
                }
                ObstacleKind::Water => {
                    ctx.set_fill_style_str("#06b6d4");
                    ctx.begin_path();
                    let _ = ctx.arc(ox + ow / 2.0, oy + oh / 2.0, ow / 2.0, 0.0, TAU);
                    ctx.fill();
                }
                ObstacleKind::Oxygen => {
                    ctx.set_fill_style_str("#fff");
                    ctx.fill_rect(ox, oy, ow, oh);
                    ctx.set_stroke_style_str("#000");
                    ctx.stroke_rect(ox + 2.0, oy + 2.0, ow - 4.0, oh - 4.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_scales_per_axis() {
        let vp = Viewport::new(800.0, 1200.0);
        assert_eq!(vp.scale_x, 2.0);
        assert_eq!(vp.scale_y, 1.5);
        assert_eq!(vp.x(200.0), 400.0);
        assert_eq!(vp.y(800.0), 1200.0);
    }

    #[test]
    fn test_viewport_identity_at_virtual_size() {
        let vp = Viewport::new(400.0, 800.0);
        assert_eq!(vp.x(123.0), 123.0);
        assert_eq!(vp.y(456.0), 456.0);
    }
}
