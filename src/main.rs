//! Summit Run entry point
//!
//! Handles platform-specific initialization and runs the hike loop.
//! On wasm the host starts a hike via `start_hike` and gets the outcome
//! back through its callbacks; natively the binary runs a headless hike
//! with a small steering autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm_hike {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use summit_run::hud::{HudSnapshot, HudSync};
    use summit_run::render::draw_frame;
    use summit_run::sim::{self, HikeOutcome, HikeParams, HikeState};

    /// One running hike: simulation state plus the platform attachments
    struct Hike {
        state: HikeState,
        rng: Pcg32,
        hud: HudSync,
        canvas: Option<HtmlCanvasElement>,
        ctx: Option<CanvasRenderingContext2d>,
        on_complete: js_sys::Function,
        on_fail: js_sys::Function,
        /// Pending animation frame, cancelled on teardown
        raf_id: Option<i32>,
    }

    impl Hike {
        fn new(
            params: HikeParams,
            seed: u64,
            canvas: Option<HtmlCanvasElement>,
            on_complete: js_sys::Function,
            on_fail: js_sys::Function,
        ) -> Self {
            let ctx = canvas.as_ref().and_then(context_2d);
            if ctx.is_none() {
                log::warn!("no usable render target; hike will run without drawing");
            }
            Self {
                state: HikeState::new(params),
                rng: Pcg32::seed_from_u64(seed),
                hud: HudSync::default(),
                canvas,
                ctx,
                on_complete,
                on_fail,
                raf_id: None,
            }
        }

        /// Render the current frame, sizing the canvas to its container
        fn render(&self) {
            let (Some(canvas), Some(ctx)) = (&self.canvas, &self.ctx) else {
                return;
            };
            let w = canvas.client_width().max(1) as u32;
            let h = canvas.client_height().max(1) as u32;
            if canvas.width() != w {
                canvas.set_width(w);
            }
            if canvas.height() != h {
                canvas.set_height(h);
            }
            draw_frame(ctx, &self.state, w as f32, h as f32);
        }

        /// Push a snapshot into the HUD DOM elements
        fn publish(&self, snap: &HudSnapshot) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document
                .query_selector("#hud-stamina .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&(snap.stamina.floor() as u32).to_string()));
            }

            if let Some(el) = document
                .query_selector("#hud-distance .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&snap.distance_m.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-stamina-bar") {
                let pct = if snap.max_stamina > 0.0 {
                    (snap.stamina / snap.max_stamina * 100.0).clamp(0.0, 100.0)
                } else {
                    0.0
                };
                let _ = el.set_attribute("style", &format!("width:{pct:.0}%"));
            }
        }
    }

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into().ok())
    }

    /// Host-facing handle for a running hike
    #[wasm_bindgen]
    pub struct HikeHandle {
        inner: Rc<RefCell<Hike>>,
    }

    #[wasm_bindgen]
    impl HikeHandle {
        /// Tear the hike down: stop the loop and cancel the pending frame
        /// so no disposed state is ever touched again.
        pub fn abort(&self) {
            let mut hike = self.inner.borrow_mut();
            hike.state.running = false;
            if let Some(id) = hike.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            log::info!("hike aborted by host");
        }
    }

    /// Start a hike on the canvas with the given vitals.
    ///
    /// `on_complete` receives `{ distance, time_ms, collected }` on success;
    /// `on_fail` is called with no arguments on exhaustion.
    pub fn start_hike(
        canvas_id: &str,
        max_stamina: f64,
        agility: f64,
        on_complete: js_sys::Function,
        on_fail: js_sys::Function,
    ) -> Result<HikeHandle, JsValue> {
        let params = HikeParams::new(max_stamina as f32, agility as f32);
        let seed = js_sys::Date::now() as u64;
        log::info!(
            "hike starting: stamina {} agility {} seed {}",
            params.max_stamina,
            params.agility,
            seed
        );

        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());

        let hike = Rc::new(RefCell::new(Hike::new(
            params,
            seed,
            canvas,
            on_complete,
            on_fail,
        )));

        setup_input_handlers(hike.clone())?;
        schedule_frame(hike.clone());

        Ok(HikeHandle { inner: hike })
    }

    fn setup_input_handlers(hike: Rc<RefCell<Hike>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard: left/right key edges only (auto-repeat is not a new intent)
        {
            let hike = hike.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut h = hike.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => h.state.move_left(),
                    "ArrowRight" => h.state.move_right(),
                    _ => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch: the canvas halves act as discrete left/right press regions
        let canvas = hike.borrow().canvas.clone();
        if let Some(canvas) = canvas {
            let hike = hike.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f64 - rect.left();
                    let mut h = hike.borrow_mut();
                    if x < rect.width() / 2.0 {
                        h.state.move_left();
                    } else {
                        h.state.move_right();
                    }
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn schedule_frame(hike: Rc<RefCell<Hike>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let h = hike.clone();
        let closure = Closure::once(move |_time: f64| frame(h));
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => hike.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn frame(hike: Rc<RefCell<Hike>>) {
        let outcome = {
            let mut h = hike.borrow_mut();
            h.raf_id = None;
            if !h.state.running {
                // Torn down between scheduling and firing
                return;
            }

            let outcome = sim::tick(&mut h.state, &mut h.rng);
            h.render();
            let snap = match outcome {
                Some(_) => Some(h.hud.force(&h.state)),
                None => h.hud.poll(&h.state),
            };
            if let Some(snap) = snap {
                h.publish(&snap);
            }
            outcome
        };

        // Callbacks run outside any borrow; the host may call abort() from them
        match outcome {
            None => schedule_frame(hike),
            Some(HikeOutcome::Exhausted) => {
                let (on_fail, distance) = {
                    let h = hike.borrow();
                    (h.on_fail.clone(), h.state.displayed_distance())
                };
                log::info!("hike failed: stamina exhausted at {distance}m");
                if let Err(e) = on_fail.call0(&JsValue::NULL) {
                    log::error!("on_fail callback failed: {e:?}");
                }
            }
            Some(HikeOutcome::Summited(result)) => {
                let on_complete = hike.borrow().on_complete.clone();
                log::info!(
                    "summit reached: {}m in {:.0}ms ({} pickups)",
                    result.distance,
                    result.time_ms,
                    result.collected
                );
                let payload = serde_json::to_string(&result)
                    .ok()
                    .and_then(|json| js_sys::JSON::parse(&json).ok())
                    .unwrap_or(JsValue::NULL);
                if let Err(e) = on_complete.call1(&JsValue::NULL, &payload) {
                    log::error!("on_complete callback failed: {e:?}");
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Summit Run loaded");
}

/// Start a hike from JavaScript
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_hike(
    canvas_id: &str,
    max_stamina: f64,
    agility: f64,
    on_complete: js_sys::Function,
    on_fail: js_sys::Function,
) -> Result<wasm_hike::HikeHandle, JsValue> {
    wasm_hike::start_hike(canvas_id, max_stamina, agility, on_complete, on_fail)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use summit_run::sim::{self, HikeOutcome, HikeParams, HikeState};

    env_logger::init();
    log::info!("Summit Run (native) starting headless hike...");

    let params = HikeParams::from_provisions(17.5, 7.5);
    let mut state = HikeState::new(params);
    let mut rng = Pcg32::seed_from_u64(0x5c4a11);

    let outcome = loop {
        autopilot(&mut state);
        if let Some(outcome) = sim::tick(&mut state, &mut rng) {
            break outcome;
        }
    };

    match outcome {
        HikeOutcome::Exhausted => log::info!(
            "exhausted at {}m after {:.1}s",
            state.displayed_distance(),
            state.elapsed_ms / 1000.0
        ),
        HikeOutcome::Summited(result) => log::info!(
            "summited: {}m in {:.1}s, {} pickups",
            result.distance,
            result.time_ms / 1000.0,
            result.collected
        ),
    }
}

/// Minimal steering for the headless run: dodge rocks in the current
/// column, drift toward water when low on stamina.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &mut summit_run::sim::HikeState) {
    use summit_run::consts::PLAYER_SIZE;
    use summit_run::sim::{ObstacleKind, player_hitbox};

    let hitbox = player_hitbox(state.target_x);
    let threat_center = state
        .obstacles
        .iter()
        .find(|obs| {
            obs.kind == ObstacleKind::Rock
                && obs.pos.y > 300.0
                && obs.pos.y < 690.0
                && obs.pos.x < hitbox.x + hitbox.width
                && obs.pos.x + obs.width > hitbox.x
        })
        .map(|rock| rock.pos.x + rock.width / 2.0);

    if let Some(rock_center) = threat_center {
        if rock_center > state.target_x + PLAYER_SIZE / 2.0 {
            state.move_left();
        } else {
            state.move_right();
        }
        return;
    }

    if state.stamina < state.params.max_stamina * 0.4 {
        let water_center = state
            .obstacles
            .iter()
            .filter(|obs| obs.kind == ObstacleKind::Water && obs.pos.y < 650.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|water| water.pos.x + water.width / 2.0);
        if let Some(center) = water_center {
            if center < state.target_x {
                state.move_left();
            } else if center > state.target_x + PLAYER_SIZE {
                state.move_right();
            }
        }
    }
}
