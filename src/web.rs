//! Browser bindings
//!
//! The page owns the canvas, the DOM screens and the renderer. It forwards
//! taps and frame callbacks here and reads back a JSON snapshot to draw.

use wasm_bindgen::prelude::*;

use crate::camera::Camera;
use crate::frame::FrameClock;
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::{Settings, format_score};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // The host page installed a logger first; it keeps working
        log::debug!("console_log not installed: {e}");
    }
    log::info!("Mjolnir Smash (wasm) ready");
}

/// Game instance driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    camera: Camera,
    clock: FrameClock,
    pending_swing: Option<glam::Vec3>,
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty for the stock balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str, settings_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| {
                log::warn!("Rejected tuning: {e}");
                to_js(e)
            })?
        };
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).unwrap_or_else(|e| {
                log::warn!("Bad settings, using defaults: {e}");
                Settings::default()
            })
        };
        let seed = js_sys::Date::now() as u64;
        Ok(Self {
            state: GameState::with_config(seed, tuning, settings),
            camera: Camera::default(),
            clock: FrameClock::new(),
            pending_swing: None,
            idle_mode: false,
        })
    }

    /// Start button / restart button
    pub fn start_game(&mut self) {
        self.pending_swing = None;
        self.clock.reset();
        self.state.start_game();
    }

    /// Returns the formatted final score, or `undefined` if not playing
    pub fn end_game(&mut self) -> Option<String> {
        self.state.end_game().map(format_score)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Pointer tap at canvas pixel (x, y). Only registers while playing.
    pub fn tap(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        if self.state.phase != GamePhase::Playing || width <= 0.0 || height <= 0.0 {
            return false;
        }
        let ndc = Camera::screen_to_ndc(x, y, width, height);
        let reach = self.state.tuning().swing_reach;
        self.pending_swing = Some(self.camera.swing_target(ndc, reach));
        true
    }

    /// requestAnimationFrame callback with its timestamp (ms).
    /// Returns this frame's game events as a JSON array (for sounds/FX).
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsValue> {
        if let Some(dt) = self.clock.tick(now_ms) {
            let input = TickInput {
                swing_at: self.pending_swing.take(),
                idle_mode: self.idle_mode,
            };
            tick(&mut self.state, &input, dt);
        }
        serde_json::to_string(&self.state.drain_events()).map_err(to_js)
    }

    pub fn score_text(&self) -> String {
        self.state.score_text()
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.state.phase)
    }

    /// Everything the renderer needs this frame, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(to_js)
    }

    /// Camera setup as JSON, so the renderer and the aiming agree
    pub fn camera_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.camera).map_err(to_js)
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
