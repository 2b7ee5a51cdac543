//! Mjolnir Smash - swing the hammer, smash what flies at you
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, swings, collisions, scoring)
//! - `camera`: Aiming rays and the cosmetic camera shake
//! - `frame`: Display timestamps to frame deltas
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `web`: Browser bindings (wasm32 only)

pub mod camera;
pub mod frame;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Base time between spawns at difficulty 1 (seconds)
    pub const SPAWN_INTERVAL: f32 = 2.0;
    /// Targets past this z have flown by the player
    pub const MISS_Z: f32 = 5.0;
    /// Radius used for targets whose type has no explicit radius
    pub const DEFAULT_TARGET_RADIUS: f32 = 0.6;
    /// Radius assumed by collision checks when an entity has none
    pub const DEFAULT_COLLISION_RADIUS: f32 = 1.0;
    /// Cosmetic spin range per axis (radians/s)
    pub const TARGET_SPIN: f32 = 2.0;

    /// Hammer swing duration (seconds)
    pub const SWING_DURATION: f32 = 0.5;
    /// Hammer collision radius
    pub const HAMMER_RADIUS: f32 = 0.6;
    /// World position of the thrower's hand (body at y=1, hand offset (0.9, 0.3, 0))
    pub const HAND_ANCHOR: Vec3 = Vec3::new(0.9, 1.3, 0.0);
    /// Distance along the aim ray where a swing lands
    pub const SWING_REACH: f32 = 15.0;

    /// Score needed to add 1.0 to the difficulty multiplier
    pub const DIFFICULTY_SCORE_STEP: f32 = 500.0;

    /// Frames longer than this are dropped (tab switches, first frame)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Camera shake on a destroyed target
    pub const SHAKE_INTENSITY: f32 = 0.1;
    pub const SHAKE_DURATION: f32 = 0.1;
}

/// Uniform float in `[min, max)`. Reversed bounds are fine.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Uniform integer in `[min, max]` (inclusive)
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

/// Clamp without panicking on inverted bounds (`min` wins)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

/// Linear interpolation between `start` and `end`
#[inline]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    (1.0 - amount) * start + amount * end
}

/// Ease-out cubic: fast start, gentle landing
#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// Difficulty multiplier for a score (starts at 1.0, grows linearly)
#[inline]
pub fn difficulty(score: u64) -> f32 {
    1.0 + score as f32 / consts::DIFFICULTY_SCORE_STEP
}

/// Format a score with thousands separators: 12345 -> "12,345"
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
