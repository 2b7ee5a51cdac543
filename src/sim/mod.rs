//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through frame deltas handed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod swing;
pub mod tick;

pub use collision::{Bounds, Sphere, intersects, segment_intersects};
pub use spawner::{HitOutcome, SpawnReport, Spawner, pick_weighted};
pub use state::{FrameSnapshot, GameEvent, GamePhase, Target, TargetId};
pub use swing::{Hammer, Swing, SwingState};
pub use tick::{GameState, RunStats, TickInput, tick};
