//! Simulation entities and the render-facing snapshot types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Sphere;

/// Stable handle for a live target
pub type TargetId = u32;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, final score on display
    GameOver,
}

/// Something flying at the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Index into the tuning's target type table
    pub kind: usize,
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    pub health: u32,
    pub points: u32,
    /// Cosmetic orientation (radians per axis)
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
}

impl Target {
    /// Integrate motion and spin over `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation += self.rotation_speed * dt;
    }

    /// Has it flown past the player?
    #[inline]
    pub fn is_missed(&self, miss_z: f32) -> bool {
        self.pos.z > miss_z
    }
}

impl Sphere for Target {
    fn center(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Things that happened during a tick, for sound/FX/UI hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    SwingStarted { target: Vec3 },
    TargetSpawned { id: TargetId, kind: usize },
    /// Hit but still standing
    TargetDamaged { id: TargetId, health: u32 },
    TargetDestroyed { id: TargetId, points: u32, pos: Vec3 },
    /// Flew past the player; no penalty
    TargetMissed { id: TargetId },
}

/// Render view of a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub id: TargetId,
    pub kind: String,
    pub pos: Vec3,
    pub rotation: Vec3,
    pub radius: f32,
    pub health: u32,
}

/// Render view of the hammer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HammerView {
    pub pos: Vec3,
    pub rotation: Vec3,
    pub swinging: bool,
}

/// Frame-consistent, read-only copy of everything the renderer draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub score_text: String,
    pub difficulty: f32,
    pub targets: Vec<TargetView>,
    pub hammer: HammerView,
    pub camera_offset: Vec3,
}
