//! Aiming camera and camera shake
//!
//! Taps arrive in screen pixels. They are mapped to normalized device
//! coordinates, unprojected through the camera into a world-space ray, and
//! the swing lands a fixed distance along that ray.

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::random_range;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length (zero if degenerate)
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Perspective camera behind and above the thrower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 10.0),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            fov_y_degrees: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_at, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Track the canvas size. Zero-height viewports are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Pixel position to NDC (-1..1, y up)
    pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        Vec2::new((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
    }

    /// World ray from the eye through an NDC point
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let through = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray {
            origin: self.eye,
            direction: (through - self.eye).normalize_or_zero(),
        }
    }

    /// Where a swing aimed at `ndc` lands
    pub fn swing_target(&self, ndc: Vec2, reach: f32) -> Vec3 {
        self.ray_from_ndc(ndc).at(reach)
    }
}

/// Short, fading random jolt of the camera
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraShake {
    intensity: f32,
    duration: f32,
    remaining: f32,
    /// Offset to add to the camera position this frame
    pub offset: Vec3,
}

impl CameraShake {
    /// Start a shake, replacing any running one
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.duration = duration.max(f32::EPSILON);
        self.remaining = self.duration;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Fade out and pick this frame's offset
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if !self.is_active() {
            self.offset = Vec3::ZERO;
            return;
        }
        let amount = self.intensity * (self.remaining / self.duration);
        self.offset = Vec3::new(
            random_range(rng, -amount, amount),
            random_range(rng, -amount, amount),
            random_range(rng, -amount, amount),
        );
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
