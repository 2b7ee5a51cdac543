//! Bounding-sphere collision detection
//!
//! Everything that can be hit is approximated by a sphere. The discrete test
//! compares current positions only; the swept test checks the segment a
//! sphere covered during the frame so fast swings can't skip over a target.

use glam::Vec3;

use crate::consts::DEFAULT_COLLISION_RADIUS;

/// Anything with a position and a bounding radius
pub trait Sphere {
    fn center(&self) -> Vec3;

    /// Entities that don't declare a radius are treated as unit spheres
    fn radius(&self) -> f32 {
        DEFAULT_COLLISION_RADIUS
    }
}

/// A free-standing sphere, handy for probes and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub radius: f32,
}

impl Bounds {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Sphere for Bounds {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A bare point, which falls back to the default radius
impl Sphere for Vec3 {
    fn center(&self) -> Vec3 {
        *self
    }
}

/// True when the two spheres overlap (touching is not a hit)
#[inline]
pub fn intersects<A: Sphere + ?Sized, B: Sphere + ?Sized>(a: &A, b: &B) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// Closest point to `p` on the segment `start..end`
pub fn closest_point_on_segment(start: Vec3, end: Vec3, p: Vec3) -> Vec3 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq < 1e-8 {
        return start; // Degenerate segment
    }
    let t = ((p - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    start + seg * t
}

/// Swept test: a sphere of `radius` moving from `start` to `end` touches `b`
pub fn segment_intersects<B: Sphere + ?Sized>(start: Vec3, end: Vec3, radius: f32, b: &B) -> bool {
    let closest = closest_point_on_segment(start, end, b.center());
    closest.distance(b.center()) < radius + b.radius()
}
