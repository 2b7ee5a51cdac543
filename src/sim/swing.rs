//! Hammer swing controller
//!
//! The hammer rests at the thrower's hand until a swing is requested. A swing
//! flies from wherever the hammer was to the aimed point along an ease-out
//! curve, lingers for one impact frame at the target, then snaps back to the
//! hand. Only one swing can be in flight; requests made mid-swing are dropped.

use std::f32::consts::PI;

use glam::Vec3;

use super::collision::{Sphere, intersects, segment_intersects};
use crate::tuning::{CollisionMode, Tuning};
use crate::{clamp, ease_out_cubic};

/// One throw from origin to target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    pub origin: Vec3,
    pub target: Vec3,
    /// Session clock at launch (seconds)
    pub start_time: f32,
    pub duration: f32,
    /// 0..=1 linear time progress
    pub progress: f32,
}

impl Swing {
    /// Linear progress at session time `now`
    pub fn progress_at(&self, now: f32) -> f32 {
        clamp((now - self.start_time) / self.duration, 0.0, 1.0)
    }

    /// Eased position for a given linear progress
    pub fn position_at(&self, progress: f32) -> Vec3 {
        self.origin.lerp(self.target, ease_out_cubic(progress))
    }
}

/// Idle at the hand, or mid-swing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SwingState {
    #[default]
    Idle,
    Swinging(Swing),
}

/// The hammer and its swing state machine
#[derive(Debug, Clone)]
pub struct Hammer {
    pub pos: Vec3,
    /// Cosmetic tumble during a swing (radians per axis)
    pub rotation: Vec3,
    radius: f32,
    hand_anchor: Vec3,
    duration: f32,
    collision: CollisionMode,
    state: SwingState,
    /// Position before the latest `advance`, for swept hit tests
    prev_pos: Vec3,
}

impl Hammer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.hand_anchor,
            rotation: Vec3::ZERO,
            radius: tuning.hammer_radius,
            hand_anchor: tuning.hand_anchor,
            duration: tuning.swing_duration,
            collision: tuning.collision,
            state: SwingState::Idle,
            prev_pos: tuning.hand_anchor,
        }
    }

    pub fn state(&self) -> &SwingState {
        &self.state
    }

    /// The in-flight swing, if any
    pub fn swing(&self) -> Option<&Swing> {
        match &self.state {
            SwingState::Swinging(swing) => Some(swing),
            SwingState::Idle => None,
        }
    }

    #[inline]
    pub fn is_swinging(&self) -> bool {
        matches!(self.state, SwingState::Swinging(_))
    }

    pub fn hand_anchor(&self) -> Vec3 {
        self.hand_anchor
    }

    /// Move the resting point (the thrower moved). Takes effect immediately
    /// when idle, otherwise when the current swing returns.
    pub fn set_hand_anchor(&mut self, anchor: Vec3) {
        self.hand_anchor = anchor;
        if !self.is_swinging() {
            self.pos = anchor;
            self.prev_pos = anchor;
        }
    }

    /// Start a swing toward `target` at session time `now`.
    /// Returns false (and changes nothing) if a swing is already in flight.
    pub fn request_swing(&mut self, target: Vec3, now: f32) -> bool {
        if self.is_swinging() {
            log::trace!("Swing ignored, hammer already in flight");
            return false;
        }
        self.state = SwingState::Swinging(Swing {
            origin: self.pos,
            target,
            start_time: now,
            duration: self.duration,
            progress: 0.0,
        });
        self.prev_pos = self.pos;
        true
    }

    /// Step the swing animation to session time `now`.
    /// The call that reaches progress 1 leaves the hammer on its target for
    /// the impact frame; the next call returns it to the hand.
    pub fn advance(&mut self, now: f32) {
        self.prev_pos = self.pos;
        let SwingState::Swinging(swing) = &mut self.state else {
            return;
        };

        if swing.progress >= 1.0 {
            // Impact frame already shown
            self.state = SwingState::Idle;
            self.return_to_hand();
            return;
        }

        swing.progress = swing.progress_at(now);
        let eased = ease_out_cubic(swing.progress);
        self.pos = swing.position_at(swing.progress);
        self.rotation = Vec3::new((eased * PI).sin() * 2.0, 0.0, (eased * PI * 0.5).sin() * 0.5);
    }

    fn return_to_hand(&mut self) {
        self.pos = self.hand_anchor;
        self.prev_pos = self.hand_anchor;
        self.rotation = Vec3::ZERO;
    }

    /// Does the swinging hammer connect with `target` right now?
    /// Always false while idle.
    pub fn test_hit<S: Sphere + ?Sized>(&self, target: &S) -> bool {
        if !self.is_swinging() {
            return false;
        }
        match self.collision {
            CollisionMode::Discrete => intersects(self, target),
            CollisionMode::Swept => segment_intersects(self.prev_pos, self.pos, self.radius, target),
        }
    }

    /// Drop any swing and rest at the hand
    pub fn reset(&mut self) {
        self.state = SwingState::Idle;
        self.return_to_hand();
    }
}

impl Sphere for Hammer {
    fn center(&self) -> Vec3 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}
