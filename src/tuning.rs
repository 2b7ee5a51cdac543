//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! The defaults reproduce the stock game; a JSON document can override any
//! subset of fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no target types defined")]
    NoTargetTypes,
    #[error("target type `{name}` has invalid spawn weight {weight}")]
    BadSpawnWeight { name: String, weight: f32 },
    #[error("total spawn weight must be positive, got {0}")]
    ZeroTotalWeight(f32),
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

/// How swing hits are detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionMode {
    /// Overlap test at the hammer's current position only
    #[default]
    Discrete,
    /// Test the whole segment the hammer covered this frame
    Swept,
}

/// Template for a kind of target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetType {
    pub name: String,
    pub base_points: u32,
    pub base_health: u32,
    /// Top approach speed at difficulty 1 (units/s)
    pub base_speed: f32,
    /// Relative chance of being picked
    pub spawn_weight: f32,
    /// Collision radius; `None` falls back to `DEFAULT_TARGET_RADIUS`
    #[serde(default)]
    pub radius: Option<f32>,
}

impl TargetType {
    pub fn new(name: &str, points: u32, health: u32, speed: f32, weight: f32) -> Self {
        Self {
            name: name.to_string(),
            base_points: points,
            base_health: health,
            base_speed: speed,
            spawn_weight: weight,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Radius given to spawned instances
    pub fn spawn_radius(&self) -> f32 {
        self.radius.unwrap_or(DEFAULT_TARGET_RADIUS)
    }
}

/// Axis-aligned box where targets appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-10.0, 1.0, -15.0),
            max: Vec3::new(10.0, 5.0, -5.0),
        }
    }
}

impl SpawnBounds {
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Full balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between spawns at difficulty 1
    pub spawn_interval: f32,
    pub spawn_bounds: SpawnBounds,
    /// Targets beyond this z are dropped as misses
    pub miss_z: f32,
    pub target_types: Vec<TargetType>,
    pub swing_duration: f32,
    pub hammer_radius: f32,
    pub hand_anchor: Vec3,
    pub swing_reach: f32,
    pub collision: CollisionMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: SPAWN_INTERVAL,
            spawn_bounds: SpawnBounds::default(),
            miss_z: MISS_Z,
            target_types: default_target_types(),
            swing_duration: SWING_DURATION,
            hammer_radius: HAMMER_RADIUS,
            hand_anchor: HAND_ANCHOR,
            swing_reach: SWING_REACH,
            collision: CollisionMode::Discrete,
        }
    }
}

/// Stock roster: common red orbs, sturdy purple crates, rare golden gems
pub fn default_target_types() -> Vec<TargetType> {
    vec![
        TargetType::new("basic", 10, 1, 5.0, 70.0).with_radius(0.6),
        // Crates have no explicit radius
        TargetType::new("tough", 30, 2, 3.0, 20.0),
        TargetType::new("bonus", 50, 1, 7.0, 10.0).with_radius(0.5),
    ]
}

impl Tuning {
    /// Parse and validate a tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sum of all spawn weights
    pub fn total_spawn_weight(&self) -> f32 {
        self.target_types.iter().map(|t| t.spawn_weight).sum()
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.target_types.is_empty() {
            return Err(TuningError::NoTargetTypes);
        }
        for t in &self.target_types {
            if !t.spawn_weight.is_finite() || t.spawn_weight < 0.0 {
                return Err(TuningError::BadSpawnWeight {
                    name: t.name.clone(),
                    weight: t.spawn_weight,
                });
            }
            // Targets that never reach `miss_z` would never leave the pool
            positive("target_types.base_speed", t.base_speed)?;
            if let Some(r) = t.radius {
                positive("target_types.radius", r)?;
            }
        }
        let total = self.total_spawn_weight();
        if !(total.is_finite() && total > 0.0) {
            return Err(TuningError::ZeroTotalWeight(total));
        }
        positive("spawn_interval", self.spawn_interval)?;
        positive("swing_duration", self.swing_duration)?;
        positive("hammer_radius", self.hammer_radius)?;
        positive("swing_reach", self.swing_reach)?;
        if !self.miss_z.is_finite() {
            return Err(TuningError::NonFinite {
                field: "miss_z",
                value: self.miss_z,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.target_types.len(), 3);
        assert!((tuning.total_spawn_weight() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_radius_fallback() {
        let types = default_target_types();
        assert!((types[0].spawn_radius() - 0.6).abs() < 1e-6);
        assert!((types[1].spawn_radius() - DEFAULT_TARGET_RADIUS).abs() < 1e-6);
        assert!((types[2].spawn_radius() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_interval": 1.0, "collision": "Swept" }"#)
            .expect("valid tuning");
        assert_eq!(tuning.spawn_interval, 1.0);
        assert_eq!(tuning.collision, CollisionMode::Swept);
        assert_eq!(tuning.target_types, default_target_types());
        assert_eq!(tuning.hand_anchor, HAND_ANCHOR);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serializes");
        let back = Tuning::from_json(&json).expect("parses");
        assert_eq!(tuning, back);
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            Tuning::from_json(r#"{ "target_types": [] }"#),
            Err(TuningError::NoTargetTypes)
        ));

        let zero = r#"{ "target_types": [
            { "name": "a", "base_points": 1, "base_health": 1, "base_speed": 1.0, "spawn_weight": 0.0 }
        ] }"#;
        assert!(matches!(
            Tuning::from_json(zero),
            Err(TuningError::ZeroTotalWeight(_))
        ));

        let negative = r#"{ "target_types": [
            { "name": "a", "base_points": 1, "base_health": 1, "base_speed": 1.0, "spawn_weight": -1.0 }
        ] }"#;
        assert!(matches!(
            Tuning::from_json(negative),
            Err(TuningError::BadSpawnWeight { .. })
        ));

        assert!(matches!(
            Tuning::from_json(r#"{ "swing_duration": 0.0 }"#),
            Err(TuningError::NonPositive { field: "swing_duration", .. })
        ));

        let stalled = r#"{ "target_types": [
            { "name": "a", "base_points": 1, "base_health": 1, "base_speed": -5.0, "spawn_weight": 1.0 }
        ] }"#;
        assert!(matches!(
            Tuning::from_json(stalled),
            Err(TuningError::NonPositive { field: "target_types.base_speed", .. })
        ));

        let parked = Tuning {
            target_types: vec![TargetType::new("a", 1, 1, 0.0, 1.0)],
            ..Tuning::default()
        };
        assert!(matches!(
            parked.validate(),
            Err(TuningError::NonPositive { field: "target_types.base_speed", .. })
        ));

        let endless = Tuning {
            miss_z: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            endless.validate(),
            Err(TuningError::NonFinite { field: "miss_z", .. })
        ));

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_spawn_bounds_contains() {
        let bounds = SpawnBounds::default();
        assert!(bounds.contains(Vec3::new(0.0, 1.0, -10.0)));
        assert!(!bounds.contains(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!bounds.contains(Vec3::new(11.0, 3.0, -10.0)));
    }
}
