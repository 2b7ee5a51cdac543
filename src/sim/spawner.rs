//! Target spawner and live-target pool
//!
//! The spawner owns every live target. Nothing else holds on to a target;
//! the renderer and the session refer to them by `TargetId` and read them
//! through the accessors here. Once a target leaves the pool (smashed or
//! missed) its id is never handed out again.

use glam::Vec3;
use rand::Rng;

use super::state::{Target, TargetId};
use crate::consts::TARGET_SPIN;
use crate::random_range;
use crate::tuning::{SpawnBounds, TargetType, Tuning, default_target_types};

/// Outcome of hitting a target once
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// No live target with that id
    Missing,
    /// Took damage but survived
    Damaged { health: u32 },
    /// Health ran out; removed from the pool
    Destroyed { points: u32, pos: Vec3 },
}

/// What a call to [`Spawner::update`] changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    pub spawned: Option<TargetId>,
    pub missed: Vec<TargetId>,
}

/// Pick an index by cumulative weight: the first entry whose running total
/// reaches `r` wins. Zero-weight entries are never picked; falls back to 0.
pub fn pick_weighted<I>(weights: I, r: f32) -> usize
where
    I: IntoIterator<Item = f32>,
{
    let mut sum = 0.0;
    for (i, w) in weights.into_iter().enumerate() {
        sum += w;
        if w > 0.0 && sum >= r {
            return i;
        }
    }
    0
}

/// Spawns, moves and culls targets
#[derive(Debug, Clone)]
pub struct Spawner {
    types: Vec<TargetType>,
    total_weight: f32,
    bounds: SpawnBounds,
    spawn_interval: f32,
    miss_z: f32,
    /// Seconds since the last spawn; infinite means "spawn right away"
    since_last_spawn: f32,
    targets: Vec<Target>,
    next_id: TargetId,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        let types = if tuning.target_types.is_empty() {
            log::warn!("Tuning has no target types, using the stock roster");
            default_target_types()
        } else {
            tuning.target_types.clone()
        };
        let total_weight = types.iter().map(|t| t.spawn_weight).sum();
        Self {
            types,
            total_weight,
            bounds: tuning.spawn_bounds,
            spawn_interval: tuning.spawn_interval,
            miss_z: tuning.miss_z,
            since_last_spawn: f32::INFINITY,
            targets: Vec::new(),
            next_id: 1,
        }
    }

    /// Live targets in spawn order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn target_type(&self, kind: usize) -> Option<&TargetType> {
        self.types.get(kind)
    }

    /// Effective seconds between spawns. Difficulty below 1 is treated as 1
    /// so it can only ever speed spawning up.
    #[inline]
    pub fn spawn_interval_for(&self, difficulty: f32) -> f32 {
        self.spawn_interval / difficulty.max(1.0)
    }

    /// Weighted random draw over the type table
    pub fn pick_type<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r = rng.random::<f32>() * self.total_weight;
        pick_weighted(self.types.iter().map(|t| t.spawn_weight), r)
    }

    fn allocate_id(&mut self) -> TargetId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one random target somewhere in the spawn box, heading at the player
    pub fn spawn<R: Rng + ?Sized>(&mut self, difficulty: f32, rng: &mut R) -> TargetId {
        let kind = self.pick_type(rng);
        let ty = &self.types[kind];
        let (min, max) = (self.bounds.min, self.bounds.max);

        let pos = Vec3::new(
            random_range(rng, min.x, max.x),
            random_range(rng, min.y, max.y),
            random_range(rng, min.z, max.z),
        );
        let speed = random_range(rng, ty.base_speed * 0.5, ty.base_speed) * difficulty;
        let rotation_speed = Vec3::new(
            random_range(rng, -TARGET_SPIN, TARGET_SPIN),
            random_range(rng, -TARGET_SPIN, TARGET_SPIN),
            random_range(rng, -TARGET_SPIN, TARGET_SPIN),
        );
        let (radius, health, points) = (ty.spawn_radius(), ty.base_health, ty.base_points);

        let id = self.allocate_id();
        self.targets.push(Target {
            id,
            kind,
            pos,
            vel: Vec3::new(0.0, 0.0, speed),
            radius,
            health,
            points,
            rotation: Vec3::ZERO,
            rotation_speed,
        });
        log::debug!(
            "Spawned {} #{id} at ({:.1}, {:.1}, {:.1}) speed {speed:.2}",
            self.types[kind].name,
            pos.x,
            pos.y,
            pos.z
        );
        id
    }

    /// Place a target of `kind` at an exact spot (scripted spawns, tests).
    /// Unknown kinds fall back to the first type.
    pub fn place(&mut self, kind: usize, pos: Vec3, vel: Vec3) -> TargetId {
        let kind = if kind < self.types.len() { kind } else { 0 };
        let ty = &self.types[kind];
        let (radius, health, points) = (ty.spawn_radius(), ty.base_health, ty.base_points);
        let id = self.allocate_id();
        self.targets.push(Target {
            id,
            kind,
            pos,
            vel,
            radius,
            health,
            points,
            rotation: Vec3::ZERO,
            rotation_speed: Vec3::ZERO,
        });
        id
    }

    /// Run the spawn timer, move everything, drop what flew past
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        difficulty: f32,
        rng: &mut R,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        self.since_last_spawn += dt;
        if self.since_last_spawn > self.spawn_interval_for(difficulty) {
            report.spawned = Some(self.spawn(difficulty, rng));
            self.since_last_spawn = 0.0;
        }

        let miss_z = self.miss_z;
        for target in &mut self.targets {
            target.advance(dt);
        }
        self.targets.retain(|t| {
            if t.is_missed(miss_z) {
                report.missed.push(t.id);
                false
            } else {
                true
            }
        });
        if !report.missed.is_empty() {
            log::debug!("Targets flew past: {:?}", report.missed);
        }

        report
    }

    /// Damage a target by one; remove it when its health runs out
    pub fn hit(&mut self, id: TargetId) -> HitOutcome {
        let Some(idx) = self.targets.iter().position(|t| t.id == id) else {
            return HitOutcome::Missing;
        };
        let target = &mut self.targets[idx];
        target.health = target.health.saturating_sub(1);
        if target.health > 0 {
            return HitOutcome::Damaged {
                health: target.health,
            };
        }
        let target = self.targets.remove(idx);
        HitOutcome::Destroyed {
            points: target.points,
            pos: target.pos,
        }
    }

    /// Points earned by hitting `id` once (0 if it survives or doesn't exist)
    pub fn apply_hit(&mut self, id: TargetId) -> u32 {
        match self.hit(id) {
            HitOutcome::Destroyed { points, .. } => points,
            HitOutcome::Damaged { .. } | HitOutcome::Missing => 0,
        }
    }

    /// Clear the pool; the next update spawns immediately
    pub fn reset(&mut self) {
        self.targets.clear();
        self.since_last_spawn = f32::INFINITY;
    }
}
