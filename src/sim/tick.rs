//! Game session and per-frame tick
//!
//! Owns the score, the screen flow and the seeded RNG, and drives the
//! spawner and hammer in a fixed order every frame:
//! hammer → spawner → hit resolution → score.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawner::{HitOutcome, Spawner};
use super::state::{FrameSnapshot, GameEvent, GamePhase, HammerView, TargetId, TargetView};
use super::swing::Hammer;
use crate::camera::CameraShake;
use crate::consts::{SHAKE_DURATION, SHAKE_INTENSITY};
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::{difficulty, format_score};

/// Stream id for the cosmetic RNG, kept apart from gameplay draws
const FX_STREAM: u64 = 0x5ca1_ab1e;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// World point to swing at (from a tap/click)
    pub swing_at: Option<Vec3>,
    /// Idle/demo mode - the game aims for itself
    pub idle_mode: bool,
}

/// Per-run counters for the end screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub swings: u32,
    pub hits: u32,
    pub destroyed: u32,
    pub missed: u32,
}

/// One play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Seconds of play this run (sum of frame deltas)
    pub clock: f32,
    pub spawner: Spawner,
    pub hammer: Hammer,
    pub shake: CameraShake,
    pub settings: Settings,
    pub stats: RunStats,
    tuning: Tuning,
    rng: Pcg32,
    fx_rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Stock balance and settings
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            clock: 0.0,
            spawner: Spawner::new(&tuning),
            hammer: Hammer::new(&tuning),
            shake: CameraShake::default(),
            settings,
            stats: RunStats::default(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::new(seed, FX_STREAM),
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current difficulty multiplier, derived from the score
    #[inline]
    pub fn difficulty(&self) -> f32 {
        difficulty(self.score)
    }

    /// Score with thousands separators, for the HUD
    pub fn score_text(&self) -> String {
        format_score(self.score)
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Start (or restart) a run: wipe score, targets and hammer, then play
    pub fn start_game(&mut self) {
        self.score = 0;
        self.clock = 0.0;
        self.stats = RunStats::default();
        self.spawner.reset();
        self.hammer.reset();
        self.shake.reset();
        self.set_phase(GamePhase::Playing);
        log::info!("Game started (seed {})", self.seed);
    }

    /// End the run. Returns the final score, or `None` if not playing.
    pub fn end_game(&mut self) -> Option<u64> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.set_phase(GamePhase::GameOver);
        log::info!(
            "Game over: {} points, {} destroyed, {} missed",
            self.score_text(),
            self.stats.destroyed,
            self.stats.missed
        );
        Some(self.score)
    }

    /// Swing at a world point. Ignored unless playing and the hammer is free.
    pub fn request_swing(&mut self, point: Vec3) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if !self.hammer.request_swing(point, self.clock) {
            return false;
        }
        self.stats.swings += 1;
        self.events.push(GameEvent::SwingStarted { target: point });
        true
    }

    /// Advance the session by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        // Cosmetic shake settles even off the play screen
        self.shake.update(dt, &mut self.fx_rng);

        if self.phase != GamePhase::Playing {
            return;
        }

        self.clock += dt;
        let difficulty = self.difficulty();

        self.hammer.advance(self.clock);

        let report = self.spawner.update(dt, difficulty, &mut self.rng);
        if let Some(id) = report.spawned {
            let kind = self.spawner.get(id).map_or(0, |t| t.kind);
            self.events.push(GameEvent::TargetSpawned { id, kind });
        }
        for id in report.missed {
            self.stats.missed += 1;
            self.events.push(GameEvent::TargetMissed { id });
        }

        self.resolve_hits();
    }

    fn resolve_hits(&mut self) {
        if !self.hammer.is_swinging() {
            return;
        }

        // Decide every hit before removing anything
        let hammer = &self.hammer;
        let hit_ids: Vec<TargetId> = self
            .spawner
            .targets()
            .iter()
            .filter(|t| hammer.test_hit(*t))
            .map(|t| t.id)
            .collect();

        for id in hit_ids {
            match self.spawner.hit(id) {
                HitOutcome::Destroyed { points, pos } => {
                    self.stats.hits += 1;
                    self.stats.destroyed += 1;
                    self.score += u64::from(points);
                    self.events.push(GameEvent::TargetDestroyed { id, points, pos });
                    log::debug!("Smashed #{id} for {points} (score {})", self.score);
                    if points > 0 && self.settings.effective_screen_shake() {
                        self.shake.trigger(SHAKE_INTENSITY, SHAKE_DURATION);
                    }
                }
                HitOutcome::Damaged { health } => {
                    self.stats.hits += 1;
                    self.events.push(GameEvent::TargetDamaged { id, health });
                    log::debug!("Hit #{id}, {health} health left");
                }
                HitOutcome::Missing => {}
            }
        }
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> FrameSnapshot {
        let targets = self
            .spawner
            .targets()
            .iter()
            .map(|t| TargetView {
                id: t.id,
                kind: self
                    .spawner
                    .target_type(t.kind)
                    .map(|ty| ty.name.clone())
                    .unwrap_or_default(),
                pos: t.pos,
                rotation: t.rotation,
                radius: t.radius,
                health: t.health,
            })
            .collect();

        FrameSnapshot {
            phase: self.phase,
            score: self.score,
            score_text: self.score_text(),
            difficulty: self.difficulty(),
            targets,
            hammer: HammerView {
                pos: self.hammer.pos,
                rotation: self.hammer.rotation,
                swinging: self.hammer.is_swinging(),
            },
            camera_offset: self.shake.offset,
        }
    }
}

/// Demo aim: lead the target closest to the player by half a swing
fn autopilot_aim(state: &GameState) -> Option<Vec3> {
    let lead = state.tuning.swing_duration * 0.5;
    state
        .spawner
        .targets()
        .iter()
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
        .map(|t| t.pos + t.vel * lead)
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut swing_at = input.swing_at;
    if input.idle_mode && swing_at.is_none() && !state.hammer.is_swinging() {
        swing_at = autopilot_aim(state);
    }
    if let Some(point) = swing_at {
        state.request_swing(point);
    }
    state.update(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{SpawnBounds, TargetType};

    const DT: f32 = 1.0 / 60.0;

    /// Random spawns land far off to the side where no swing reaches
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_interval: 1000.0,
            spawn_bounds: SpawnBounds {
                min: Vec3::new(100.0, 100.0, -15.0),
                max: Vec3::new(110.0, 110.0, -5.0),
            },
            ..Tuning::default()
        };
        let mut state = GameState::with_config(1, tuning, Settings::default());
        state.start_game();
        state
    }

    fn run(state: &mut GameState, frames: usize) {
        for _ in 0..frames {
            state.update(DT);
        }
    }

    #[test]
    fn test_menu_is_inert() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Menu);
        run(&mut state, 10);
        assert!(state.spawner.is_empty());
        assert!(!state.request_swing(Vec3::ZERO));
    }

    #[test]
    fn test_start_spawns_immediately() {
        let mut state = GameState::new(12345);
        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        state.update(DT);
        assert_eq!(state.spawner.len(), 1);
        assert!(
            state
                .events()
                .iter()
                .any(|e| matches!(e, GameEvent::TargetSpawned { .. }))
        );
    }

    #[test]
    fn test_spawned_target_hittable_same_frame() {
        let aim = Vec3::new(0.0, 1.0, -10.0);
        let tuning = Tuning {
            spawn_interval: 1000.0,
            spawn_bounds: SpawnBounds { min: aim, max: aim },
            target_types: vec![TargetType::new("slow", 10, 1, 0.1, 1.0).with_radius(0.6)],
            ..Tuning::default()
        };
        let swing_duration = tuning.swing_duration;
        let mut state = GameState::with_config(3, tuning, Settings::default());
        state.start_game();

        assert!(state.request_swing(aim));
        state.update(swing_duration);

        assert_eq!(state.score, 10);
        assert!(state.spawner.is_empty());
        let events = state.events();
        let spawned = events
            .iter()
            .position(|e| matches!(e, GameEvent::TargetSpawned { .. }));
        let destroyed = events
            .iter()
            .position(|e| matches!(e, GameEvent::TargetDestroyed { points: 10, .. }));
        assert!(spawned.is_some());
        assert!(destroyed > spawned);
    }

    #[test]
    fn test_difficulty_follows_score() {
        let mut state = GameState::new(1);
        assert!((state.difficulty() - 1.0).abs() < f32::EPSILON);
        state.score = 1000;
        assert!((state.difficulty() - 3.0).abs() < 1e-6);
        assert_eq!(state.score_text(), "1,000");
    }

    #[test]
    fn test_swing_smashes_target() {
        let mut state = quiet_state();
        let aim = Vec3::new(0.0, 1.0, -10.0);
        let id = state.spawner.place(0, aim, Vec3::ZERO);

        assert!(state.request_swing(aim));
        run(&mut state, 40);

        assert!(state.spawner.get(id).is_none());
        assert_eq!(state.score, 10);
        assert_eq!(state.stats.destroyed, 1);
        assert!(state.events().iter().any(|e| matches!(
            e,
            GameEvent::TargetDestroyed { id: hit, points: 10, .. } if *hit == id
        )));
    }

    #[test]
    fn test_tough_target_needs_two_hits() {
        let mut state = quiet_state();
        let aim = Vec3::new(0.0, 1.0, -10.0);
        let id = state.spawner.place(1, aim, Vec3::ZERO);

        state.request_swing(aim);
        run(&mut state, 40);

        assert_eq!(state.score, 30);
        let events = state.drain_events();
        let damaged = events
            .iter()
            .position(|e| matches!(e, GameEvent::TargetDamaged { id: hit, health: 1 } if *hit == id));
        let destroyed = events
            .iter()
            .position(|e| matches!(e, GameEvent::TargetDestroyed { id: hit, .. } if *hit == id));
        assert!(damaged.is_some());
        assert!(destroyed > damaged);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_stacked_targets_all_resolve() {
        let mut state = quiet_state();
        let aim = Vec3::new(0.0, 1.0, -10.0);
        state.spawner.place(0, aim, Vec3::ZERO);
        state.spawner.place(0, aim, Vec3::ZERO);
        state.spawner.place(2, aim, Vec3::ZERO);

        state.request_swing(aim);
        run(&mut state, 40);
        assert_eq!(state.score, 70);
        assert_eq!(state.stats.destroyed, 3);
    }

    #[test]
    fn test_missed_target_scores_nothing() {
        let mut state = quiet_state();
        let id = state.spawner.place(0, Vec3::new(0.0, 1.0, 6.0), Vec3::ZERO);
        state.update(DT);
        assert!(state.spawner.get(id).is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.stats.missed, 1);
        assert!(state.events().contains(&GameEvent::TargetMissed { id }));
    }

    #[test]
    fn test_no_hits_without_swing() {
        let mut state = quiet_state();
        // Target parked right on the resting hammer
        state
            .spawner
            .place(0, state.hammer.hand_anchor(), Vec3::ZERO);
        run(&mut state, 10);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_end_and_restart() {
        let mut state = quiet_state();
        state.score = 120;
        state.spawner.place(0, Vec3::new(0.0, 1.0, -10.0), Vec3::ZERO);

        assert_eq!(state.end_game(), Some(120));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.end_game(), None);

        // Frozen on the game over screen
        let before = state.spawner.len();
        run(&mut state, 5);
        assert_eq!(state.spawner.len(), before);
        assert!(!state.request_swing(Vec3::ZERO));

        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.spawner.is_empty());
        assert_eq!(state.stats, RunStats::default());
    }

    #[test]
    fn test_shake_on_smash_respects_settings() {
        let mut state = quiet_state();
        let aim = Vec3::new(0.0, 1.0, -10.0);
        state.spawner.place(0, aim, Vec3::ZERO);
        state.request_swing(aim);
        let mut shook = false;
        for _ in 0..40 {
            state.update(DT);
            shook |= state.shake.is_active();
        }
        assert!(shook);

        let mut calm = quiet_state();
        calm.settings.reduced_motion = true;
        calm.spawner.place(0, aim, Vec3::ZERO);
        calm.request_swing(aim);
        for _ in 0..40 {
            calm.update(DT);
            assert!(!calm.shake.is_active());
        }
        assert_eq!(calm.score, 10);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.start_game();
        b.start_game();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.stats, b.stats);
        assert!(a.stats.swings > 0);
    }

    #[test]
    fn test_tick_applies_swing_input() {
        let mut state = quiet_state();
        let input = TickInput {
            swing_at: Some(Vec3::new(0.0, 1.0, -10.0)),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.hammer.is_swinging());
        assert_eq!(state.stats.swings, 1);

        // Held input doesn't queue extra swings
        tick(&mut state, &input, DT);
        assert_eq!(state.stats.swings, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = quiet_state();
        let id = state.spawner.place(2, Vec3::new(1.0, 2.0, -8.0), Vec3::ZERO);
        state.score = 4200;
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.score_text, "4,200");
        let view = snap.targets.iter().find(|t| t.id == id).expect("listed");
        assert_eq!(view.kind, "bonus");
        assert!(!snap.hammer.swinging);

        let json = serde_json::to_string(&snap).expect("serializes");
        assert!(json.contains("\"bonus\""));
    }
}
