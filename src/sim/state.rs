//! Toy state and balloon lifecycle
//!
//! The lifecycle is an explicit tagged state with guarded transition methods,
//! so stroke-drop-on-reentry and idempotent disposal are directly testable
//! without timing races.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pump::Pump;
use super::tween::{Ease, Motion, MotionFields, Tween};
use crate::ms_to_ticks;
use crate::tuning::Tuning;

/// Offset of the balloon spawn point from the bottom-right stage corner
/// (the nozzle of the pump's left arm)
pub const SPAWN_OFFSET: Vec2 = Vec2::new(257.0, 318.0);

/// Burst animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstPhase {
    /// Brief expansion before the pop
    Expand,
    /// Contract to zero while fading out
    Pop,
}

/// Lifecycle state of one balloon. Animation progress is carried inside the
/// variant that owns it, so position/scale/alpha have exactly one writer at
/// any time: the embedded motion here, or the floating physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BalloonState {
    /// Attached to the pump, inflating stroke by stroke
    Growing { motion: Option<Motion> },
    /// One-shot transit up and away from the pump
    Released { motion: Motion },
    /// Drifting under the physics tick, pointer-interactive
    Floating,
    /// Two-phase pop animation, no longer interactive or physics-driven
    Bursting { phase: BurstPhase, motion: Motion },
    /// Terminal; the entity is dropped from the floating set
    Disposed,
}

/// A balloon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub state: BalloonState,
    pub pos: Vec2,
    /// Uniform scale of the composite (balloon image + glyph overlay)
    pub scale: f32,
    pub alpha: f32,
    /// Drift velocity in pixels/tick; meaningful only while Floating
    pub vel: Vec2,
    /// Pump strokes applied while Growing
    pub strokes: u8,
    /// Balloon image variant (1..=10)
    pub color: u8,
    /// Letter overlay ('a'..='z')
    pub glyph: char,
}

impl Balloon {
    /// Spawn a fresh balloon at the pump nozzle with a random look
    pub fn spawn(id: u32, pos: Vec2, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        Self {
            id,
            state: BalloonState::Growing { motion: None },
            pos,
            scale: tuning.spawn_scale,
            alpha: 1.0,
            vel: Vec2::ZERO,
            strokes: 0,
            color: rng.random_range(1..=10u8),
            glyph: (b'a' + rng.random_range(0..26u8)) as char,
        }
    }

    fn motion_fields(&self) -> MotionFields {
        MotionFields {
            pos: self.pos,
            scale: self.scale,
            alpha: self.alpha,
        }
    }

    /// Apply one pump stroke. Accepted only while Growing with strokes left;
    /// anything else is silently ignored.
    pub fn try_stroke(&mut self, tuning: &Tuning) -> bool {
        if !matches!(self.state, BalloonState::Growing { .. }) {
            return false;
        }
        if self.strokes >= tuning.max_strokes {
            return false;
        }
        self.strokes += 1;
        let motion = Motion::new(
            self.motion_fields(),
            Vec2::from(tuning.grow_step),
            tuning.grow_scale_step,
            0.0,
            Tween::new(ms_to_ticks(tuning.grow_ms), Ease::Linear),
        );
        self.state = BalloonState::Growing {
            motion: Some(motion),
        };
        true
    }

    /// Growing -> Released: start the randomized transit up and away.
    pub fn begin_release(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        if !matches!(self.state, BalloonState::Growing { .. }) {
            return;
        }
        let dx = rng.random_range(-tuning.release_dx..=tuning.release_dx);
        let dy = rng.random_range(tuning.release_dy_min..=tuning.release_dy_max);
        let motion = Motion::new(
            self.motion_fields(),
            Vec2::new(dx, -dy),
            tuning.release_scale_bonus,
            0.0,
            Tween::new(ms_to_ticks(tuning.release_ms), Ease::QuadOut),
        );
        self.state = BalloonState::Released { motion };
    }

    /// Floating -> Bursting. Returns false (no-op) for any other state, so a
    /// second pointer-down during the pop cannot re-enter the animation.
    pub fn try_burst(&mut self, tuning: &Tuning) -> bool {
        if !matches!(self.state, BalloonState::Floating) {
            return false;
        }
        let motion = Motion::new(
            self.motion_fields(),
            Vec2::ZERO,
            tuning.burst_expand_scale,
            0.0,
            Tween::new(ms_to_ticks(tuning.burst_expand_ms), Ease::Linear),
        );
        self.state = BalloonState::Bursting {
            phase: BurstPhase::Expand,
            motion,
        };
        true
    }

    /// Advance whatever motion the current state carries by one tick and
    /// write the interpolated fields back. Returns true on the tick the
    /// motion completes.
    pub fn advance_animation(&mut self) -> bool {
        let sampled = match &mut self.state {
            BalloonState::Growing { motion: Some(m) }
            | BalloonState::Released { motion: m }
            | BalloonState::Bursting { motion: m, .. } => {
                let done = m.tween.advance();
                Some((m.sample(), done))
            }
            _ => None,
        };
        let Some(((pos, scale, alpha), done)) = sampled else {
            return false;
        };
        self.pos = pos;
        self.scale = scale;
        self.alpha = alpha;
        if done && matches!(self.state, BalloonState::Growing { .. }) {
            self.state = BalloonState::Growing { motion: None };
        }
        done
    }

    /// Drive the burst animation one tick, advancing Expand -> Pop ->
    /// Disposed. Returns true on the tick the balloon becomes Disposed.
    pub fn advance_burst(&mut self, tuning: &Tuning) -> bool {
        let BalloonState::Bursting { phase, .. } = self.state else {
            return false;
        };
        if !self.advance_animation() {
            return false;
        }
        match phase {
            BurstPhase::Expand => {
                let motion = Motion::new(
                    self.motion_fields(),
                    Vec2::ZERO,
                    -self.scale,
                    -self.alpha,
                    Tween::new(ms_to_ticks(tuning.burst_pop_ms), Ease::QuadOut),
                );
                self.state = BalloonState::Bursting {
                    phase: BurstPhase::Pop,
                    motion,
                };
                false
            }
            BurstPhase::Pop => {
                self.state = BalloonState::Disposed;
                true
            }
        }
    }
}

/// Notifications for the rendering collaborator, drained once per frame.
/// Composite creation/destruction hangs off `BalloonSpawned`/`BalloonDisposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BalloonSpawned { id: u32 },
    PumpSqueezed,
    StrokeApplied { id: u32, strokes: u8 },
    BalloonReleased { id: u32 },
    /// Released transit finished; the balloon now drifts
    BalloonAirborne { id: u32 },
    BurstStarted { id: u32 },
    /// Terminal: the renderer must destroy the composite for this id
    BalloonDisposed { id: u32 },
}

/// Complete toy state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; every random draw in the sim goes through here
    pub rng: Pcg32,
    /// Stage size, read once at setup
    pub stage: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The pump rig and its squeeze gate
    pub pump: Pump,
    /// The single Growing (or Released, in transit) balloon
    pub active: Balloon,
    /// Floating set: airborne balloons, sorted by id. Bursting balloons stay
    /// here until Disposed.
    pub floating: Vec<Balloon>,
    /// Events since the last drain (not part of the deterministic state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Numeric parameters
    pub tuning: Tuning,
    next_id: u32,
}

impl SceneState {
    pub fn new(seed: u64, stage_width: f32, stage_height: f32) -> Self {
        Self::with_tuning(seed, stage_width, stage_height, Tuning::default())
    }

    pub fn with_tuning(seed: u64, stage_width: f32, stage_height: f32, tuning: Tuning) -> Self {
        let stage = Vec2::new(stage_width, stage_height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let active = Balloon::spawn(1, stage - SPAWN_OFFSET, &mut rng, &tuning);
        let mut state = Self {
            seed,
            rng,
            stage,
            time_ticks: 0,
            pump: Pump::new(stage),
            active,
            floating: Vec::new(),
            events: Vec::new(),
            tuning,
            next_id: 2,
        };
        state.events.push(GameEvent::BalloonSpawned { id: 1 });
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Where new balloons appear, relative to the pump
    pub fn spawn_point(&self) -> Vec2 {
        self.stage - SPAWN_OFFSET
    }

    /// Spawn the next Growing balloon at the pump nozzle
    pub fn spawn_balloon(&mut self) -> Balloon {
        let id = self.next_entity_id();
        Balloon::spawn(id, self.stage - SPAWN_OFFSET, &mut self.rng, &self.tuning)
    }

    /// Keep floating balloons sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.floating.sort_by_key(|b| b.id);
    }

    /// Drain accumulated events for the renderer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_balloon(seed: u64) -> (Balloon, Pcg32, Tuning) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let b = Balloon::spawn(1, Vec2::new(543.0, 282.0), &mut rng, &tuning);
        (b, rng, tuning)
    }

    #[test]
    fn test_spawn_defaults() {
        let (b, _, tuning) = test_balloon(7);
        assert!(matches!(b.state, BalloonState::Growing { motion: None }));
        assert_eq!(b.strokes, 0);
        assert_eq!(b.scale, tuning.spawn_scale);
        assert!((1..=10).contains(&b.color));
        assert!(b.glyph.is_ascii_lowercase());
    }

    #[test]
    fn test_strokes_release_exactly_once() {
        let (mut b, mut rng, tuning) = test_balloon(7);
        for i in 1..=tuning.max_strokes {
            assert!(b.try_stroke(&tuning));
            assert_eq!(b.strokes, i);
        }
        // Stroke budget exhausted
        assert!(!b.try_stroke(&tuning));
        assert_eq!(b.strokes, tuning.max_strokes);

        b.begin_release(&mut rng, &tuning);
        assert!(matches!(b.state, BalloonState::Released { .. }));
        // A stroke on a released balloon has no effect
        assert!(!b.try_stroke(&tuning));
        assert_eq!(b.strokes, tuning.max_strokes);
        // And release does not re-trigger
        let before = b.clone();
        b.begin_release(&mut rng, &tuning);
        assert!(matches!(b.state, BalloonState::Released { .. }));
        assert_eq!(b.strokes, before.strokes);
    }

    #[test]
    fn test_grow_motion_applies_step() {
        let (mut b, _, tuning) = test_balloon(7);
        let start = b.pos;
        b.try_stroke(&tuning);
        let grow_ticks = crate::ms_to_ticks(tuning.grow_ms);
        for _ in 0..grow_ticks {
            b.advance_animation();
        }
        assert!((b.pos.x - (start.x - 1.0)).abs() < 1e-4);
        assert!((b.pos.y - (start.y - 8.0)).abs() < 1e-4);
        assert!((b.scale - (tuning.spawn_scale + tuning.grow_scale_step)).abs() < 1e-4);
        // Motion cleared on completion
        assert!(matches!(b.state, BalloonState::Growing { motion: None }));
    }

    #[test]
    fn test_release_transit_bounds() {
        let (mut b, mut rng, tuning) = test_balloon(99);
        let start = b.pos;
        b.begin_release(&mut rng, &tuning);
        let ticks = crate::ms_to_ticks(tuning.release_ms);
        for _ in 0..ticks {
            b.advance_animation();
        }
        assert!((b.pos.x - start.x).abs() <= tuning.release_dx + 1e-4);
        let rise = start.y - b.pos.y;
        assert!(rise >= tuning.release_dy_min - 1e-4 && rise <= tuning.release_dy_max + 1e-4);
        assert!(
            (b.scale - (tuning.spawn_scale + tuning.release_scale_bonus)).abs() < 1e-4
        );
    }

    #[test]
    fn test_burst_is_idempotent_and_terminal() {
        let (mut b, _, tuning) = test_balloon(7);
        b.state = BalloonState::Floating;

        assert!(b.try_burst(&tuning));
        assert!(matches!(
            b.state,
            BalloonState::Bursting {
                phase: BurstPhase::Expand,
                ..
            }
        ));
        // Second pointer-down during the pop is a no-op
        assert!(!b.try_burst(&tuning));

        let expand = crate::ms_to_ticks(tuning.burst_expand_ms);
        let pop = crate::ms_to_ticks(tuning.burst_pop_ms);
        let mut disposed_signals = 0;
        for _ in 0..(expand + pop + 4) {
            if b.advance_burst(&tuning) {
                disposed_signals += 1;
            }
        }
        assert_eq!(disposed_signals, 1);
        assert!(matches!(b.state, BalloonState::Disposed));
        assert!(b.scale.abs() < 1e-4);
        assert!(b.alpha.abs() < 1e-4);
        // Disposed is terminal
        assert!(!b.try_burst(&tuning));
        assert!(!b.try_stroke(&tuning));
    }

    #[test]
    fn test_burst_expands_before_popping() {
        let (mut b, _, tuning) = test_balloon(7);
        b.scale = 0.2;
        b.state = BalloonState::Floating;
        b.try_burst(&tuning);
        let expand = crate::ms_to_ticks(tuning.burst_expand_ms);
        for _ in 0..expand {
            b.advance_burst(&tuning);
        }
        assert!((b.scale - (0.2 + tuning.burst_expand_scale)).abs() < 1e-4);
        assert!(matches!(
            b.state,
            BalloonState::Bursting {
                phase: BurstPhase::Pop,
                ..
            }
        ));
    }

    #[test]
    fn test_scene_state_spawns_active() {
        let state = SceneState::new(42, 800.0, 600.0);
        assert_eq!(state.active.id, 1);
        assert!(matches!(state.active.state, BalloonState::Growing { .. }));
        assert!(state.floating.is_empty());
        assert_eq!(state.spawn_point(), Vec2::new(800.0 - 257.0, 600.0 - 318.0));
        assert_eq!(state.events, vec![GameEvent::BalloonSpawned { id: 1 }]);
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = SceneState::new(42, 800.0, 600.0);
        let b2 = state.spawn_balloon();
        let b3 = state.spawn_balloon();
        assert_ne!(b2.id, b3.id);
        assert!(b2.id > state.active.id);
    }
}
