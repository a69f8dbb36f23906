//! Fixed-duration interpolation in simulation ticks
//!
//! Lifecycle transitions ride on one-shot tween completions, so tweens are
//! plain counters advanced by the fixed-timestep tick: completion order is
//! deterministic and testable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Snapshot of the animation-owned fields at motion start
#[derive(Debug, Clone, Copy)]
pub struct MotionFields {
    pub pos: Vec2,
    pub scale: f32,
    pub alpha: f32,
}

/// Easing applied to tween progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    /// Quadratic ease-out
    QuadOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Progress counter for a one-shot (or yoyo) animation.
///
/// A yoyo tween runs forward for `duration` ticks and back for another
/// `duration`, easing each leg independently, like the pump squeeze
/// feedback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tween {
    elapsed: u32,
    duration: u32,
    ease: Ease,
    yoyo: bool,
}

impl Tween {
    pub fn new(duration_ticks: u32, ease: Ease) -> Self {
        Self {
            elapsed: 0,
            duration: duration_ticks.max(1),
            ease,
            yoyo: false,
        }
    }

    pub fn yoyo(duration_ticks: u32, ease: Ease) -> Self {
        Self {
            yoyo: true,
            ..Self::new(duration_ticks, ease)
        }
    }

    fn total(&self) -> u32 {
        if self.yoyo {
            self.duration * 2
        } else {
            self.duration
        }
    }

    /// Advance one tick. Returns true exactly once, on the tick the tween
    /// completes.
    pub fn advance(&mut self) -> bool {
        if self.finished() {
            return false;
        }
        self.elapsed += 1;
        self.finished()
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.total()
    }

    /// Eased progress in [0, 1]. For a yoyo tween this rises to 1 at the
    /// midpoint and returns to 0.
    pub fn value(&self) -> f32 {
        let phase = self.elapsed as f32 / self.duration as f32;
        let t = if phase <= 1.0 { phase } else { 2.0 - phase };
        self.ease.apply(t.clamp(0.0, 1.0))
    }
}

/// A one-shot interpolation of a balloon's animation-owned fields
/// (position, scale, alpha), from their values at motion start.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    pub from_pos: Vec2,
    pub delta_pos: Vec2,
    pub from_scale: f32,
    pub delta_scale: f32,
    pub from_alpha: f32,
    pub delta_alpha: f32,
    pub tween: Tween,
}

impl Motion {
    pub fn new(
        from: MotionFields,
        delta_pos: Vec2,
        delta_scale: f32,
        delta_alpha: f32,
        tween: Tween,
    ) -> Self {
        Self {
            from_pos: from.pos,
            delta_pos,
            from_scale: from.scale,
            delta_scale,
            from_alpha: from.alpha,
            delta_alpha,
            tween,
        }
    }

    /// Current interpolated (pos, scale, alpha)
    pub fn sample(&self) -> (Vec2, f32, f32) {
        let v = self.tween.value();
        (
            self.from_pos + self.delta_pos * v,
            self.from_scale + self.delta_scale * v,
            self.from_alpha + self.delta_alpha * v,
        )
    }
}
