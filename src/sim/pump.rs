//! Pump rig and squeeze feedback
//!
//! The pump is a view rig with one piece of real state: the squeeze tween,
//! which doubles as the busy gate. While a squeeze is in flight the pump is
//! non-interactive and strokes are dropped, not queued, so at most one stroke
//! lands per squeeze cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::tween::{Ease, Tween};
use crate::ms_to_ticks;
use crate::tuning::Tuning;

/// How far the pump top sinks at full squeeze (pixels)
const TOP_SINK: f32 = 30.0;
/// Scale the top and body squash toward at full squeeze
const SQUASH_SCALE: f32 = 0.4;
/// Nudge of the left arm at full squeeze
const LEFT_NUDGE: Vec2 = Vec2::new(-3.0, 2.0);

/// The pump's three rig parts plus the squeeze gate. Parts are anchored
/// bottom-center at fixed offsets from the stage's bottom-right corner;
/// part extents are stage-proportional (width/8 by height/3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pump {
    pub top_base: Vec2,
    pub body_base: Vec2,
    pub left_base: Vec2,
    /// Half-width and height of the pump-top hit rectangle
    hit_extent: Vec2,
    squeeze: Option<Tween>,
}

impl Pump {
    pub fn new(stage: Vec2) -> Self {
        Self {
            top_base: Vec2::new(stage.x - 100.0, stage.y - 170.0),
            body_base: Vec2::new(stage.x - 100.0, stage.y - 50.0),
            left_base: Vec2::new(stage.x - 212.0, stage.y - 100.0),
            hit_extent: Vec2::new(stage.x / 16.0, stage.y / 3.0),
            squeeze: None,
        }
    }

    /// True while the squeeze feedback is in flight (pump non-interactive)
    pub fn busy(&self) -> bool {
        self.squeeze.is_some()
    }

    /// Start the squeeze feedback if the pump is idle. Returns false (stroke
    /// dropped) while mid-squeeze.
    pub fn try_squeeze(&mut self, tuning: &Tuning) -> bool {
        if self.busy() {
            return false;
        }
        self.squeeze = Some(Tween::yoyo(ms_to_ticks(tuning.squeeze_ms), Ease::Linear));
        true
    }

    /// Advance the squeeze one tick. The gate opens on the same tick the
    /// animation completes, never before.
    pub fn advance(&mut self) {
        if let Some(tw) = &mut self.squeeze
            && tw.advance()
        {
            self.squeeze = None;
        }
    }

    /// Pointer hit test against the pump top (bottom-center anchored)
    pub fn hit_test(&self, p: Vec2) -> bool {
        (p.x - self.top_base.x).abs() <= self.hit_extent.x
            && p.y <= self.top_base.y
            && p.y >= self.top_base.y - self.hit_extent.y
    }

    fn squeeze_value(&self) -> f32 {
        self.squeeze.map_or(0.0, |tw| tw.value())
    }

    // Rig offsets for the renderer; all return rest values when idle.

    pub fn top_offset(&self) -> Vec2 {
        Vec2::new(0.0, TOP_SINK) * self.squeeze_value()
    }

    pub fn top_squash(&self) -> f32 {
        1.0 + (SQUASH_SCALE - 1.0) * self.squeeze_value()
    }

    pub fn body_squash_x(&self) -> f32 {
        self.top_squash()
    }

    pub fn left_offset(&self) -> Vec2 {
        LEFT_NUDGE * self.squeeze_value()
    }
}
