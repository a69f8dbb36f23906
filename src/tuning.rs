//! Data-driven toy balance
//!
//! Every numeric knob of the simulation lives here so behavior can be tweaked
//! from a JSON file without touching sim code. `Default` is the shipped
//! behavior.

use serde::{Deserialize, Serialize};

/// Numeric parameters for the whole toy.
///
/// Durations are milliseconds; positions and velocities are stage pixels and
/// pixels per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Pump strokes needed to release a balloon
    pub max_strokes: u8,

    // === Animation durations (ms) ===
    /// Squeeze feedback, one direction of the yoyo (total busy time is double)
    pub squeeze_ms: f32,
    /// Per-stroke inflate tween
    pub grow_ms: f32,
    /// Released-to-floating transit tween
    pub release_ms: f32,
    /// Burst phase one (brief expansion)
    pub burst_expand_ms: f32,
    /// Burst phase two (contract to zero, fade out)
    pub burst_pop_ms: f32,

    // === Growth ===
    /// Position nudge applied by one stroke (x, y)
    pub grow_step: [f32; 2],
    /// Scale added by one stroke
    pub grow_scale_step: f32,
    /// Scale of a freshly spawned balloon
    pub spawn_scale: f32,

    // === Release transit ===
    /// Horizontal offset range: x shifts by uniform(-release_dx, release_dx)
    pub release_dx: f32,
    /// Upward offset range: y shifts by -uniform(release_dy_min, release_dy_max)
    pub release_dy_min: f32,
    pub release_dy_max: f32,
    /// Extra scale gained during transit
    pub release_scale_bonus: f32,

    // === Floating physics (per tick) ===
    /// Initial per-axis speed range
    pub float_speed_min: f32,
    pub float_speed_max: f32,
    /// Per-axis random perturbation half-range
    pub perturb: f32,
    /// Per-axis velocity clamp magnitude
    pub speed_clamp: f32,
    /// Distance from a stage edge at which reflection kicks in
    pub wall_padding: f32,

    // === Interaction ===
    /// Half-extent of the square hit region around a floating balloon
    pub hit_half_extent: f32,
    /// Expansion added in burst phase one
    pub burst_expand_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_strokes: 4,

            squeeze_ms: 200.0,
            grow_ms: 200.0,
            release_ms: 500.0,
            burst_expand_ms: 100.0,
            burst_pop_ms: 100.0,

            grow_step: [-1.0, -8.0],
            grow_scale_step: 0.03,
            spawn_scale: 0.1,

            release_dx: 50.0,
            release_dy_min: 100.0,
            release_dy_max: 200.0,
            release_scale_bonus: 0.1,

            float_speed_min: 1.0,
            float_speed_max: 2.0,
            perturb: 0.1,
            speed_clamp: 2.0,
            wall_padding: 50.0,

            hit_half_extent: 250.0,
            burst_expand_scale: 0.2,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
