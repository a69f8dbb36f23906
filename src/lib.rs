//! Balloon Pop - a pump-and-pop balloon toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloon lifecycle, floating physics, pump)
//! - `tuning`: Data-driven numeric parameters
//!
//! Rendering is intentionally absent: a host drives [`sim::tick`] at a fixed
//! timestep, feeds it pointer input, and draws from the resulting state and
//! the [`sim::GameEvent`]s it emits.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second, kept alongside SIM_DT for duration conversion
    pub const TICK_RATE: f32 = 60.0;
}

/// Convert a duration in milliseconds to whole simulation ticks.
///
/// Never rounds below one tick so zero-length animations cannot stall a
/// completion-driven transition.
#[inline]
pub fn ms_to_ticks(ms: f32) -> u32 {
    ((ms / 1000.0) * consts::TICK_RATE).round().max(1.0) as u32
}

/// Unit vector for an angle in radians
#[inline]
pub fn vec_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
