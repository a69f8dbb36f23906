//! Deterministic simulation module
//!
//! All toy logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod physics;
pub mod pump;
pub mod state;
pub mod tick;
pub mod tween;

pub use physics::{integrate, start_floating};
pub use pump::Pump;
pub use state::{Balloon, BalloonState, BurstPhase, GameEvent, SceneState};
pub use tick::{TickInput, tick};
pub use tween::{Ease, Motion, MotionFields, Tween};
