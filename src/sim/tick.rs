//! Fixed timestep simulation tick
//!
//! The wiring layer: advances every running animation, steps the floating
//! physics, and routes pointer input to the pump or to a floating balloon.
//! Ownership of a balloon's position hands off here at state transitions —
//! animations write it while Growing/Released/Bursting, physics while
//! Floating — so no field ever has two writers in one tick.

use glam::Vec2;

use super::physics;
use super::state::{BalloonState, GameEvent, SceneState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer-down this tick, in stage coordinates
    pub pointer_down: Option<Vec2>,
}

/// Advance the toy by one fixed timestep
pub fn tick(state: &mut SceneState, input: &TickInput) {
    state.time_ticks += 1;

    // Squeeze feedback first: a squeeze finishing this tick frees the pump
    // for this tick's press, never sooner.
    state.pump.advance();

    advance_active(state);
    advance_bursting(state);
    physics::integrate(
        &mut state.floating,
        state.stage,
        &mut state.rng,
        &state.tuning,
    );

    if let Some(p) = input.pointer_down {
        handle_pointer(state, p);
    }
}

/// Advance the active balloon's grow or transit animation.
fn advance_active(state: &mut SceneState) {
    let finished = state.active.advance_animation();
    if finished && matches!(state.active.state, BalloonState::Released { .. }) {
        promote_released(state);
    }
}

/// Released transit complete: hand the balloon to the physics tick and spawn
/// its replacement at the pump.
fn promote_released(state: &mut SceneState) {
    let replacement = state.spawn_balloon();
    let mut released = std::mem::replace(&mut state.active, replacement);
    physics::start_floating(&mut released, &mut state.rng, &state.tuning);
    log::debug!(
        "balloon {} airborne at {:.1},{:.1} vel {:.2},{:.2}; balloon {} on the pump",
        released.id,
        released.pos.x,
        released.pos.y,
        released.vel.x,
        released.vel.y,
        state.active.id
    );
    state.events.push(GameEvent::BalloonAirborne { id: released.id });
    state
        .events
        .push(GameEvent::BalloonSpawned { id: state.active.id });
    state.floating.push(released);
    state.normalize_order();
}

/// Advance burst animations and sweep out disposed balloons.
fn advance_bursting(state: &mut SceneState) {
    for balloon in &mut state.floating {
        if balloon.advance_burst(&state.tuning) {
            log::debug!("balloon {} popped", balloon.id);
            state.events.push(GameEvent::BalloonDisposed { id: balloon.id });
        }
    }
    state
        .floating
        .retain(|b| !matches!(b.state, BalloonState::Disposed));
}

/// Route a pointer-down. The pump draws above everything, so it gets first
/// claim on its own region; otherwise the topmost (most recently released)
/// floating balloon under the generous hit box takes the press.
fn handle_pointer(state: &mut SceneState, p: Vec2) {
    if state.pump.hit_test(p) {
        pump_stroke(state);
        return;
    }

    let half = state.tuning.hit_half_extent;
    let hit = state
        .floating
        .iter_mut()
        .rev()
        .filter(|b| matches!(b.state, BalloonState::Floating))
        .find(|b| (p.x - b.pos.x).abs() <= half && (p.y - b.pos.y).abs() <= half);
    if let Some(balloon) = hit
        && balloon.try_burst(&state.tuning)
    {
        state.events.push(GameEvent::BurstStarted { id: balloon.id });
    }
}

/// One accepted pump press: squeeze feedback plus a stroke for the active
/// balloon, releasing it when the stroke budget fills.
fn pump_stroke(state: &mut SceneState) {
    if !state.pump.try_squeeze(&state.tuning) {
        log::trace!("stroke dropped: pump mid-squeeze");
        return;
    }
    state.events.push(GameEvent::PumpSqueezed);
    if state.active.try_stroke(&state.tuning) {
        state.events.push(GameEvent::StrokeApplied {
            id: state.active.id,
            strokes: state.active.strokes,
        });
        if state.active.strokes == state.tuning.max_strokes {
            state.active.begin_release(&mut state.rng, &state.tuning);
            state.events.push(GameEvent::BalloonReleased {
                id: state.active.id,
            });
        }
    }
}
