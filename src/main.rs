//! Balloon Pop entry point
//!
//! Headless demo driver: runs a scripted pointer session against the
//! deterministic sim and logs the lifecycle events a renderer would consume.
//!
//! Usage: `balloon-pop [seed] [tuning.json]`

use glam::Vec2;

use balloon_pop::consts::TICK_RATE;
use balloon_pop::sim::{BalloonState, SceneState, TickInput, tick};
use balloon_pop::{Tuning, ms_to_ticks};

const STAGE_WIDTH: f32 = 800.0;
const STAGE_HEIGHT: f32 = 600.0;
/// How long the demo lets a balloon drift before popping it
const DRIFT_TICKS: u64 = 180;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json_str(&json) {
                Ok(t) => t,
                Err(e) => {
                    log::error!("bad tuning file {path}: {e}");
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("cannot read tuning file {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Balloon Pop starting with seed {seed}");
    let mut state = SceneState::with_tuning(seed, STAGE_WIDTH, STAGE_HEIGHT, tuning);
    let squeeze_cycle = 2 * ms_to_ticks(state.tuning.squeeze_ms) as u64;

    // Script: pump whenever the pump is free, let each released balloon
    // drift for a while, then pop it. Two full cycles.
    let mut pops = 0;
    let mut airborne_since: Option<u64> = None;
    let mut next_press: u64 = 1;

    while pops < 2 && state.time_ticks < 60 * TICK_RATE as u64 {
        let mut input = TickInput::default();

        if let Some(t0) = airborne_since {
            if state.time_ticks - t0 >= DRIFT_TICKS
                && let Some(target) = state
                    .floating
                    .iter()
                    .find(|b| matches!(b.state, BalloonState::Floating))
                    .map(|b| b.pos)
            {
                input.pointer_down = Some(target);
                airborne_since = None;
            }
        } else if state.floating.is_empty()
            && state.time_ticks >= next_press
            && !state.pump.busy()
        {
            input.pointer_down = Some(state.pump.top_base - Vec2::new(0.0, 10.0));
            next_press = state.time_ticks + squeeze_cycle;
        }

        tick(&mut state, &input);

        for event in state.drain_events() {
            use balloon_pop::sim::GameEvent::*;
            match event {
                BalloonAirborne { .. } => airborne_since = Some(state.time_ticks),
                BalloonDisposed { .. } => pops += 1,
                _ => {}
            }
            log::info!("[{:>5}] {event:?}", state.time_ticks);
        }
    }

    log::info!(
        "done after {} ticks: {pops} balloons popped, {} still floating",
        state.time_ticks,
        state.floating.len()
    );
    match serde_json::to_string_pretty(&state) {
        Ok(snapshot) => log::debug!("final state snapshot:\n{snapshot}"),
        Err(e) => log::warn!("snapshot failed: {e}"),
    }
}
