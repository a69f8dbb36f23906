//! Floating drift physics
//!
//! Each airborne balloon integrates independently: constant-velocity motion
//! with a small random perturbation per axis, a per-axis speed clamp, and
//! elastic reflection near the stage edges. Reflection is deliberately loose:
//! position is never clamped, so a balloon may overshoot the padding band for
//! a tick before the reversed velocity carries it back.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Balloon, BalloonState};
use crate::tuning::Tuning;
use crate::vec_from_angle;

/// Assign the initial drift velocity and mark the balloon Floating.
///
/// Direction is uniform over the full circle; each axis then gets its own
/// uniform speed draw from the configured range.
pub fn start_floating(balloon: &mut Balloon, rng: &mut Pcg32, tuning: &Tuning) {
    let dir = vec_from_angle(rng.random_range(0.0..std::f32::consts::TAU));
    balloon.vel = Vec2::new(
        dir.x * rng.random_range(tuning.float_speed_min..=tuning.float_speed_max),
        dir.y * rng.random_range(tuning.float_speed_min..=tuning.float_speed_max),
    );
    balloon.state = BalloonState::Floating;
}

/// One integration step for every Floating balloon in the set.
///
/// Balloons in any other state (Bursting awaiting disposal) are skipped; their
/// position belongs to the burst animation.
pub fn integrate(balloons: &mut [Balloon], stage: Vec2, rng: &mut Pcg32, tuning: &Tuning) {
    for balloon in balloons {
        if matches!(balloon.state, BalloonState::Floating) {
            integrate_one(balloon, stage, rng, tuning);
        }
    }
}

fn integrate_one(b: &mut Balloon, stage: Vec2, rng: &mut Pcg32, tuning: &Tuning) {
    b.pos += b.vel;

    let clamp = tuning.speed_clamp;
    b.vel.x = (b.vel.x + rng.random_range(-tuning.perturb..=tuning.perturb)).clamp(-clamp, clamp);
    b.vel.y = (b.vel.y + rng.random_range(-tuning.perturb..=tuning.perturb)).clamp(-clamp, clamp);

    // Reflect only when moving toward the near edge, so a single crossing of
    // the padding band flips the sign exactly once.
    let pad = tuning.wall_padding;
    if (b.pos.x <= pad && b.vel.x < 0.0) || (b.pos.x >= stage.x - pad && b.vel.x > 0.0) {
        b.vel.x = -b.vel.x;
    }
    if (b.pos.y <= pad && b.vel.y < 0.0) || (b.pos.y >= stage.y - pad && b.vel.y > 0.0) {
        b.vel.y = -b.vel.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const STAGE: Vec2 = Vec2::new(800.0, 600.0);

    fn floating_balloon(seed: u64, pos: Vec2) -> (Balloon, Pcg32, Tuning) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut b = Balloon::spawn(1, pos, &mut rng, &tuning);
        start_floating(&mut b, &mut rng, &tuning);
        (b, rng, tuning)
    }

    #[test]
    fn test_start_floating_speed_range() {
        for seed in 0..50 {
            let (b, _, tuning) = floating_balloon(seed, STAGE / 2.0);
            assert!(matches!(b.state, BalloonState::Floating));
            // Per-axis speed is direction component times a draw from
            // [min, max], so each axis magnitude stays under max
            assert!(b.vel.x.abs() <= tuning.float_speed_max);
            assert!(b.vel.y.abs() <= tuning.float_speed_max);
            assert!(b.vel.length() > 0.0);
        }
    }

    #[test]
    fn test_reflects_once_per_approach() {
        // Drive slowly at the left edge, no perturbation to muddy the sign
        let (mut b, mut rng, mut tuning) = floating_balloon(3, Vec2::new(48.0, 300.0));
        tuning.perturb = 0.0;
        b.vel = Vec2::new(-0.6, 0.0);

        let mut set = vec![b];
        integrate(&mut set, STAGE, &mut rng, &tuning);
        // Inside the padding band, moving left: flipped
        assert!(set[0].vel.x > 0.0);

        // Still inside the band next tick, but now moving away: no re-flip
        integrate(&mut set, STAGE, &mut rng, &tuning);
        assert!(set[0].pos.x <= tuning.wall_padding);
        assert!(set[0].vel.x > 0.0);
    }

    #[test]
    fn test_loose_reflection_allows_overshoot() {
        let (mut b, mut rng, mut tuning) = floating_balloon(3, Vec2::new(51.0, 300.0));
        tuning.perturb = 0.0;
        b.vel = Vec2::new(-2.0, 0.0);
        let mut set = vec![b];
        integrate(&mut set, STAGE, &mut rng, &tuning);
        // Position crossed into the band and is not clamped back
        assert!(set[0].pos.x < tuning.wall_padding);
    }

    #[test]
    fn test_non_floating_balloons_skipped() {
        let (mut b, mut rng, tuning) = floating_balloon(9, STAGE / 2.0);
        assert!(b.try_burst(&tuning));
        let pos = b.pos;
        let vel = b.vel;
        let mut set = vec![b];
        integrate(&mut set, STAGE, &mut rng, &tuning);
        assert_eq!(set[0].pos, pos);
        assert_eq!(set[0].vel, vel);
    }

    #[test]
    fn test_balloons_integrate_independently() {
        // Same seed, different B1 velocity: B2's trajectory must not change
        let run = |b1_vel: Vec2| {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(77);
            let mut b1 = Balloon::spawn(1, Vec2::new(200.0, 200.0), &mut rng, &tuning);
            let mut b2 = Balloon::spawn(2, Vec2::new(600.0, 400.0), &mut rng, &tuning);
            b1.state = BalloonState::Floating;
            b2.state = BalloonState::Floating;
            b1.vel = b1_vel;
            b2.vel = Vec2::new(1.0, -1.0);
            let mut set = vec![b1, b2];
            let mut rng = Pcg32::seed_from_u64(123);
            for _ in 0..50 {
                integrate(&mut set, STAGE, &mut rng, &tuning);
            }
            (set[1].pos, set[1].vel)
        };
        assert_eq!(run(Vec2::new(2.0, 0.0)), run(Vec2::new(-1.5, 1.5)));
    }

    proptest! {
        #[test]
        fn prop_velocity_never_exceeds_clamp(seed in any::<u64>(), ticks in 1usize..400) {
            let (b, mut rng, tuning) = floating_balloon(seed, STAGE / 2.0);
            let mut set = vec![b];
            for _ in 0..ticks {
                integrate(&mut set, STAGE, &mut rng, &tuning);
                prop_assert!(set[0].vel.x.abs() <= tuning.speed_clamp + 1e-5);
                prop_assert!(set[0].vel.y.abs() <= tuning.speed_clamp + 1e-5);
            }
        }
    }
}
