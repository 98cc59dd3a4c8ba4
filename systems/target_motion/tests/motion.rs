use catchball_core::{AxisMotion, CreatureProfile, Point, TargetState, MAX_AXIS_SPEED};
use catchball_system_target_motion::TargetMotion;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn profile(x: AxisMotion, y: AxisMotion) -> CreatureProfile {
    CreatureProfile::builder("Wanderer")
        .x_motion(x)
        .y_motion(y)
        .build()
        .expect("valid profile")
}

#[test]
fn wandering_target_never_leaves_the_plane() {
    let profiles = [
        profile(
            AxisMotion::new(60.0, 20.0, 0.5),
            AxisMotion::new(60.0, 20.0, 0.5),
        ),
        profile(
            AxisMotion::new(MAX_AXIS_SPEED, MAX_AXIS_SPEED, 0.1),
            AxisMotion::new(MAX_AXIS_SPEED, MAX_AXIS_SPEED, 0.9),
        ),
    ];
    let starts = [
        Point::new(1.0, 1.0),
        Point::new(999.0, 999.0),
        Point::new(500.0, 400.0),
    ];
    let motion = TargetMotion::new();

    for (seed, profile) in profiles.iter().enumerate() {
        for start in starts {
            let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0000 + seed as u64);
            let mut state = TargetState::at(start);
            for step in 0..5_000 {
                motion.advance(&mut state, profile, &mut rng);
                assert!(
                    state.in_bounds(),
                    "target escaped the plane at step {step}: {:?}",
                    state.position
                );
            }
        }
    }
}

#[test]
fn stationary_target_stays_at_spawn() {
    let profile = profile(AxisMotion::STATIONARY, AxisMotion::STATIONARY);
    let spawn = Point::new(742.0, 1.0);
    let mut state = TargetState::at(spawn);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..1_000 {
        TargetMotion::new().advance(&mut state, &profile, &mut rng);
    }

    assert_eq!(state.position, spawn);
}

#[test]
fn identical_seeds_replay_identical_walks() {
    let profile = profile(
        AxisMotion::new(50.0, 10.0, 0.5),
        AxisMotion::new(30.0, 5.0, 0.3),
    );
    let walk = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = TargetState::at(Point::new(640.0, 320.0));
        (0..64)
            .map(|_| {
                TargetMotion::new().advance(&mut state, &profile, &mut rng);
                state.position
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(walk(11), walk(11));
    assert_ne!(walk(11), walk(12));
}

#[test]
fn speed_stays_within_bounce_envelope() {
    let motion = AxisMotion::new(50.0, 10.0, 0.5);
    let profile = profile(motion, motion);
    let mut state = TargetState::at(Point::new(500.0, 500.0));
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..2_000 {
        TargetMotion::new().advance(&mut state, &profile, &mut rng);
        assert!(state.velocity.x.abs() <= motion.max_speed * 1.5);
        assert!(state.velocity.y.abs() <= motion.max_speed * 1.5);
    }
}
