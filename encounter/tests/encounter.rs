use std::time::Duration;

use catchball_core::{
    AxisMotion, BallPath, CreatureProfile, EncounterState, ManualClock, Point, RenderSnapshot,
    SystemClock, TargetState, ThrowError, ThrowOutcome, ThrowRequest,
};
use catchball_encounter::{query, Encounter};
use catchball_system_ballistics::compute_trajectory;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn profile(hit_radius: f64, max_throws: u32, max_time: Duration) -> CreatureProfile {
    CreatureProfile::builder("Sproutling")
        .hit_radius(hit_radius)
        .max_throws(max_throws)
        .max_time(max_time)
        .build()
        .expect("valid profile")
}

fn spawn(profile: CreatureProfile, at: Point, clock: ManualClock) -> Encounter<ManualClock> {
    Encounter::with_clock(
        profile,
        TargetState::at(at),
        ChaCha8Rng::seed_from_u64(0x4d59_5df4_d0f3_3173),
        clock,
    )
}

#[test]
fn fresh_encounter_shows_ball_at_rest() {
    let encounter = spawn(
        profile(40.0, 5, Duration::from_secs(30)),
        Point::new(700.0, 1.0),
        ManualClock::new(),
    );

    let snapshot = query::snapshot(&encounter);
    assert_eq!(snapshot.state, EncounterState::Active);
    assert_eq!(snapshot.ball_path, BallPath::at_rest());
    assert_eq!(snapshot.target_position, Point::new(700.0, 1.0));
    assert_eq!(query::remaining_throws(&encounter), 5);
}

#[test]
fn throw_through_target_hits_and_truncates_path() {
    let request = ThrowRequest::new(120.0, 45.0);
    let full = compute_trajectory(request.velocity, request.angle_degrees).expect("valid");
    let target = full.points()[20];
    let mut encounter = spawn(
        profile(100.0, 5, Duration::from_secs(30)),
        target,
        ManualClock::new(),
    );

    let outcome = encounter.throw(request).expect("throw resolves");

    let ThrowOutcome::Hit { point, distance } = outcome else {
        panic!("expected a hit, got {outcome:?}");
    };
    assert!(distance < 100.0);
    assert_eq!(query::state(&encounter), EncounterState::Hit);

    let recorded = query::last_ball_path(&encounter);
    assert!(recorded.len() < full.len());
    assert_eq!(full.points()[recorded.len()], point);
    assert_eq!(recorded.points(), &full.points()[..recorded.len()]);
}

#[test]
fn miss_records_full_path() {
    let request = ThrowRequest::new(30.0, 60.0);
    let mut encounter = spawn(
        profile(10.0, 5, Duration::from_secs(30)),
        Point::new(950.0, 900.0),
        ManualClock::new(),
    );

    let outcome = encounter.throw(request).expect("throw resolves");

    assert!(matches!(outcome, ThrowOutcome::Miss { .. }));
    assert_eq!(
        query::last_ball_path(&encounter),
        &compute_trajectory(request.velocity, request.angle_degrees).expect("valid")
    );
    assert_eq!(query::state(&encounter), EncounterState::Active);
    assert_eq!(query::throw_count(&encounter), 1);
}

#[test]
fn single_throw_budget_escapes_on_second_throw() {
    let mut encounter = spawn(
        profile(10.0, 1, Duration::from_secs(30)),
        Point::new(950.0, 900.0),
        ManualClock::new(),
    );

    let first = encounter
        .throw(ThrowRequest::new(30.0, 60.0))
        .expect("first throw resolves");
    assert!(matches!(
        first,
        ThrowOutcome::Miss {
            remaining_throws: 0,
            ..
        }
    ));

    let second = encounter.throw(ThrowRequest::new(30.0, 60.0));
    assert_eq!(
        second,
        Err(ThrowError::TooManyThrows {
            creature: "Sproutling".to_owned()
        })
    );
    assert_eq!(query::state(&encounter), EncounterState::Escaped);
    assert!(query::throw_count(&encounter) <= 2);
}

#[test]
fn zero_time_budget_times_out_immediately() {
    let clock = ManualClock::new();
    let mut manual = spawn(
        profile(10.0, 5, Duration::ZERO),
        Point::new(950.0, 900.0),
        clock.clone(),
    );
    clock.advance(Duration::from_nanos(1));
    assert!(matches!(
        manual.throw(ThrowRequest::new(100.0, 45.0)),
        Err(ThrowError::TimedOut { .. })
    ));
    assert_eq!(query::state(&manual), EncounterState::Escaped);

    let mut system = Encounter::with_clock(
        profile(10.0, 5, Duration::ZERO),
        TargetState::at(Point::new(950.0, 900.0)),
        ChaCha8Rng::seed_from_u64(3),
        SystemClock,
    );
    assert!(matches!(
        system.throw(ThrowRequest::new(100.0, 45.0)),
        Err(ThrowError::TimedOut { .. })
    ));
}

#[test]
fn time_budget_expires_as_the_clock_advances() {
    let clock = ManualClock::new();
    let mut encounter = spawn(
        profile(10.0, 5, Duration::from_secs(30)),
        Point::new(950.0, 900.0),
        clock.clone(),
    );

    clock.advance(Duration::from_secs(29));
    assert!(encounter.throw(ThrowRequest::new(30.0, 60.0)).is_ok());

    clock.advance(Duration::from_secs(2));
    assert!(matches!(
        encounter.throw(ThrowRequest::new(30.0, 60.0)),
        Err(ThrowError::TimedOut { .. })
    ));
}

#[test]
fn finished_encounter_rejects_throws_without_changing() {
    let mut encounter = spawn(
        profile(10.0, 0, Duration::from_secs(30)),
        Point::new(950.0, 900.0),
        ManualClock::new(),
    );
    assert!(matches!(
        encounter.throw(ThrowRequest::new(30.0, 60.0)),
        Err(ThrowError::TooManyThrows { .. })
    ));

    let before: RenderSnapshot = query::snapshot(&encounter);
    let count = query::throw_count(&encounter);
    for _ in 0..3 {
        assert!(matches!(
            encounter.throw(ThrowRequest::new(30.0, 60.0)),
            Err(ThrowError::EncounterOver { .. })
        ));
    }

    assert_eq!(query::snapshot(&encounter), before);
    assert_eq!(query::throw_count(&encounter), count);
}

#[test]
fn seeded_encounters_replay_identically() {
    let wandering = CreatureProfile::builder("Duskwing")
        .x_motion(AxisMotion::new(60.0, 20.0, 0.5))
        .y_motion(AxisMotion::new(60.0, 20.0, 0.5))
        .hit_radius(40.0)
        .max_throws(8)
        .max_time(Duration::from_secs(30))
        .build()
        .expect("valid profile");
    let throws = [
        ThrowRequest::new(100.0, 45.0),
        ThrowRequest::new(200.0, 30.0),
        ThrowRequest::new(300.0, 60.0),
        ThrowRequest::new(450.0, 15.0),
    ];

    let replay = || {
        let mut encounter = spawn(wandering.clone(), Point::new(640.0, 400.0), ManualClock::new());
        throws
            .iter()
            .map(|request| {
                let outcome = encounter.throw(*request);
                (outcome, query::snapshot(&encounter))
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(replay(), replay());
}

#[test]
fn caught_encounter_rejects_throws_without_changing() {
    let request = ThrowRequest::new(120.0, 45.0);
    let full = compute_trajectory(request.velocity, request.angle_degrees).expect("valid");
    let mut encounter = spawn(
        profile(40.0, 5, Duration::from_secs(30)),
        full.points()[12],
        ManualClock::new(),
    );
    assert!(matches!(encounter.throw(request), Ok(ThrowOutcome::Hit { .. })));

    let before = query::snapshot(&encounter);
    let count = query::throw_count(&encounter);
    assert_eq!(
        encounter.throw(ThrowRequest::new(30.0, 60.0)),
        Err(ThrowError::EncounterOver {
            creature: "Sproutling".to_owned()
        })
    );

    assert_eq!(query::snapshot(&encounter), before);
    assert_eq!(query::throw_count(&encounter), count);
    assert_eq!(query::state(&encounter), EncounterState::Hit);
}
