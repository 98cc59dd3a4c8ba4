#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative encounter state for Catchball.
//!
//! An [`Encounter`] owns one live creature: its profile, its wandering target
//! state, the throw counter and the time budget. Each accepted throw moves the
//! target, samples the ball flight and resolves a hit or a miss. Adapters read
//! the result back through the [`query`] module.

use std::time::{Duration, Instant};

use catchball_core::{
    BallPath, Clock, CreatureProfile, EncounterState, SystemClock, TargetState, ThrowError,
    ThrowOutcome, ThrowRequest,
};
use catchball_system_ballistics::{closest_approach, compute_trajectory};
use catchball_system_target_motion::TargetMotion;
use log::{debug, info};
use rand_chacha::ChaCha8Rng;

/// One play-through against a single creature, from spawn to hit or escape.
#[derive(Debug)]
pub struct Encounter<C: Clock = SystemClock> {
    profile: CreatureProfile,
    target: TargetState,
    motion: TargetMotion,
    rng: ChaCha8Rng,
    clock: C,
    spawned_at: Instant,
    throw_count: u32,
    state: EncounterState,
    last_ball_path: BallPath,
}

impl Encounter<SystemClock> {
    /// Starts an encounter timed by the system clock.
    #[must_use]
    pub fn new(profile: CreatureProfile, target: TargetState, rng: ChaCha8Rng) -> Self {
        Self::with_clock(profile, target, rng, SystemClock)
    }
}

impl<C: Clock> Encounter<C> {
    /// Starts an encounter timed by the provided clock.
    ///
    /// The time budget starts running immediately.
    #[must_use]
    pub fn with_clock(
        profile: CreatureProfile,
        target: TargetState,
        rng: ChaCha8Rng,
        clock: C,
    ) -> Self {
        let spawned_at = clock.now();
        Self {
            profile,
            target,
            motion: TargetMotion::new(),
            rng,
            clock,
            spawned_at,
            throw_count: 0,
            state: EncounterState::Active,
            last_ball_path: BallPath::at_rest(),
        }
    }

    /// Resolves a single throw.
    ///
    /// Rejections that end the encounter (`TooManyThrows`, `TimedOut`) move it
    /// to [`EncounterState::Escaped`]; `EncounterOver` and
    /// `InvalidParameters` leave every piece of state untouched.
    pub fn throw(&mut self, request: ThrowRequest) -> Result<ThrowOutcome, ThrowError> {
        if self.state.is_over() {
            debug!("{} ignored a throw after the encounter ended", self.name());
            return Err(ThrowError::EncounterOver {
                creature: self.name().to_owned(),
            });
        }

        if let Err(error) = request.validate() {
            debug!("rejected throw parameters {request:?}");
            return Err(error);
        }

        if self.throw_count >= self.profile.max_throws() {
            return Err(self.escape(ThrowError::TooManyThrows {
                creature: self.name().to_owned(),
            }));
        }
        self.throw_count += 1;

        let elapsed = self.elapsed();
        if elapsed > self.profile.max_time() {
            return Err(self.escape(ThrowError::TimedOut {
                creature: self.name().to_owned(),
            }));
        }
        let remaining_time = self.profile.max_time().saturating_sub(elapsed);

        self.motion
            .advance(&mut self.target, &self.profile, &mut self.rng);
        info!(
            "{} velocity: {:.6},{:.6}; {:.2} seconds left",
            self.name(),
            self.target.velocity.x,
            self.target.velocity.y,
            remaining_time.as_secs_f64()
        );

        let mut path = compute_trajectory(request.velocity, request.angle_degrees).map_err(
            |_| ThrowError::InvalidParameters {
                velocity: request.velocity,
                angle_degrees: request.angle_degrees,
            },
        )?;

        let target_position = self.target.position;
        let approach = closest_approach(&path, target_position)
            .filter(|approach| approach.distance < self.profile.hit_radius());

        match approach {
            Some(approach) => {
                path.truncate(approach.index);
                self.last_ball_path = path;
                self.state = EncounterState::Hit;
                info!(
                    "Hit at {:.2}x{:.2} with a distance of {:.6}",
                    approach.point.x, approach.point.y, approach.distance
                );
                Ok(ThrowOutcome::Hit {
                    point: approach.point,
                    distance: approach.distance,
                })
            }
            None => {
                self.last_ball_path = path;
                Ok(ThrowOutcome::Miss {
                    target_position,
                    remaining_throws: self.remaining_throws(),
                    remaining_time,
                })
            }
        }
    }

    fn escape(&mut self, reason: ThrowError) -> ThrowError {
        self.state = EncounterState::Escaped;
        info!("{reason}");
        reason
    }

    fn name(&self) -> &str {
        self.profile.name()
    }

    fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.spawned_at)
    }

    fn remaining_time(&self) -> Duration {
        self.profile.max_time().saturating_sub(self.elapsed())
    }

    fn remaining_throws(&self) -> u32 {
        self.profile.max_throws().saturating_sub(self.throw_count)
    }
}

/// Query functions that provide read-only access to an encounter.
pub mod query {
    use std::time::Duration;

    use super::Encounter;
    use catchball_core::{
        BallPath, Clock, CreatureProfile, EncounterState, RenderSnapshot, TargetState,
    };

    /// Captures everything an adapter needs to draw the encounter.
    #[must_use]
    pub fn snapshot<C: Clock>(encounter: &Encounter<C>) -> RenderSnapshot {
        RenderSnapshot {
            creature: encounter.profile.name().to_owned(),
            ball_path: encounter.last_ball_path.clone(),
            target_position: encounter.target.position,
            sprite: encounter.profile.sprite().clone(),
            state: encounter.state,
        }
    }

    /// Lifecycle stage of the encounter.
    #[must_use]
    pub fn state<C: Clock>(encounter: &Encounter<C>) -> EncounterState {
        encounter.state
    }

    /// Species parameters the encounter was spawned with.
    #[must_use]
    pub fn profile<C: Clock>(encounter: &Encounter<C>) -> &CreatureProfile {
        &encounter.profile
    }

    /// Live position and velocity of the creature.
    #[must_use]
    pub fn target<C: Clock>(encounter: &Encounter<C>) -> &TargetState {
        &encounter.target
    }

    /// Number of throws counted so far.
    #[must_use]
    pub fn throw_count<C: Clock>(encounter: &Encounter<C>) -> u32 {
        encounter.throw_count
    }

    /// Throws left before the creature escapes.
    #[must_use]
    pub fn remaining_throws<C: Clock>(encounter: &Encounter<C>) -> u32 {
        encounter.remaining_throws()
    }

    /// Time left before the creature escapes, measured now.
    #[must_use]
    pub fn remaining_time<C: Clock>(encounter: &Encounter<C>) -> Duration {
        encounter.remaining_time()
    }

    /// Ball samples recorded by the most recent resolved throw.
    #[must_use]
    pub fn last_ball_path<C: Clock>(encounter: &Encounter<C>) -> &BallPath {
        &encounter.last_ball_path
    }
}
