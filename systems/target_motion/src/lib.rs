#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded random walk that moves a target between throws.

use catchball_core::{AxisMotion, CreatureProfile, TargetState, PLANE_MAX, PLANE_MIN};
use rand::Rng;

/// Speed multiplier applied when a step would leave the plane.
///
/// The magnitude grows on every bounce. This is the game's intended feel and
/// is kept as is; profiles cap their speed so one bounce stays in bounds.
pub const BOUNCE_FACTOR: f64 = -1.5;

/// Pure system that advances a target by one random walk step per throw.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetMotion;

impl TargetMotion {
    /// Creates a new target motion system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Moves the target one step along both axes, horizontal first.
    ///
    /// Every axis consumes exactly two random draws, including axes that
    /// cannot move, so replays stay aligned regardless of the profile.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        state: &mut TargetState,
        profile: &CreatureProfile,
        rng: &mut R,
    ) {
        let (x, vx) = step_axis(
            state.position.x,
            state.velocity.x,
            profile.x_motion(),
            rng,
        );
        state.position.x = x;
        state.velocity.x = vx;

        let (y, vy) = step_axis(
            state.position.y,
            state.velocity.y,
            profile.y_motion(),
            rng,
        );
        state.position.y = y;
        state.velocity.y = vy;
    }
}

fn step_axis<R: Rng + ?Sized>(
    position: f64,
    speed: f64,
    motion: AxisMotion,
    rng: &mut R,
) -> (f64, f64) {
    let direction = if rng.gen::<f64>() < motion.reverse_probability {
        -1.0
    } else {
        1.0
    };
    let mut speed = speed + rng.gen::<f64>() * direction * motion.acceleration;
    speed = if speed < 0.0 {
        speed.max(-motion.max_speed)
    } else {
        speed.min(motion.max_speed)
    };

    let prospective = position + speed;
    if prospective > PLANE_MAX || prospective < PLANE_MIN {
        speed *= BOUNCE_FACTOR;
    }

    (position + speed, speed)
}
