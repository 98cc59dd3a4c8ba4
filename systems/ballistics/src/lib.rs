#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure ballistics system that samples ball flights and measures near misses.

use catchball_core::{BallPath, Point, GRAVITY, TIME_STEP};
use thiserror::Error;

/// Reasons a trajectory cannot be computed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TrajectoryError {
    /// The velocity was negative or the angle left the open interval (0, 90).
    #[error("cannot launch at velocity {velocity} and angle {angle_degrees}")]
    InvalidParameters {
        /// Rejected launch velocity.
        velocity: f64,
        /// Rejected launch angle in degrees.
        angle_degrees: f64,
    },
}

/// Samples the flight of a ball launched from the origin.
///
/// Samples are taken every [`TIME_STEP`] seconds starting at `t = 0` and the
/// path ends before the first sample that falls below the ground. A zero
/// velocity yields the launch point alone.
pub fn compute_trajectory(velocity: f64, angle_degrees: f64) -> Result<BallPath, TrajectoryError> {
    let velocity_ok = velocity.is_finite() && velocity >= 0.0;
    let angle_ok = angle_degrees.is_finite() && angle_degrees > 0.0 && angle_degrees < 90.0;
    if !velocity_ok || !angle_ok {
        return Err(TrajectoryError::InvalidParameters {
            velocity,
            angle_degrees,
        });
    }

    let radians = angle_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let mut points = Vec::new();
    let mut t = 0.0_f64;
    loop {
        let y = t * velocity * sin - GRAVITY * t * t / 2.0;
        if y < 0.0 {
            break;
        }
        let x = velocity * cos * t;
        points.push(Point::new(x, y));
        t += TIME_STEP;
    }

    Ok(BallPath::from_points(points))
}

/// Sample of a path that passed nearest to a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Approach {
    /// Position of the sample within the path.
    pub index: usize,
    /// The sample itself.
    pub point: Point,
    /// Distance between the sample and the point of interest.
    pub distance: f64,
}

/// Finds the path sample closest to `target`.
///
/// Only discrete samples are considered. When several samples share the
/// minimum distance the earliest one wins. Returns `None` for an empty path.
#[must_use]
pub fn closest_approach(path: &BallPath, target: Point) -> Option<Approach> {
    let mut best: Option<Approach> = None;
    for (index, point) in path.points().iter().copied().enumerate() {
        let distance = point.distance(target);
        let closer = best.map_or(true, |current| distance < current.distance);
        if closer {
            best = Some(Approach {
                index,
                point,
                distance,
            });
        }
    }
    best
}
