#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Catchball engine.
//!
//! This crate defines the data that flows between adapters, the authoritative
//! encounter, and the pure systems. Adapters submit [`ThrowRequest`] values,
//! the encounter resolves them against a [`CreatureProfile`] by consulting the
//! ballistics and target motion systems, and then exposes a [`RenderSnapshot`]
//! that adapters may draw. Game-over conditions travel as [`ThrowError`]
//! values rather than panics so adapters can decide how to word them.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest coordinate a target may occupy on either axis.
pub const PLANE_MIN: f64 = 1.0;
/// Highest coordinate a target may occupy on either axis.
pub const PLANE_MAX: f64 = 999.0;

/// Simulated time between two consecutive ball path samples, in seconds.
pub const TIME_STEP: f64 = 0.1;
/// Gravitational acceleration applied to the ball, in world units per second squared.
pub const GRAVITY: f64 = 9.8;

/// Largest per-axis speed a profile may declare.
///
/// A bounce multiplies the speed by 1.5, so a target travelling at `s` that
/// crosses one bound lands at most `1 + 2.5 * s` away from it. Keeping `s` at
/// or below this value keeps every bounce inside the plane.
pub const MAX_AXIS_SPEED: f64 = 399.0;

/// Highest launch velocity the launcher accepts.
pub const MAX_LAUNCH_VELOCITY: f64 = 530.0;
/// Shallowest launch angle the launcher accepts, in degrees.
pub const MIN_LAUNCH_ANGLE: f64 = 1.0;
/// Steepest launch angle the launcher accepts, in degrees.
pub const MAX_LAUNCH_ANGLE: f64 = 89.0;

/// Width and height, in screen units, used when a sprite does not specify a size.
pub const DEFAULT_SPRITE_SIZE: u32 = 32;

/// Location within the playing plane expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Launch point every ball path starts from.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-tick displacement of a target along both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal displacement applied per update.
    pub x: f64,
    /// Vertical displacement applied per update.
    pub y: f64,
}

impl Velocity {
    /// Velocity of a target that has not started moving.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new velocity from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounds for the random walk performed along a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisMotion {
    /// Largest absolute speed the target may reach before a bounce.
    pub max_speed: f64,
    /// Upper bound of the random speed change applied per update.
    pub acceleration: f64,
    /// Probability that an update accelerates against the positive direction.
    pub reverse_probability: f64,
}

impl AxisMotion {
    /// Motion of an axis that never moves.
    pub const STATIONARY: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new axis motion descriptor.
    #[must_use]
    pub const fn new(max_speed: f64, acceleration: f64, reverse_probability: f64) -> Self {
        Self {
            max_speed,
            acceleration,
            reverse_probability,
        }
    }

    /// Reports whether the axis can move at all.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.max_speed > 0.0
    }

    fn validate(&self, axis: Axis) -> Result<(), ProfileError> {
        let values = [self.max_speed, self.acceleration, self.reverse_probability];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ProfileError::NonFiniteMotion { axis });
        }
        if !(0.0..=MAX_AXIS_SPEED).contains(&self.max_speed) {
            return Err(ProfileError::MaxSpeedOutOfRange {
                axis,
                max_speed: self.max_speed,
            });
        }
        if self.acceleration < 0.0 {
            return Err(ProfileError::NegativeAcceleration {
                axis,
                acceleration: self.acceleration,
            });
        }
        if !(0.0..=1.0).contains(&self.reverse_probability) {
            return Err(ProfileError::ReverseProbabilityOutOfRange {
                axis,
                probability: self.reverse_probability,
            });
        }
        Ok(())
    }
}

impl Default for AxisMotion {
    fn default() -> Self {
        Self::STATIONARY
    }
}

/// Identifies one of the two motion axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Opaque reference to the image adapters draw for a creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteRef {
    /// Location of the image, interpreted by the adapter.
    pub url: String,
    /// Width of the drawn image in screen units.
    #[serde(default = "default_sprite_size")]
    pub width: u32,
    /// Height of the drawn image in screen units.
    #[serde(default = "default_sprite_size")]
    pub height: u32,
}

impl SpriteRef {
    /// Creates a sprite reference drawn at the default size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: DEFAULT_SPRITE_SIZE,
            height: DEFAULT_SPRITE_SIZE,
        }
    }

    /// Overrides the drawn size of the sprite.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for SpriteRef {
    fn default() -> Self {
        Self::new("sprites/logo.png")
    }
}

fn default_sprite_size() -> u32 {
    DEFAULT_SPRITE_SIZE
}

/// Immutable parameter set describing a creature species.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatureProfile {
    name: String,
    x_motion: AxisMotion,
    y_motion: AxisMotion,
    hit_radius: f64,
    max_throws: u32,
    max_time: Duration,
    sprite: SpriteRef,
}

impl CreatureProfile {
    /// Starts building a profile for the named species.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> CreatureProfileBuilder {
        CreatureProfileBuilder::new(name.into())
    }

    /// Display name of the species.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Random walk bounds along the horizontal axis.
    #[must_use]
    pub const fn x_motion(&self) -> AxisMotion {
        self.x_motion
    }

    /// Random walk bounds along the vertical axis.
    #[must_use]
    pub const fn y_motion(&self) -> AxisMotion {
        self.y_motion
    }

    /// Distance under which a ball sample counts as a hit.
    #[must_use]
    pub const fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Number of throws the player may attempt before the creature escapes.
    #[must_use]
    pub const fn max_throws(&self) -> u32 {
        self.max_throws
    }

    /// Time budget measured from the moment the creature spawned.
    #[must_use]
    pub const fn max_time(&self) -> Duration {
        self.max_time
    }

    /// Image adapters draw for the creature.
    #[must_use]
    pub const fn sprite(&self) -> &SpriteRef {
        &self.sprite
    }
}

/// Builder that validates a [`CreatureProfile`] before handing it out.
#[derive(Clone, Debug)]
pub struct CreatureProfileBuilder {
    name: String,
    x_motion: AxisMotion,
    y_motion: AxisMotion,
    hit_radius: f64,
    max_throws: u32,
    max_time: Duration,
    sprite: SpriteRef,
}

impl CreatureProfileBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            x_motion: AxisMotion::STATIONARY,
            y_motion: AxisMotion::STATIONARY,
            hit_radius: 10.0,
            max_throws: 5,
            max_time: Duration::from_secs(10),
            sprite: SpriteRef::default(),
        }
    }

    /// Sets the horizontal random walk bounds.
    #[must_use]
    pub fn x_motion(mut self, motion: AxisMotion) -> Self {
        self.x_motion = motion;
        self
    }

    /// Sets the vertical random walk bounds.
    #[must_use]
    pub fn y_motion(mut self, motion: AxisMotion) -> Self {
        self.y_motion = motion;
        self
    }

    /// Sets the hit radius.
    #[must_use]
    pub fn hit_radius(mut self, hit_radius: f64) -> Self {
        self.hit_radius = hit_radius;
        self
    }

    /// Sets the throw budget.
    #[must_use]
    pub fn max_throws(mut self, max_throws: u32) -> Self {
        self.max_throws = max_throws;
        self
    }

    /// Sets the time budget.
    #[must_use]
    pub fn max_time(mut self, max_time: Duration) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets the sprite drawn for the creature.
    #[must_use]
    pub fn sprite(mut self, sprite: SpriteRef) -> Self {
        self.sprite = sprite;
        self
    }

    /// Validates the collected parameters and produces the profile.
    pub fn build(self) -> Result<CreatureProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        self.x_motion.validate(Axis::X)?;
        self.y_motion.validate(Axis::Y)?;
        if !self.hit_radius.is_finite() || self.hit_radius <= 0.0 {
            return Err(ProfileError::InvalidHitRadius {
                hit_radius: self.hit_radius,
            });
        }

        Ok(CreatureProfile {
            name: name.to_owned(),
            x_motion: self.x_motion,
            y_motion: self.y_motion,
            hit_radius: self.hit_radius,
            max_throws: self.max_throws,
            max_time: self.max_time,
            sprite: self.sprite,
        })
    }
}

/// Reasons a creature profile fails validation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProfileError {
    /// The species name was blank.
    #[error("creature name must not be empty")]
    EmptyName,
    /// One of the motion parameters was NaN or infinite.
    #[error("{axis} motion parameters must be finite")]
    NonFiniteMotion {
        /// Axis carrying the offending value.
        axis: Axis,
    },
    /// The maximum speed was negative or too large to keep bounces in bounds.
    #[error("{axis} max speed {max_speed} must lie within 0..={}", MAX_AXIS_SPEED)]
    MaxSpeedOutOfRange {
        /// Axis carrying the offending value.
        axis: Axis,
        /// Rejected maximum speed.
        max_speed: f64,
    },
    /// The acceleration was negative.
    #[error("{axis} acceleration {acceleration} must not be negative")]
    NegativeAcceleration {
        /// Axis carrying the offending value.
        axis: Axis,
        /// Rejected acceleration.
        acceleration: f64,
    },
    /// The reverse probability was not a probability.
    #[error("{axis} reverse probability {probability} must lie within 0..=1")]
    ReverseProbabilityOutOfRange {
        /// Axis carrying the offending value.
        axis: Axis,
        /// Rejected probability.
        probability: f64,
    },
    /// The hit radius was not a positive finite distance.
    #[error("hit radius {hit_radius} must be a positive distance")]
    InvalidHitRadius {
        /// Rejected hit radius.
        hit_radius: f64,
    },
}

/// Live position and velocity of a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    /// Current position within the plane.
    pub position: Point,
    /// Displacement applied on the next update before bounds are checked.
    pub velocity: Velocity,
}

impl TargetState {
    /// Creates a motionless target at the provided position.
    #[must_use]
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            velocity: Velocity::ZERO,
        }
    }

    /// Reports whether the position lies within the plane bounds.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        let bounds = PLANE_MIN..=PLANE_MAX;
        bounds.contains(&self.position.x) && bounds.contains(&self.position.y)
    }
}

/// Ordered ball samples taken every [`TIME_STEP`] seconds after launch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BallPath {
    points: Vec<Point>,
}

impl BallPath {
    /// Wraps the provided samples.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Path of a ball that has not been thrown yet.
    #[must_use]
    pub fn at_rest() -> Self {
        Self {
            points: vec![Point::ORIGIN],
        }
    }

    /// Samples in launch order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Reports whether the path holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keeps only the samples strictly before `len`.
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    /// Consumes the path, yielding the underlying samples.
    #[must_use]
    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

/// Lifecycle stage of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterState {
    /// The creature is still catchable.
    Active,
    /// A throw caught the creature.
    Hit,
    /// The creature ran out the throw or time budget.
    Escaped,
}

impl EncounterState {
    /// Reports whether the encounter no longer accepts throws.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// Launch parameters chosen by the player for a single throw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrowRequest {
    /// Launch speed in world units per second.
    pub velocity: f64,
    /// Elevation above the horizon, in degrees.
    pub angle_degrees: f64,
}

impl ThrowRequest {
    /// Creates a new throw request.
    #[must_use]
    pub const fn new(velocity: f64, angle_degrees: f64) -> Self {
        Self {
            velocity,
            angle_degrees,
        }
    }

    /// Checks the request against the launcher limits.
    pub fn validate(&self) -> Result<(), ThrowError> {
        let velocity_ok = (0.0..=MAX_LAUNCH_VELOCITY).contains(&self.velocity);
        let angle_ok = (MIN_LAUNCH_ANGLE..=MAX_LAUNCH_ANGLE).contains(&self.angle_degrees);
        if velocity_ok && angle_ok {
            Ok(())
        } else {
            Err(ThrowError::InvalidParameters {
                velocity: self.velocity,
                angle_degrees: self.angle_degrees,
            })
        }
    }
}

/// Result of a throw that the encounter accepted and resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ThrowOutcome {
    /// The ball passed within the hit radius and the creature was caught.
    Hit {
        /// Ball sample closest to the creature.
        point: Point,
        /// Distance between that sample and the creature.
        distance: f64,
    },
    /// The ball never came close enough.
    Miss {
        /// Position the creature moved to during the throw.
        target_position: Point,
        /// Throws left before the creature escapes.
        remaining_throws: u32,
        /// Time left before the creature escapes.
        remaining_time: Duration,
    },
}

/// Reasons a throw was not resolved. All of them are expected game flow.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ThrowError {
    /// The launch parameters fall outside the launcher limits.
    #[error(
        "throw parameters out of range (velocity {velocity}, angle {angle_degrees}); \
         velocity must lie within 0..={} and angle within {}..={}",
        MAX_LAUNCH_VELOCITY,
        MIN_LAUNCH_ANGLE,
        MAX_LAUNCH_ANGLE
    )]
    InvalidParameters {
        /// Rejected launch velocity.
        velocity: f64,
        /// Rejected launch angle.
        angle_degrees: f64,
    },
    /// The throw budget was exhausted and the creature escaped.
    #[error("Too many tries. {creature} escaped!")]
    TooManyThrows {
        /// Name of the escaped creature.
        creature: String,
    },
    /// The time budget was exhausted and the creature escaped.
    #[error("You took too long. {creature} escaped!")]
    TimedOut {
        /// Name of the escaped creature.
        creature: String,
    },
    /// The encounter already ended.
    #[error("{creature} is not a valid target!")]
    EncounterOver {
        /// Name of the creature whose encounter ended.
        creature: String,
    },
}

/// Everything an adapter needs to draw the outcome of the latest throw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Name of the creature being hunted.
    pub creature: String,
    /// Samples of the most recent ball flight.
    pub ball_path: BallPath,
    /// Current creature position.
    pub target_position: Point,
    /// Image drawn at the creature position.
    pub sprite: SpriteRef,
    /// Lifecycle stage of the encounter.
    pub state: EncounterState,
}

/// Source of the current instant used to measure encounter time budgets.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Clock backed by the operating system's monotonic timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to, for deterministic replays.
///
/// Clones share the same timeline, so advancing one advances all of them.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by the provided duration.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get().saturating_add(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
