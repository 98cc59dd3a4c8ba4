#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Species registry and the spawner that starts new encounters from it.

mod registry;
mod roster;

use std::ops::Range;

use catchball_core::{Clock, CreatureProfile, Point, SystemClock, TargetState};
use catchball_encounter::Encounter;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub use registry::{training_dummy, Registry, RegistryBuilder, RegistryError};

/// Horizontal spawn coordinates, drawn as whole units.
const SPAWN_COLUMNS: Range<u32> = 500..1000;
/// Vertical spawn coordinates for species that can fly, drawn as whole units.
const SPAWN_ROWS: Range<u32> = 1..800;
/// Vertical coordinate of species that stay on the ground.
const GROUND_LEVEL: f64 = 1.0;

/// Starts encounters with species drawn from a [`Registry`].
#[derive(Debug)]
pub struct Spawner<'registry, C: Clock + Clone = SystemClock> {
    registry: &'registry Registry,
    rng: ChaCha8Rng,
    clock: C,
}

impl<'registry> Spawner<'registry, SystemClock> {
    /// Creates a spawner whose encounters are timed by the system clock.
    #[must_use]
    pub fn new(registry: &'registry Registry, seed: u64) -> Self {
        Self::with_clock(registry, seed, SystemClock)
    }
}

impl<'registry, C: Clock + Clone> Spawner<'registry, C> {
    /// Creates a spawner whose encounters share the provided clock.
    #[must_use]
    pub fn with_clock(registry: &'registry Registry, seed: u64, clock: C) -> Self {
        Self {
            registry,
            rng: ChaCha8Rng::seed_from_u64(seed),
            clock,
        }
    }

    /// Registry the spawner draws species from.
    #[must_use]
    pub fn registry(&self) -> &'registry Registry {
        self.registry
    }

    /// Starts an encounter with a species picked uniformly at random.
    pub fn spawn(&mut self) -> Encounter<C> {
        let registry = self.registry;
        let profiles = registry.profiles();
        let index = self.rng.gen_range(0..profiles.len());
        self.spawn_profile(&profiles[index])
    }

    /// Starts an encounter with the species at the provided registration index.
    pub fn spawn_index(&mut self, index: usize) -> Option<Encounter<C>> {
        let registry = self.registry;
        let profile = registry.get(index)?;
        Some(self.spawn_profile(profile))
    }

    /// Starts an encounter with the named species, ignoring ASCII case.
    pub fn spawn_named(&mut self, name: &str) -> Option<Encounter<C>> {
        let registry = self.registry;
        let profile = registry.find(name)?;
        Some(self.spawn_profile(profile))
    }

    /// Starts an encounter with a species that need not be registered.
    pub fn spawn_profile(&mut self, profile: &CreatureProfile) -> Encounter<C> {
        let x = f64::from(self.rng.gen_range(SPAWN_COLUMNS));
        let y = if profile.y_motion().is_mobile() {
            f64::from(self.rng.gen_range(SPAWN_ROWS))
        } else {
            GROUND_LEVEL
        };
        let encounter_rng = ChaCha8Rng::seed_from_u64(self.rng.gen());

        info!("A wild {} appeared at {x:.0}x{y:.0}", profile.name());
        Encounter::with_clock(
            profile.clone(),
            TargetState::at(Point::new(x, y)),
            encounter_rng,
            self.clock.clone(),
        )
    }
}
