//! Table of creature species that can be spawned.

use std::{collections::HashSet, io, path::PathBuf, time::Duration};

use catchball_core::{AxisMotion, CreatureProfile, CreatureProfileBuilder, ProfileError, SpriteRef};
use thiserror::Error;

/// Ordered, non-empty collection of species with unique names.
#[derive(Clone, Debug, PartialEq)]
pub struct Registry {
    profiles: Vec<CreatureProfile>,
}

impl Registry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding the species available out of the box.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::builder()
            .register(sproutling()?)
            .register(duskwing()?)
            .build()
    }

    /// Number of registered species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Always `false`; registries are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Species at the provided registration index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CreatureProfile> {
        self.profiles.get(index)
    }

    /// Species whose name matches, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CreatureProfile> {
        self.profiles
            .iter()
            .find(|profile| profile.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Iterator over the species in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CreatureProfile> {
        self.profiles.iter()
    }

    pub(crate) fn profiles(&self) -> &[CreatureProfile] {
        &self.profiles
    }
}

/// Collects species before validating them into a [`Registry`].
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    profiles: Vec<CreatureProfile>,
}

impl RegistryBuilder {
    /// Appends a species.
    #[must_use]
    pub fn register(mut self, profile: CreatureProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Rejects empty rosters and repeated names.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if self.profiles.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            if !seen.insert(profile.name().to_ascii_lowercase()) {
                return Err(RegistryError::DuplicateName(profile.name().to_owned()));
            }
        }

        Ok(Registry {
            profiles: self.profiles,
        })
    }
}

/// Reasons a registry cannot be assembled.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No species were registered.
    #[error("a registry needs at least one creature")]
    Empty,
    /// Two species shared a name.
    #[error("creature '{0}' is registered more than once")]
    DuplicateName(String),
    /// A species failed validation.
    #[error("creature '{name}' is invalid")]
    InvalidProfile {
        /// Name of the offending species.
        name: String,
        /// Validation failure.
        #[source]
        source: ProfileError,
    },
    /// A roster file could not be parsed.
    #[error("could not parse roster")]
    Parse(#[from] toml::de::Error),
    /// A roster file could not be read.
    #[error("could not read roster '{}'", path.display())]
    Io {
        /// Location of the roster file.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },
}

pub(crate) fn validated(
    name: &str,
    configure: impl FnOnce(CreatureProfileBuilder) -> CreatureProfileBuilder,
) -> Result<CreatureProfile, RegistryError> {
    configure(CreatureProfile::builder(name))
        .build()
        .map_err(|source| RegistryError::InvalidProfile {
            name: name.to_owned(),
            source,
        })
}

fn sproutling() -> Result<CreatureProfile, RegistryError> {
    validated("Sproutling", |builder| {
        builder
            .x_motion(AxisMotion::new(50.0, 10.0, 0.5))
            .y_motion(AxisMotion::STATIONARY)
            .hit_radius(40.0)
            .max_throws(5)
            .max_time(Duration::from_secs(30))
            .sprite(SpriteRef::new("sprites/sproutling.png"))
    })
}

fn duskwing() -> Result<CreatureProfile, RegistryError> {
    validated("Duskwing", |builder| {
        builder
            .x_motion(AxisMotion::new(60.0, 20.0, 0.5))
            .y_motion(AxisMotion::new(60.0, 20.0, 0.5))
            .hit_radius(40.0)
            .max_throws(5)
            .max_time(Duration::from_secs(30))
            .sprite(SpriteRef::new("sprites/duskwing.png"))
    })
}

/// Forgiving practice species that is not part of the standard registry.
pub fn training_dummy() -> Result<CreatureProfile, RegistryError> {
    validated("Training Dummy", |builder| {
        builder
            .x_motion(AxisMotion::new(50.0, 10.0, 0.5))
            .y_motion(AxisMotion::STATIONARY)
            .hit_radius(100.0)
            .max_throws(100)
            .max_time(Duration::from_secs(90))
    })
}
