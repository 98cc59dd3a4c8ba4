//! TOML roster files describing custom species tables.
//!
//! ```toml
//! [[creature]]
//! name = "Sproutling"
//! hit_radius = 40.0
//! max_throws = 5
//! max_time_secs = 30
//! x_motion = { max_speed = 50.0, acceleration = 10.0, reverse_probability = 0.5 }
//! sprite = { url = "sprites/sproutling.png" }
//! ```
//!
//! Omitted motion tables describe a stationary axis and an omitted sprite
//! falls back to the default image.

use std::{fs, path::Path, time::Duration};

use catchball_core::{AxisMotion, SpriteRef};
use log::info;
use serde::Deserialize;

use crate::registry::{validated, Registry, RegistryError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RosterFile {
    #[serde(default, rename = "creature")]
    creatures: Vec<CreatureEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreatureEntry {
    name: String,
    hit_radius: f64,
    max_throws: u32,
    max_time_secs: u64,
    #[serde(default)]
    x_motion: AxisMotion,
    #[serde(default)]
    y_motion: AxisMotion,
    #[serde(default)]
    sprite: Option<SpriteRef>,
}

impl Registry {
    /// Parses a roster from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, RegistryError> {
        let roster: RosterFile = toml::from_str(contents)?;
        roster
            .creatures
            .into_iter()
            .try_fold(Registry::builder(), |builder, entry| {
                let profile = validated(&entry.name, |profile| {
                    profile
                        .x_motion(entry.x_motion)
                        .y_motion(entry.y_motion)
                        .hit_radius(entry.hit_radius)
                        .max_throws(entry.max_throws)
                        .max_time(Duration::from_secs(entry.max_time_secs))
                        .sprite(entry.sprite.clone().unwrap_or_default())
                })?;
                Ok::<_, RegistryError>(builder.register(profile))
            })?
            .build()
    }

    /// Reads and parses a roster file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml_str(&contents)?;
        info!(
            "loaded {} creature(s) from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Registry::from_toml_str(
            r#"
            [[creature]]
            name = "Moth"
            hit_radius = 5.0
            max_throws = 3
            max_time_secs = 10
            wings = 4
            "#,
        )
        .unwrap_err();
        assert!(matches!(error, RegistryError::Parse(_)));
    }

    #[test]
    fn roster_without_creatures_is_empty() {
        assert!(matches!(
            Registry::from_toml_str(""),
            Err(RegistryError::Empty)
        ));
    }
}
