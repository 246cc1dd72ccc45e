//! User preferences.

#![allow(missing_docs)] // most fields are self-explanatory

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use navcube_core::{Face, Lattice, Rgb, default_face_color};
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Distance between neighboring cubie centers.
    pub lattice_gap: f32,
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
    pub colors: FaceColors,
}
impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}
impl Preferences {
    /// Loads the default preferences overridden by `user_file`, if given. If
    /// loading fails, a warning is logged and the default preferences are
    /// returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map(Self::validated)
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                DEFAULT_PREFS.clone()
            })
    }

    /// Loads the default preferences overridden by a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT))
            .add_source(config::File::from_str(s, PREFS_FILE_FORMAT))
            .build()?
            .try_deserialize::<Self>()
            .map(Self::validated)
    }

    /// Serializes the preferences to YAML.
    pub fn to_yaml_string(&self) -> Result<String, serde_norway::Error> {
        serde_norway::to_string(self)
    }

    /// Returns the lattice that cubies are placed on.
    pub fn lattice(&self) -> Lattice {
        Lattice::new(self.lattice_gap)
    }

    /// Replaces values that would break the simulation with their defaults.
    fn validated(mut self) -> Self {
        let defaults = &*DEFAULT_PREFS;
        if !(self.lattice_gap.is_finite() && self.lattice_gap > 0.0) {
            log::warn!(
                "Invalid lattice gap {}; using {}",
                self.lattice_gap,
                defaults.lattice_gap,
            );
            self.lattice_gap = defaults.lattice_gap;
        }
        let anim = &mut self.animation;
        for (name, value, default) in [
            (
                "twist_duration",
                &mut anim.twist_duration,
                defaults.animation.twist_duration,
            ),
            (
                "label_shrink.duration",
                &mut anim.label_shrink.duration,
                defaults.animation.label_shrink.duration,
            ),
            (
                "label_grow.duration",
                &mut anim.label_grow.duration,
                defaults.animation.label_grow.duration,
            ),
        ] {
            if !(value.is_finite() && *value >= 0.0) {
                log::warn!("Invalid {name} {value}; using {default}");
                *value = default;
            }
        }
        self
    }
}

/// Sticker color for each face.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FaceColors {
    pub u: Rgb,
    pub d: Rgb,
    pub l: Rgb,
    pub r: Rgb,
    pub f: Rgb,
    pub b: Rgb,
}
impl Default for FaceColors {
    fn default() -> Self {
        Self {
            u: default_face_color(Face::U),
            d: default_face_color(Face::D),
            l: default_face_color(Face::L),
            r: default_face_color(Face::R),
            f: default_face_color(Face::F),
            b: default_face_color(Face::B),
        }
    }
}
impl FaceColors {
    pub fn get(&self, face: Face) -> Rgb {
        match face {
            Face::U => self.u,
            Face::D => self.d,
            Face::L => self.l,
            Face::R => self.r,
            Face::F => self.f,
            Face::B => self.b,
        }
    }
}
