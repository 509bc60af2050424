//! TOML preset files: parameter overrides and an optional playlist.
//!
//! ```toml
//! version = 1
//!
//! [effects.aurora]
//! starSpeed = 0.004
//! color1 = "#ff8000"
//!
//! [playlist]
//! mode = "shuffle"
//! item_duration = "45s"
//! items = ["aurora", "bands", "waveform"]
//! ```
//!
//! Values are clamped to the declared parameter ranges while applying, and
//! hex color strings are converted here; the renderer never sees raw text.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::params::{parse_hex_color, ParamKind, ParamValue, ParameterSet};
use crate::registry::descriptor;
use crate::EffectId;

#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("failed to read preset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse preset file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown effect '{0}' in preset")]
    UnknownEffect(String),
    #[error("effect '{effect}' has no parameter '{name}'")]
    UnknownParameter { effect: String, name: String },
    #[error("parameter '{name}' of '{effect}': {reason}")]
    InvalidValue {
        effect: String,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresetFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub effects: BTreeMap<String, BTreeMap<String, PresetValue>>,
    #[serde(default)]
    pub playlist: Option<Playlist>,
}

fn default_version() -> u32 {
    1
}

/// A raw preset value before it is matched against the parameter's kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PresetValue {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub mode: PlaylistMode,
    #[serde(
        default = "default_item_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub item_duration: Duration,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistMode {
    #[default]
    Continuous,
    Shuffle,
}

fn default_item_duration() -> Duration {
    Duration::from_secs(30)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as seconds or a human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs_f64(v))
        }
    }
    deserializer.deserialize_any(Visitor)
}

impl PresetFile {
    pub fn from_toml_str(input: &str) -> Result<Self, PresetError> {
        let file: PresetFile = toml::from_str(input)?;
        file.validate()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, PresetError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Checks that every named effect and parameter exists in the registry.
    fn validate(&self) -> Result<(), PresetError> {
        for (slug, overrides) in &self.effects {
            let id: EffectId = slug
                .parse()
                .map_err(|_| PresetError::UnknownEffect(slug.clone()))?;
            let specs = descriptor(id).params;
            for name in overrides.keys() {
                if !specs.iter().any(|spec| spec.name == name) {
                    return Err(PresetError::UnknownParameter {
                        effect: slug.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        if let Some(playlist) = &self.playlist {
            for slug in &playlist.items {
                slug.parse::<EffectId>()
                    .map_err(|_| PresetError::UnknownEffect(slug.clone()))?;
            }
        }
        Ok(())
    }

    /// Builds the control-surface snapshot for `id`: registry defaults with
    /// this preset's overrides applied and clamped.
    pub fn parameter_set(&self, id: EffectId) -> Result<ParameterSet, PresetError> {
        let specs = descriptor(id).params;
        let mut set = ParameterSet::from_specs(&specs);
        let Some(overrides) = self.effects.get(id.slug()) else {
            return Ok(set);
        };
        for (name, raw) in overrides {
            let spec = specs
                .iter()
                .find(|spec| spec.name == name)
                .ok_or_else(|| PresetError::UnknownParameter {
                    effect: id.slug().to_string(),
                    name: name.clone(),
                })?;
            let value = match (spec.kind, raw) {
                (ParamKind::Scalar, PresetValue::Float(v)) => ParamValue::Scalar(*v as f32),
                (ParamKind::Scalar, PresetValue::Int(v)) => ParamValue::Scalar(*v as f32),
                (ParamKind::Count, PresetValue::Int(v)) => ParamValue::Count(*v as i32),
                (ParamKind::Color, PresetValue::Text(v)) => {
                    ParamValue::Color(parse_hex_color(v).map_err(|err| {
                        PresetError::InvalidValue {
                            effect: id.slug().to_string(),
                            name: name.clone(),
                            reason: err.to_string(),
                        }
                    })?)
                }
                (kind, raw) => {
                    return Err(PresetError::InvalidValue {
                        effect: id.slug().to_string(),
                        name: name.clone(),
                        reason: format!("{raw:?} does not fit a {kind:?} parameter"),
                    });
                }
            };
            let clamped = spec.clamp(value);
            set.set(name, clamped)
                .map_err(|err| PresetError::InvalidValue {
                    effect: id.slug().to_string(),
                    name: name.clone(),
                    reason: err.to_string(),
                })?;
        }
        Ok(set)
    }

    /// Playlist entries resolved to effect ids, in file order.
    pub fn playlist_items(&self) -> Option<(PlaylistMode, Duration, Vec<EffectId>)> {
        let playlist = self.playlist.as_ref()?;
        let items = playlist
            .items
            .iter()
            .filter_map(|slug| slug.parse().ok())
            .collect::<Vec<_>>();
        Some((playlist.mode, playlist.item_duration, items))
    }
}
