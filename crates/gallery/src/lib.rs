//! Effect catalogue and control-surface model for lumedeck.
//!
//! The crate owns everything the renderer treats as external input:
//!
//! - [`params`]: typed, range-constrained parameters and the
//!   [`ParameterSet`] snapshot the renderer reads once per tick.
//! - [`registry`]: the fixed mapping from an [`EffectId`] to its kernel
//!   tag, surface descriptor, and default parameters.
//! - [`preset`]: TOML preset files that override parameter defaults and
//!   optionally declare a playlist for timed rotation.

mod params;
mod preset;
mod registry;

pub use params::{parse_hex_color, ParamError, ParamKind, ParamSpec, ParamValue, ParameterSet};
pub use preset::{Playlist, PlaylistMode, PresetError, PresetFile};
pub use registry::{descriptor, EffectDescriptor, SurfaceSpec};

use std::fmt;
use std::str::FromStr;

/// Identifies one effect in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EffectId {
    Bands,
    Plasma,
    Aurora,
    BlobWaves,
    Sines,
    Waveform,
    Diffraction,
    Blob,
}

impl EffectId {
    pub const ALL: [EffectId; 8] = [
        EffectId::Bands,
        EffectId::Plasma,
        EffectId::Aurora,
        EffectId::BlobWaves,
        EffectId::Sines,
        EffectId::Waveform,
        EffectId::Diffraction,
        EffectId::Blob,
    ];

    /// Stable lowercase identifier used on the CLI and in preset files.
    pub fn slug(self) -> &'static str {
        match self {
            EffectId::Bands => "bands",
            EffectId::Plasma => "plasma",
            EffectId::Aurora => "aurora",
            EffectId::BlobWaves => "blobwaves",
            EffectId::Sines => "sines",
            EffectId::Waveform => "waveform",
            EffectId::Diffraction => "diffraction",
            EffectId::Blob => "blob",
        }
    }

    /// Position in the gallery ordering, for prev/next switching.
    pub fn next(self) -> EffectId {
        let idx = Self::ALL.iter().position(|id| *id == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> EffectId {
        let idx = Self::ALL.iter().position(|id| *id == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown effect '{0}'")]
pub struct UnknownEffect(pub String);

impl FromStr for EffectId {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.slug() == s)
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for id in EffectId::ALL {
            assert_eq!(id.slug().parse::<EffectId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert!("sparkles".parse::<EffectId>().is_err());
    }

    #[test]
    fn next_and_prev_cycle_the_whole_gallery() {
        let mut id = EffectId::Bands;
        for _ in 0..EffectId::ALL.len() {
            id = id.next();
        }
        assert_eq!(id, EffectId::Bands);
        assert_eq!(EffectId::Bands.prev().next(), EffectId::Bands);
    }
}
