//! Renderer crate for lumedeck.
//!
//! Ties the CPU procedural kernels, the uniform-sync protocol, and the
//! wgpu presentation window together. The overall flow is:
//!
//! ```text
//!   CLI / lumedeck
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ window::run ──▶ winit event loop ──▶ Session::tick
//!          │                                    │               │
//!          │                                    │               ├─▶ UniformBuffer::sync
//!          │                                    │               └─▶ kernel over Surface
//!          │                                    └─▶ GpuState::render_frame (upload + present)
//!          └─▶ still::run (headless PNG export)
//! ```
//!
//! The [`Session`] is the two-state core (Idle/Running) and works without
//! any GPU; [`gpu`] and [`window`] are the presentation plumbing around it.

mod clock;
mod gpu;
mod instance;
mod session;
mod shaders;
mod still;
mod surface;
mod textures;
mod uniforms;
mod window;

pub use clock::{BoxedClock, Clock, FixedClock, MonotonicClock, TimeSample};
pub use instance::EffectInstance;
pub use session::{Session, TickOutcome};
pub use surface::{icosphere, DisplacedVertex, MeshSurface, MeshVertex, Surface};
pub use textures::GradientSlot;
pub use uniforms::{SlotValue, UniformBuffer, Viewport};

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use gallery::{descriptor, EffectId, ParameterSet, PlaylistMode, PresetFile};

/// High-level behaviour requested by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPolicy {
    /// Run the tick loop continuously in the preview window.
    Animate,
    /// Render a single frame at a fixed timestamp and write it to disk.
    Still { time: f32, output: PathBuf },
}

impl Default for RenderPolicy {
    fn default() -> Self {
        Self::Animate
    }
}

/// Timed rotation through a list of effects.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
    pub mode: PlaylistMode,
    pub item_duration: Duration,
    pub items: Vec<EffectId>,
    pub seed: u64,
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Effect shown first (ignored when a rotation is configured).
    pub effect: EffectId,
    /// Internal resolution factor for the CPU frame (0.1 to 1.0).
    pub render_scale: f32,
    /// Optional FPS cap; `None` renders every display refresh.
    pub target_fps: Option<f32>,
    /// Parameter overrides from a preset file.
    pub presets: Option<PresetFile>,
    /// Optional timed rotation through several effects.
    pub rotation: Option<RotationConfig>,
    /// Directory that gradient texture paths are resolved against.
    pub asset_root: PathBuf,
    /// Animate continuously or export a still.
    pub policy: RenderPolicy,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            effect: EffectId::Bands,
            render_scale: 1.0,
            target_fps: None,
            presets: None,
            rotation: None,
            asset_root: PathBuf::from("assets"),
            policy: RenderPolicy::default(),
        }
    }
}

/// Entry point owning the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<()> {
        match self.config.policy.clone() {
            RenderPolicy::Animate => window::run(&self.config),
            RenderPolicy::Still { time, output } => still::run(&self.config, time, &output),
        }
    }
}

/// The control surface read for one effect: registry defaults overlaid
/// with preset values. Falls back to plain defaults if the preset turns
/// out to be unusable for this effect.
pub(crate) fn control_parameters(config: &RendererConfig, id: EffectId) -> ParameterSet {
    let defaults = ParameterSet::from_specs(&descriptor(id).params);
    match &config.presets {
        Some(presets) => presets.parameter_set(id).unwrap_or_else(|err| {
            tracing::warn!(effect = %id, error = %err, "preset unusable; using defaults");
            defaults
        }),
        None => defaults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery::ParamValue;

    #[test]
    fn control_parameters_default_without_presets() {
        let config = RendererConfig::default();
        let set = control_parameters(&config, EffectId::Plasma);
        assert_eq!(set.get("speed"), Some(ParamValue::Scalar(2.0)));
    }

    #[test]
    fn control_parameters_apply_presets() {
        let presets = PresetFile::from_toml_str(
            r#"
[effects.plasma]
speed = 4.5
"#,
        )
        .unwrap();
        let config = RendererConfig {
            presets: Some(presets),
            ..RendererConfig::default()
        };
        let set = control_parameters(&config, EffectId::Plasma);
        assert_eq!(set.get("speed"), Some(ParamValue::Scalar(4.5)));
    }
}
