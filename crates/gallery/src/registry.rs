//! The effect registry: one static descriptor per gallery entry.
//!
//! Looked up once at mount time; the renderer dispatches on the id and
//! seeds its uniform buffer from the default parameter specs. Parameter
//! names, defaults, and ranges follow the gallery's control panels.

use crate::params::ParamSpec;
use crate::EffectId;

/// Geometry an effect instance evaluates its kernel over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceSpec {
    /// Full-viewport pixel quad.
    Quad,
    /// Subdivided icosahedron for vertex-displacement effects.
    Icosphere { radius: f32, detail: u32 },
}

/// Everything needed to mount one effect.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    pub id: EffectId,
    pub title: &'static str,
    pub surface: SurfaceSpec,
    pub params: Vec<ParamSpec>,
    /// Relative path of the gradient lookup texture, if the effect uses one.
    pub gradient: Option<&'static str>,
}

pub fn descriptor(id: EffectId) -> EffectDescriptor {
    match id {
        EffectId::Bands => EffectDescriptor {
            id,
            title: "Moving Bands",
            surface: SurfaceSpec::Quad,
            params: vec![
                ParamSpec::count("bandsCount", 2, 1, 10),
                ParamSpec::scalar("swirlCurveStrength", 2.0, 0.0, 5.0, 0.1).smoothed(6.0),
                ParamSpec::scalar("moveSpeed", 0.15, 0.0, 1.0, 0.01),
                ParamSpec::color("colorStart", [1.0, 0.533, 0.0]),
                ParamSpec::color("colorEnd", [1.0, 0.443, 0.004]),
                ParamSpec::scalar("fadeTop", 0.0, 0.0, 1.0, 0.01),
                ParamSpec::scalar("fadeBottom", 0.0, 0.0, 1.0, 0.01),
                ParamSpec::scalar("fadeLeft", 0.0, 0.0, 1.0, 0.01),
                ParamSpec::scalar("fadeRight", 0.99, 0.0, 1.0, 0.01),
                ParamSpec::scalar("waveHeight", 0.1, 0.0, 0.5, 0.01),
                ParamSpec::scalar("waveFrequency", 2.0, 0.1, 10.0, 0.1),
            ],
            gradient: None,
        },
        EffectId::Plasma => EffectDescriptor {
            id,
            title: "Gradient Plasma",
            surface: SurfaceSpec::Quad,
            params: vec![
                ParamSpec::scalar("speed", 2.0, 0.1, 10.0, 0.1),
                ParamSpec::scalar("blend", 1.0, 0.0, 2.0, 0.01),
                ParamSpec::scalar("freqY", 12.345, 1.0, 30.0, 0.1).smoothed(8.0),
                ParamSpec::scalar("freqX", 12.345, 1.0, 30.0, 0.1).smoothed(8.0),
                ParamSpec::color("colorA", [1.0, 0.533, 0.0]),
                ParamSpec::color("colorB", [1.0, 0.443, 0.004]),
                ParamSpec::color("bgColor", [1.0, 1.0, 1.0]),
            ],
            gradient: None,
        },
        EffectId::Aurora => EffectDescriptor {
            id,
            title: "Aurora",
            surface: SurfaceSpec::Quad,
            params: vec![
                ParamSpec::scalar("starSpeed", 0.01, 0.0001, 0.01, 0.0001),
                ParamSpec::scalar("starLayers", 3.9, 1.0, 5.0, 0.1),
                // The source panel asked for 6.0, above its own declared
                // maximum; the declared range wins.
                ParamSpec::scalar("starDensity", 0.95, 0.1, 0.95, 0.01),
                ParamSpec::scalar("auroraSpeed", 0.39, 0.01, 1.0, 0.01),
                ParamSpec::scalar("auroraIntensity", 1.0, 0.1, 1.0, 0.01),
                ParamSpec::color("color1", [1.0, 0.5, 0.0]),
                ParamSpec::color("color2", [1.0, 0.6, 0.0]),
                ParamSpec::color("bgColor", [1.0, 1.0, 1.0]),
            ],
            gradient: None,
        },
        EffectId::BlobWaves => EffectDescriptor {
            id,
            title: "Blob Waves",
            surface: SurfaceSpec::Quad,
            params: vec![
                ParamSpec::scalar("speed", 10.0, 0.0, 50.0, 0.1),
                ParamSpec::scalar("waveScale", 0.3, 0.05, 1.0, 0.01).smoothed(6.0),
                ParamSpec::scalar("waveHeight", 4.0, 0.1, 10.0, 0.1).smoothed(6.0),
                ParamSpec::color("colorA", [1.0, 0.533, 0.0]),
                ParamSpec::color("colorB", [1.0, 0.443, 0.004]),
                ParamSpec::scalar("blendIntensity", 1.0, 0.1, 5.0, 0.1),
            ],
            gradient: None,
        },
        EffectId::Sines => EffectDescriptor {
            id,
            title: "Sine Field",
            surface: SurfaceSpec::Quad,
            params: Vec::new(),
            gradient: None,
        },
        EffectId::Waveform => EffectDescriptor {
            id,
            title: "Waveform",
            surface: SurfaceSpec::Quad,
            params: vec![
                ParamSpec::scalar("zoom", 0.5, 0.1, 2.0, 0.01),
                ParamSpec::count("bandCount", 90, 10, 200),
                ParamSpec::scalar("waveDetail", 30.0, 1.0, 100.0, 1.0),
                ParamSpec::scalar("tanhStrength", 900.0, 10.0, 2000.0, 10.0),
                ParamSpec::scalar("intensityScale", 1.0, 0.1, 10.0, 0.1),
                ParamSpec::color("colorA", [1.0, 0.2, 0.2]),
                ParamSpec::color("colorB", [1.0, 0.533, 0.0]),
                ParamSpec::color("bgColor", [1.0, 1.0, 1.0]),
            ],
            gradient: None,
        },
        EffectId::Diffraction => EffectDescriptor {
            id,
            title: "Diffraction",
            surface: SurfaceSpec::Quad,
            params: Vec::new(),
            gradient: None,
        },
        EffectId::Blob => EffectDescriptor {
            id,
            title: "Blob",
            surface: SurfaceSpec::Icosphere {
                radius: 1.0,
                detail: 64,
            },
            params: vec![
                ParamSpec::scalar("positionFrequency", 1.0, 0.0, 10.0, 0.1).smoothed(4.0),
                ParamSpec::scalar("positionStrength", 0.3, 0.0, 2.0, 0.01).smoothed(4.0),
                ParamSpec::scalar("timeFrequency", 1.0, 0.0, 10.0, 0.1),
                ParamSpec::scalar("rippleFrequency", 3.0, 0.0, 10.0, 0.1).smoothed(4.0),
                ParamSpec::scalar("rippleStrength", 0.1, 0.0, 1.0, 0.01).smoothed(4.0),
                ParamSpec::scalar("rippleTimeFrequency", 1.0, 0.0, 10.0, 0.1),
            ],
            gradient: Some("textures/gradient.png"),
        },
    }
}
