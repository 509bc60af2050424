//! One mounted effect: uniform state, surface, and the per-tick kernel run.

use gallery::{descriptor, EffectId, ParameterSet};
use glam::{vec2, Vec2, Vec3, Vec4};
use kernels::effects::{aurora, bands, blob, blobwaves, diffraction, plasma, sines, waveform};
use kernels::FrameInput;

use crate::clock::TimeSample;
use crate::surface::{DisplacedVertex, MeshSurface, Surface};
use crate::textures::GradientSlot;
use crate::uniforms::{UniformBuffer, Viewport};

/// Per-frame kernel parameters, rebuilt from the uniform slots each tick.
/// The registry's descriptor decides the variant once at mount; dispatch is
/// a plain match from then on.
enum KernelParams {
    Bands(bands::BandsParams),
    Plasma(plasma::PlasmaParams),
    Aurora(aurora::AuroraParams),
    BlobWaves(blobwaves::BlobWavesParams),
    Sines,
    Waveform(waveform::WaveformParams),
    Diffraction,
    Blob(blob::BlobParams),
}

fn kernel_params(id: EffectId, u: &UniformBuffer) -> KernelParams {
    match id {
        EffectId::Bands => KernelParams::Bands(bands::BandsParams {
            bands_count: u.count("bandsCount"),
            swirl_strength: u.scalar("swirlCurveStrength"),
            move_speed: u.scalar("moveSpeed"),
            color_start: u.color("colorStart"),
            color_end: u.color("colorEnd"),
            fade_top: u.scalar("fadeTop"),
            fade_bottom: u.scalar("fadeBottom"),
            fade_left: u.scalar("fadeLeft"),
            fade_right: u.scalar("fadeRight"),
            wave_height: u.scalar("waveHeight"),
            wave_frequency: u.scalar("waveFrequency"),
        }),
        EffectId::Plasma => KernelParams::Plasma(plasma::PlasmaParams {
            speed: u.scalar("speed"),
            blend: u.scalar("blend"),
            freq_x: u.scalar("freqX"),
            freq_y: u.scalar("freqY"),
            color_a: u.color("colorA"),
            color_b: u.color("colorB"),
            bg_color: u.color("bgColor"),
        }),
        EffectId::Aurora => KernelParams::Aurora(aurora::AuroraParams {
            star_speed: u.scalar("starSpeed"),
            star_layers: u.scalar("starLayers"),
            star_density: u.scalar("starDensity"),
            aurora_speed: u.scalar("auroraSpeed"),
            aurora_intensity: u.scalar("auroraIntensity"),
            color1: u.color("color1"),
            color2: u.color("color2"),
            bg_color: u.color("bgColor"),
        }),
        EffectId::BlobWaves => KernelParams::BlobWaves(blobwaves::BlobWavesParams {
            speed: u.scalar("speed"),
            wave_scale: u.scalar("waveScale"),
            wave_height: u.scalar("waveHeight"),
            color_a: u.color("colorA"),
            color_b: u.color("colorB"),
            blend_intensity: u.scalar("blendIntensity"),
        }),
        EffectId::Sines => KernelParams::Sines,
        EffectId::Waveform => KernelParams::Waveform(waveform::WaveformParams {
            zoom: u.scalar("zoom"),
            band_count: u.count("bandCount"),
            wave_detail: u.scalar("waveDetail"),
            tanh_strength: u.scalar("tanhStrength"),
            intensity_scale: u.scalar("intensityScale"),
            color_a: u.color("colorA"),
            color_b: u.color("colorB"),
            bg_color: u.color("bgColor"),
        }),
        EffectId::Diffraction => KernelParams::Diffraction,
        EffectId::Blob => KernelParams::Blob(blob::BlobParams {
            position_frequency: u.scalar("positionFrequency"),
            position_strength: u.scalar("positionStrength"),
            time_frequency: u.scalar("timeFrequency"),
            ripple_frequency: u.scalar("rippleFrequency"),
            ripple_strength: u.scalar("rippleStrength"),
            ripple_time_frequency: u.scalar("rippleTimeFrequency"),
        }),
    }
}

fn shade(params: &KernelParams, uv: Vec2, frame: &FrameInput) -> Vec4 {
    match params {
        KernelParams::Bands(p) => bands::shade(uv, frame, p),
        KernelParams::Plasma(p) => plasma::shade(uv, frame, p),
        KernelParams::Aurora(p) => aurora::shade(uv, frame, p),
        KernelParams::BlobWaves(p) => blobwaves::shade(uv, frame, p),
        KernelParams::Sines => sines::shade(uv, frame),
        KernelParams::Waveform(p) => waveform::shade(uv, frame, p),
        KernelParams::Diffraction => diffraction::shade(uv, frame),
        KernelParams::Blob(_) => Vec4::ONE,
    }
}

/// Reusable output buffer for one instance; allocated at mount (and on
/// resize), never per tick.
enum FrameTarget {
    Pixels {
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    },
    Mesh {
        vertices: Vec<DisplacedVertex>,
    },
}

pub struct EffectInstance {
    id: EffectId,
    uniforms: UniformBuffer,
    surface: Surface,
    target: FrameTarget,
    gradient: GradientSlot,
    render_scale: f32,
}

impl EffectInstance {
    pub fn new(
        id: EffectId,
        viewport: Viewport,
        render_scale: f32,
        gradient: GradientSlot,
    ) -> Self {
        let desc = descriptor(id);
        let uniforms = UniformBuffer::from_specs(&desc.params, viewport);
        let surface = Surface::from_spec(desc.surface);
        let target = match &surface {
            Surface::Quad => {
                let scaled = viewport.scaled(render_scale);
                FrameTarget::Pixels {
                    width: scaled.width,
                    height: scaled.height,
                    rgba: vec![0; (scaled.width * scaled.height * 4) as usize],
                }
            }
            Surface::Mesh(mesh) => FrameTarget::Mesh {
                vertices: Vec::with_capacity(mesh.vertices.len()),
            },
        };
        tracing::debug!(%id, ?viewport, render_scale, "mounted effect instance");
        Self {
            id,
            uniforms,
            surface,
            target,
            gradient,
            render_scale,
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn uniforms(&self) -> &UniformBuffer {
        &self.uniforms
    }

    pub fn gradient(&self) -> &GradientSlot {
        &self.gradient
    }

    pub fn gradient_mut(&mut self) -> &mut GradientSlot {
        &mut self.gradient
    }

    /// Undisplaced source mesh, for index/vertex buffer creation.
    pub fn mesh(&self) -> Option<&MeshSurface> {
        match &self.surface {
            Surface::Mesh(mesh) => Some(mesh),
            Surface::Quad => None,
        }
    }

    /// CPU frame as RGBA8 rows, for upload or export.
    pub fn pixels(&self) -> Option<(&[u8], u32, u32)> {
        match &self.target {
            FrameTarget::Pixels {
                width,
                height,
                rgba,
            } => Some((rgba.as_slice(), *width, *height)),
            FrameTarget::Mesh { .. } => None,
        }
    }

    /// Displaced vertices of the last tick, for upload.
    pub fn displaced(&self) -> Option<&[DisplacedVertex]> {
        match &self.target {
            FrameTarget::Mesh { vertices } => Some(vertices.as_slice()),
            FrameTarget::Pixels { .. } => None,
        }
    }

    /// Syncs uniforms and evaluates the kernel over the surface.
    pub fn tick(
        &mut self,
        sample: TimeSample,
        viewport: Viewport,
        pointer: [f32; 2],
        params: &ParameterSet,
    ) {
        self.uniforms.sync(sample, viewport, pointer, params);
        self.fit_target(viewport);
        self.paint();
    }

    fn fit_target(&mut self, viewport: Viewport) {
        if let FrameTarget::Pixels {
            width,
            height,
            rgba,
        } = &mut self.target
        {
            let scaled = viewport.scaled(self.render_scale);
            if *width != scaled.width || *height != scaled.height {
                *width = scaled.width;
                *height = scaled.height;
                rgba.resize((scaled.width * scaled.height * 4) as usize, 0);
            }
        }
    }

    fn paint(&mut self) {
        let frame = self.uniforms.frame_input();
        let params = kernel_params(self.id, &self.uniforms);
        match (&mut self.target, &self.surface) {
            (
                FrameTarget::Pixels {
                    width,
                    height,
                    rgba,
                },
                Surface::Quad,
            ) => {
                let w = *width as usize;
                let h = *height as usize;
                for y in 0..h {
                    let v = 1.0 - (y as f32 + 0.5) / h as f32;
                    let row = &mut rgba[y * w * 4..(y + 1) * w * 4];
                    for x in 0..w {
                        let u = (x as f32 + 0.5) / w as f32;
                        let c = shade(&params, vec2(u, v), &frame);
                        let alpha = c.w.clamp(0.0, 1.0);
                        // Composite over the gallery's white page background.
                        let rgb = Vec3::ONE.lerp(c.truncate(), alpha);
                        let o = x * 4;
                        row[o] = (rgb.x.clamp(0.0, 1.0) * 255.0) as u8;
                        row[o + 1] = (rgb.y.clamp(0.0, 1.0) * 255.0) as u8;
                        row[o + 2] = (rgb.z.clamp(0.0, 1.0) * 255.0) as u8;
                        row[o + 3] = 255;
                    }
                }
            }
            (FrameTarget::Mesh { vertices }, Surface::Mesh(mesh)) => {
                let KernelParams::Blob(p) = &params else {
                    return;
                };
                vertices.clear();
                vertices.extend(mesh.vertices.iter().map(|v| {
                    let d = blob::displace(
                        Vec3::from_array(v.position),
                        Vec3::from_array(v.normal),
                        Vec3::from_array(v.tangent),
                        &frame,
                        p,
                    );
                    DisplacedVertex {
                        position: d.position.to_array(),
                        normal: d.normal.to_array(),
                    }
                }));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery::descriptor;

    fn sample(seconds: f32) -> TimeSample {
        TimeSample {
            seconds,
            frame_index: 0,
        }
    }

    fn default_params(id: EffectId) -> ParameterSet {
        ParameterSet::from_specs(&descriptor(id).params)
    }

    #[test]
    fn pixel_effects_fill_their_buffer() {
        let viewport = Viewport::new(64, 32);
        for id in [EffectId::Bands, EffectId::Plasma, EffectId::Sines] {
            let mut instance =
                EffectInstance::new(id, viewport, 1.0, GradientSlot::placeholder());
            instance.tick(sample(1.0), viewport, [0.0, 0.0], &default_params(id));
            let (pixels, w, h) = instance.pixels().unwrap();
            assert_eq!((w, h), (64, 32));
            assert_eq!(pixels.len(), 64 * 32 * 4);
            // Every alpha byte is opaque after compositing.
            assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
        }
    }

    #[test]
    fn frames_are_deterministic_for_fixed_inputs() {
        let viewport = Viewport::new(48, 27);
        let params = default_params(EffectId::Plasma);
        let run = || {
            let mut instance = EffectInstance::new(
                EffectId::Plasma,
                viewport,
                1.0,
                GradientSlot::placeholder(),
            );
            instance.tick(sample(2.5), viewport, [0.1, -0.2], &params);
            instance.pixels().unwrap().0.to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn render_scale_shrinks_the_internal_target() {
        let viewport = Viewport::new(100, 80);
        let mut instance = EffectInstance::new(
            EffectId::Plasma,
            viewport,
            0.5,
            GradientSlot::placeholder(),
        );
        instance.tick(
            sample(0.5),
            viewport,
            [0.0, 0.0],
            &default_params(EffectId::Plasma),
        );
        let (_, w, h) = instance.pixels().unwrap();
        assert_eq!((w, h), (50, 40));
        // The uniform resolution still reports the real viewport.
        assert_eq!(instance.uniforms().resolution(), [100.0, 80.0, 1.0]);
    }

    #[test]
    fn resize_reshapes_the_buffer_and_same_size_is_idempotent() {
        let mut instance = EffectInstance::new(
            EffectId::Bands,
            Viewport::new(40, 30),
            1.0,
            GradientSlot::placeholder(),
        );
        let params = default_params(EffectId::Bands);
        instance.tick(sample(1.0), Viewport::new(40, 30), [0.0, 0.0], &params);
        let first = instance.pixels().unwrap().0.to_vec();
        instance.tick(sample(1.0), Viewport::new(40, 30), [0.0, 0.0], &params);
        assert_eq!(instance.pixels().unwrap().0, first.as_slice());

        instance.tick(sample(1.0), Viewport::new(80, 60), [0.0, 0.0], &params);
        let (_, w, h) = instance.pixels().unwrap();
        assert_eq!((w, h), (80, 60));
    }

    #[test]
    fn blob_instance_displaces_every_vertex() {
        let viewport = Viewport::new(32, 32);
        let mut instance = EffectInstance::new(
            EffectId::Blob,
            viewport,
            1.0,
            GradientSlot::placeholder(),
        );
        let base_count = instance.mesh().unwrap().vertices.len();
        instance.tick(
            sample(1.5),
            viewport,
            [0.0, 0.0],
            &default_params(EffectId::Blob),
        );
        let displaced = instance.displaced().unwrap();
        assert_eq!(displaced.len(), base_count);
        assert!(displaced.iter().all(|v| {
            v.position.iter().all(|c| c.is_finite()) && v.normal.iter().all(|c| c.is_finite())
        }));
    }
}
