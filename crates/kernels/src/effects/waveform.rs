//! Volumetric raymarched waveform.
//!
//! Each pixel marches a ray through a field of frequency-doubled cosine
//! waves, accumulating a phase-shifted cosine palette attenuated by step
//! size and depth, then tone-maps the accumulator with `tanh` and tints the
//! luma with a vertical two-color gradient.

use glam::{vec3, vec4, Vec2, Vec3, Vec4};

use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformParams {
    pub zoom: f32,
    pub band_count: i32,
    pub wave_detail: f32,
    pub tanh_strength: f32,
    pub intensity_scale: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub bg_color: Vec3,
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self {
            zoom: 0.5,
            band_count: 90,
            wave_detail: 30.0,
            tanh_strength: 900.0,
            intensity_scale: 1.0,
            color_a: Vec3::new(1.0, 0.2, 0.2),
            color_b: Vec3::new(1.0, 0.533, 0.0),
            bg_color: Vec3::ONE,
        }
    }
}

fn tanh_v4(v: Vec4) -> Vec4 {
    vec4(v.x.tanh(), v.y.tanh(), v.z.tanh(), v.w.tanh())
}

pub fn shade(uv: Vec2, frame: &FrameInput, p: &WaveformParams) -> Vec4 {
    let res = frame.resolution;
    let coord = (uv + 0.5) * res * p.zoom;

    let ray = vec3(coord.x + coord.x, coord.y + coord.y, 0.0) - vec3(res.x, res.y, res.y);
    let ray = ray.try_normalize().unwrap_or(Vec3::NEG_Z);

    let mut acc = Vec4::ZERO;
    let mut z = 0.0_f32;
    for _ in 0..p.band_count.max(1) {
        let mut pos = z * ray;
        pos.y += 1.0;
        let r = (-pos.y).max(0.0);
        pos.y += r + r;

        let mut d = 1.0_f32;
        while d < p.wave_detail {
            pos.y += (pos.x * d + 2.0 * frame.time * d.cos() + z).cos() / d;
            d += d;
        }

        let depth = pos.z + 3.0;
        let step = (0.1 * r + (pos.y - 1.0).abs() / (1.0 + r + r + r * r) + depth.max(-depth * 0.1))
            / 8.0;
        z += step;

        let phase = z * 0.5 + frame.time;
        let glow = vec4(
            phase.cos() + 1.3,
            (phase + 2.0).cos() + 1.3,
            (phase + 4.0).cos() + 1.3,
            (phase + 3.0).cos() + 1.3,
        );
        acc += p.intensity_scale * glow / step.max(1.0e-4) / z.max(1.0e-4);
    }

    let acc = tanh_v4(acc / p.tanh_strength.max(1.0e-3));

    let brightness = acc.truncate().dot(vec3(0.299, 0.587, 0.114));
    let gradient = p.color_a.lerp(p.color_b, uv.y);
    let fg = Vec3::splat(brightness) * gradient;
    p.bg_color.lerp(fg, acc.w).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn shade_is_deterministic() {
        let frame = FrameInput::new(1.0, vec2(640.0, 360.0));
        let p = WaveformParams::default();
        let uv = vec2(0.3, 0.8);
        assert_eq!(shade(uv, &frame, &p), shade(uv, &frame, &p));
    }

    #[test]
    fn shade_is_finite_across_the_frame() {
        let frame = FrameInput::new(6.0, vec2(640.0, 360.0));
        let p = WaveformParams::default();
        for y in 0..6 {
            for x in 0..6 {
                let uv = vec2(x as f32 / 6.0, y as f32 / 6.0);
                let c = shade(uv, &frame, &p);
                assert!(c.is_finite(), "non-finite at {uv:?}: {c:?}");
            }
        }
    }

    #[test]
    fn tone_mapping_bounds_the_mix_weight() {
        let frame = FrameInput::new(3.0, vec2(320.0, 180.0));
        let p = WaveformParams {
            intensity_scale: 10.0,
            tanh_strength: 10.0,
            ..WaveformParams::default()
        };
        let c = shade(vec2(0.5, 0.25), &frame, &p);
        assert!(c.is_finite());
        assert!(c.min_element() >= -1.0 && c.max_element() <= 2.0);
    }
}
