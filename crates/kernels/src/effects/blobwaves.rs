//! Raymarched sine-plasma sheet.
//!
//! A fixed camera at z=30 shoots per-pixel rays built from a radial
//! field-of-view rotation plus a fixed 0.7 rad yaw, then sphere-traces a
//! travelling sine surface. Depth tints the hit; ray distance drives glow.

use glam::{vec3, Vec2, Vec3, Vec4};

use crate::march::{march, MarchSettings};
use crate::math::mat3_cols;
use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobWavesParams {
    pub speed: f32,
    pub wave_scale: f32,
    pub wave_height: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub blend_intensity: f32,
}

impl Default for BlobWavesParams {
    fn default() -> Self {
        Self {
            speed: 10.0,
            wave_scale: 0.3,
            wave_height: 4.0,
            color_a: Vec3::new(1.0, 0.533, 0.0),
            color_b: Vec3::new(1.0, 0.443, 0.004),
            blend_intensity: 1.0,
        }
    }
}

/// Signed distance-ish field of the travelling wave sheet.
fn scene(r: Vec3, time: f32, p: &BlobWavesParams) -> f32 {
    let wave = r.x + r.y + time * p.speed;
    r.z - ((wave * p.wave_scale).sin() * p.wave_height + 5.5)
}

pub fn shade(uv_in: Vec2, frame: &FrameInput, p: &BlobWavesParams) -> Vec4 {
    let res = frame.resolution;
    let vfov = std::f32::consts::PI / 2.5;
    let cam = vec3(0.0, 0.0, 30.0);

    let mut uv = uv_in - 0.5;
    uv.x *= res.x / res.y.max(1.0);
    uv.y *= -1.0;

    let mut dir = vec3(0.0, 0.0, -1.0);

    let xrot = vfov * uv.length();
    let (s, c) = xrot.sin_cos();
    dir = mat3_cols(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c) * dir;

    let nuv = uv.try_normalize().unwrap_or(Vec2::X);
    dir = mat3_cols(nuv.x, -nuv.y, 0.0, nuv.y, nuv.x, 0.0, 0.0, 0.0, 1.0) * dir;

    let (s, c) = 0.7_f32.sin_cos();
    dir = mat3_cols(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c) * dir;

    let hit = march(|r| scene(r, frame.time, p), cam, dir, &MarchSettings::default());

    let depth_tint = p.color_a.lerp(p.color_b, hit.position.z / 40.0);
    let glow = p.blend_intensity / (hit.distance / 20.0).max(1.0e-3);
    Vec3::ONE.lerp(depth_tint, glow).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn shade_is_deterministic_and_finite() {
        let frame = FrameInput::new(2.5, vec2(640.0, 360.0));
        let p = BlobWavesParams::default();
        for i in 0..16 {
            let uv = vec2(i as f32 / 16.0, (i as f32 * 0.7).fract());
            let a = shade(uv, &frame, &p);
            assert_eq!(a, shade(uv, &frame, &p));
            assert!(a.is_finite());
        }
    }

    #[test]
    fn flat_wave_sheet_converges() {
        // With zero wave height the scene is the plane z = 5.5, easily
        // reached from z = 30 within the budget.
        let p = BlobWavesParams {
            wave_height: 0.0,
            ..BlobWavesParams::default()
        };
        let hit = march(
            |r| scene(r, 0.0, &p),
            vec3(0.0, 0.0, 30.0),
            vec3(0.0, 0.0, -1.0),
            &MarchSettings::default(),
        );
        assert!(hit.converged);
        assert!((hit.position.z - 5.5).abs() < 0.2);
    }

    #[test]
    fn center_pixel_shades_without_panicking() {
        // The exact screen center degenerates the direction normalize;
        // the fallback axis must keep the output finite.
        let frame = FrameInput::new(0.0, vec2(100.0, 100.0));
        let p = BlobWavesParams::default();
        assert!(shade(vec2(0.5, 0.5), &frame, &p).is_finite());
    }
}
