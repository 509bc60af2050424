//! Nested-cosine gradient plasma with a wobbling radial vignette.

use glam::{vec2, Vec2, Vec3, Vec4};

use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlasmaParams {
    pub speed: f32,
    pub blend: f32,
    pub freq_x: f32,
    pub freq_y: f32,
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub bg_color: Vec3,
}

impl Default for PlasmaParams {
    fn default() -> Self {
        Self {
            speed: 2.0,
            blend: 1.0,
            freq_x: 12.345,
            freq_y: 12.345,
            color_a: Vec3::new(1.0, 0.533, 0.0),
            color_b: Vec3::new(1.0, 0.443, 0.004),
            bg_color: Vec3::ONE,
        }
    }
}

pub fn shade(uv: Vec2, frame: &FrameInput, p: &PlasmaParams) -> Vec4 {
    let t = frame.time;

    let mut field = 1.0_f32;
    field += (uv.y * p.freq_y - t * p.speed
        + (field * 12.234).cos() * 0.1
        + (uv.x * 32.2345 + (uv.y * 17.234).cos()).cos())
    .cos()
        + (uv.x * p.freq_x).cos();

    let tint = p.color_a.lerp(
        p.color_b,
        (field + (uv.y * 24.3214).cos() * 0.1 + (uv.x * 6.324 + t * p.speed).cos() + t).cos() * 0.5
            + 0.5,
    );

    let wobble = vec2(
        (t + uv.y * 4.34 + uv.x * field).cos(),
        (t + uv.x * 4.34 + uv.y * field).cos(),
    );
    let vignette = ((uv - 0.5 + wobble * 0.1).length() * 2.0).clamp(0.0, 1.0);

    tint.lerp(p.bg_color, vignette).extend(p.blend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn shade_is_deterministic() {
        let frame = FrameInput::new(1.25, vec2(800.0, 450.0));
        let p = PlasmaParams::default();
        let uv = vec2(0.37, 0.61);
        assert_eq!(shade(uv, &frame, &p), shade(uv, &frame, &p));
    }

    #[test]
    fn shade_is_continuous_in_time() {
        let p = PlasmaParams::default();
        let res = vec2(800.0, 450.0);
        let eps = 1e-4;
        for i in 0..24 {
            let t = i as f32 * 0.41;
            let uv = vec2(0.2 + i as f32 * 0.03, 0.5);
            let a = shade(uv, &FrameInput::new(t, res), &p);
            let b = shade(uv, &FrameInput::new(t + eps, res), &p);
            assert!((a - b).length() < 0.05, "jump at t={t}");
        }
    }

    #[test]
    fn alpha_carries_the_blend_parameter() {
        let frame = FrameInput::new(0.0, vec2(100.0, 100.0));
        let p = PlasmaParams {
            blend: 0.25,
            ..PlasmaParams::default()
        };
        assert_eq!(shade(vec2(0.5, 0.5), &frame, &p).w, 0.25);
    }
}
