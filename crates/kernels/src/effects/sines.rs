//! Diagonal sine-field bands with soft shadow accumulation.
//!
//! Twenty jittered sine waves are summed along a 45-degree projection of the
//! frame, then twenty shadow bands of smoothstep glow accumulate around the
//! signal. Accumulation is deliberately unclamped per band; overlapping
//! bands saturate. This effect exposes no tunable parameters.

use glam::{vec2, vec4, Vec2, Vec3, Vec4};

use crate::hash::hash_index;
use crate::math::{fract, mix, smoothstep};
use crate::FrameInput;

const THICKNESS: f32 = 2.5;
const SINE_COUNT: i32 = 20;
const SHADOW_COUNT: i32 = 20;
const LINE_COLOR: Vec3 = Vec3::new(1.0, 0.533, 0.0);

fn alpha_blend(c1: Vec4, c2: Vec4) -> Vec4 {
    vec4(
        mix(c1.x, c2.x, c2.w),
        mix(c1.y, c2.y, c2.w),
        mix(c1.z, c2.z, c2.w),
        (c1.w.max(c2.w) + c1.w * c2.w).clamp(0.0, 1.0),
    )
}

pub fn shade(uv: Vec2, frame: &FrameInput) -> Vec4 {
    let res = frame.resolution;
    let frag = uv * res - res / 2.0;

    let p = (frag / res.x.max(1.0)) * 20.0;
    let diag = p.dot(vec2(1.0, 1.0).normalize());
    let p = vec2(diag, p.dot(vec2(-1.0, 1.0).normalize()));
    let p = (p + vec2(500.0, 0.0)) * vec2(1500.0, 76.0);

    let t = frame.time / 150.0;
    let ti = t as i32;
    let mut value = 0.0_f32;
    for i in 0..SINE_COUNT {
        let rk = mix(
            hash_index(ti + i) * 0.0009,
            hash_index(ti + 1 + i) * 0.0009,
            fract(t),
        );
        value += (p.x * rk * 1.5).sin() * hash_index(i + 1) * 15.0;
    }

    let mut col = Vec4::ZERO;
    for i in -SHADOW_COUNT..=SHADOW_COUNT {
        let dist = (value - p.y).abs();
        let threshold = THICKNESS * i as f32 * 15.0;
        let alpha = 0.12 * smoothstep(threshold, threshold - 1.0, dist);
        col = alpha_blend(col, vec4(LINE_COLOR.x, LINE_COLOR.y, LINE_COLOR.z, alpha));
    }

    let edge = smoothstep(0.0, 0.1, uv.x)
        * smoothstep(0.0, 0.1, uv.y)
        * smoothstep(0.0, 0.1, 1.0 - uv.x)
        * smoothstep(0.0, 0.1, 1.0 - uv.y);

    col * edge
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn shade_is_deterministic() {
        let frame = FrameInput::new(42.0, vec2(1024.0, 576.0));
        let uv = vec2(0.31, 0.62);
        assert_eq!(shade(uv, &frame), shade(uv, &frame));
    }

    #[test]
    fn alpha_stays_in_unit_range() {
        let frame = FrameInput::new(10.0, vec2(800.0, 600.0));
        for i in 0..32 {
            let uv = vec2(fract(i as f32 * 0.17), fract(i as f32 * 0.29));
            let c = shade(uv, &frame);
            assert!(c.is_finite());
            assert!((0.0..=1.0).contains(&c.w));
        }
    }

    #[test]
    fn frame_border_fades_to_nothing() {
        let frame = FrameInput::new(5.0, vec2(800.0, 600.0));
        let corner = shade(vec2(0.0, 0.0), &frame);
        assert_eq!(corner.w, 0.0);
        assert_eq!(corner.truncate(), Vec3::ZERO);
    }
}
