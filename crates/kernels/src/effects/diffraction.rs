//! Chromatically offset wave bands at three time scales.
//!
//! Each band samples the same serpentine wave three times with small
//! per-channel offsets, splitting white light into fringes. Three copies at
//! staggered speeds are summed unclamped, so crossings bloom. No tunable
//! parameters.

use glam::{vec2, vec3, Vec2, Vec3, Vec4};

use crate::math::smoothstep;
use crate::FrameInput;

fn wave(uv: Vec2, d: f32, o: f32) -> f32 {
    let center = 0.5 + (o + uv.y * 3.0).sin() * 0.3;
    1.0 - smoothstep(0.0, d, (uv.x - center).abs())
}

fn bands(uv: Vec2, o: f32) -> Vec3 {
    let d = 0.05 + (o * 0.2).sin().abs() * 0.25 * (uv.y + 0.5).abs();
    let r = wave(uv + vec2(d * 0.25, 0.0), d, o);
    let g = wave(uv - vec2(0.015, 0.005), d, o);
    let b = wave(uv - vec2(d * 0.5, 0.015), d, o);
    vec3(r, g, b)
}

pub fn shade(uv: Vec2, frame: &FrameInput) -> Vec4 {
    let res = frame.resolution;
    let p = uv * res / res.y.max(1.0);
    let t = frame.time;

    let sum = bands(p, t) * 0.6 + bands(p, t * 2.0) * 0.4 + bands(p + vec2(0.3, 0.0), t * 3.3) * 0.3;
    sum.extend(1.0)
}
