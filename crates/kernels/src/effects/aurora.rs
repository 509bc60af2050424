//! Star field layered under fractal-noise aurora bands.
//!
//! Two passes share the frame: a rotating parallax star field built from
//! hash cells, and a four-octave gradient-noise curtain whose octaves halve
//! in amplitude and double in frequency while scrolling at staggered speeds.

use glam::{vec3, Vec2, Vec3, Vec4};

use crate::math::{fract, mix, rot2, smoothstep};
use crate::noise::gradient_noise;
use crate::starfield::star_layer;
use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraParams {
    pub star_speed: f32,
    pub star_layers: f32,
    pub star_density: f32,
    pub aurora_speed: f32,
    pub aurora_intensity: f32,
    pub color1: Vec3,
    pub color2: Vec3,
    pub bg_color: Vec3,
}

impl Default for AuroraParams {
    fn default() -> Self {
        Self {
            star_speed: 0.01,
            star_layers: 3.9,
            star_density: 0.95,
            aurora_speed: 0.39,
            aurora_intensity: 1.0,
            color1: Vec3::new(1.0, 0.5, 0.0),
            color2: Vec3::new(1.0, 0.6, 0.0),
            bg_color: Vec3::ONE,
        }
    }
}

pub fn shade(uv: Vec2, frame: &FrameInput, p: &AuroraParams) -> Vec4 {
    let res = frame.resolution;
    let res_y = res.y.max(1.0);
    let frag = uv * res;
    let m = (frame.pointer - res * 0.5) / res_y;
    let t = frame.time * p.star_speed;

    let mut suv = (frag - 0.5 * res) / res_y;
    suv += m * 4.0;
    suv = rot2(t) * suv;

    let mut stars = Vec3::ZERO;
    let layers = p.star_layers.clamp(1.0, 8.0);
    let step = 1.0 / layers;
    let mut i = 0.0_f32;
    while i < 1.0 {
        let depth = fract(i + t);
        let scale = mix(20.0, 0.5, depth);
        let fade = depth * smoothstep(1.0, 0.9, depth);
        stars += star_layer(suv * scale + i * 453.2 - m, p.star_density, frame.time) * fade;
        i += step;
    }
    let stars = vec3(
        stars.x.powf(0.4545),
        stars.y.powf(0.4545),
        stars.z.powf(0.4545),
    );

    let mut auv = frag / res.max(Vec2::ONE);
    auv.x *= res.x / res_y;
    auv.y *= p.aurora_intensity;

    let s = p.aurora_speed;
    let n = 0.5 * gradient_noise(auv - frame.time * s, frame.time)
        + 0.25 * gradient_noise(auv * 2.0 - frame.time * s * 1.5, frame.time)
        + 0.125 * gradient_noise(auv * 4.0 - frame.time * s * 2.5, frame.time)
        + 0.0625 * gradient_noise(auv * 8.0 - frame.time * s * 4.0, frame.time);

    let intensity =
        smoothstep(0.1, 0.9, auv.y) * ((auv.y * 10.0 + n * 5.0 - 0.5).sin() * 0.5 + 0.5);

    let curtain = p.color1.lerp(p.color2, auv.x) * intensity;
    p.bg_color.lerp(curtain + stars, intensity).extend(1.0)
}
