//! Swirl-warped moving light bands.
//!
//! The plane is divided into `bands_count` vertical strips in a polar-swirled,
//! scrolling coordinate frame. Each strip jitters its own phase, amplitude,
//! frequency, and brightness from its index hash.

use glam::{vec2, Vec2, Vec3, Vec4};

use crate::hash::hash11;
use crate::math::{fract, smoothstep};
use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandsParams {
    pub bands_count: i32,
    pub swirl_strength: f32,
    pub move_speed: f32,
    pub color_start: Vec3,
    pub color_end: Vec3,
    pub fade_top: f32,
    pub fade_bottom: f32,
    pub fade_left: f32,
    pub fade_right: f32,
    pub wave_height: f32,
    pub wave_frequency: f32,
}

impl Default for BandsParams {
    fn default() -> Self {
        Self {
            bands_count: 2,
            swirl_strength: 2.0,
            move_speed: 0.15,
            color_start: Vec3::new(1.0, 0.533, 0.0),
            color_end: Vec3::new(1.0, 0.443, 0.004),
            fade_top: 0.0,
            fade_bottom: 0.0,
            fade_left: 0.0,
            fade_right: 0.99,
            wave_height: 0.1,
            wave_frequency: 2.0,
        }
    }
}

/// Band index and band center covering `x` for the given strip count.
/// With a single band every coordinate maps to the center at 0.5.
pub fn band_center(x: f32, bands_count: i32) -> (f32, f32) {
    let bands = bands_count.max(1) as f32;
    let spacing = 1.0 / bands;
    let index = (x * bands).floor();
    (index, index * spacing + spacing * 0.5)
}

/// Glow falloff of a band: 1 at the center, 0 beyond `width`.
pub fn band_shape(center: f32, width: f32, x: f32) -> f32 {
    smoothstep(width, 0.0, (x - center).abs())
}

pub fn shade(uv: Vec2, frame: &FrameInput, p: &BandsParams) -> Vec4 {
    let time = frame.time * p.move_speed;
    let bands = p.bands_count.max(1) as f32;
    let spacing = 1.0 / bands;

    let centered = uv - 0.5;
    let r = centered.length();
    let angle = centered.y.atan2(centered.x) + p.swirl_strength * r;
    let swirl = vec2(angle.cos(), angle.sin()) * r + 0.5;

    let shifted = vec2(fract(swirl.x + time), fract(swirl.y - time));
    let x = shifted.x;

    let (index, center) = band_center(x, p.bands_count);

    let phase = hash11(index) * 6.2831;
    let amplitude = p.wave_height * hash11(index + 23.1);
    let frequency = p.wave_frequency + hash11(index + 42.0) * p.wave_frequency;

    let curve_offset = (uv.x * frequency + phase + time).sin() * amplitude;
    // Tuning constant: the curved coordinate hugs the lower fifth of the
    // frame no matter how tall the wave gets.
    let curved_y = (uv.y + curve_offset).clamp(0.0, 0.2);

    let brightness = hash11(index);
    let edge_blur = spacing * 0.7;
    let shape = band_shape(center, edge_blur, x);

    let vertical = smoothstep(1.0, p.fade_top, curved_y) * smoothstep(0.0, p.fade_bottom, curved_y);
    let horizontal = smoothstep(0.0, p.fade_left, uv.x) * smoothstep(1.0, p.fade_right, uv.x);
    let intensity = brightness * shape * vertical * horizontal;

    let band_color = p.color_start.lerp(p.color_end, curved_y);
    Vec3::ONE.lerp(band_color, intensity).extend(1.0)
}
