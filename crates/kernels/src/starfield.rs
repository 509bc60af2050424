//! Hash-cell star field primitives.
//!
//! The plane is cut into unit cells; each cell hashes to a presence test,
//! a star size, a color, and a twinkle phase. Radial falloff uses
//! `smoothstep` so cell boundaries never show seams.

use glam::{vec2, vec3, Vec2, Vec3};

use crate::hash::hash21;
use crate::math::{fract, rot2, smoothstep, TAU};

/// Single star sprite with optional diffraction flare.
pub fn star(uv: Vec2, flare: f32) -> f32 {
    let d = uv.length().max(1.0e-4);
    let mut m = 0.05 / d;

    let rays = (1.0 - (uv.x * uv.y * 1000.0).abs()).max(0.0);
    m += rays * flare;
    let uv = rot2(3.1415 / 9.0) * uv;
    let rays = (1.0 - (uv.x * uv.y * 1000.0).abs()).max(0.0);
    m += rays * flare / d;

    m * smoothstep(0.1, 0.0, d)
}

/// One parallax layer: a 3x3 neighborhood of hash cells around each point.
/// Cells hashing below `density` stay empty, so raising the knob thins the
/// field.
pub fn star_layer(uv: Vec2, density: f32, time: f32) -> Vec3 {
    let mut col = Vec3::ZERO;
    let gv = vec2(fract(uv.x), fract(uv.y)) - 0.5;
    let id = uv.floor();

    for y in -1..=1i32 {
        for x in -1..=1i32 {
            let offs = vec2(x as f32, y as f32);
            let n = hash21(id + offs);
            if n < density {
                continue;
            }

            let size = fract(n * 345.32) * 0.4;
            let flare = smoothstep(0.9, 1.0, size) * 0.6;
            let sprite = star(gv - offs - vec2(n, fract(n * 34.0)) + 0.5, flare);

            let seed = fract(n * 2345.2) * 123.2;
            let color = vec3(
                (0.2 * seed).sin() * 0.5 + 0.5,
                (0.3 * seed).sin() * 0.5 + 0.5,
                (0.9 * seed).sin() * 0.5 + 0.5,
            ) * vec3(1.0, 0.5, 0.0)
                + vec3(0.4, 0.2, 0.0);

            let twinkle = (time / 4.0 * (1.0 + n) * 3.0 + n * TAU).sin() * 0.1 + 0.1;
            col += sprite * twinkle * size * color;
        }
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_is_finite_at_its_own_center() {
        let m = star(Vec2::ZERO, 0.6);
        assert!(m.is_finite());
    }

    /// The presence test skips cells hashing *below* the threshold, so a
    /// larger density value must never produce more populated cells.
    #[test]
    fn higher_density_thins_the_field() {
        let populated = |density: f32| -> usize {
            let mut count = 0;
            for y in 0..24 {
                for x in 0..24 {
                    if hash21(vec2(x as f32, y as f32)) >= density {
                        count += 1;
                    }
                }
            }
            count
        };
        let sparse = populated(0.9);
        let mid = populated(0.5);
        let dense = populated(0.1);
        assert!(sparse < mid);
        assert!(mid < dense);
    }

    #[test]
    fn layer_is_deterministic() {
        let uv = vec2(3.2, -1.7);
        assert_eq!(star_layer(uv, 0.8, 2.0), star_layer(uv, 0.8, 2.0));
    }

    #[test]
    fn layer_output_is_non_negative_and_finite() {
        for i in 0..32 {
            let uv = vec2(i as f32 * 0.37, i as f32 * -0.53);
            let c = star_layer(uv, 0.7, 1.25);
            assert!(c.is_finite());
            assert!(c.min_element() >= 0.0);
        }
    }
}
