//! Deterministic lattice hashes from the fract-sin family.
//!
//! These are the seed functions behind star placement and per-band jitter.
//! They are cheap, stateless, and — critically — permutation consistent:
//! the same input always hashes to the same value, so cell contents never
//! swim between frames.

use glam::{vec2, Vec2};

use crate::math::fract;

/// Scalar hash of a scalar seed.
#[inline]
pub fn hash11(x: f32) -> f32 {
    fract(x.sin() * 43758.5453123)
}

/// Scalar hash of an integer index, used by the sine-field band jitter.
#[inline]
pub fn hash_index(i: i32) -> f32 {
    fract((i as f32 * 12.9898).sin() * 43758.5453)
}

/// 2D cell coordinate to a scalar in `[0, 1)`.
#[inline]
pub fn hash21(p: Vec2) -> f32 {
    let mut p = vec2(fract(p.x * 123.34), fract(p.y * 456.21));
    let d = p.dot(p + 45.32);
    p += d;
    fract(p.x * p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_deterministic() {
        for i in 0..64 {
            let x = i as f32 * 1.37;
            assert_eq!(hash11(x), hash11(x));
            assert_eq!(hash_index(i), hash_index(i));
            assert_eq!(hash21(vec2(x, -x)), hash21(vec2(x, -x)));
        }
    }

    #[test]
    fn hashes_stay_in_unit_interval() {
        for y in -8..8 {
            for x in -8..8 {
                let h = hash21(vec2(x as f32, y as f32));
                assert!((0.0..1.0).contains(&h), "hash21 out of range: {h}");
            }
        }
    }

    #[test]
    fn neighbouring_cells_decorrelate() {
        let a = hash21(vec2(3.0, 7.0));
        let b = hash21(vec2(4.0, 7.0));
        let c = hash21(vec2(3.0, 8.0));
        assert!((a - b).abs() > 1e-4);
        assert!((a - c).abs() > 1e-4);
    }
}
