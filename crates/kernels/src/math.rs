//! GLSL-flavoured scalar and matrix helpers shared across kernels.

use glam::{vec2, vec3, Mat2, Mat3};

pub const TAU: f32 = 6.28318530718;

/// `x - floor(x)`, always in `[0, 1)` (unlike `f32::fract` for negatives).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep. Edges may be given in descending order, and equal
/// edges degrade to a hard step instead of dividing by zero.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let denom = edge1 - edge0;
    if denom.abs() < f32::EPSILON {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / denom).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// 2D rotation with the same handedness as the gallery's `Rot` helper.
#[inline]
pub fn rot2(a: f32) -> Mat2 {
    let (s, c) = a.sin_cos();
    Mat2::from_cols(vec2(c, -s), vec2(s, c))
}

/// Column-major 3x3 matrix from GLSL constructor argument order.
#[inline]
pub fn mat3_cols(
    m0: f32,
    m1: f32,
    m2: f32,
    m3: f32,
    m4: f32,
    m5: f32,
    m6: f32,
    m7: f32,
    m8: f32,
) -> Mat3 {
    Mat3::from_cols(vec3(m0, m1, m2), vec3(m3, m4, m5), vec3(m6, m7, m8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_is_non_negative_for_negative_input() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(2.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_matches_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_accepts_descending_edges() {
        assert_eq!(smoothstep(1.0, 0.0, 2.0), 0.0);
        assert_eq!(smoothstep(1.0, 0.0, -1.0), 1.0);
        assert!((smoothstep(0.7, 0.0, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_survives_equal_edges() {
        let v = smoothstep(0.3, 0.3, 0.5);
        assert!(v.is_finite());
        assert_eq!(v, 1.0);
    }

    #[test]
    fn rot2_rotates_unit_x() {
        let r = rot2(std::f32::consts::FRAC_PI_2) * vec2(1.0, 0.0);
        assert!(r.x.abs() < 1e-6);
        assert!((r.y.abs() - 1.0).abs() < 1e-6);
    }
}
