//! 4D-noise vertex displacement for the blob mesh.
//!
//! Every vertex is pushed along its normal by a domain-warped two-scale
//! simplex field, then the shading normal is rebuilt from two
//! finite-difference neighbors shifted along the tangent frame. The
//! finite-difference form stays valid for any displacement field at the
//! cost of a small per-vertex approximation error.

use glam::Vec3;

use crate::noise::simplex4;
use crate::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobParams {
    pub position_frequency: f32,
    pub position_strength: f32,
    pub time_frequency: f32,
    pub ripple_frequency: f32,
    pub ripple_strength: f32,
    pub ripple_time_frequency: f32,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            position_frequency: 1.0,
            position_strength: 0.3,
            time_frequency: 1.0,
            ripple_frequency: 3.0,
            ripple_strength: 0.1,
            ripple_time_frequency: 1.0,
        }
    }
}

/// Displaced position plus finite-difference shading normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displaced {
    pub position: Vec3,
    pub normal: Vec3,
}

const NEIGHBOR_SHIFT: f32 = 0.07;

/// Domain-warped displacement field: a coarse noise warps the sample
/// position before the ripple-scale noise is evaluated there.
fn field(p: Vec3, time: f32, params: &BlobParams) -> f32 {
    let warped = p + Vec3::splat(
        simplex4((p * params.position_frequency).extend(time * params.time_frequency))
            * params.position_strength,
    );
    simplex4((warped * params.ripple_frequency).extend(time * params.ripple_time_frequency))
        * params.ripple_strength
}

pub fn displace(
    position: Vec3,
    normal: Vec3,
    tangent: Vec3,
    frame: &FrameInput,
    params: &BlobParams,
) -> Displaced {
    let bitangent = tangent.cross(normal);
    let mut a = position + NEIGHBOR_SHIFT * tangent;
    let mut b = position + NEIGHBOR_SHIFT * bitangent;

    let bump = field(position, frame.time, params);
    let displaced = position + bump * normal;

    a += field(a, frame.time, params) * normal;
    b += field(b, frame.time, params) * normal;

    let to_a = (a - displaced).try_normalize().unwrap_or(tangent);
    let to_b = (b - displaced).try_normalize().unwrap_or(bitangent);
    let n = (-to_a.cross(to_b)).try_normalize().unwrap_or(normal);

    Displaced {
        position: displaced,
        normal: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn frame(t: f32) -> FrameInput {
        FrameInput::new(t, vec2(800.0, 600.0))
    }

    #[test]
    fn displacement_is_pure() {
        let p = BlobParams::default();
        let v = Vec3::new(0.3, 0.8, -0.52).normalize();
        let tangent = Vec3::Y.cross(v).normalize();
        let a = displace(v, v, tangent, &frame(1.7), &p);
        let b = displace(v, v, tangent, &frame(1.7), &p);
        assert_eq!(a, b);
    }

    #[test]
    fn normals_stay_unit_length() {
        let p = BlobParams::default();
        for i in 0..48 {
            let theta = i as f32 * 0.261;
            let v = Vec3::new(theta.cos() * 0.7, (theta * 1.3).sin(), theta.sin() * 0.7)
                .try_normalize()
                .unwrap_or(Vec3::Z);
            let tangent = Vec3::Y.cross(v).try_normalize().unwrap_or(Vec3::X);
            let d = displace(v, v, tangent, &frame(2.2), &p);
            assert!(d.position.is_finite());
            assert!((d.normal.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_strength_keeps_the_sphere() {
        let p = BlobParams {
            position_strength: 0.0,
            ripple_strength: 0.0,
            ..BlobParams::default()
        };
        let v = Vec3::new(0.0, 1.0, 0.0);
        let d = displace(v, v, Vec3::X, &frame(5.0), &p);
        assert!((d.position - v).length() < 1e-6);
    }

    #[test]
    fn displacement_scales_with_ripple_strength() {
        let weak = BlobParams {
            ripple_strength: 0.05,
            ..BlobParams::default()
        };
        let strong = BlobParams {
            ripple_strength: 0.5,
            ..BlobParams::default()
        };
        let v = Vec3::new(0.6, 0.48, 0.64).normalize();
        let tangent = Vec3::Y.cross(v).normalize();
        let dw = (displace(v, v, tangent, &frame(3.0), &weak).position - v).length();
        let ds = (displace(v, v, tangent, &frame(3.0), &strong).position - v).length();
        // Same field sampled at 10x the strength moves 10x as far.
        assert!((ds - dw * 10.0).abs() < 1e-3);
    }
}
