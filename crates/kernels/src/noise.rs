//! Gradient and simplex noise.
//!
//! Two generators cover every noisy effect in the gallery:
//!
//! - [`gradient_noise`] is a 2D Perlin-style lattice noise whose corner
//!   gradients slowly rotate with time, which is what gives the aurora
//!   bands their drift without rehashing the lattice.
//! - [`simplex4`] is the classic permutation-polynomial 4D simplex noise
//!   (mod-289 lattice), with time as the fourth axis so displacement
//!   animates continuously instead of looping.
//!
//! Both return roughly `[-1, 1]` and are pure: identical inputs always
//! yield identical output, and identical integer lattice coordinates always
//! see identical gradients.

use glam::{vec2, vec3, vec4, Vec2, Vec3, Vec4};

use crate::math::{fract, mix, TAU};

#[inline]
fn fract_v3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// GLSL `mod(v, 289.0)` on every lane.
#[inline]
fn mod289(v: Vec4) -> Vec4 {
    v - (v / 289.0).floor() * 289.0
}

/// GLSL `step(edge, x)` on every lane: 1.0 where `x >= edge`.
#[inline]
fn step_v3(edge: Vec3, x: Vec3) -> Vec3 {
    vec3(
        if x.x >= edge.x { 1.0 } else { 0.0 },
        if x.y >= edge.y { 1.0 } else { 0.0 },
        if x.z >= edge.z { 1.0 } else { 0.0 },
    )
}

#[inline]
fn permute4(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn permute1(x: f32) -> f32 {
    ((x * 34.0 + 1.0) * x).rem_euclid(289.0).floor()
}

#[inline]
fn taylor_inv_sqrt4(r: Vec4) -> Vec4 {
    Vec4::splat(1.79284291400159) - r * 0.85373472095314
}

#[inline]
fn taylor_inv_sqrt1(r: f32) -> f32 {
    1.79284291400159 - 0.85373472095314 * r
}

fn grad4(j: f32, ip: Vec4) -> Vec4 {
    let mut xyz = (fract_v3(Vec3::splat(j) * ip.truncate()) * 7.0).floor() * ip.z - Vec3::ONE;
    let w = 1.5 - xyz.abs().dot(Vec3::ONE);
    let s = vec4(
        if xyz.x < 0.0 { 1.0 } else { 0.0 },
        if xyz.y < 0.0 { 1.0 } else { 0.0 },
        if xyz.z < 0.0 { 1.0 } else { 0.0 },
        if w < 0.0 { 1.0 } else { 0.0 },
    );
    xyz += (s.truncate() * 2.0 - Vec3::ONE) * s.w;
    vec4(xyz.x, xyz.y, xyz.z, w)
}

/// 4D simplex noise over the mod-289 permutation lattice.
pub fn simplex4(v: Vec4) -> f32 {
    // Skew/unskew constants for the 4-simplex grid.
    const C_X: f32 = 0.138196601125010504;
    const C_Y: f32 = 0.309016994374947451;

    let i = (v + Vec4::splat(v.dot(Vec4::splat(C_Y)))).floor();
    let x0 = v - i + Vec4::splat(i.dot(Vec4::splat(C_X)));

    // Rank the simplex corner ordering without branches.
    let is_x = step_v3(vec3(x0.y, x0.z, x0.w), Vec3::splat(x0.x));
    let is_yz = step_v3(vec3(x0.z, x0.w, x0.w), vec3(x0.y, x0.y, x0.z));

    let mut i0 = vec4(is_x.x + is_x.y + is_x.z, 1.0 - is_x.x, 1.0 - is_x.y, 1.0 - is_x.z);
    i0.y += is_yz.x + is_yz.y;
    i0.z += 1.0 - is_yz.x;
    i0.w += 1.0 - is_yz.y;
    i0.z += is_yz.z;
    i0.w += 1.0 - is_yz.z;

    let i3 = i0.clamp(Vec4::ZERO, Vec4::ONE);
    let i2 = (i0 - Vec4::ONE).clamp(Vec4::ZERO, Vec4::ONE);
    let i1 = (i0 - Vec4::splat(2.0)).clamp(Vec4::ZERO, Vec4::ONE);

    let x1 = x0 - i1 + Vec4::splat(C_X);
    let x2 = x0 - i2 + Vec4::splat(2.0 * C_X);
    let x3 = x0 - i3 + Vec4::splat(3.0 * C_X);
    let x4 = x0 - Vec4::ONE + Vec4::splat(4.0 * C_X);

    let i = mod289(i);
    let j0 = permute1(permute1(permute1(permute1(i.w) + i.z) + i.y) + i.x);
    let j1 = permute4(
        permute4(
            permute4(
                permute4(Vec4::splat(i.w) + vec4(i1.w, i2.w, i3.w, 1.0))
                    + Vec4::splat(i.z)
                    + vec4(i1.z, i2.z, i3.z, 1.0),
            ) + Vec4::splat(i.y)
                + vec4(i1.y, i2.y, i3.y, 1.0),
        ) + Vec4::splat(i.x)
            + vec4(i1.x, i2.x, i3.x, 1.0),
    );

    let ip = vec4(1.0 / 294.0, 1.0 / 49.0, 1.0 / 7.0, 0.0);

    let mut p0 = grad4(j0, ip);
    let mut p1 = grad4(j1.x, ip);
    let mut p2 = grad4(j1.y, ip);
    let mut p3 = grad4(j1.z, ip);
    let mut p4 = grad4(j1.w, ip);

    let norm = taylor_inv_sqrt4(vec4(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    p0 *= norm.x;
    p1 *= norm.y;
    p2 *= norm.z;
    p3 *= norm.w;
    p4 *= taylor_inv_sqrt1(p4.dot(p4));

    let m0 = (Vec3::splat(0.6) - vec3(x0.dot(x0), x1.dot(x1), x2.dot(x2))).max(Vec3::ZERO);
    let m1 = vec2(0.6 - x3.dot(x3), 0.6 - x4.dot(x4)).max(Vec2::ZERO);
    let m0 = m0 * m0;
    let m1 = m1 * m1;

    49.0 * ((m0 * m0).dot(vec3(p0.dot(x0), p1.dot(x1), p2.dot(x2)))
        + (m1 * m1).dot(vec2(p3.dot(x3), p4.dot(x4))))
}

/// Pseudo-random corner gradient whose direction precesses with time.
fn lattice_gradient(cell: Vec2, time: f32) -> Vec2 {
    let m = vec2(
        cell.x * 129.1 + cell.y * 311.7,
        cell.x * 269.5 + cell.y * 183.3,
    );
    let r = vec2(
        2.0 * fract(m.x.sin() * 43758.5453123) - 1.0,
        2.0 * fract(m.y.sin() * 43758.5453123) - 1.0,
    );
    vec2((r.x * TAU + time * 0.1).sin(), (r.y * TAU + time * 0.1).sin())
}

/// 2D gradient noise with smooth Hermite interpolation between corners.
pub fn gradient_noise(p: Vec2, time: f32) -> f32 {
    let pi = p.floor();
    let pf = p - pi;
    let w = pf * pf * (Vec2::splat(3.0) - pf * 2.0);

    let f00 = lattice_gradient(pi, time).dot(pf);
    let f01 = lattice_gradient(pi + vec2(0.0, 1.0), time).dot(pf - vec2(0.0, 1.0));
    let f10 = lattice_gradient(pi + vec2(1.0, 0.0), time).dot(pf - vec2(1.0, 0.0));
    let f11 = lattice_gradient(pi + vec2(1.0, 1.0), time).dot(pf - vec2(1.0, 1.0));

    mix(mix(f00, f10, w.x), mix(f01, f11, w.x), w.y)
}
