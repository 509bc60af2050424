//! Procedural pixel and vertex kernels for the lumedeck effect gallery.
//!
//! Every kernel is a pure function of a surface coordinate plus a
//! [`FrameInput`] snapshot and a per-effect parameter struct: identical
//! inputs always produce identical output. The renderer owns the uniform
//! state and calls into this crate once per pixel (or per vertex for the
//! mesh-displacement effect); nothing in here allocates or keeps state
//! between samples.
//!
//! Layout:
//!
//! - [`math`], [`hash`], [`noise`], [`march`], [`starfield`] hold the shared
//!   numeric building blocks (lattice hashes, gradient/simplex noise, the
//!   damped sphere tracer, star cells).
//! - [`effects`] has one module per gallery effect, each exposing a params
//!   struct and a `shade`/`displace` entry point.

pub mod effects;
pub mod hash;
pub mod march;
pub mod math;
pub mod noise;
pub mod starfield;

use glam::Vec2;

/// Per-frame inputs shared by every kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the owning effect instance was mounted.
    pub time: f32,
    /// Viewport size in device pixels.
    pub resolution: Vec2,
    /// Pointer position normalized to `[-1, 1]` per axis.
    pub pointer: Vec2,
}

impl FrameInput {
    pub fn new(time: f32, resolution: Vec2) -> Self {
        Self {
            time,
            resolution,
            pointer: Vec2::ZERO,
        }
    }
}
