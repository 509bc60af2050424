//! One module per gallery effect.
//!
//! Pixel effects expose `shade(uv, frame, params) -> Vec4` where `uv` is the
//! surface coordinate in `[0, 1]` with y pointing up and the returned alpha
//! is composited over the presentation background. The blob effect instead
//! exposes a per-vertex `displace`.

pub mod aurora;
pub mod bands;
pub mod blob;
pub mod blobwaves;
pub mod diffraction;
pub mod plasma;
pub mod sines;
pub mod waveform;
