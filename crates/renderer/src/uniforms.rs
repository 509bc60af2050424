//! The live kernel-input state for one effect instance.
//!
//! A [`UniformBuffer`] holds one named slot per effect parameter plus the
//! three reserved inputs every kernel sees: `time` (float), `resolution`
//! (vec3: width, height, pixel aspect), and `pointer` (vec2, normalized).
//! All updates funnel through [`UniformBuffer::sync`], which runs the
//! per-tick protocol in a fixed order instead of letting callers poke
//! fields individually.

use std::collections::BTreeMap;

use gallery::{ParamKind, ParamSpec, ParamValue, ParameterSet};
use glam::vec2;
use kernels::FrameInput;

use crate::clock::TimeSample;

/// Viewport size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-area viewports cause ticks to be skipped.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Internal render resolution after applying the render scale.
    pub fn scaled(&self, scale: f32) -> Viewport {
        let scale = scale.clamp(0.1, 1.0);
        Viewport {
            width: ((self.width as f32 * scale) as u32).max(1),
            height: ((self.height as f32 * scale) as u32).max(1),
        }
    }
}

/// Value stored in one parameter slot. The reserved time/resolution/pointer
/// inputs live in dedicated fields with their own vector shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotValue {
    Float(f32),
    Color([f32; 3]),
    Int(i32),
}

#[derive(Debug, Clone)]
struct UniformSlot {
    value: SlotValue,
    kind: ParamKind,
    min: f32,
    max: f32,
    smoothing: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct UniformBuffer {
    time: f32,
    time_delta: f32,
    frame_index: u64,
    synced_once: bool,
    resolution: [f32; 3],
    pointer: [f32; 2],
    slots: BTreeMap<String, UniformSlot>,
}

impl UniformBuffer {
    /// Seeds one slot per spec with its declared default.
    pub fn from_specs(specs: &[ParamSpec], viewport: Viewport) -> Self {
        let slots = specs
            .iter()
            .map(|spec| {
                let value = match spec.default {
                    ParamValue::Scalar(v) => SlotValue::Float(v),
                    ParamValue::Color(c) => SlotValue::Color(c),
                    ParamValue::Count(v) => SlotValue::Int(v),
                };
                (
                    spec.name.to_string(),
                    UniformSlot {
                        value,
                        kind: spec.kind,
                        min: spec.min,
                        max: spec.max,
                        smoothing: spec.smoothing,
                    },
                )
            })
            .collect();
        Self {
            time: 0.0,
            time_delta: 0.0,
            frame_index: 0,
            synced_once: false,
            resolution: [viewport.width as f32, viewport.height as f32, 1.0],
            pointer: [0.0, 0.0],
            slots,
        }
    }

    /// Runs the per-tick protocol:
    ///
    /// 1. advance `time` (never backwards),
    /// 2. refresh `resolution` if the viewport changed,
    /// 3. refresh `pointer` if it moved,
    /// 4. copy every parameter into its slot, clamped to its declared
    ///    range, smoothing where the spec asks for it.
    ///
    /// Parameters missing from the snapshot keep their last slot value;
    /// values of the wrong kind are rejected and logged.
    pub fn sync(
        &mut self,
        sample: TimeSample,
        viewport: Viewport,
        pointer: [f32; 2],
        params: &ParameterSet,
    ) {
        let seconds = if sample.seconds >= self.time {
            sample.seconds
        } else {
            tracing::warn!(
                time = self.time,
                sample = sample.seconds,
                "ignoring backwards clock sample"
            );
            self.time
        };
        self.time_delta = seconds - self.time;
        self.time = seconds;
        self.frame_index = sample.frame_index;

        let resolution = [viewport.width as f32, viewport.height as f32, 1.0];
        if resolution != self.resolution {
            self.resolution = resolution;
        }
        if pointer != self.pointer {
            self.pointer = pointer;
        }

        let snap = !self.synced_once;
        let dt = self.time_delta;
        for (name, value) in params.iter() {
            let Some(slot) = self.slots.get_mut(name) else {
                tracing::debug!(name, "parameter has no uniform slot; ignoring");
                continue;
            };
            if value.kind() != slot.kind {
                tracing::warn!(
                    name,
                    expected = ?slot.kind,
                    got = ?value.kind(),
                    "parameter kind mismatch; keeping previous value"
                );
                continue;
            }
            slot.apply(value, dt, snap);
        }
        self.synced_once = true;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn time_delta(&self) -> f32 {
        self.time_delta
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn resolution(&self) -> [f32; 3] {
        self.resolution
    }

    pub fn pointer(&self) -> [f32; 2] {
        self.pointer
    }

    /// Kernel-facing snapshot of the reserved inputs.
    pub fn frame_input(&self) -> FrameInput {
        FrameInput {
            time: self.time,
            resolution: vec2(self.resolution[0], self.resolution[1]),
            pointer: vec2(self.pointer[0], self.pointer[1]),
        }
    }

    pub fn scalar(&self, name: &str) -> f32 {
        match self.slots.get(name).map(|slot| slot.value) {
            Some(SlotValue::Float(v)) => v,
            Some(SlotValue::Int(v)) => v as f32,
            _ => 0.0,
        }
    }

    pub fn color(&self, name: &str) -> glam::Vec3 {
        match self.slots.get(name).map(|slot| slot.value) {
            Some(SlotValue::Color(c)) => glam::Vec3::from_array(c),
            _ => glam::Vec3::ZERO,
        }
    }

    pub fn count(&self, name: &str) -> i32 {
        match self.slots.get(name).map(|slot| slot.value) {
            Some(SlotValue::Int(v)) => v,
            Some(SlotValue::Float(v)) => v as i32,
            _ => 0,
        }
    }
}

impl UniformSlot {
    fn apply(&mut self, value: ParamValue, dt: f32, snap: bool) {
        let target = match value {
            ParamValue::Scalar(v) => SlotValue::Float(v.clamp(self.min, self.max)),
            ParamValue::Color(c) => SlotValue::Color(c.map(|ch| ch.clamp(self.min, self.max))),
            ParamValue::Count(v) => SlotValue::Int(v.clamp(self.min as i32, self.max as i32)),
        };

        let rate = match self.smoothing {
            Some(rate) if !snap => rate,
            _ => {
                self.value = target;
                return;
            }
        };

        // Exponential approach toward the freshly read value; the damping
        // state is the slot itself, not an animation library.
        let blend = 1.0 - (-rate * dt.max(0.0)).exp();
        self.value = match (self.value, target) {
            (SlotValue::Float(prev), SlotValue::Float(next)) => {
                SlotValue::Float(prev + (next - prev) * blend)
            }
            (SlotValue::Color(prev), SlotValue::Color(next)) => SlotValue::Color([
                prev[0] + (next[0] - prev[0]) * blend,
                prev[1] + (next[1] - prev[1]) * blend,
                prev[2] + (next[2] - prev[2]) * blend,
            ]),
            // Counts snap; fractional band counts make no sense.
            (_, next) => next,
        };
    }
}
