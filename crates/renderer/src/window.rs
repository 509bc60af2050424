//! Interactive preview window.
//!
//! Drives the session from the winit event loop: cursor moves feed the
//! pointer slot, resizes feed the viewport, every redraw runs one tick and
//! presents it. Space and the arrow keys switch effects; when a rotation is
//! configured the carousel switches on its own schedule as well.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use carousel::{Carousel, RotationItem};
use gallery::{descriptor, EffectId, ParameterSet};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::clock::MonotonicClock;
use crate::gpu::GpuState;
use crate::session::{Session, TickOutcome};
use crate::textures::GradientSlot;
use crate::uniforms::Viewport;
use crate::{control_parameters, RendererConfig};

/// Throttles redraw requests to an optional FPS cap.
struct FramePacer {
    interval: Option<Duration>,
    next_due: Instant,
}

impl FramePacer {
    fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        Self {
            interval,
            next_due: Instant::now(),
        }
    }

    fn ready(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            return true;
        };
        if now >= self.next_due {
            // Advance by one interval only, so long gaps do not burst.
            self.next_due = (self.next_due + interval).max(now);
            true
        } else {
            false
        }
    }

    fn deadline(&self) -> Option<Instant> {
        self.interval.map(|_| self.next_due)
    }
}

fn gradient_for(config: &RendererConfig, id: EffectId) -> GradientSlot {
    match descriptor(id).gradient {
        Some(rel) => GradientSlot::load(config.asset_root.join(rel)),
        None => GradientSlot::placeholder(),
    }
}

/// Releases the current instance, mounts `id`, and rebuilds its GPU
/// resources and control parameters.
fn switch_effect(
    session: &mut Session,
    gpu: &mut GpuState,
    params: &mut ParameterSet,
    config: &RendererConfig,
    id: EffectId,
) {
    let size = gpu.size();
    let viewport = Viewport::new(size.width, size.height);
    session.mount(id, viewport, gradient_for(config, id));
    gpu.prepare_instance(session.instance().expect("instance just mounted"));
    *params = control_parameters(config, id);
    tracing::info!(effect = %id, "showing effect");
}

pub(crate) fn run(config: &RendererConfig) -> Result<()> {
    let config = config.clone();

    let event_loop = EventLoop::new().context("failed to initialize event loop")?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("lumedeck")
        .with_inner_size(window_size)
        .build(&event_loop)
        .context("failed to create preview window")?;
    let window = Arc::new(window);

    let mut gpu = GpuState::new(window.as_ref(), window.inner_size())?;
    let mut session = Session::new(Box::new(MonotonicClock::new()), config.render_scale);

    let mut carousel = match &config.rotation {
        Some(rotation) => {
            let items = rotation
                .items
                .iter()
                .map(|id| RotationItem::new(*id, rotation.item_duration))
                .collect();
            Some(
                Carousel::new(items, rotation.mode, rotation.seed, Instant::now())
                    .context("rotation playlist is empty")?,
            )
        }
        None => None,
    };

    let initial = carousel
        .as_ref()
        .map(|c| c.current())
        .unwrap_or(config.effect);
    let mut params = ParameterSet::default();
    switch_effect(&mut session, &mut gpu, &mut params, &config, initial);

    let mut pointer = [0.0_f32, 0.0_f32];
    let mut pacer = FramePacer::new(config.target_fps);

    window.request_redraw();

    let run_result = event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    pointer = normalized_pointer(position, gpu.size());
                }
                WindowEvent::Resized(new_size) => {
                    gpu.resize(new_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state != ElementState::Pressed {
                        return;
                    }
                    let current = session.current_effect().unwrap_or(config.effect);
                    match event.logical_key {
                        Key::Named(NamedKey::Escape) => elwt.exit(),
                        Key::Named(NamedKey::Space) | Key::Named(NamedKey::ArrowRight) => {
                            let next = carousel
                                .as_mut()
                                .and_then(|c| c.skip(Instant::now()))
                                .unwrap_or_else(|| current.next());
                            switch_effect(&mut session, &mut gpu, &mut params, &config, next);
                        }
                        Key::Named(NamedKey::ArrowLeft) => {
                            switch_effect(
                                &mut session,
                                &mut gpu,
                                &mut params,
                                &config,
                                current.prev(),
                            );
                        }
                        _ => {}
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Some(next) = carousel.as_mut().and_then(|c| c.tick(Instant::now())) {
                        switch_effect(&mut session, &mut gpu, &mut params, &config, next);
                    }

                    let size = gpu.size();
                    let viewport = Viewport::new(size.width, size.height);
                    let outcome = session.tick(viewport, pointer, &params);
                    if outcome != TickOutcome::Rendered {
                        return;
                    }
                    let instance = session.instance().expect("rendered tick has an instance");
                    match gpu.render_frame(instance) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(gpu.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("surface out of memory; exiting preview");
                            elwt.exit();
                        }
                        Err(wgpu::SurfaceError::Timeout) => {
                            tracing::warn!("surface timeout; retrying next frame");
                        }
                        Err(other) => {
                            tracing::warn!(error = ?other, "surface error; retrying next frame");
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if pacer.ready(now) {
                    window.request_redraw();
                } else if let Some(deadline) = pacer.deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                }
            }
            _ => {}
        }
    });

    run_result.map_err(|err| anyhow!("window event loop error: {err}"))
}

fn normalized_pointer(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> [f32; 2] {
    let w = size.width.max(1) as f64;
    let h = size.height.max(1) as f64;
    [
        ((position.x / w) * 2.0 - 1.0) as f32,
        (1.0 - (position.y / h) * 2.0) as f32,
    ]
}
