//! The two-state render session: Idle (nothing mounted) or Running (exactly
//! one effect instance ticking).
//!
//! Switching effects releases the previous instance — and everything it
//! owns, including its texture loader — before the next one is created, so
//! at most one instance ever exists.

use gallery::{EffectId, ParameterSet};

use crate::clock::BoxedClock;
use crate::instance::EffectInstance;
use crate::textures::GradientSlot;
use crate::uniforms::Viewport;

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No effect mounted.
    Idle,
    /// Viewport has zero area; frame skipped, nothing touched.
    Skipped,
    /// Uniforms synced and the kernel evaluated.
    Rendered,
}

pub struct Session {
    clock: BoxedClock,
    render_scale: f32,
    instance: Option<EffectInstance>,
}

impl Session {
    pub fn new(clock: BoxedClock, render_scale: f32) -> Self {
        Self {
            clock,
            render_scale,
            instance: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.instance.is_some()
    }

    pub fn instance(&self) -> Option<&EffectInstance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut EffectInstance> {
        self.instance.as_mut()
    }

    pub fn current_effect(&self) -> Option<EffectId> {
        self.instance.as_ref().map(|instance| instance.id())
    }

    /// Mounts `id`, releasing any previous instance first.
    pub fn mount(&mut self, id: EffectId, viewport: Viewport, gradient: GradientSlot) {
        // Release before create: the old instance's resources must be gone
        // before the new instance exists.
        if let Some(old) = self.instance.take() {
            tracing::info!(old = %old.id(), new = %id, "switching effect");
            drop(old);
        }
        self.clock.reset();
        self.instance = Some(EffectInstance::new(id, viewport, self.render_scale, gradient));
    }

    /// Releases the current instance and returns to Idle.
    pub fn unmount(&mut self) {
        self.instance = None;
    }

    /// Runs one frame: read the clock, poll the texture loader, sync the
    /// uniforms, evaluate the kernel.
    pub fn tick(
        &mut self,
        viewport: Viewport,
        pointer: [f32; 2],
        params: &ParameterSet,
    ) -> TickOutcome {
        let Some(instance) = self.instance.as_mut() else {
            return TickOutcome::Idle;
        };
        if viewport.is_empty() {
            return TickOutcome::Skipped;
        }
        let sample = self.clock.sample();
        instance.gradient_mut().poll();
        instance.tick(sample, viewport, pointer, params);
        TickOutcome::Rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crossbeam_channel::bounded;
    use gallery::descriptor;

    fn session() -> Session {
        Session::new(Box::new(FixedClock::new(1.0)), 1.0)
    }

    fn params_for(id: EffectId) -> ParameterSet {
        ParameterSet::from_specs(&descriptor(id).params)
    }

    #[test]
    fn idle_session_reports_idle_ticks() {
        let mut session = session();
        assert!(!session.is_running());
        assert_eq!(
            session.tick(Viewport::new(32, 32), [0.0, 0.0], &ParameterSet::default()),
            TickOutcome::Idle
        );
    }

    #[test]
    fn zero_viewport_skips_the_tick() {
        let mut session = session();
        session.mount(
            EffectId::Plasma,
            Viewport::new(32, 32),
            GradientSlot::placeholder(),
        );
        assert_eq!(
            session.tick(
                Viewport::new(0, 32),
                [0.0, 0.0],
                &params_for(EffectId::Plasma)
            ),
            TickOutcome::Skipped
        );
        assert_eq!(
            session.tick(
                Viewport::new(32, 32),
                [0.0, 0.0],
                &params_for(EffectId::Plasma)
            ),
            TickOutcome::Rendered
        );
    }

    #[test]
    fn switching_releases_the_old_instance_before_the_new_one_ticks() {
        let mut session = session();
        let viewport = Viewport::new(16, 16);

        for _ in 0..5 {
            let (tx, rx) = bounded(1);
            session.mount(EffectId::Plasma, viewport, GradientSlot::from_receiver(rx));
            assert_eq!(session.current_effect(), Some(EffectId::Plasma));

            session.mount(EffectId::Bands, viewport, GradientSlot::placeholder());
            // The previous instance (and its loader receiver) is gone, so
            // a late texture delivery has nowhere to land.
            assert!(tx
                .send(Ok(image::RgbaImage::from_pixel(
                    1,
                    1,
                    image::Rgba([0, 0, 0, 255])
                )))
                .is_err());

            assert_eq!(session.current_effect(), Some(EffectId::Bands));
            assert_eq!(
                session.tick(viewport, [0.0, 0.0], &params_for(EffectId::Bands)),
                TickOutcome::Rendered
            );
        }
    }

    #[test]
    fn unmount_returns_to_idle() {
        let mut session = session();
        session.mount(
            EffectId::Sines,
            Viewport::new(8, 8),
            GradientSlot::placeholder(),
        );
        assert!(session.is_running());
        session.unmount();
        assert!(!session.is_running());
        assert_eq!(session.current_effect(), None);
    }

    #[test]
    fn remount_resets_the_clock() {
        let mut session = Session::new(Box::new(crate::clock::MonotonicClock::new()), 1.0);
        let viewport = Viewport::new(8, 8);
        session.mount(EffectId::Plasma, viewport, GradientSlot::placeholder());
        session.tick(viewport, [0.0, 0.0], &params_for(EffectId::Plasma));
        session.mount(EffectId::Plasma, viewport, GradientSlot::placeholder());
        session.tick(viewport, [0.0, 0.0], &params_for(EffectId::Plasma));
        let t = session.instance().unwrap().uniforms().time();
        assert!(t < 1.0, "clock did not reset on remount: {t}");
    }
}
