//! Headless still-frame export.
//!
//! Evaluates one tick at a fixed timestamp and writes the CPU frame as a
//! PNG. No window or GPU is involved; the kernels already produced the
//! pixels. Mesh effects have no pixel frame and are rejected.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::RgbaImage;

use crate::clock::FixedClock;
use crate::session::{Session, TickOutcome};
use crate::textures::GradientSlot;
use crate::uniforms::Viewport;
use crate::{control_parameters, RendererConfig};

pub(crate) fn run(config: &RendererConfig, time: f32, output: &Path) -> Result<()> {
    let id = config.effect;
    let viewport = Viewport::new(config.surface_size.0, config.surface_size.1);
    if viewport.is_empty() {
        bail!("still export needs a non-empty surface size");
    }

    let mut session = Session::new(Box::new(FixedClock::new(time)), config.render_scale);
    session.mount(id, viewport, GradientSlot::placeholder());
    let params = control_parameters(config, id);

    match session.tick(viewport, [0.0, 0.0], &params) {
        TickOutcome::Rendered => {}
        outcome => bail!("still tick did not render (outcome {outcome:?})"),
    }

    let instance = session.instance().expect("rendered tick has an instance");
    let Some((pixels, width, height)) = instance.pixels() else {
        bail!("effect '{id}' renders a mesh; still export only supports pixel effects");
    };

    let image = RgbaImage::from_raw(width, height, pixels.to_vec())
        .context("frame buffer does not match its dimensions")?;
    image
        .save(output)
        .with_context(|| format!("failed to write still frame to {}", output.display()))?;

    tracing::info!(
        effect = %id,
        time,
        width,
        height,
        path = %output.display(),
        "still frame written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderPolicy, RendererConfig};
    use gallery::EffectId;

    fn config(effect: EffectId, output: std::path::PathBuf) -> RendererConfig {
        RendererConfig {
            effect,
            surface_size: (48, 32),
            policy: RenderPolicy::Still { time: 1.5, output },
            ..RendererConfig::default()
        }
    }

    #[test]
    fn writes_a_png_for_a_pixel_effect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let config = config(EffectId::Plasma, path.clone());
        run(&config, 1.5, &path).unwrap();

        let written = image::open(&path).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (48, 32));
    }

    #[test]
    fn identical_time_yields_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        run(&config(EffectId::Bands, a.clone()), 2.0, &a).unwrap();
        run(&config(EffectId::Bands, b.clone()), 2.0, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn mesh_effects_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.png");
        let err = run(&config(EffectId::Blob, path.clone()), 0.0, &path).unwrap_err();
        assert!(err.to_string().contains("mesh"));
    }
}
