use std::time::Duration;

use anyhow::{bail, Context, Result};
use gallery::{descriptor, EffectId, PlaylistMode, PresetFile, SurfaceSpec};
use renderer::{RenderPolicy, Renderer, RendererConfig, RotationConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.list {
        list_effects();
        return Ok(());
    }

    let presets = cli
        .preset
        .as_deref()
        .map(|path| {
            PresetFile::load(path)
                .with_context(|| format!("failed to load preset {}", path.display()))
        })
        .transpose()?;

    let effect = match cli.effect.as_deref() {
        Some(name) => resolve_effect(name)?,
        None => EffectId::Bands,
    };

    let rotation = build_rotation(&cli, presets.as_ref());

    let policy = match cli.still {
        Some(time) => {
            if time < 0.0 {
                bail!("--still expects a non-negative timestamp");
            }
            RenderPolicy::Still {
                time,
                output: cli.output.clone(),
            }
        }
        None => RenderPolicy::Animate,
    };

    let mut config = RendererConfig {
        effect,
        presets,
        rotation,
        policy,
        asset_root: cli.assets.clone(),
        ..RendererConfig::default()
    };
    if let Some(size) = cli.size {
        config.surface_size = size;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = (fps > 0.0).then_some(fps);
    }
    if let Some(scale) = cli.render_scale {
        if !(0.1..=1.0).contains(&scale) {
            bail!("--render-scale must be within 0.1 and 1.0");
        }
        config.render_scale = scale;
    }

    tracing::info!(effect = %config.effect, size = ?config.surface_size, "starting lumedeck");
    Renderer::new(config).run()
}

fn resolve_effect(name: &str) -> Result<EffectId> {
    name.parse().with_context(|| {
        let slugs: Vec<&str> = EffectId::ALL.iter().map(|id| id.slug()).collect();
        format!("unknown effect '{name}' (expected one of: {})", slugs.join(", "))
    })
}

/// A playlist in the preset file wins; `--cycle` rotates the whole gallery.
fn build_rotation(cli: &Cli, presets: Option<&PresetFile>) -> Option<RotationConfig> {
    if let Some((mode, item_duration, items)) = presets.and_then(|p| p.playlist_items()) {
        if !items.is_empty() {
            return Some(RotationConfig {
                mode,
                item_duration,
                items,
                seed: cli.seed,
            });
        }
    }
    cli.cycle.filter(|seconds| *seconds > 0.0).map(|seconds| {
        let mode = if cli.shuffle {
            PlaylistMode::Shuffle
        } else {
            PlaylistMode::Continuous
        };
        RotationConfig {
            mode,
            item_duration: Duration::from_secs_f32(seconds),
            items: EffectId::ALL.to_vec(),
            seed: cli.seed,
        }
    })
}

fn list_effects() {
    println!("Available effects:");
    for id in EffectId::ALL {
        let d = descriptor(id);
        let surface = match d.surface {
            SurfaceSpec::Quad => "quad",
            SurfaceSpec::Icosphere { .. } => "icosphere",
        };
        println!(
            "  {:<12} {:<16} surface={:<9} params={}",
            id.slug(),
            d.title,
            surface,
            d.params.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["lumedeck"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn resolve_effect_knows_every_slug() {
        for id in EffectId::ALL {
            assert_eq!(resolve_effect(id.slug()).unwrap(), id);
        }
        assert!(resolve_effect("sparkles").is_err());
    }

    #[test]
    fn cycle_builds_a_whole_gallery_rotation() {
        let rotation = build_rotation(&cli(&["--cycle", "10"]), None).unwrap();
        assert_eq!(rotation.items, EffectId::ALL.to_vec());
        assert_eq!(rotation.item_duration, Duration::from_secs(10));
        assert_eq!(rotation.mode, PlaylistMode::Continuous);
    }

    #[test]
    fn shuffle_flag_changes_the_mode() {
        let rotation = build_rotation(&cli(&["--cycle", "5", "--shuffle"]), None).unwrap();
        assert_eq!(rotation.mode, PlaylistMode::Shuffle);
    }

    #[test]
    fn preset_playlist_wins_over_cycle() {
        let presets = PresetFile::from_toml_str(
            r#"
[playlist]
item_duration = "7s"
items = ["aurora", "blob"]
"#,
        )
        .unwrap();
        let rotation = build_rotation(&cli(&["--cycle", "99"]), Some(&presets)).unwrap();
        assert_eq!(rotation.items, vec![EffectId::Aurora, EffectId::Blob]);
        assert_eq!(rotation.item_duration, Duration::from_secs(7));
    }

    #[test]
    fn no_cycle_and_no_playlist_means_no_rotation() {
        assert!(build_rotation(&cli(&[]), None).is_none());
    }
}
