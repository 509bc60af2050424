use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "lumedeck",
    author,
    version,
    about = "Procedural effect gallery",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Effect to show (e.g. `aurora`); see `--list` for the gallery.
    #[arg(value_name = "EFFECT")]
    pub effect: Option<String>,

    /// List available effects and exit.
    #[arg(long)]
    pub list: bool,

    /// Window resolution (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// FPS cap (0 = uncapped).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Internal render resolution factor (0.1 to 1.0).
    #[arg(long, value_name = "SCALE")]
    pub render_scale: Option<f32>,

    /// Preset TOML file with parameter overrides and an optional playlist.
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Rotate through the whole gallery, switching every SECONDS.
    #[arg(long, value_name = "SECONDS")]
    pub cycle: Option<f32>,

    /// Shuffle the rotation order.
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for the shuffled rotation order.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    pub seed: u64,

    /// Render one frame at SECONDS, write it to `--output`, and exit.
    #[arg(long, value_name = "SECONDS")]
    pub still: Option<f32>,

    /// Output path for `--still`.
    #[arg(long, value_name = "PATH", default_value = "frame.png")]
    pub output: PathBuf,

    /// Directory that gradient textures are resolved against.
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets: PathBuf,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height '{height}'"))?;
    if width == 0 || height == 0 {
        return Err("resolution must be non-zero".to_string());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_a_plain_effect_name() {
        let cli = Cli::try_parse_from(["lumedeck", "aurora"]).unwrap();
        assert_eq!(cli.effect.as_deref(), Some("aurora"));
        assert!(!cli.list);
    }

    #[test]
    fn parses_size_flag() {
        let cli = Cli::try_parse_from(["lumedeck", "--size", "1920x1080"]).unwrap();
        assert_eq!(cli.size, Some((1920, 1080)));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_size("1920").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("0x100").is_err());
        assert_eq!(parse_size("640X360").unwrap(), (640, 360));
    }

    #[test]
    fn still_flags_parse_together() {
        let cli = Cli::try_parse_from([
            "lumedeck", "plasma", "--still", "2.5", "--output", "shot.png",
        ])
        .unwrap();
        assert_eq!(cli.still, Some(2.5));
        assert_eq!(cli.output, PathBuf::from("shot.png"));
    }
}
