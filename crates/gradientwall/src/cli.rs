use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gradientwall",
    author,
    version,
    about = "Pointer-driven fluid gradient background"
)]
pub struct Cli {
    /// TOML settings file with palette and simulation knobs.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Optional FPS cap (0 = uncapped, vsync-driven).
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f32>,

    /// Window title.
    #[arg(long, value_name = "TITLE", default_value = "Fluid Gradient")]
    pub title: String,

    /// Injection radius around the pointer, in pixels.
    #[arg(long, value_name = "PX")]
    pub brush_size: Option<f32>,

    /// Injection strength (0-1).
    #[arg(long, value_name = "STRENGTH")]
    pub brush_strength: Option<f32>,

    /// How far the fluid warps the gradient.
    #[arg(long, value_name = "AMOUNT")]
    pub distortion: Option<f32>,

    /// Palette stops as `#rrggbb` hex colours, bottom to top.
    #[arg(long, value_name = "HEX")]
    pub color1: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color2: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color3: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color4: Option<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses `WIDTHxHEIGHT` into physical pixel dimensions.
pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width '{w}'"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height '{h}'"))?;
    if width == 0 || height == 0 {
        return Err("surface dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_surface_size_variants() {
        assert_eq!(parse_surface_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size(" 800X600 ").unwrap(), (800, 600));
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("axb").is_err());
    }

    #[test]
    fn cli_accepts_knob_overrides() {
        let cli = Cli::parse_from([
            "gradientwall",
            "--size",
            "1024x768",
            "--fps",
            "30",
            "--brush-size",
            "40",
            "--color1",
            "#ff0000",
        ]);
        assert_eq!(cli.size.as_deref(), Some("1024x768"));
        assert_eq!(cli.fps, Some(30.0));
        assert_eq!(cli.brush_size, Some(40.0));
        assert_eq!(cli.color1.as_deref(), Some("#ff0000"));
        assert!(cli.config.is_none());
    }
}
