use anyhow::{Context, Result};
use renderer::{GradientConfig, GradientRenderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_surface_size, Cli};
use crate::settings::Settings;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        fps = ?config.target_fps,
        "starting fluid gradient renderer"
    );

    let mut renderer = GradientRenderer::new(config)?;
    renderer.run()
}

/// Merges defaults, the optional settings file, and CLI flags (in that
/// order of precedence, lowest first) into a renderer configuration.
fn build_config(cli: &Cli) -> Result<RendererConfig> {
    let mut gradient = GradientConfig::default();

    if let Some(path) = &cli.config {
        let settings = Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        settings.apply(&mut gradient);
        tracing::debug!(path = %path.display(), "applied settings file");
    }

    if let Some(size) = cli.brush_size {
        gradient.brush_size = size;
    }
    if let Some(strength) = cli.brush_strength {
        gradient.brush_strength = strength;
    }
    if let Some(distortion) = cli.distortion {
        gradient.distortion_amount = distortion;
    }
    if let Some(color) = &cli.color1 {
        gradient.color1 = color.clone();
    }
    if let Some(color) = &cli.color2 {
        gradient.color2 = color.clone();
    }
    if let Some(color) = &cli.color3 {
        gradient.color3 = color.clone();
    }
    if let Some(color) = &cli.color4 {
        gradient.color4 = color.clone();
    }

    let surface_size = cli
        .size
        .as_deref()
        .map(|value| parse_surface_size(value).map_err(|err| anyhow::anyhow!(err)))
        .transpose()?
        .unwrap_or((1920, 1080));

    Ok(RendererConfig {
        surface_size,
        target_fps: cli.fps.filter(|fps| *fps > 0.0),
        window_title: cli.title.clone(),
        gradient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_flags_override_defaults() {
        let cli = Cli::parse_from([
            "gradientwall",
            "--size",
            "800x600",
            "--fps",
            "0",
            "--brush-size",
            "50",
            "--color2",
            "#123456",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.surface_size, (800, 600));
        assert_eq!(config.target_fps, None, "fps=0 should map to uncapped");
        assert_eq!(config.gradient.brush_size, 50.0);
        assert_eq!(config.gradient.color2, "#123456");
        assert_eq!(config.gradient.color1, "#b8fff7");
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let cli = Cli::parse_from(["gradientwall", "--config", "/nonexistent/gradient.toml"]);
        assert!(build_config(&cli).is_err());
    }
}
