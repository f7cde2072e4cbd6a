use anyhow::{bail, Result};

/// Palette and simulation knobs for the gradient.
///
/// All fields default to the values the effect was tuned with. The struct is
/// captured once at initialisation and never mutated afterwards; live editing
/// of a running instance is not modelled.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientConfig {
    /// Injection radius around the pointer, in surface pixels.
    pub brush_size: f32,
    /// Injection strength in `[0, 1]`.
    pub brush_strength: f32,
    /// How far fluid velocity warps the composite sampling coordinates.
    pub distortion_amount: f32,
    /// Per-frame multiplicative decay applied while the pointer moves, in `(0, 1]`.
    pub fluid_decay: f32,
    /// Per-frame multiplicative decay of the dye trail, in `(0, 1]`.
    pub trail_length: f32,
    /// Per-frame multiplicative decay applied once the pointer stops, in `(0, 1]`.
    pub stop_decay: f32,
    /// Palette stops as `#rrggbb` hex strings, blended bottom to top.
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    /// Output brightness multiplier.
    pub color_intensity: f32,
    /// Width of the blend band between palette stops.
    pub softness: f32,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            brush_size: 25.0,
            brush_strength: 0.5,
            distortion_amount: 2.5,
            fluid_decay: 0.995,
            trail_length: 0.95,
            stop_decay: 0.98,
            color1: "#b8fff7".to_string(),
            color2: "#6e3466".to_string(),
            color3: "#0133ff".to_string(),
            color4: "#66d1fe".to_string(),
            color_intensity: 1.0,
            softness: 1.0,
        }
    }
}

impl GradientConfig {
    /// Validates the knobs and parses the palette into normalised RGB.
    ///
    /// Called once during `GradientRenderer::new`; a bad config is rejected
    /// up front instead of degrading mid-session.
    pub fn resolve(&self) -> Result<ResolvedGradient> {
        for (name, value) in [
            ("fluid_decay", self.fluid_decay),
            ("trail_length", self.trail_length),
            ("stop_decay", self.stop_decay),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                bail!("{name} must lie in (0, 1], got {value}");
            }
        }
        if !(self.brush_size > 0.0) {
            bail!("brush_size must be positive, got {}", self.brush_size);
        }
        if !(0.0..=1.0).contains(&self.brush_strength) {
            bail!(
                "brush_strength must lie in [0, 1], got {}",
                self.brush_strength
            );
        }
        for (name, value) in [
            ("distortion_amount", self.distortion_amount),
            ("color_intensity", self.color_intensity),
            ("softness", self.softness),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} must be a non-negative finite number, got {value}");
            }
        }

        let palette = [
            hex_to_rgb(&self.color1)?,
            hex_to_rgb(&self.color2)?,
            hex_to_rgb(&self.color3)?,
            hex_to_rgb(&self.color4)?,
        ];

        Ok(ResolvedGradient {
            brush_size: self.brush_size,
            brush_strength: self.brush_strength,
            distortion_amount: self.distortion_amount,
            fluid_decay: self.fluid_decay,
            trail_length: self.trail_length,
            stop_decay: self.stop_decay,
            palette,
            color_intensity: self.color_intensity,
            softness: self.softness,
        })
    }
}

/// A validated `GradientConfig` with the palette parsed to normalised RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGradient {
    pub brush_size: f32,
    pub brush_strength: f32,
    pub distortion_amount: f32,
    pub fluid_decay: f32,
    pub trail_length: f32,
    pub stop_decay: f32,
    pub palette: [[f32; 3]; 4],
    pub color_intensity: f32,
    pub softness: f32,
}

/// Parses a `#rrggbb` hex colour into normalised `[r, g, b]`.
///
/// The leading `#` is optional; components map onto `0.0..=1.0` as `n / 255`.
pub fn hex_to_rgb(hex: &str) -> Result<[f32; 3]> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        bail!("invalid hex colour '{hex}'; expected #rrggbb");
    }
    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        let value = u8::from_str_radix(&digits[range], 16)?;
        Ok(value as f32 / 255.0)
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window surface size in physical pixels.
    pub surface_size: (u32, u32),
    /// Optional FPS cap; `None` lets vsync drive the loop.
    pub target_fps: Option<f32>,
    /// Title of the preview window.
    pub window_title: String,
    /// Palette and simulation knobs.
    pub gradient: GradientConfig,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1920, 1080),
            target_fps: None,
            window_title: "Fluid Gradient".to_string(),
            gradient: GradientConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_palette_entry() {
        let rgb = hex_to_rgb("#66d1fe").unwrap();
        assert!((rgb[0] - 0.4).abs() <= 1.0 / 255.0);
        assert!((rgb[1] - 0.82).abs() <= 1.0 / 255.0);
        assert!((rgb[2] - 0.996).abs() <= 1.0 / 255.0);
    }

    #[test]
    fn parses_hex_without_hash() {
        assert_eq!(hex_to_rgb("ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_rgb("#000000").unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(hex_to_rgb("#fff").is_err());
        assert!(hex_to_rgb("#zzzzzz").is_err());
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn default_config_resolves() {
        let resolved = GradientConfig::default().resolve().unwrap();
        assert_eq!(resolved.brush_size, 25.0);
        assert_eq!(resolved.fluid_decay, 0.995);
        assert!((resolved.palette[3][0] - 0.4).abs() <= 1.0 / 255.0);
    }

    #[test]
    fn rejects_decay_outside_unit_interval() {
        let mut config = GradientConfig::default();
        config.fluid_decay = 0.0;
        assert!(config.resolve().is_err());

        let mut config = GradientConfig::default();
        config.trail_length = 1.2;
        assert!(config.resolve().is_err());

        let mut config = GradientConfig::default();
        config.stop_decay = -0.5;
        assert!(config.resolve().is_err());
    }

    #[test]
    fn rejects_bad_brush() {
        let mut config = GradientConfig::default();
        config.brush_size = 0.0;
        assert!(config.resolve().is_err());

        let mut config = GradientConfig::default();
        config.brush_strength = 1.5;
        assert!(config.resolve().is_err());
    }
}
