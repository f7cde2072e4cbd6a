use std::path::{Path, PathBuf};

use renderer::GradientConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Optional on-disk settings mirroring the gradient knobs.
///
/// Every field is optional; absent values keep the built-in defaults and CLI
/// flags override whatever the file sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub brush: Brush,
    #[serde(default)]
    pub fluid: Fluid,
    #[serde(default)]
    pub display: Display,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Palette {
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub color3: Option<String>,
    pub color4: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Brush {
    pub size: Option<f32>,
    pub strength: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fluid {
    pub decay: Option<f32>,
    pub trail_length: Option<f32>,
    pub stop_decay: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Display {
    pub distortion_amount: Option<f32>,
    pub color_intensity: Option<f32>,
    pub softness: Option<f32>,
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Overlays the file's values onto `config`, leaving absent fields alone.
    pub fn apply(&self, config: &mut GradientConfig) {
        if let Some(color) = &self.palette.color1 {
            config.color1 = color.clone();
        }
        if let Some(color) = &self.palette.color2 {
            config.color2 = color.clone();
        }
        if let Some(color) = &self.palette.color3 {
            config.color3 = color.clone();
        }
        if let Some(color) = &self.palette.color4 {
            config.color4 = color.clone();
        }
        if let Some(size) = self.brush.size {
            config.brush_size = size;
        }
        if let Some(strength) = self.brush.strength {
            config.brush_strength = strength;
        }
        if let Some(decay) = self.fluid.decay {
            config.fluid_decay = decay;
        }
        if let Some(trail) = self.fluid.trail_length {
            config.trail_length = trail;
        }
        if let Some(stop) = self.fluid.stop_decay {
            config.stop_decay = stop;
        }
        if let Some(distortion) = self.display.distortion_amount {
            config.distortion_amount = distortion;
        }
        if let Some(intensity) = self.display.color_intensity {
            config.color_intensity = intensity;
        }
        if let Some(softness) = self.display.softness {
            config.softness = softness;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r##"
[palette]
color1 = "#112233"
color4 = "#445566"

[brush]
size = 40.0

[fluid]
decay = 0.9

[display]
softness = 0.5
"##;

    #[test]
    fn partial_tables_overlay_defaults() {
        let settings = Settings::from_toml_str(SETTINGS).unwrap();
        let mut config = GradientConfig::default();
        settings.apply(&mut config);

        assert_eq!(config.color1, "#112233");
        assert_eq!(config.color2, "#6e3466");
        assert_eq!(config.color4, "#445566");
        assert_eq!(config.brush_size, 40.0);
        assert_eq!(config.brush_strength, 0.5);
        assert_eq!(config.fluid_decay, 0.9);
        assert_eq!(config.trail_length, 0.95);
        assert_eq!(config.softness, 0.5);
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn empty_settings_keep_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        let mut config = GradientConfig::default();
        settings.apply(&mut config);
        assert_eq!(config, GradientConfig::default());
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Settings::from_toml_str("[palette\ncolor1 = 1").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gradient.toml");
        std::fs::write(&path, SETTINGS).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.brush.size, Some(40.0));

        let missing = Settings::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(SettingsError::Io { .. })));
    }
}
