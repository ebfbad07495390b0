use serde::Deserialize;
use std::path::Path;

use fogpath::camera::ImageSettings;
use fogpath::material::{Color, UniformFog};
use fogpath::tracer::TracerSettings;

use crate::cli::Args;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FogConfig {
    pub color: [f32; 3],
    pub kt: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: [0.5, 0.5, 0.5],
            kt: 0.6,
        }
    }
}

impl FogConfig {
    pub fn to_fog(self) -> UniformFog {
        UniformFog::new(Color::from_array(self.color), self.kt)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub output_path: String,
    pub fog: FogConfig,
    pub tracer: TracerSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 8,
            output_path: "output.png".to_string(),
            fog: FogConfig::default(),
            tracer: TracerSettings::default(),
        }
    }
}

impl RenderConfig {
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples_per_pixel,
        }
    }

    /// Overwrite config values with the ones given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if let Some(samples) = args.samples_per_pixel {
            self.samples_per_pixel = samples;
        }
        if let Some(output) = &args.output {
            self.output_path = output.clone();
        }
        if let Some([r, g, b, kt]) = args.fog {
            self.fog = FogConfig {
                color: [r, g, b],
                kt,
            };
        }
        if let Some(max_level) = args.max_level {
            self.tracer.max_level = max_level;
        }
        if let Some(min_importance) = args.min_importance {
            self.tracer.min_importance = min_importance;
        }
        self.tracer.do_shadows &= !args.no_shadows;
        self.tracer.do_reflections &= !args.no_reflections;
        self.tracer.do_refractions &= !args.no_refractions;
        self.tracer.do_recursion &= !args.no_recursion;
    }
}

pub fn load_config(path: &str) -> Result<RenderConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|error| format!("cannot read config '{path}': {error}"))?;
    let config = serde_json::from_str(&raw)?;
    Ok(config)
}

pub fn validate_config(config: &RenderConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.width == 0 || config.height == 0 {
        return Err("width and height must be positive".into());
    }

    if !config.output_path.ends_with(".png") {
        return Err(format!(
            "unsupported output '{}': only .png is supported",
            config.output_path
        )
        .into());
    }

    if let Some(parent) = Path::new(&config.output_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(format!("output directory does not exist: {}", parent.display()).into());
        }
    }

    if !config.fog.color.iter().all(|band| band.is_finite()) {
        return Err("fog color must contain finite values".into());
    }

    if !(0.0..=1.0).contains(&config.fog.kt) {
        return Err(format!("fog kt must lie in [0, 1], got {}", config.fog.kt).into());
    }

    config.tracer.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: RenderConfig = serde_json::from_str(
            r#"{ "width": 320, "fog": { "color": [1, 0, 0], "kt": 0.9 }, "tracer": { "maxLevel": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.fog.to_fog().color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(config.tracer.max_level, 5);
        assert!(config.tracer.do_shadows);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn command_line_overrides_config() {
        let mut config = RenderConfig::default();
        let args = Args::parse_from(["fogpath", "--width", "64", "--no-refractions", "--max-level", "2"]);
        config.apply_args(&args);
        assert_eq!(config.width, 64);
        assert_eq!(config.tracer.max_level, 2);
        assert!(!config.tracer.do_refractions);
        assert!(config.tracer.do_reflections);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = RenderConfig::default();
        config.height = 0;
        assert!(validate_config(&config).is_err());

        let mut config = RenderConfig::default();
        config.output_path = "render.exr".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = RenderConfig::default();
        config.fog.kt = 1.5;
        assert!(validate_config(&config).is_err());

        let mut config = RenderConfig::default();
        config.tracer.max_level = 0;
        assert!(validate_config(&config).is_err());
    }
}
