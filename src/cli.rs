use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
///
/// Image and tracer options left unset fall back to the JSON config file, then
/// to built-in defaults.
#[derive(Parser)]
#[command(name = "fogpath")]
#[command(about = "A Whitted ray tracer with uniform fog in Rust")]
pub struct Args {
    /// JSON render configuration
    #[arg(short, long, help = "JSON render configuration file")]
    pub config: Option<String>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, help = "Image width in pixels [default: 800]")]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long, help = "Image height in pixels [default: 600]")]
    pub height: Option<u32>,

    /// Extra samples for pixels on signature edges
    #[arg(long, short = 's', help = "Extra samples for pixels on signature edges [default: 8]")]
    pub samples_per_pixel: Option<u32>,

    /// Output PNG file path
    #[arg(short, long, help = "Output PNG file path [default: output.png]")]
    pub output: Option<String>,

    /// Maximum shading depth, primary ray included
    #[arg(long, help = "Maximum shading depth, primary ray included")]
    pub max_level: Option<u32>,

    /// Minimum importance for secondary rays
    #[arg(long, help = "Minimum importance for secondary rays")]
    pub min_importance: Option<f32>,

    /// Skip shadow rays toward point lights
    #[arg(long, help = "Disable shadow rays")]
    pub no_shadows: bool,

    /// Skip mirror reflections
    #[arg(long, help = "Disable mirror reflections")]
    pub no_reflections: bool,

    /// Skip refracted rays
    #[arg(long, help = "Disable refractions")]
    pub no_refractions: bool,

    /// Shade every solid with the default lighting
    #[arg(long, help = "Ignore per-solid recursion functions")]
    pub no_recursion: bool,

    /// Fog color and unit transmittance
    #[arg(long, value_parser = parse_fog, help = "Fog as r,g,b,kt (e.g. 0.5,0.5,0.5,0.6)")]
    pub fog: Option<[f32; 4]>,
}

/// Parse `r,g,b,kt` into four floats.
fn parse_fog(value: &str) -> Result<[f32; 4], String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|e| format!("'{part}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[f32; 4]>::try_from(parts)
        .map_err(|parts| format!("expected 4 comma separated values, got {}", parts.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_needs_four_values() {
        assert_eq!(parse_fog("0.5, 0.4,0.3,0.6"), Ok([0.5, 0.4, 0.3, 0.6]));
        assert!(parse_fog("0.5,0.4,0.3").is_err());
        assert!(parse_fog("a,b,c,d").is_err());
    }

    #[test]
    fn toggles_parse() {
        let args = Args::parse_from(["fogpath", "--no-shadows", "--fog", "1,1,1,0.5", "-s", "4"]);
        assert!(args.no_shadows);
        assert!(!args.no_reflections);
        assert_eq!(args.fog, Some([1.0, 1.0, 1.0, 0.5]));
        assert_eq!(args.samples_per_pixel, Some(4));
    }
}
