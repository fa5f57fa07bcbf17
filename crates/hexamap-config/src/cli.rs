//! Command-line argument parsing for the hexamap demo.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, PrecisionSetting};

/// Hexamap command-line arguments.
///
/// CLI values override settings loaded from `hexamap.ron`.
#[derive(Parser, Debug)]
#[command(name = "hexamap", about = "Adaptive H3 hexagon layer")]
pub struct CliArgs {
    /// Precision override (auto, high, low).
    #[arg(long)]
    pub precision: Option<String>,

    /// Fraction of each cell the rendered shape occupies (0.0 - 1.0).
    #[arg(long)]
    pub coverage: Option<f64>,

    /// Spin about the rotation anchor, in degrees.
    #[arg(long)]
    pub azimuth: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref precision) = args.precision {
            match precision.to_ascii_lowercase().as_str() {
                "auto" => self.layer.precision = PrecisionSetting::Auto,
                "high" => self.layer.precision = PrecisionSetting::High,
                "low" => self.layer.precision = PrecisionSetting::Low,
                other => log::warn!("Unknown precision override '{other}', keeping config value"),
            }
        }
        if let Some(coverage) = args.coverage {
            self.layer.coverage = coverage;
        }
        if let Some(azimuth) = args.azimuth {
            self.layer.azimuth_deg = azimuth;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
