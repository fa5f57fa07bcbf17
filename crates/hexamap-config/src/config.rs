//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level hexamap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Layer behavior: precision override, coverage, rotation anchor.
    pub layer: LayerConfig,
    /// Cell styling forwarded to the sub-renderers.
    pub style: StyleConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Precision override for the layer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrecisionSetting {
    /// Decide per update pass from the data and the active view.
    #[default]
    Auto,
    /// Always render exact per-cell polygons.
    High,
    /// Always render the shared instanced shape.
    Low,
}

/// Layer behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    /// Precision override.
    pub precision: PrecisionSetting,
    /// Fraction of each cell the rendered shape occupies (0.0 - 1.0).
    pub coverage: f64,
    /// Raw index of the cell anchoring the shared shape, if pinned.
    pub center_hexagon: Option<u64>,
    /// Latitude the grid anchor is moved to, in degrees.
    pub anchor_lat: f64,
    /// Longitude the grid anchor is moved to, in degrees.
    pub anchor_lng: f64,
    /// Spin about the anchor point, in degrees.
    pub azimuth_deg: f64,
}

/// Cell styling configuration, forwarded unchanged to the sub-renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// Fill as RGBA bytes.
    pub fill_color: [u8; 4],
    /// Outline as RGBA bytes.
    pub line_color: [u8; 4],
    /// Outline width, in the layer's line width units.
    pub line_width: f32,
    /// Multiplier applied to cell elevations.
    pub elevation_scale: f32,
    /// Extrude cells into columns.
    pub extruded: bool,
    /// Draw extruded cells as wireframes.
    pub wireframe: bool,
    /// Fill cell interiors.
    pub filled: bool,
    /// Stroke cell outlines.
    pub stroked: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            precision: PrecisionSetting::Auto,
            coverage: 1.0,
            center_hexagon: None,
            anchor_lat: 32.1285602329,
            anchor_lng: 114.0831041336,
            azimuth_deg: 30.0,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            fill_color: [0, 0, 0, 255],
            line_color: [0, 0, 0, 255],
            line_width: 1.0,
            elevation_scale: 1.0,
            extruded: true,
            wireframe: false,
            filled: true,
            stroked: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("hexamap.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `hexamap.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join("hexamap.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("hexamap.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
