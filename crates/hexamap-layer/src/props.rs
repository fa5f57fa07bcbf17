//! Layer properties: precision override, rotation anchor, forwarded styling,
//! and accessor update triggers.

use h3o::CellIndex;
use hexamap_config::{Config, PrecisionSetting};

use crate::precision::Precision;

/// Units for outline widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthUnits {
    /// Real-world meters.
    #[default]
    Meters,
    /// World units of the projected space.
    Common,
    /// Screen pixels.
    Pixels,
}

/// Surface lighting parameters, forwarded opaque to the sub-renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub shininess: f32,
    pub specular_color: [u8; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.35,
            diffuse: 0.6,
            shininess: 32.0,
            specular_color: [30, 30, 30],
        }
    }
}

/// Per-attribute transition durations in milliseconds; zero disables the
/// transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transitions {
    pub fill_color_ms: f32,
    pub line_color_ms: f32,
    pub elevation_ms: f32,
    pub line_width_ms: f32,
}

/// Revision counters for the data accessors. Bumping one tells the active
/// sub-renderer to re-pull that attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateTriggers {
    pub get_hexagon: u64,
    pub get_fill_color: u64,
    pub get_elevation: u64,
    pub get_line_color: u64,
    pub get_line_width: u64,
}

impl UpdateTriggers {
    /// The styling revisions passed through to the sub-renderers. The cell
    /// accessor revision stays behind; it feeds the derived geometry and
    /// position triggers instead.
    #[must_use]
    pub fn forwarded(&self) -> ForwardedTriggers {
        ForwardedTriggers {
            get_fill_color: self.get_fill_color,
            get_elevation: self.get_elevation,
            get_line_color: self.get_line_color,
            get_line_width: self.get_line_width,
        }
    }
}

/// The trigger subset the sub-renderers see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardedTriggers {
    pub get_fill_color: u64,
    pub get_elevation: u64,
    pub get_line_color: u64,
    pub get_line_width: u64,
}

/// Geometry identity for the exact polygon path: the cell accessor revision
/// paired with the coverage, so a change to either re-tessellates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonTrigger {
    pub get_hexagon: u64,
    pub coverage: f64,
}

/// Merge the cell accessor revision with the coverage into one polygon
/// geometry trigger.
#[must_use]
pub fn merged_polygon_trigger(triggers: &UpdateTriggers, coverage: f64) -> PolygonTrigger {
    PolygonTrigger {
        get_hexagon: triggers.get_hexagon,
        coverage,
    }
}

/// The styling subset forwarded unchanged to whichever sub-renderer is
/// active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellStyle {
    pub filled: bool,
    pub stroked: bool,
    pub extruded: bool,
    pub wireframe: bool,
    pub fill_color: [u8; 4],
    pub line_color: [u8; 4],
    /// Multiplier applied to cell elevations.
    pub elevation_scale: f32,
    /// Uniform cell elevation, meters.
    pub elevation: f32,
    pub line_width: f32,
    pub line_width_units: WidthUnits,
    pub line_width_scale: f32,
    pub line_width_min_pixels: f32,
    pub line_width_max_pixels: f32,
    pub material: Material,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            filled: true,
            stroked: true,
            extruded: true,
            wireframe: false,
            fill_color: [0, 0, 0, 255],
            line_color: [0, 0, 0, 255],
            elevation_scale: 1.0,
            elevation: 1000.0,
            line_width: 1.0,
            line_width_units: WidthUnits::Meters,
            line_width_scale: 1.0,
            line_width_min_pixels: 0.0,
            line_width_max_pixels: f32::MAX,
            material: Material::default(),
        }
    }
}

/// Everything the host configures on the layer.
#[derive(Clone, Debug, PartialEq)]
pub struct HexagonLayerProps {
    /// Precision override.
    pub precision: Precision,
    /// Fraction of each cell the rendered shape occupies. Nominally in
    /// `[0, 1]`; consumed as given, only persisted values are clamped.
    pub coverage: f64,
    /// Pinned reference cell for the shared shape; `None` follows the view
    /// center.
    pub center_hexagon: Option<CellIndex>,
    /// Latitude the grid anchor is moved to, degrees.
    pub anchor_lat: f64,
    /// Longitude the grid anchor is moved to, degrees.
    pub anchor_lng: f64,
    /// Spin about the anchor point, degrees.
    pub azimuth_deg: f64,
    /// Forwarded styling.
    pub style: CellStyle,
    /// Forwarded transition durations.
    pub transitions: Transitions,
    /// Accessor revision counters.
    pub update_triggers: UpdateTriggers,
}

impl Default for HexagonLayerProps {
    fn default() -> Self {
        Self {
            precision: Precision::Auto,
            coverage: 1.0,
            center_hexagon: None,
            anchor_lat: 32.1285602329,
            anchor_lng: 114.0831041336,
            azimuth_deg: 30.0,
            style: CellStyle::default(),
            transitions: Transitions::default(),
            update_triggers: UpdateTriggers::default(),
        }
    }
}

impl HexagonLayerProps {
    /// Bridge the persisted configuration into runtime props.
    ///
    /// Coverage is clamped into `[0, 1]`. An unparseable pinned cell index is
    /// dropped rather than erroring, leaving the shared shape to follow the
    /// view center.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            precision: match config.layer.precision {
                PrecisionSetting::Auto => Precision::Auto,
                PrecisionSetting::High => Precision::High,
                PrecisionSetting::Low => Precision::Low,
            },
            coverage: config.layer.coverage.clamp(0.0, 1.0),
            center_hexagon: config
                .layer
                .center_hexagon
                .and_then(|raw| CellIndex::try_from(raw).ok()),
            anchor_lat: config.layer.anchor_lat,
            anchor_lng: config.layer.anchor_lng,
            azimuth_deg: config.layer.azimuth_deg,
            style: CellStyle {
                filled: config.style.filled,
                stroked: config.style.stroked,
                extruded: config.style.extruded,
                wireframe: config.style.wireframe,
                fill_color: config.style.fill_color,
                line_color: config.style.line_color,
                elevation_scale: config.style.elevation_scale,
                line_width: config.style.line_width,
                ..defaults.style
            },
            transitions: defaults.transitions,
            update_triggers: defaults.update_triggers,
        }
    }
}
