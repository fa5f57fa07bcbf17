//! Walkthrough of the hexamap layer subsystems.
//!
//! Loads the configuration, initializes logging, and then exercises the
//! rotation frame, polygon building, precision selection, shared shape
//! maintenance, and picking, logging what each step produced.

use clap::Parser;
use h3o::{CellIndex, LatLng, Resolution};
use hexamap_config::{CliArgs, Config};
use hexamap_geometry::{cell_to_polygon, rotated_centroid};
use hexamap_layer::{
    ChangeFlags, HexagonLayer, HexagonLayerProps, MercatorView, Precision, RenderPlan,
};
use hexamap_rotation::FrameRotation;
use tracing::info;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .expect("Failed to resolve config directory")
            .join("hexamap")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    // Initialize logging with config and debug settings
    let log_dir = config_dir.join("logs");
    hexamap_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    demonstrate_rotation_frame(&config);
    demonstrate_polygon_building(&config);
    demonstrate_precision_selection(&config);
    demonstrate_shared_shape_drift(&config);
    demonstrate_picking(&config);

    info!("Hexamap demonstration completed");
}

fn display_frame(config: &Config) -> FrameRotation {
    FrameRotation::new(
        config.layer.anchor_lat,
        config.layer.anchor_lng,
        config.layer.azimuth_deg,
    )
}

fn cell_at(lat: f64, lng: f64, resolution: Resolution) -> CellIndex {
    LatLng::new(lat, lng)
        .expect("valid demo coordinates")
        .to_cell(resolution)
}

fn view_over(cell: CellIndex, rotation: &FrameRotation) -> MercatorView {
    let centroid = rotated_centroid(cell, rotation);
    MercatorView {
        longitude: centroid.x,
        latitude: centroid.y,
    }
}

/// Rotate a few well-known points into the display frame and back.
fn demonstrate_rotation_frame(config: &Config) {
    let rotation = display_frame(config);

    let cities = [
        ("San Francisco", 37.7749, -122.4194),
        ("London", 51.5074, -0.1278),
        ("Sydney", -33.8688, 151.2093),
    ];

    let mut max_error: f64 = 0.0;
    for (name, lat, lng) in cities {
        let (display_lat, display_lng) = rotation.rotate(lat, lng);
        let (back_lat, back_lng) = rotation.unrotate(display_lat, display_lng);
        max_error = max_error
            .max((back_lat - lat).abs())
            .max((back_lng - lng).abs());
        info!("{name}: grid ({lat:.4}, {lng:.4}) -> display ({display_lat:.4}, {display_lng:.4})");
    }
    info!("Round-trip error across cities: {max_error:.2e} degrees");
}

/// Build one cell's polygon at full and reduced coverage.
fn demonstrate_polygon_building(config: &Config) {
    let rotation = display_frame(config);
    let cell = cell_at(37.7749, -122.4194, Resolution::Nine);

    let full = cell_to_polygon(cell, 1.0, &rotation);
    let shrunk = cell_to_polygon(cell, 0.6, &rotation);
    info!("Cell {cell}: {} vertices in the closed ring", full.len());

    let centroid = rotated_centroid(cell, &rotation);
    let full_radius = (full[0] - centroid).length();
    let shrunk_radius = (shrunk[0] - centroid).length();
    info!(
        "Coverage 0.6 pulled the first vertex from {full_radius:.6} to {shrunk_radius:.6} degrees"
    );
}

/// Show the adaptive mode decision on a fine disk and a coarse cell.
fn demonstrate_precision_selection(config: &Config) {
    let props = HexagonLayerProps::from_config(config);
    let rotation = display_frame(config);

    let fine_center = cell_at(40.7128, -74.0060, Resolution::Nine);
    let fine: Vec<CellIndex> = fine_center.grid_disk(3);
    let coarse = vec![cell_at(40.7128, -74.0060, Resolution::Four)];

    for (label, cells) in [("Fine res-9 disk", &fine), ("Coarse res-4 cell", &coarse)] {
        let mut layer = HexagonLayer::new(HexagonLayerProps {
            precision: Precision::Auto,
            ..props.clone()
        });
        let view = view_over(cells[0], &rotation);
        let plan = layer.update(cells, &view, ChangeFlags::initial());
        match plan {
            RenderPlan::Columns(ref columns) => info!(
                "{label}: instanced path, {} centroids sharing {} vertices",
                columns.centroids.len(),
                columns.vertices.len()
            ),
            RenderPlan::Polygons(ref polygons) => {
                info!("{label}: exact path, {} rings", polygons.polygons.len());
            }
        }
    }
}

/// Pan the view and watch the shared shape survive small drifts.
fn demonstrate_shared_shape_drift(config: &Config) {
    let props = HexagonLayerProps {
        precision: Precision::Low,
        ..HexagonLayerProps::from_config(config)
    };
    let rotation = display_frame(config);
    let mut layer = HexagonLayer::new(props);

    let origin = cell_at(48.8566, 2.3522, Resolution::Eight);
    let cells = vec![origin];

    let stops = [
        ("Start", 48.8566),
        ("Short pan (5.5 km)", 48.9066),
        ("Long pan (22 km)", 49.0566),
    ];
    let mut previous = None;
    for (label, lat) in stops {
        let under_view = cell_at(lat, 2.3522, Resolution::Eight);
        let flags = if previous.is_none() {
            ChangeFlags::initial()
        } else {
            ChangeFlags::default()
        };
        layer.update(&cells, &view_over(under_view, &rotation), flags);

        let center = layer.shared_geometry().expect("shape exists").center_cell;
        match previous {
            None => info!("{label}: shared shape built around {center}"),
            Some(kept) if kept == center => {
                info!("{label}: shared shape kept its reference cell {center}");
            }
            Some(_) => info!("{label}: shared shape rebuilt around {center}"),
        }
        previous = Some(center);
    }
}

/// Map pointer positions back to cells, inside and outside the data.
fn demonstrate_picking(config: &Config) {
    let props = HexagonLayerProps {
        precision: Precision::Auto,
        ..HexagonLayerProps::from_config(config)
    };
    let rotation = display_frame(config);

    let center = cell_at(35.6762, 139.6503, Resolution::Nine);
    let cells: Vec<CellIndex> = center.grid_disk(1);
    let mut layer = HexagonLayer::new(props);
    let centroid = rotated_centroid(center, &rotation);
    let view = MercatorView {
        longitude: centroid.x,
        latitude: centroid.y,
    };
    layer.update(&cells, &view, ChangeFlags::initial());

    let hit = layer.pick(centroid.y, centroid.x);
    match (hit.cell, hit.index) {
        (Some(cell), Some(index)) => info!("Pick at view center hit {cell} (data index {index})"),
        (Some(cell), None) => info!("Pick at view center landed on {cell}, which holds no data"),
        _ => info!("Pick at the view center found no cell"),
    }

    let miss = layer.pick(centroid.y + 1.0, centroid.x);
    match (miss.cell, miss.index) {
        (Some(cell), None) => info!("Pick a degree north landed on {cell}, which holds no data"),
        (Some(cell), Some(index)) => info!("Pick a degree north hit {cell} (data index {index})"),
        _ => info!("Pick a degree north found no cell"),
    }
}
