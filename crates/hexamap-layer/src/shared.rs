//! The shared instanced shape: one hexagon outline reused for every cell.

use glam::DVec2;
use h3o::CellIndex;
use hexamap_geometry::{cell_containing, cell_to_polygon, rotated_centroid};
use hexamap_rotation::FrameRotation;

use crate::precision::PrecisionState;
use crate::view::Viewport;

/// Drift budget: the shared shape is rebuilt once the reference cell is this
/// far (in km) from the cell under the view center.
pub const UPDATE_THRESHOLD_KM: f64 = 10.0;

/// The cached shared shape: a reference cell and its outline in local render
/// space.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedGeometry {
    /// Cell whose outline every instance reuses.
    pub center_cell: CellIndex,
    /// Closed outline, per-vertex meter offsets from the cell centroid.
    pub vertices: Vec<DVec2>,
}

/// Whether a cached shape is still close enough to keep.
///
/// `distance` is the grid distance from the cached reference to the new
/// candidate. `None` means the grid could not compute it (cells too far
/// apart, or separated by a pentagon), which never counts as close: a stale
/// shape at unknown distance must be rebuilt.
#[must_use]
pub fn drift_below_threshold(distance: Option<i32>, edge_length_km: f64) -> bool {
    match distance {
        Some(d) if d >= 0 => f64::from(d) * edge_length_km < UPDATE_THRESHOLD_KM,
        _ => false,
    }
}

/// Refresh the shared shape for the current view, if it needs it.
///
/// The candidate reference is the pinned override, else the cell under the
/// view center at the data's resolution. The existing shape is kept while the
/// candidate is unchanged or within the drift budget; anything else rebuilds
/// the outline. Returns `None` when the existing shape should be kept, and
/// does nothing before the data's resolution is known.
pub fn refresh(
    existing: Option<&SharedGeometry>,
    center_override: Option<CellIndex>,
    state: &PrecisionState,
    view: &dyn Viewport,
    rotation: &FrameRotation,
) -> Option<SharedGeometry> {
    let resolution = state.resolution?;
    let candidate = center_override
        .or_else(|| cell_containing(view.latitude(), view.longitude(), resolution, rotation))?;

    if let Some(existing) = existing {
        if existing.center_cell == candidate {
            return None;
        }
        let distance = existing.center_cell.grid_distance(candidate).ok();
        if drift_below_threshold(distance, state.edge_length_km) {
            return None;
        }
    }

    Some(build(candidate, view, rotation))
}

/// Build the outline of `cell` in local render space: project each boundary
/// vertex, subtract the projected centroid, and divide out the world units
/// per meter.
fn build(cell: CellIndex, view: &dyn Viewport, rotation: &FrameRotation) -> SharedGeometry {
    let centroid = rotated_centroid(cell, rotation);
    let center_world = view.project_flat(centroid.x, centroid.y);
    let units_per_meter = view.units_per_meter();

    let vertices = cell_to_polygon(cell, 1.0, rotation)
        .into_iter()
        .map(|vertex| (view.project_flat(vertex.x, vertex.y) - center_world) / units_per_meter)
        .collect();

    SharedGeometry {
        center_cell: cell,
        vertices,
    }
}
