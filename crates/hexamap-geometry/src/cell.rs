//! Grid-aware polygon building: rotated boundaries, centroids, and coverage scaling.

use glam::DVec2;
use h3o::{CellIndex, LatLng, Resolution};
use hexamap_rotation::FrameRotation;

use crate::ring::{flatten_ring, normalize_longitudes, scale_ring_toward};

/// The rotated boundary of a cell as a closed `(lng, lat)` ring.
///
/// The grid reports boundaries open; a copy of the first vertex is appended
/// so every ring downstream can be treated as closed.
#[must_use]
pub fn rotated_boundary(cell: CellIndex, rotation: &FrameRotation) -> Vec<DVec2> {
    let boundary = cell.boundary();
    let mut ring = Vec::with_capacity(boundary.len() + 1);
    for vertex in boundary.iter() {
        let (lat, lng) = rotation.rotate(vertex.lat(), vertex.lng());
        ring.push(DVec2::new(lng, lat));
    }
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    ring
}

/// The rotated centroid of a cell as `(lng, lat)`.
#[must_use]
pub fn rotated_centroid(cell: CellIndex, rotation: &FrameRotation) -> DVec2 {
    let center = LatLng::from(cell);
    let (lat, lng) = rotation.rotate(center.lat(), center.lng());
    DVec2::new(lng, lat)
}

/// The cell containing a display-frame point, at the given resolution.
///
/// The point is carried back into the grid frame before the lookup. `None`
/// only when the coordinates are not finite.
#[must_use]
pub fn cell_containing(
    lat: f64,
    lng: f64,
    resolution: Resolution,
    rotation: &FrameRotation,
) -> Option<CellIndex> {
    // Checked before the rotation, which requires unit-sphere input.
    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    let (grid_lat, grid_lng) = rotation.unrotate(lat, lng);
    let point = LatLng::new(grid_lat, grid_lng).ok()?;
    Some(point.to_cell(resolution))
}

/// Scale a cell's ring toward the cell's rotated centroid.
pub fn scale_polygon(cell: CellIndex, ring: &mut [DVec2], factor: f64, rotation: &FrameRotation) {
    let center = rotated_centroid(cell, rotation);
    scale_ring_toward(center, ring, factor);
}

/// Build a cell's display-frame polygon as a closed `(lng, lat)` ring.
///
/// At full coverage the ring is normalized against its first vertex; any
/// other coverage scales the ring toward the rotated centroid, which
/// normalizes against the centroid instead.
#[must_use]
pub fn cell_to_polygon(cell: CellIndex, coverage: f64, rotation: &FrameRotation) -> Vec<DVec2> {
    let mut ring = rotated_boundary(cell, rotation);
    if coverage != 1.0 {
        scale_polygon(cell, &mut ring, coverage, rotation);
    } else {
        normalize_longitudes(&mut ring, None);
    }
    ring
}

/// [`cell_to_polygon`] flattened into an interleaved `x, y` buffer.
#[must_use]
pub fn cell_to_polygon_flat(cell: CellIndex, coverage: f64, rotation: &FrameRotation) -> Vec<f64> {
    flatten_ring(&cell_to_polygon(cell, coverage, rotation))
}
