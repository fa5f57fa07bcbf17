//! Pure ring math on `(lng, lat)` vertex lists.

use glam::DVec2;

/// Shift ring longitudes by whole turns until every vertex is within 180
/// degrees of the reference.
///
/// With a `ref_lng` of `None` the first vertex's longitude is the reference.
/// A ring that straddles the antimeridian comes out as one continuous range
/// instead of jumping between +180 and -180. Operates in place; an empty
/// ring is a no-op.
pub fn normalize_longitudes(ring: &mut [DVec2], ref_lng: Option<f64>) {
    let Some(first) = ring.first() else { return };
    let ref_lng = ref_lng.unwrap_or(first.x);
    for vertex in ring.iter_mut() {
        let delta = vertex.x - ref_lng;
        if delta > 180.0 {
            vertex.x -= 360.0;
        } else if delta < -180.0 {
            vertex.x += 360.0;
        }
    }
}

/// Pull every ring vertex toward `center` by `factor`.
///
/// Longitudes are normalized against the center first so the interpolation
/// never reaches across the antimeridian. A factor of 1 leaves the shape in
/// place, 0 collapses it onto the center. When the ring is closed (last
/// vertex equal to the first) the duplicate is skipped by the loop and
/// recopied from the scaled first vertex, keeping the ring closed exactly.
pub fn scale_ring_toward(center: DVec2, ring: &mut [DVec2], factor: f64) {
    normalize_longitudes(ring, Some(center.x));

    let len = ring.len();
    let closed = len > 1 && ring[0] == ring[len - 1];
    let scale_count = if closed { len - 1 } else { len };
    for vertex in &mut ring[..scale_count] {
        *vertex = center.lerp(*vertex, factor);
    }
    if closed {
        ring[len - 1] = ring[0];
    }
}

/// Interleave a ring into a flat `x, y, x, y, ...` buffer.
#[must_use]
pub fn flatten_ring(ring: &[DVec2]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(ring.len() * 2);
    for vertex in ring {
        flat.push(vertex.x);
        flat.push(vertex.y);
    }
    flat
}
