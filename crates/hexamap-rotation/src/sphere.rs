//! Geodetic degrees to unit-sphere vectors and back.

use glam::DVec3;

/// Convert geodetic degrees to a unit vector on the sphere.
///
/// Longitude sweeps the equatorial plane from +X toward +Y; latitude rises
/// toward +Z. Returns a unit-length `DVec3`.
#[inline]
#[must_use]
pub fn geodetic_to_unit(lat_deg: f64, lng_deg: f64) -> DVec3 {
    let lat = lat_deg.to_radians();
    let lng = lng_deg.to_radians();
    let r = lat.cos();
    DVec3::new(lng.cos() * r, lng.sin() * r, lat.sin())
}

/// Convert a unit vector back to geodetic degrees `(lat, lng)`.
///
/// The input must be unit length. `z` is clamped into `[-1, 1]` before the
/// arcsine so rounding accumulated through rotation chains cannot leave the
/// domain; longitude comes out in `(-180, 180]`.
#[inline]
#[must_use]
pub fn unit_to_geodetic(v: DVec3) -> (f64, f64) {
    debug_assert!(
        (v.length_squared() - 1.0).abs() < 1e-9,
        "expected a unit vector, got length {}",
        v.length()
    );
    let lat = v.z.clamp(-1.0, 1.0).asin();
    let lng = v.y.atan2(v.x);
    (lat.to_degrees(), lng.to_degrees())
}
