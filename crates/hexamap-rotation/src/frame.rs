//! Forward/inverse rotation pairs anchored to a point and azimuth on the globe.

use glam::{DMat3, DVec3};

use crate::sphere::{geodetic_to_unit, unit_to_geodetic};

/// Latitude of the grid's internal anchor, the center of icosahedron face 5 (degrees).
const FACE_CENTER_LAT: f64 = 9.897578191520505;
/// Longitude of the grid's internal anchor (degrees).
const FACE_CENTER_LNG: f64 = 96.15073392959359;

/// A rotation of the sphere together with its inverse.
///
/// The forward matrix carries grid coordinates into the display frame; the
/// inverse carries display coordinates back into the grid frame. Both are
/// built by [`FrameRotation::new`] in one step, so the pair cannot drift out
/// of sync. The value is immutable: build one per update pass and pass it by
/// reference into every geometry call of that pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRotation {
    forward: DMat3,
    inverse: DMat3,
}

impl FrameRotation {
    /// The identity frame: grid coordinates pass through unchanged.
    pub const IDENTITY: Self = Self {
        forward: DMat3::IDENTITY,
        inverse: DMat3::IDENTITY,
    };

    /// Build the frame that carries the grid's face-5 anchor to
    /// `(anchor_lat, anchor_lng)` and then spins the sphere about that point
    /// by `azimuth_deg`.
    ///
    /// Composed as `spin · yaw · pitch`: a rotation about the z axis by the
    /// longitude offset from the face center, a rotation about the x axis by
    /// the latitude offset, then an axis-angle spin about the anchor point
    /// itself. The inverse is the transpose.
    #[must_use]
    pub fn new(anchor_lat: f64, anchor_lng: f64, azimuth_deg: f64) -> Self {
        let axis = geodetic_to_unit(anchor_lat, anchor_lng);
        let spin = DMat3::from_axis_angle(axis, azimuth_deg.to_radians());
        let yaw = DMat3::from_rotation_z((anchor_lng - FACE_CENTER_LNG).to_radians());
        let pitch = DMat3::from_rotation_x((anchor_lat - FACE_CENTER_LAT).to_radians());

        let forward = spin * yaw * pitch;
        Self {
            forward,
            inverse: forward.transpose(),
        }
    }

    /// Rotate a geodetic point `(lat, lng)` into the display frame.
    #[inline]
    #[must_use]
    pub fn rotate(&self, lat: f64, lng: f64) -> (f64, f64) {
        unit_to_geodetic(self.forward * geodetic_to_unit(lat, lng))
    }

    /// Carry a display-frame point `(lat, lng)` back into grid coordinates.
    #[inline]
    #[must_use]
    pub fn unrotate(&self, lat: f64, lng: f64) -> (f64, f64) {
        unit_to_geodetic(self.inverse * geodetic_to_unit(lat, lng))
    }

    /// The forward rotation matrix.
    #[inline]
    #[must_use]
    pub fn forward(&self) -> DMat3 {
        self.forward
    }

    /// The inverse rotation matrix.
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> DMat3 {
        self.inverse
    }

    /// Rotate a unit vector into the display frame.
    #[inline]
    #[must_use]
    pub fn rotate_unit(&self, v: DVec3) -> DVec3 {
        self.forward * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn sample_points() -> Vec<(f64, f64)> {
        let mut points = Vec::new();
        for lat_step in 1..12 {
            for lng_step in 0..12 {
                points.push((-90.0 + lat_step as f64 * 15.0, -165.0 + lng_step as f64 * 30.0));
            }
        }
        points
    }

    #[test]
    fn test_identity_passes_points_through() {
        for &(lat, lng) in &sample_points() {
            let (out_lat, out_lng) = FrameRotation::IDENTITY.rotate(lat, lng);
            assert!(
                (out_lat - lat).abs() < EPSILON && (out_lng - lng).abs() < EPSILON,
                "identity moved ({lat}, {lng}) to ({out_lat}, {out_lng})"
            );
        }
    }

    /// Rotating and then unrotating must return every point, for assorted frames.
    #[test]
    fn test_rotate_unrotate_roundtrip() {
        let frames = [
            FrameRotation::IDENTITY,
            FrameRotation::new(32.1285602329, 114.0831041336, 30.0),
            FrameRotation::new(-45.0, 170.0, 0.0),
            FrameRotation::new(9.897578191520505, 96.15073392959359, 90.0),
        ];
        for frame in &frames {
            for &(lat, lng) in &sample_points() {
                let (r_lat, r_lng) = frame.rotate(lat, lng);
                let (b_lat, b_lng) = frame.unrotate(r_lat, r_lng);
                assert!(
                    (b_lat - lat).abs() < EPSILON,
                    "latitude did not round-trip for ({lat}, {lng}): got {b_lat}"
                );
                assert!(
                    (b_lng - lng).abs() < EPSILON,
                    "longitude did not round-trip for ({lat}, {lng}): got {b_lng}"
                );
            }
        }
    }

    #[test]
    fn test_forward_inverse_compose_to_identity() {
        let frame = FrameRotation::new(32.1285602329, 114.0831041336, 30.0);
        let product = frame.forward() * frame.inverse();
        assert!(
            product.abs_diff_eq(DMat3::IDENTITY, EPSILON),
            "forward * inverse is not the identity: {product:?}"
        );
    }

    #[test]
    fn test_forward_is_proper_rotation() {
        let frame = FrameRotation::new(-10.0, 45.0, 60.0);
        let det = frame.forward().determinant();
        assert!((det - 1.0).abs() < EPSILON, "determinant should be 1, got {det}");
    }

    /// The azimuth spin happens about the anchor, so the grid point that lands
    /// on the anchor is the same for every azimuth.
    #[test]
    fn test_azimuth_spins_about_anchor() {
        let anchor = (32.1285602329, 114.0831041336);
        let base = FrameRotation::new(anchor.0, anchor.1, 0.0);
        let (pre_lat, pre_lng) = base.unrotate(anchor.0, anchor.1);

        for azimuth in [15.0, 30.0, 120.0, -45.0] {
            let spun = FrameRotation::new(anchor.0, anchor.1, azimuth);
            let (lat, lng) = spun.rotate(pre_lat, pre_lng);
            assert!(
                (lat - anchor.0).abs() < EPSILON && (lng - anchor.1).abs() < EPSILON,
                "azimuth {azimuth} moved the anchor: ({lat}, {lng})"
            );
        }
    }

    #[test]
    fn test_azimuth_moves_other_points() {
        let plain = FrameRotation::new(30.0, 100.0, 0.0);
        let spun = FrameRotation::new(30.0, 100.0, 30.0);
        let (a_lat, a_lng) = plain.rotate(0.0, 0.0);
        let (b_lat, b_lng) = spun.rotate(0.0, 0.0);
        assert!(
            (a_lat - b_lat).abs() > 1e-3 || (a_lng - b_lng).abs() > 1e-3,
            "a nonzero azimuth should move points away from the anchor"
        );
    }
}
