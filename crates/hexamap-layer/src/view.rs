//! View state: the seam between the layer and the hosting projection.

use std::f64::consts::PI;

use glam::DVec2;

/// Equatorial earth radius used by the web mercator projection, meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// World size of one mercator tile at zoom zero.
const TILE_SIZE: f64 = 512.0;

/// What the layer needs to know about the hosting view.
///
/// `project_flat` and `units_per_meter` are only consulted while building the
/// shared instanced shape. Auto mode keeps geodesic views off that path, but
/// a forced-approximate override still reaches it, so every view must answer
/// both.
pub trait Viewport {
    /// Longitude at the view center, degrees.
    fn longitude(&self) -> f64;
    /// Latitude at the view center, degrees.
    fn latitude(&self) -> f64;
    /// Whether the projection is itself grid-aware (globe style).
    fn is_geodesic(&self) -> bool;
    /// Project a geodetic `(lng, lat)` into flat world coordinates.
    fn project_flat(&self, lng: f64, lat: f64) -> DVec2;
    /// World units per meter at the view center, per axis.
    fn units_per_meter(&self) -> DVec2;
}

/// A flat web-mercator view with a 512-unit world at zoom zero.
#[derive(Clone, Copy, Debug)]
pub struct MercatorView {
    /// Longitude at the view center, degrees.
    pub longitude: f64,
    /// Latitude at the view center, degrees.
    pub latitude: f64,
}

impl Viewport for MercatorView {
    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn is_geodesic(&self) -> bool {
        false
    }

    fn project_flat(&self, lng: f64, lat: f64) -> DVec2 {
        let lambda = lng.to_radians();
        let phi = lat.to_radians();
        DVec2::new(
            TILE_SIZE * (lambda + PI) / (2.0 * PI),
            TILE_SIZE * (PI + (PI / 4.0 + phi / 2.0).tan().ln()) / (2.0 * PI),
        )
    }

    fn units_per_meter(&self) -> DVec2 {
        // Mercator stretches both axes by 1 / cos(latitude) at the view center.
        let scale = TILE_SIZE / (2.0 * PI * EARTH_RADIUS_M * self.latitude.to_radians().cos());
        DVec2::splat(scale)
    }
}

/// A globe-style view whose projection understands the sphere directly.
///
/// Selects exact polygon mode in auto precision. A forced-approximate
/// override still builds the shared shape here, through the identity degree
/// projection and a per-meridian degree scale.
#[derive(Clone, Copy, Debug)]
pub struct GlobeView {
    /// Longitude at the view center, degrees.
    pub longitude: f64,
    /// Latitude at the view center, degrees.
    pub latitude: f64,
}

impl Viewport for GlobeView {
    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn is_geodesic(&self) -> bool {
        true
    }

    fn project_flat(&self, lng: f64, lat: f64) -> DVec2 {
        DVec2::new(lng, lat)
    }

    fn units_per_meter(&self) -> DVec2 {
        // Degrees per meter along a meridian.
        DVec2::splat(360.0 / (2.0 * PI * EARTH_RADIUS_M))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_mercator_origin_is_world_center() {
        let view = MercatorView {
            longitude: 0.0,
            latitude: 0.0,
        };
        let origin = view.project_flat(0.0, 0.0);
        assert!((origin - DVec2::new(256.0, 256.0)).length() < EPSILON, "got {origin:?}");
    }

    #[test]
    fn test_mercator_axes_increase_east_and_north() {
        let view = MercatorView {
            longitude: 0.0,
            latitude: 0.0,
        };
        let origin = view.project_flat(0.0, 0.0);
        let east = view.project_flat(10.0, 0.0);
        let north = view.project_flat(0.0, 10.0);
        assert!(east.x > origin.x, "x should grow eastward");
        assert!((east.y - origin.y).abs() < EPSILON);
        assert!(north.y > origin.y, "y should grow northward");
    }

    #[test]
    fn test_mercator_units_per_meter_at_equator() {
        let view = MercatorView {
            longitude: 0.0,
            latitude: 0.0,
        };
        let upm = view.units_per_meter();
        // 512 world units span one earth circumference at the equator.
        let expected = 512.0 / (2.0 * PI * EARTH_RADIUS_M);
        assert!((upm.x - expected).abs() < 1e-15);
        assert_eq!(upm.x, upm.y);
    }

    #[test]
    fn test_mercator_units_per_meter_grow_with_latitude() {
        let equator = MercatorView {
            longitude: 0.0,
            latitude: 0.0,
        };
        let north = MercatorView {
            longitude: 0.0,
            latitude: 60.0,
        };
        let ratio = north.units_per_meter().x / equator.units_per_meter().x;
        // cos(60 deg) = 0.5, so a meter covers twice the world units.
        assert!((ratio - 2.0).abs() < EPSILON, "ratio was {ratio}");
    }

    #[test]
    fn test_globe_view_is_geodesic_identity() {
        let view = GlobeView {
            longitude: 12.0,
            latitude: -34.0,
        };
        assert!(view.is_geodesic());
        assert_eq!(view.project_flat(12.0, -34.0), DVec2::new(12.0, -34.0));
    }
}
