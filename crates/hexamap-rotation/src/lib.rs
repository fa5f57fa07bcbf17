//! Spherical rotation frames: re-anchor a hexagonal grid anywhere on the globe.

mod frame;
mod sphere;

pub use frame::FrameRotation;
pub use sphere::{geodetic_to_unit, unit_to_geodetic};
