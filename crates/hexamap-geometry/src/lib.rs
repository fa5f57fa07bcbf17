//! Hexagonal cell polygon construction in a rotated display frame.

mod cell;
mod ring;

pub use cell::{
    cell_containing, cell_to_polygon, cell_to_polygon_flat, rotated_boundary, rotated_centroid,
    scale_polygon,
};
pub use ring::{flatten_ring, normalize_longitudes, scale_ring_toward};
