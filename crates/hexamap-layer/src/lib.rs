//! Adaptive rendering of H3 hexagonal grid cells.
//!
//! Dense fine-resolution cell sets are drawn as instanced copies of one
//! shared shape; coarse, mixed, pentagon-bearing, or geodesic-projected sets
//! fall back to exact per-cell tessellation. The layer scans its data to
//! decide between the two and keeps the shared shape current as the view
//! moves.

mod layer;
mod plan;
mod precision;
mod props;
mod shared;
mod view;

pub use layer::{ChangeFlags, HexagonLayer, PickInfo};
pub use plan::{ColumnPlan, ForwardedProps, PolygonPlan, RenderPlan, WindingOrder};
pub use precision::{Precision, PrecisionState, RenderMode, select_mode};
pub use props::{
    CellStyle, ForwardedTriggers, HexagonLayerProps, Material, PolygonTrigger, Transitions,
    UpdateTriggers, WidthUnits, merged_polygon_trigger,
};
pub use shared::{SharedGeometry, UPDATE_THRESHOLD_KM, drift_below_threshold, refresh};
pub use view::{GlobeView, MercatorView, Viewport};
