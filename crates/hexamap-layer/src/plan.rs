//! Render plans: the per-pass output handed to whichever sub-renderer the
//! precision decision selected.

use glam::DVec2;

use crate::props::{CellStyle, ForwardedTriggers, PolygonTrigger, Transitions};

/// Polygon ring orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

/// Styling and trigger state forwarded unchanged alongside either plan.
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardedProps {
    pub style: CellStyle,
    pub coverage: f64,
    pub transitions: Transitions,
    pub update_triggers: ForwardedTriggers,
}

/// Exact path: one tessellated ring per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonPlan {
    /// One closed ring per cell, vertices interleaved `[lng, lat, ...]`.
    pub polygons: Vec<Vec<f64>>,
    /// Rings are already closed and planar; the renderer must not re-close
    /// or re-normalize them.
    pub normalize: bool,
    pub winding_order: WindingOrder,
    /// Geometry identity; a change re-tessellates.
    pub polygon_trigger: PolygonTrigger,
    pub forwarded: ForwardedProps,
}

/// Approximate path: one shared shape stamped at every cell centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnPlan {
    /// Shared outline centered on the origin, world units per meter already
    /// divided out.
    pub vertices: Vec<DVec2>,
    /// One `[lng, lat]` anchor per cell.
    pub centroids: Vec<DVec2>,
    /// Sides of the base disk.
    pub disk_resolution: u32,
    pub radius: f64,
    pub flat_shading: bool,
    /// Anchor identity; a change re-pulls positions.
    pub position_trigger: u64,
    pub forwarded: ForwardedProps,
}

/// What the layer asks the renderer to draw this pass.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderPlan {
    Polygons(PolygonPlan),
    Columns(ColumnPlan),
}

impl RenderPlan {
    /// Number of cells the plan draws.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        match self {
            Self::Polygons(plan) => plan.polygons.len(),
            Self::Columns(plan) => plan.centroids.len(),
        }
    }

    #[must_use]
    pub fn forwarded(&self) -> &ForwardedProps {
        match self {
            Self::Polygons(plan) => &plan.forwarded,
            Self::Columns(plan) => &plan.forwarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forwarded() -> ForwardedProps {
        ForwardedProps {
            style: CellStyle::default(),
            coverage: 1.0,
            transitions: Transitions::default(),
            update_triggers: ForwardedTriggers::default(),
        }
    }

    #[test]
    fn test_instance_count_polygons() {
        let plan = RenderPlan::Polygons(PolygonPlan {
            polygons: vec![vec![0.0; 14], vec![0.0; 14], vec![0.0; 14]],
            normalize: false,
            winding_order: WindingOrder::CounterClockwise,
            polygon_trigger: PolygonTrigger {
                get_hexagon: 0,
                coverage: 1.0,
            },
            forwarded: forwarded(),
        });
        assert_eq!(plan.instance_count(), 3);
    }

    #[test]
    fn test_instance_count_columns() {
        let plan = RenderPlan::Columns(ColumnPlan {
            vertices: vec![DVec2::ZERO; 7],
            centroids: vec![DVec2::ZERO, DVec2::ONE],
            disk_resolution: 6,
            radius: 1.0,
            flat_shading: true,
            position_trigger: 0,
            forwarded: forwarded(),
        });
        assert_eq!(plan.instance_count(), 2);
    }

    #[test]
    fn test_forwarded_is_shared_across_variants() {
        let polygons = RenderPlan::Polygons(PolygonPlan {
            polygons: Vec::new(),
            normalize: false,
            winding_order: WindingOrder::CounterClockwise,
            polygon_trigger: PolygonTrigger {
                get_hexagon: 0,
                coverage: 1.0,
            },
            forwarded: forwarded(),
        });
        let columns = RenderPlan::Columns(ColumnPlan {
            vertices: Vec::new(),
            centroids: Vec::new(),
            disk_resolution: 6,
            radius: 1.0,
            flat_shading: true,
            position_trigger: 0,
            forwarded: forwarded(),
        });
        assert_eq!(polygons.forwarded(), columns.forwarded());
    }
}
