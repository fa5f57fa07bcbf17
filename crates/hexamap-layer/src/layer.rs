//! The adaptive layer controller.
//!
//! Each pass the controller scans changed data, picks a render mode, keeps
//! the shared shape current, and emits a [`RenderPlan`] for whichever
//! sub-renderer the decision selected.

use h3o::CellIndex;
use hexamap_geometry::{cell_containing, cell_to_polygon_flat, rotated_centroid};
use hexamap_rotation::FrameRotation;
use tracing::debug;

use crate::plan::{ColumnPlan, ForwardedProps, PolygonPlan, RenderPlan, WindingOrder};
use crate::precision::{Precision, PrecisionState, RenderMode, select_mode};
use crate::props::{HexagonLayerProps, merged_polygon_trigger};
use crate::shared::{SharedGeometry, refresh};
use crate::view::Viewport;

/// What changed since the previous pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    /// The cell list was replaced.
    pub data_changed: bool,
    /// The cell accessor revision was bumped.
    pub get_hexagon_changed: bool,
}

impl ChangeFlags {
    /// Flags for the first pass over a fresh layer.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            data_changed: true,
            get_hexagon_changed: false,
        }
    }

    fn cells_dirty(self) -> bool {
        self.data_changed || self.get_hexagon_changed
    }
}

/// Result of a pick query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickInfo {
    /// Cell under the pointer, reported whether or not it holds data.
    pub cell: Option<CellIndex>,
    /// Position in the data when the picked cell is present in it.
    pub index: Option<usize>,
}

/// Adaptive hexagonal grid layer.
///
/// Holds the scan result and the shared shape across passes so that neither
/// is recomputed while its inputs are unchanged.
#[derive(Clone, Debug)]
pub struct HexagonLayer {
    props: HexagonLayerProps,
    cells: Vec<CellIndex>,
    state: PrecisionState,
    shared: Option<SharedGeometry>,
    mode: Option<RenderMode>,
}

impl HexagonLayer {
    #[must_use]
    pub fn new(props: HexagonLayerProps) -> Self {
        Self {
            props,
            cells: Vec::new(),
            state: PrecisionState::default(),
            shared: None,
            mode: None,
        }
    }

    /// Run one pass: rescan if the data changed, select the render mode for
    /// the current view, refresh the shared shape on the instanced path, and
    /// emit the plan.
    pub fn update(
        &mut self,
        cells: &[CellIndex],
        view: &dyn Viewport,
        flags: ChangeFlags,
    ) -> RenderPlan {
        let rotation = FrameRotation::new(
            self.props.anchor_lat,
            self.props.anchor_lng,
            self.props.azimuth_deg,
        );

        if flags.cells_dirty() {
            self.cells = cells.to_vec();
            // A forced-exact layer never pays for the scan.
            if self.props.precision != Precision::High {
                self.state = PrecisionState::scan(&self.cells, self.props.precision);
            }
        }

        let mode = select_mode(self.props.precision, &self.state, view.is_geodesic());
        if self.mode != Some(mode) {
            debug!(?mode, cells = self.cells.len(), "render mode selected");
            self.mode = Some(mode);
        }

        match mode {
            RenderMode::Polygon => RenderPlan::Polygons(self.polygon_plan(&rotation)),
            RenderMode::Instanced => {
                if let Some(rebuilt) = refresh(
                    self.shared.as_ref(),
                    self.props.center_hexagon,
                    &self.state,
                    view,
                    &rotation,
                ) {
                    debug!(
                        center = %rebuilt.center_cell,
                        vertices = rebuilt.vertices.len(),
                        "shared shape rebuilt"
                    );
                    self.shared = Some(rebuilt);
                }
                RenderPlan::Columns(self.column_plan(&rotation))
            }
        }
    }

    /// Map a pointer position back to the cell under it.
    ///
    /// The cell is reported once a scan has established the data resolution,
    /// whether or not the cell holds data; `index` is set only when it does.
    #[must_use]
    pub fn pick(&self, lat: f64, lng: f64) -> PickInfo {
        let rotation = FrameRotation::new(
            self.props.anchor_lat,
            self.props.anchor_lng,
            self.props.azimuth_deg,
        );
        let cell = self
            .state
            .resolution
            .and_then(|resolution| cell_containing(lat, lng, resolution, &rotation));
        let index =
            cell.and_then(|cell| self.cells.iter().position(|&candidate| candidate == cell));
        PickInfo { cell, index }
    }

    fn polygon_plan(&self, rotation: &FrameRotation) -> PolygonPlan {
        // The same raw coverage feeds the geometry, the trigger, and the
        // forwarded props; persisted values are clamped at the config bridge.
        let coverage = self.props.coverage;
        let polygons = self
            .cells
            .iter()
            .map(|&cell| cell_to_polygon_flat(cell, coverage, rotation))
            .collect();
        PolygonPlan {
            polygons,
            normalize: false,
            winding_order: WindingOrder::CounterClockwise,
            polygon_trigger: merged_polygon_trigger(
                &self.props.update_triggers,
                self.props.coverage,
            ),
            forwarded: self.forwarded(),
        }
    }

    fn column_plan(&self, rotation: &FrameRotation) -> ColumnPlan {
        let centroids = self
            .cells
            .iter()
            .map(|&cell| rotated_centroid(cell, rotation))
            .collect();
        let vertices = self
            .shared
            .as_ref()
            .map(|shared| shared.vertices.clone())
            .unwrap_or_default();
        ColumnPlan {
            vertices,
            centroids,
            disk_resolution: 6,
            radius: 1.0,
            flat_shading: true,
            position_trigger: self.props.update_triggers.get_hexagon,
            forwarded: self.forwarded(),
        }
    }

    fn forwarded(&self) -> ForwardedProps {
        ForwardedProps {
            style: self.props.style,
            coverage: self.props.coverage,
            transitions: self.props.transitions,
            update_triggers: self.props.update_triggers.forwarded(),
        }
    }

    #[must_use]
    pub fn props(&self) -> &HexagonLayerProps {
        &self.props
    }

    pub fn set_props(&mut self, props: HexagonLayerProps) {
        self.props = props;
    }

    #[must_use]
    pub fn precision_state(&self) -> &PrecisionState {
        &self.state
    }

    #[must_use]
    pub fn shared_geometry(&self) -> Option<&SharedGeometry> {
        self.shared.as_ref()
    }

    #[must_use]
    pub fn mode(&self) -> Option<RenderMode> {
        self.mode
    }
}
