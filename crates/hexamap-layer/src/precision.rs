//! Data scanning and render mode selection.

use h3o::{CellIndex, Resolution};

/// Cells at or below this resolution are too large for the shared-shape
/// approximation: one geometry stretched across continent-sized cells
/// distorts visibly.
const COARSE_RESOLUTION_MAX: Resolution = Resolution::Five;

/// Explicit precision override for the layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Precision {
    /// Decide per update pass from the data and the active view.
    #[default]
    Auto,
    /// Always render exact per-cell polygons.
    High,
    /// Always render the shared instanced shape.
    Low,
}

/// How the layer renders the current data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Exact polygons, one tessellated per cell.
    Polygon,
    /// One shared shape translated to each cell's centroid.
    Instanced,
}

/// What a scan of the cell list learned about the data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PrecisionState {
    /// Resolution of the first cell; `None` until data arrives.
    pub resolution: Option<Resolution>,
    /// Average edge length at that resolution, km; 0 while unresolved.
    pub edge_length_km: f64,
    /// The list mixes resolutions.
    pub has_multiple_res: bool,
    /// The list contains a pentagon.
    pub has_pentagon: bool,
}

impl PrecisionState {
    /// Scan the cell list, stopping as soon as the outcome is decided.
    ///
    /// The reported resolution and edge length always come from the first
    /// cell. With precision forced low only that resolution matters (the
    /// shared shape needs it), so the scan stops right there, before even the
    /// first pentagon check. Otherwise scanning continues until a second
    /// resolution or a pentagon turns up, either of which ends it early.
    #[must_use]
    pub fn scan(cells: &[CellIndex], precision: Precision) -> Self {
        let mut state = Self::default();
        for &cell in cells {
            let resolution = cell.resolution();
            match state.resolution {
                None => {
                    state.resolution = Some(resolution);
                    state.edge_length_km = resolution.edge_length_km();
                    if precision == Precision::Low {
                        break;
                    }
                }
                Some(first) if first != resolution => {
                    state.has_multiple_res = true;
                    break;
                }
                Some(_) => {}
            }
            if cell.is_pentagon() {
                state.has_pentagon = true;
                break;
            }
        }
        state
    }
}

/// Pick the render mode for this pass.
///
/// Forced overrides win outright. In auto mode, exact polygons are chosen
/// whenever the shared approximation would be wrong: the view is geodesic,
/// the data mixes resolutions or contains a pentagon, or the cells are
/// coarse enough that a single stretched shape would distort.
#[must_use]
pub fn select_mode(
    precision: Precision,
    state: &PrecisionState,
    view_is_geodesic: bool,
) -> RenderMode {
    match precision {
        Precision::High => RenderMode::Polygon,
        Precision::Low => RenderMode::Instanced,
        Precision::Auto => {
            let coarse = state
                .resolution
                .is_some_and(|res| res <= COARSE_RESOLUTION_MAX);
            if view_is_geodesic || state.has_multiple_res || state.has_pentagon || coarse {
                RenderMode::Polygon
            } else {
                RenderMode::Instanced
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h3o::LatLng;

    fn cell_at(lat: f64, lng: f64, resolution: Resolution) -> CellIndex {
        LatLng::new(lat, lng)
            .expect("valid test coordinates")
            .to_cell(resolution)
    }

    /// Base cell 4 is a pentagon; its center child is a pentagon at any
    /// resolution.
    fn pentagon_at(resolution: Resolution) -> CellIndex {
        CellIndex::try_from(0x8009fffffffffff)
            .expect("valid base cell index")
            .center_child(resolution)
            .expect("center child exists")
    }

    #[test]
    fn test_scan_empty_data() {
        let state = PrecisionState::scan(&[], Precision::Auto);
        assert_eq!(state.resolution, None);
        assert_eq!(state.edge_length_km, 0.0);
        assert!(!state.has_multiple_res);
        assert!(!state.has_pentagon);
    }

    #[test]
    fn test_scan_uniform_hexagons() {
        let cells = [
            cell_at(40.0, -75.0, Resolution::Nine),
            cell_at(40.01, -75.0, Resolution::Nine),
            cell_at(40.02, -75.0, Resolution::Nine),
        ];
        let state = PrecisionState::scan(&cells, Precision::Auto);
        assert_eq!(state.resolution, Some(Resolution::Nine));
        assert_eq!(
            state.edge_length_km,
            Resolution::Nine.edge_length_km(),
            "scan must report the grid's own edge length"
        );
        assert!(
            state.edge_length_km > 0.19 && state.edge_length_km < 0.21,
            "unexpected res-9 edge length {}",
            state.edge_length_km
        );
        assert!(!state.has_multiple_res);
        assert!(!state.has_pentagon);
    }

    /// A second resolution stops the scan; the reported resolution stays the
    /// first cell's.
    #[test]
    fn test_scan_detects_multiple_resolutions() {
        let cells = [
            cell_at(40.0, -75.0, Resolution::Nine),
            cell_at(40.0, -75.0, Resolution::Eight),
        ];
        let state = PrecisionState::scan(&cells, Precision::Auto);
        assert!(state.has_multiple_res);
        assert_eq!(state.resolution, Some(Resolution::Nine));
    }

    #[test]
    fn test_scan_detects_pentagon() {
        let cells = [cell_at(40.0, -75.0, Resolution::Nine), pentagon_at(Resolution::Nine)];
        let state = PrecisionState::scan(&cells, Precision::Auto);
        assert!(state.has_pentagon);
    }

    #[test]
    fn test_scan_checks_first_cell_for_pentagon() {
        let state = PrecisionState::scan(&[pentagon_at(Resolution::Seven)], Precision::Auto);
        assert!(state.has_pentagon);
    }

    /// Forced-low scanning stops after reading the first cell's resolution,
    /// before any pentagon or mixed-resolution detection.
    #[test]
    fn test_scan_forced_low_stops_after_first_cell() {
        let cells = [
            cell_at(40.0, -75.0, Resolution::Nine),
            pentagon_at(Resolution::Nine),
            cell_at(40.0, -75.0, Resolution::Eight),
        ];
        let state = PrecisionState::scan(&cells, Precision::Low);
        assert_eq!(state.resolution, Some(Resolution::Nine));
        assert!(!state.has_pentagon, "forced low must not keep scanning");
        assert!(!state.has_multiple_res);
    }

    #[test]
    fn test_forced_modes_win() {
        let pentagon_state =
            PrecisionState::scan(&[pentagon_at(Resolution::Nine)], Precision::Auto);
        assert_eq!(
            select_mode(Precision::Low, &pentagon_state, false),
            RenderMode::Instanced
        );

        let fine_state =
            PrecisionState::scan(&[cell_at(40.0, -75.0, Resolution::Nine)], Precision::Auto);
        assert_eq!(
            select_mode(Precision::High, &fine_state, false),
            RenderMode::Polygon
        );
    }

    #[test]
    fn test_auto_prefers_instanced_for_fine_uniform_data() {
        let state =
            PrecisionState::scan(&[cell_at(40.0, -75.0, Resolution::Nine)], Precision::Auto);
        assert_eq!(select_mode(Precision::Auto, &state, false), RenderMode::Instanced);
    }

    #[test]
    fn test_auto_exact_for_pentagon_or_mixed_resolutions() {
        let pentagon = PrecisionState::scan(
            &[cell_at(40.0, -75.0, Resolution::Nine), pentagon_at(Resolution::Nine)],
            Precision::Auto,
        );
        assert_eq!(select_mode(Precision::Auto, &pentagon, false), RenderMode::Polygon);

        let mixed = PrecisionState::scan(
            &[
                cell_at(40.0, -75.0, Resolution::Nine),
                cell_at(40.0, -75.0, Resolution::Eight),
            ],
            Precision::Auto,
        );
        assert_eq!(select_mode(Precision::Auto, &mixed, false), RenderMode::Polygon);
    }

    #[test]
    fn test_auto_exact_on_geodesic_view() {
        let state =
            PrecisionState::scan(&[cell_at(40.0, -75.0, Resolution::Nine)], Precision::Auto);
        assert_eq!(select_mode(Precision::Auto, &state, true), RenderMode::Polygon);
    }

    /// Resolution 5 is the last coarse resolution; 6 is fine enough for the
    /// shared shape.
    #[test]
    fn test_auto_coarse_resolution_boundary() {
        let coarse =
            PrecisionState::scan(&[cell_at(40.0, -75.0, Resolution::Five)], Precision::Auto);
        assert_eq!(select_mode(Precision::Auto, &coarse, false), RenderMode::Polygon);

        let fine = PrecisionState::scan(&[cell_at(40.0, -75.0, Resolution::Six)], Precision::Auto);
        assert_eq!(select_mode(Precision::Auto, &fine, false), RenderMode::Instanced);
    }

    #[test]
    fn test_auto_empty_data_uses_instanced() {
        assert_eq!(
            select_mode(Precision::Auto, &PrecisionState::default(), false),
            RenderMode::Instanced
        );
    }
}
