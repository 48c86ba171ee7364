//! Configuration options for 2D and 3D plots.

use serde::{Deserialize, Serialize};

use crate::grid::Direction;
use crate::projection::DEFAULT_TOPO_COMP;
use crate::slicer::CellNumber;

/// Which layers to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowFlags {
    /// Input surface points and orientations.
    pub data: bool,
    /// Master switch for every solution layer.
    pub results: bool,
    pub lith: bool,
    pub scalar: bool,
    pub boundaries: bool,
    pub topography: bool,
    pub values: bool,
    pub block: bool,
    pub section_traces: bool,
    /// Triangulated surfaces (3D only).
    pub surfaces: bool,
}

impl Default for ShowFlags {
    fn default() -> Self {
        Self {
            data: true,
            results: true,
            lith: true,
            scalar: false,
            boundaries: true,
            topography: false,
            values: false,
            block: false,
            section_traces: true,
            surfaces: true,
        }
    }
}

impl ShowFlags {
    /// Flags with every solution layer switched off when `results` is false
    /// or there is nothing computed to show.
    #[must_use]
    pub fn resolved(self, can_show_results: bool) -> Self {
        if self.results && can_show_results {
            return self;
        }
        Self {
            results: false,
            lith: false,
            scalar: false,
            boundaries: false,
            values: false,
            block: false,
            surfaces: false,
            ..self
        }
    }
}

/// Resolved per-axis flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataToShow {
    axes: Vec<ShowFlags>,
}

impl DataToShow {
    /// The same flags for each of `n_axis` axes.
    #[must_use]
    pub fn new(flags: ShowFlags, n_axis: usize, can_show_results: bool) -> Self {
        Self {
            axes: vec![flags.resolved(can_show_results); n_axis],
        }
    }

    /// Flags of axis `i`; axes past the end reuse the last entry.
    #[must_use]
    pub fn axis(&self, i: usize) -> ShowFlags {
        self.axes
            .get(i)
            .or_else(|| self.axes.last())
            .copied()
            .unwrap_or_default()
    }

    /// Overrides the flags of one axis.
    pub fn set_axis(&mut self, i: usize, flags: ShowFlags) -> &mut Self {
        if let Some(slot) = self.axes.get_mut(i) {
            *slot = flags;
        }
        self
    }

    #[must_use]
    pub fn n_axis(&self) -> usize {
        self.axes.len()
    }
}

/// Which arrays to attach to the 3D structured grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarDataType {
    #[default]
    Lithology,
    ScalarField,
    Values,
    All,
}

/// How to colour the 3D topography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopographyDataType {
    /// Geological map colours.
    #[default]
    Geomap,
    /// Elevation with the terrain colormap.
    Topography,
    Scalars,
}

/// Options of the 2D topography drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopographyOptions {
    /// Filled elevation contours. `None` lets the section layout decide.
    pub fill_contour: Option<bool>,
    pub contour: bool,
    pub hillshade: bool,
    /// Sun azimuth in degrees.
    pub azdeg: f64,
    /// Sun altitude in degrees.
    pub altdeg: f64,
    pub cmap: String,
    /// Number of topography samples used to select input data on the map.
    pub topo_comp: usize,
}

impl Default for TopographyOptions {
    fn default() -> Self {
        Self {
            fill_contour: None,
            contour: true,
            hillshade: true,
            azdeg: 315.0,
            altdeg: 45.0,
            cmap: "terrain".to_string(),
            topo_comp: DEFAULT_TOPO_COMP,
        }
    }
}

/// Options of a 2D plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot2DOptions {
    /// Named sections to draw; `"topography"` is the map view.
    pub section_names: Vec<String>,
    /// Cells to slice. `None` with no sections falls back to one `mid` cell.
    pub cell_numbers: Option<Vec<CellNumber>>,
    /// One direction per cell, or a single direction for all of them.
    pub directions: Vec<Direction>,
    /// Series index per axis, or a single index for all of them.
    pub series_n: Vec<usize>,
    /// Number of axes; defaults to sections + cells.
    pub n_axis: Option<usize>,
    pub legend: bool,
    /// Vertical exaggeration.
    pub ve: f64,
    /// Distance within which input data is drawn. Defaults to 0.2 × model scale.
    pub projection_distance: Option<f64>,
    pub show: ShowFlags,
    pub topography: TopographyOptions,
    /// User block, sized to the regular grid, drawn over every axis.
    pub regular_grid: Option<Vec<f64>>,
    /// Number of levels of the scalar field contours.
    pub scalar_levels: usize,
    /// Figure size in pixels; derived from the layout when unset.
    pub figure_size: Option<[u32; 2]>,
}

impl Default for Plot2DOptions {
    fn default() -> Self {
        Self {
            section_names: Vec::new(),
            cell_numbers: None,
            directions: vec![Direction::Y],
            series_n: vec![0],
            n_axis: None,
            legend: true,
            ve: 1.0,
            projection_distance: None,
            show: ShowFlags::default(),
            topography: TopographyOptions::default(),
            regular_grid: None,
            scalar_levels: 10,
            figure_size: None,
        }
    }
}

impl Plot2DOptions {
    /// Cell slices to draw after the named sections.
    #[must_use]
    pub fn effective_cells(&self) -> Vec<CellNumber> {
        match &self.cell_numbers {
            Some(cells) => cells.clone(),
            None if self.section_names.is_empty() && !self.directions.is_empty() => {
                vec![CellNumber::Mid]
            }
            None => Vec::new(),
        }
    }

    /// Direction of the `i`-th cell slice.
    #[must_use]
    pub fn direction(&self, i: usize) -> Direction {
        match self.directions.as_slice() {
            [] => Direction::Y,
            [single] => *single,
            many => many.get(i).copied().unwrap_or(many[many.len() - 1]),
        }
    }

    /// Series drawn on axis `i`.
    #[must_use]
    pub fn series(&self, i: usize) -> usize {
        match self.series_n.as_slice() {
            [] => 0,
            [single] => *single,
            many => many.get(i).copied().unwrap_or(0),
        }
    }
}

/// Options of a 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plot3DOptions {
    pub show: ShowFlags,
    /// Array made active on the structured grid; the first one when unset.
    pub active_scalar_field: Option<String>,
    /// Vertical exaggeration applied as z scale.
    pub ve: Option<f64>,
    /// Arrow length as a percentage of the shortest extent side.
    pub arrow_size: f64,
    pub point_size: f64,
    pub opacity: f64,
    pub topography_scalar_type: TopographyDataType,
    pub topography_contours: bool,
}

impl Default for Plot3DOptions {
    fn default() -> Self {
        Self {
            show: ShowFlags::default(),
            active_scalar_field: None,
            ve: None,
            arrow_size: 10.0,
            point_size: 10.0,
            opacity: 0.5,
            topography_scalar_type: TopographyDataType::Geomap,
            topography_contours: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let flags = ShowFlags::default();
        assert!(flags.data && flags.lith && flags.boundaries);
        assert!(!flags.scalar && !flags.values && !flags.block && !flags.topography);

        let opts = Plot2DOptions::default();
        assert_eq!(opts.effective_cells(), vec![CellNumber::Mid]);
        assert_eq!(opts.direction(3), Direction::Y);
        assert_eq!(opts.series(5), 0);
    }

    #[test]
    fn test_results_switch() {
        let flags = ShowFlags {
            results: false,
            scalar: true,
            ..ShowFlags::default()
        }
        .resolved(true);
        assert!(!flags.lith && !flags.scalar && !flags.boundaries);
        assert!(flags.data);

        let uncomputed = ShowFlags::default().resolved(false);
        assert!(!uncomputed.lith);
    }

    #[test]
    fn test_sections_suppress_default_cell() {
        let opts = Plot2DOptions {
            section_names: vec!["topography".to_string()],
            ..Default::default()
        };
        assert!(opts.effective_cells().is_empty());
    }

    #[test]
    fn test_data_to_show_per_axis() {
        let mut show = DataToShow::new(ShowFlags::default(), 2, true);
        show.set_axis(1, ShowFlags {
            lith: false,
            ..ShowFlags::default()
        });
        assert!(show.axis(0).lith);
        assert!(!show.axis(1).lith);
        assert!(!show.axis(9).lith);
        assert_eq!(show.n_axis(), 2);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let opts: Plot2DOptions = serde_json::from_str(
            r#"{"cell_numbers": ["mid", -1], "directions": ["x", "z"], "show": {"scalar": true}}"#,
        )
        .unwrap();
        assert_eq!(
            opts.effective_cells(),
            vec![CellNumber::Mid, CellNumber::Index(-1)]
        );
        assert_eq!(opts.direction(1), Direction::Z);
        assert!(opts.show.scalar && opts.show.lith);
        assert!((opts.ve - 1.0).abs() < f64::EPSILON);

        let topo: TopographyOptions = serde_json::from_str(r#"{"hillshade": false}"#).unwrap();
        assert_eq!(topo.topo_comp, DEFAULT_TOPO_COMP);
        assert_eq!(topo.cmap, "terrain");
    }
}
