//! Grid metadata: the regular voxel grid, named section traces and the
//! topography raster.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// A cartesian direction used to pick an axis-aligned slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    X,
    Y,
    Z,
}

impl Direction {
    /// All directions in axis order.
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    /// Index of the axis (0 for x, 1 for y, 2 for z).
    #[must_use]
    pub fn axis(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /// The two axes spanning a plane perpendicular to this direction, in
    /// ascending order.
    #[must_use]
    pub fn free_axes(self) -> (usize, usize) {
        match self {
            Direction::X => (1, 2),
            Direction::Y => (0, 2),
            Direction::Z => (0, 1),
        }
    }

    /// Coordinate label (`"X"`, `"Y"`, `"Z"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        axis_label(self.axis())
    }
}

/// Coordinate label of an axis index.
#[must_use]
pub fn axis_label(axis: usize) -> &'static str {
    match axis {
        0 => "X",
        1 => "Y",
        _ => "Z",
    }
}

/// Gradient component label of an axis index.
#[must_use]
pub fn gradient_label(axis: usize) -> &'static str {
    match axis {
        0 => "G_x",
        1 => "G_y",
        _ => "G_z",
    }
}

impl FromStr for Direction {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "X" => Ok(Direction::X),
            "y" | "Y" => Ok(Direction::Y),
            "z" | "Z" => Ok(Direction::Z),
            other => Err(ViewerError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::X => "x",
            Direction::Y => "y",
            Direction::Z => "z",
        };
        f.write_str(s)
    }
}

/// An axis-aligned 3D voxel grid with uniform spacing per axis.
///
/// Cell values are stored x-slowest, z-fastest: the value of cell
/// `(i, j, k)` lives at `(i * ny + j) * nz + k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegularGridRepr")]
pub struct RegularGrid {
    resolution: [usize; 3],
    extent: [f64; 6],
    /// Cells above the topography (true = masked).
    #[serde(default)]
    mask_topo: Vec<bool>,
}

/// Serialized form of a [`RegularGrid`], checked on the way in.
#[derive(Deserialize)]
struct RegularGridRepr {
    resolution: [usize; 3],
    extent: [f64; 6],
    #[serde(default)]
    mask_topo: Vec<bool>,
}

impl TryFrom<RegularGridRepr> for RegularGrid {
    type Error = ViewerError;

    fn try_from(repr: RegularGridRepr) -> Result<Self> {
        let grid = RegularGrid::new(repr.extent, repr.resolution)?;
        if repr.mask_topo.is_empty() {
            Ok(grid)
        } else {
            grid.with_topography_mask(repr.mask_topo)
        }
    }
}

impl RegularGrid {
    /// Creates a regular grid.
    ///
    /// `extent` is `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    pub fn new(extent: [f64; 6], resolution: [usize; 3]) -> Result<Self> {
        if resolution.iter().any(|&r| r == 0) {
            return Err(ViewerError::InvalidGrid(format!(
                "resolution {resolution:?} has an empty axis"
            )));
        }
        for axis in 0..3 {
            if extent[2 * axis + 1] <= extent[2 * axis] {
                return Err(ViewerError::InvalidGrid(format!(
                    "extent along {} is empty: {:?}",
                    axis_label(axis),
                    &extent[2 * axis..2 * axis + 2]
                )));
            }
        }
        Ok(Self {
            resolution,
            extent,
            mask_topo: Vec::new(),
        })
    }

    /// Attaches a topography mask (one flag per cell, true above the surface).
    pub fn with_topography_mask(mut self, mask: Vec<bool>) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(ViewerError::SizeMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        self.mask_topo = mask;
        Ok(self)
    }

    /// Number of cells per axis.
    #[must_use]
    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    /// `[x_min, x_max, y_min, y_max, z_min, z_max]`.
    #[must_use]
    pub fn extent(&self) -> [f64; 6] {
        self.extent
    }

    /// Topography mask, empty when no mask is set.
    #[must_use]
    pub fn mask_topo(&self) -> &[bool] {
        &self.mask_topo
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolution.iter().product()
    }

    /// Returns true if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell size per axis.
    #[must_use]
    pub fn spacing(&self) -> DVec3 {
        DVec3::new(self.dx(), self.dy(), self.dz())
    }

    #[must_use]
    pub fn dx(&self) -> f64 {
        self.axis_spacing(0)
    }

    #[must_use]
    pub fn dy(&self) -> f64 {
        self.axis_spacing(1)
    }

    #[must_use]
    pub fn dz(&self) -> f64 {
        self.axis_spacing(2)
    }

    /// Cell size along an axis index.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn axis_spacing(&self, axis: usize) -> f64 {
        (self.extent[2 * axis + 1] - self.extent[2 * axis]) / self.resolution[axis] as f64
    }

    /// `(min, max)` of the extent along an axis index.
    #[must_use]
    pub fn axis_extent(&self, axis: usize) -> (f64, f64) {
        (self.extent[2 * axis], self.extent[2 * axis + 1])
    }

    /// Shortest side of the extent box.
    #[must_use]
    pub fn min_extent_range(&self) -> f64 {
        (0..3)
            .map(|a| self.extent[2 * a + 1] - self.extent[2 * a])
            .fold(f64::INFINITY, f64::min)
    }

    /// Longest side of the extent box.
    #[must_use]
    pub fn max_extent_range(&self) -> f64 {
        (0..3)
            .map(|a| self.extent[2 * a + 1] - self.extent[2 * a])
            .fold(0.0, f64::max)
    }

    /// Flattens a 3D cell index.
    #[must_use]
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        let [_, ny, nz] = self.resolution;
        (i * ny + j) * nz + k
    }

    /// World position of a cell centre along one axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_coordinate(&self, axis: usize, index: usize) -> f64 {
        self.extent[2 * axis] + self.axis_spacing(axis) * (index as f64 + 0.5)
    }

    /// World position of the centre of cell `(i, j, k)`.
    #[must_use]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        DVec3::new(
            self.cell_coordinate(0, i),
            self.cell_coordinate(1, j),
            self.cell_coordinate(2, k),
        )
    }

    /// All cell centres in storage order.
    #[must_use]
    pub fn values(&self) -> Vec<DVec3> {
        let [nx, ny, nz] = self.resolution;
        let mut out = Vec::with_capacity(self.len());
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    out.push(self.cell_center(i, j, k));
                }
            }
        }
        out
    }
}

/// A user-defined vertical section trace between two map-view points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub start: DVec2,
    pub stop: DVec2,
    /// `[samples along the trace, samples along z]`.
    pub resolution: [usize; 2],
}

impl Section {
    pub fn new(
        name: impl Into<String>,
        start: DVec2,
        stop: DVec2,
        resolution: [usize; 2],
    ) -> Self {
        Self {
            name: name.into(),
            start,
            stop,
            resolution,
        }
    }

    /// Length of the trace.
    #[must_use]
    pub fn dist(&self) -> f64 {
        (self.stop - self.start).length()
    }

    /// Number of solution samples on this section.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.resolution[0] * self.resolution[1]
    }
}

/// Ordered collection of section traces.
///
/// Section solutions are concatenated in insertion order, so the order here
/// decides where each section's values live in the solution arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section, replacing any section with the same name in place.
    pub fn insert(&mut self, section: Section) {
        if let Some(existing) = self.sections.iter_mut().find(|s| s.name == section.name) {
            *existing = section;
        } else {
            self.sections.push(section);
        }
    }

    /// Gets a section by name.
    pub fn get(&self, name: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ViewerError::SectionNotFound(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Section names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns `(l0, l1)`: the range occupied by `name` in the concatenated
    /// section solution arrays.
    pub fn section_args(&self, name: &str) -> Result<(usize, usize)> {
        let mut l0 = 0;
        for section in &self.sections {
            let l1 = l0 + section.num_points();
            if section.name == name {
                return Ok((l0, l1));
            }
            l0 = l1;
        }
        Err(ViewerError::SectionNotFound(name.to_string()))
    }

    /// Total number of samples over all sections.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.sections.iter().map(Section::num_points).sum()
    }
}

impl FromIterator<Section> for Sections {
    fn from_iter<T: IntoIterator<Item = Section>>(iter: T) -> Self {
        let mut sections = Sections::new();
        for section in iter {
            sections.insert(section);
        }
        sections
    }
}

/// A topography raster: elevations on a regular map-view lattice.
///
/// Elevations are stored x-slowest: node `(i, j)` is at `i * ny + j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopographyRepr")]
pub struct Topography {
    /// `[x_min, x_max, y_min, y_max]`.
    extent: [f64; 4],
    resolution: [usize; 2],
    elevation: Vec<f64>,
}

#[derive(Deserialize)]
struct TopographyRepr {
    extent: [f64; 4],
    resolution: [usize; 2],
    elevation: Vec<f64>,
}

impl TryFrom<TopographyRepr> for Topography {
    type Error = ViewerError;

    fn try_from(repr: TopographyRepr) -> Result<Self> {
        Topography::new(repr.extent, repr.resolution, repr.elevation)
    }
}

impl Topography {
    /// Creates a topography raster.
    pub fn new(extent: [f64; 4], resolution: [usize; 2], elevation: Vec<f64>) -> Result<Self> {
        if resolution[0] < 2 || resolution[1] < 2 {
            return Err(ViewerError::InvalidGrid(format!(
                "topography resolution {resolution:?} needs at least 2 nodes per axis"
            )));
        }
        let expected = resolution[0] * resolution[1];
        if elevation.len() != expected {
            return Err(ViewerError::SizeMismatch {
                expected,
                actual: elevation.len(),
            });
        }
        Ok(Self {
            extent,
            resolution,
            elevation,
        })
    }

    /// Builds a raster by evaluating `f(x, y)` at every node.
    pub fn from_fn(
        extent: [f64; 4],
        resolution: [usize; 2],
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self> {
        let mut elevation = Vec::with_capacity(resolution[0] * resolution[1]);
        for i in 0..resolution[0] {
            for j in 0..resolution[1] {
                let x = lattice(extent[0], extent[1], resolution[0], i);
                let y = lattice(extent[2], extent[3], resolution[1], j);
                elevation.push(f(x, y));
            }
        }
        Self::new(extent, resolution, elevation)
    }

    #[must_use]
    pub fn extent(&self) -> [f64; 4] {
        self.extent
    }

    #[must_use]
    pub fn resolution(&self) -> [usize; 2] {
        self.resolution
    }

    /// Raw elevations in storage order.
    #[must_use]
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elevation.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elevation.is_empty()
    }

    /// World position of raster node `(i, j)`.
    #[must_use]
    pub fn point(&self, i: usize, j: usize) -> DVec3 {
        DVec3::new(
            lattice(self.extent[0], self.extent[1], self.resolution[0], i),
            lattice(self.extent[2], self.extent[3], self.resolution[1], j),
            self.elevation[i * self.resolution[1] + j],
        )
    }

    /// All raster nodes in storage order.
    #[must_use]
    pub fn points(&self) -> Vec<DVec3> {
        let [nx, ny] = self.resolution;
        let mut out = Vec::with_capacity(self.len());
        for i in 0..nx {
            for j in 0..ny {
                out.push(self.point(i, j));
            }
        }
        out
    }

    /// Lowest and highest elevation.
    #[must_use]
    pub fn elevation_range(&self) -> (f64, f64) {
        self.elevation
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            })
    }

    /// Extent an image of the raster must be drawn over so that its pixel
    /// centres land on the raster nodes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn node_extent(&self) -> [f64; 4] {
        let [nx, ny] = self.resolution;
        let hx = (self.extent[1] - self.extent[0]) / (nx - 1) as f64 / 2.0;
        let hy = (self.extent[3] - self.extent[2]) / (ny - 1) as f64 / 2.0;
        [
            self.extent[0] - hx,
            self.extent[1] + hx,
            self.extent[2] - hy,
            self.extent[3] + hy,
        ]
    }

    /// Bilinear elevation at a map-view position, clamped to the raster.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, xy: DVec2) -> f64 {
        let [nx, ny] = self.resolution;
        let fx = ((xy.x - self.extent[0]) / (self.extent[1] - self.extent[0]) * (nx - 1) as f64)
            .clamp(0.0, (nx - 1) as f64);
        let fy = ((xy.y - self.extent[2]) / (self.extent[3] - self.extent[2]) * (ny - 1) as f64)
            .clamp(0.0, (ny - 1) as f64);
        let i0 = (fx.floor() as usize).min(nx - 2);
        let j0 = (fy.floor() as usize).min(ny - 2);
        let tx = fx - i0 as f64;
        let ty = fy - j0 as f64;
        let z = |i: usize, j: usize| self.elevation[i * ny + j];
        let bottom = z(i0, j0) * (1.0 - tx) + z(i0 + 1, j0) * tx;
        let top = z(i0, j0 + 1) * (1.0 - tx) + z(i0 + 1, j0 + 1) * tx;
        bottom * (1.0 - ty) + top * ty
    }

    /// Samples `n` evenly spaced points along the map-view segment `p1 -> p2`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn profile(&self, p1: DVec2, p2: DVec2, n: usize) -> Vec<DVec3> {
        let n = n.max(2);
        (0..n)
            .map(|s| {
                let t = s as f64 / (n - 1) as f64;
                let xy = p1.lerp(p2, t);
                DVec3::new(xy.x, xy.y, self.sample(xy))
            })
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn lattice(min: f64, max: f64, n: usize, i: usize) -> f64 {
    if n < 2 {
        return min;
    }
    min + (max - min) * i as f64 / (n - 1) as f64
}

/// All grids attached to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub regular_grid: RegularGrid,
    #[serde(default)]
    pub sections: Sections,
    #[serde(default)]
    pub topography: Option<Topography>,
}

impl Grid {
    #[must_use]
    pub fn new(regular_grid: RegularGrid) -> Self {
        Self {
            regular_grid,
            sections: Sections::new(),
            topography: None,
        }
    }

    /// Replaces the section traces.
    pub fn set_sections(&mut self, sections: impl IntoIterator<Item = Section>) -> &mut Self {
        self.sections = sections.into_iter().collect();
        self
    }

    pub fn set_topography(&mut self, topography: Topography) -> &mut Self {
        self.topography = Some(topography);
        self
    }

    /// Topography or [`ViewerError::TopographyMissing`].
    pub fn topography(&self) -> Result<&Topography> {
        self.topography.as_ref().ok_or(ViewerError::TopographyMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RegularGrid {
        RegularGrid::new([0.0, 1000.0, 0.0, 2000.0, 0.0, 500.0], [10, 20, 5]).unwrap()
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("x".parse::<Direction>().unwrap(), Direction::X);
        assert_eq!("Y".parse::<Direction>().unwrap(), Direction::Y);
        assert_eq!("z".parse::<Direction>().unwrap(), Direction::Z);
        assert!(matches!(
            "w".parse::<Direction>(),
            Err(ViewerError::InvalidDirection(s)) if s == "w"
        ));
    }

    #[test]
    fn test_spacing_and_centers() {
        let g = grid();
        assert_eq!(g.spacing(), DVec3::new(100.0, 100.0, 100.0));
        assert_eq!(g.len(), 1000);
        assert_eq!(g.cell_center(0, 0, 0), DVec3::new(50.0, 50.0, 50.0));
        assert_eq!(g.flat_index(1, 2, 3), (20 + 2) * 5 + 3);
        let values = g.values();
        assert_eq!(values[g.flat_index(3, 4, 2)], g.cell_center(3, 4, 2));
        assert_eq!(g.min_extent_range(), 500.0);
        assert_eq!(g.max_extent_range(), 2000.0);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(RegularGrid::new([0.0, 1.0, 0.0, 1.0, 0.0, 1.0], [0, 1, 1]).is_err());
        assert!(RegularGrid::new([0.0, 0.0, 0.0, 1.0, 0.0, 1.0], [1, 1, 1]).is_err());
        assert!(grid().with_topography_mask(vec![false; 3]).is_err());
    }

    #[test]
    fn test_section_args() {
        let sections: Sections = [
            Section::new("a", DVec2::ZERO, DVec2::new(10.0, 0.0), [4, 3]),
            Section::new("b", DVec2::ZERO, DVec2::new(0.0, 10.0), [2, 5]),
        ]
        .into_iter()
        .collect();

        assert_eq!(sections.section_args("a").unwrap(), (0, 12));
        assert_eq!(sections.section_args("b").unwrap(), (12, 22));
        assert_eq!(sections.total_points(), 22);
        assert!(matches!(
            sections.section_args("c"),
            Err(ViewerError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_section_insert_replaces() {
        let mut sections = Sections::new();
        sections.insert(Section::new("a", DVec2::ZERO, DVec2::X, [2, 2]));
        sections.insert(Section::new("b", DVec2::ZERO, DVec2::Y, [2, 2]));
        sections.insert(Section::new("a", DVec2::ZERO, DVec2::new(3.0, 4.0), [2, 2]));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!((sections.get("a").unwrap().dist() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_topography_sampling() {
        let topo = Topography::from_fn([0.0, 10.0, 0.0, 10.0], [11, 11], |x, y| x + 2.0 * y)
            .unwrap();
        assert_eq!(topo.point(10, 0), DVec3::new(10.0, 0.0, 10.0));
        assert!((topo.sample(DVec2::new(2.5, 3.5)) - 9.5).abs() < 1e-9);
        // clamped outside the raster
        assert!((topo.sample(DVec2::new(-5.0, 0.0)) - 0.0).abs() < 1e-9);

        let profile = topo.profile(DVec2::ZERO, DVec2::new(10.0, 0.0), 5);
        assert_eq!(profile.len(), 5);
        assert!((profile[2].z - 5.0).abs() < 1e-9);
        assert_eq!(topo.elevation_range(), (0.0, 30.0));
        assert_eq!(topo.node_extent(), [-0.5, 10.5, -0.5, 10.5]);
    }

    #[test]
    fn test_deserialize_validates_topography() {
        let topo = Topography::from_fn([0.0, 1.0, 0.0, 1.0], [2, 2], |x, _| x).unwrap();
        let json = serde_json::to_string(&topo).unwrap();
        assert_eq!(serde_json::from_str::<Topography>(&json).unwrap(), topo);

        let single_node = r#"{"extent":[0,1,0,1],"resolution":[1,1],"elevation":[800]}"#;
        let err = serde_json::from_str::<Topography>(single_node).unwrap_err();
        assert!(err.to_string().contains("at least 2 nodes"));

        let short = r#"{"extent":[0,1,0,1],"resolution":[11,11],"elevation":[1,2,3]}"#;
        let err = serde_json::from_str::<Topography>(short).unwrap_err();
        assert!(err.to_string().contains("expected 121"));
    }

    #[test]
    fn test_deserialize_validates_regular_grid() {
        let flat = r#"{"resolution":[2,2,2],"extent":[0,1,0,1,5,5]}"#;
        assert!(serde_json::from_str::<RegularGrid>(flat).is_err());

        let empty_axis = r#"{"resolution":[0,2,2],"extent":[0,1,0,1,0,1]}"#;
        assert!(serde_json::from_str::<RegularGrid>(empty_axis).is_err());

        let bad_mask = r#"{"resolution":[2,2,2],"extent":[0,1,0,1,0,1],"mask_topo":[true]}"#;
        assert!(serde_json::from_str::<RegularGrid>(bad_mask).is_err());

        let ok = r#"{"resolution":[2,2,2],"extent":[0,1,0,1,0,1]}"#;
        let grid = serde_json::from_str::<RegularGrid>(ok).unwrap();
        assert_eq!(grid.len(), 8);
        assert!(grid.mask_topo().is_empty());
    }

    #[test]
    fn test_topography_size_check() {
        assert!(matches!(
            Topography::new([0.0, 1.0, 0.0, 1.0], [2, 2], vec![0.0; 3]),
            Err(ViewerError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }
}
