//! Projection of 3D input data onto the plane of a 2D plot.
//!
//! Each plot kind has its own frame: an axis-aligned slice keeps two world
//! coordinates, a section trace maps points to (distance along trace, z), and
//! the topography map view keeps (x, y).

use glam::{DMat2, DVec2, DVec3};

use crate::error::{Result, ViewerError};
use crate::grid::{RegularGrid, Section, Topography};
use crate::slicer::{plane_location, AxisLabels, SlicerData};

/// Default number of topography samples used to select data near the surface.
pub const DEFAULT_TOPO_COMP: usize = 5000;

/// Rank-1 projector onto a section trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProjector {
    start: DVec2,
    /// `e eᵀ / |e|²` with `e = stop - start`.
    matrix: DMat2,
    unit: DVec2,
    dist: f64,
}

impl SectionProjector {
    /// Builds the projector of a section.
    ///
    /// Fails with [`ViewerError::DegenerateSection`] when start and stop
    /// coincide, since the projection divides by the squared length.
    pub fn new(section: &Section) -> Result<Self> {
        let e = section.stop - section.start;
        let dist2 = e.length_squared();
        if dist2 == 0.0 || !dist2.is_finite() {
            return Err(ViewerError::DegenerateSection(section.name.clone()));
        }
        let matrix = DMat2::from_cols(e * e.x, e * e.y) * (1.0 / dist2);
        Ok(Self {
            start: section.start,
            matrix,
            unit: e / dist2.sqrt(),
            dist: dist2.sqrt(),
        })
    }

    /// The projection matrix.
    #[must_use]
    pub fn matrix(&self) -> DMat2 {
        self.matrix
    }

    /// Length of the trace.
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist
    }

    /// Foot of the perpendicular from `xy`, relative to the trace start.
    #[must_use]
    pub fn project(&self, xy: DVec2) -> DVec2 {
        self.matrix * (xy - self.start)
    }

    /// Signed distance along the trace from its start.
    #[must_use]
    pub fn along(&self, xy: DVec2) -> f64 {
        (xy - self.start).dot(self.unit)
    }

    /// Distance from `xy` to the (infinite) trace line.
    #[must_use]
    pub fn perpendicular_distance(&self, xy: DVec2) -> f64 {
        let rel = xy - self.start;
        (self.matrix * rel - rel).length()
    }
}

/// Maps 3D positions and gradients onto the two axes of a plot.
#[derive(Debug, Clone)]
pub enum PlaneProjection {
    /// Axis-aligned slice of the regular grid.
    Orthogonal {
        fixed_axis: usize,
        free_axes: (usize, usize),
        location: f64,
    },
    /// Vertical section along a trace.
    Section(SectionProjector),
    /// Map view of the topography; `samples` is the decimated surface.
    Topography { samples: Vec<DVec3> },
}

impl PlaneProjection {
    /// Projection for an axis-aligned slice.
    #[must_use]
    pub fn orthogonal(grid: &RegularGrid, slicer: &SlicerData) -> Self {
        PlaneProjection::Orthogonal {
            fixed_axis: slicer.direction.axis(),
            free_axes: slicer.free_axes(),
            location: plane_location(grid, slicer),
        }
    }

    /// Projection for a named section trace.
    pub fn section(section: &Section) -> Result<Self> {
        SectionProjector::new(section).map(PlaneProjection::Section)
    }

    /// Projection for the topography map view, keeping every
    /// `len / topo_comp + 1`-th raster node for the distance test.
    #[must_use]
    pub fn topography(topography: &Topography, topo_comp: usize) -> Self {
        let step = topography.len() / topo_comp.max(1) + 1;
        let samples = topography.points().into_iter().step_by(step).collect();
        PlaneProjection::Topography { samples }
    }

    /// Axis and gradient labels of the plot.
    #[must_use]
    pub fn labels(&self) -> AxisLabels {
        match self {
            PlaneProjection::Orthogonal {
                free_axes: (u, v), ..
            } => AxisLabels::for_axes(*u, *v),
            PlaneProjection::Section(_) => AxisLabels::for_axes(0, 2),
            PlaneProjection::Topography { .. } => AxisLabels::for_axes(0, 1),
        }
    }

    /// Position of a 3D point in plot coordinates.
    #[must_use]
    pub fn to_plane(&self, p: DVec3) -> DVec2 {
        match self {
            PlaneProjection::Orthogonal {
                free_axes: (u, v), ..
            } => DVec2::new(p[*u], p[*v]),
            PlaneProjection::Section(projector) => DVec2::new(projector.along(p.truncate()), p.z),
            PlaneProjection::Topography { .. } => p.truncate(),
        }
    }

    /// A 3D vector (an orientation gradient) in plot coordinates.
    #[must_use]
    pub fn vector_to_plane(&self, g: DVec3) -> DVec2 {
        match self {
            PlaneProjection::Orthogonal {
                free_axes: (u, v), ..
            } => DVec2::new(g[*u], g[*v]),
            PlaneProjection::Section(projector) => {
                DVec2::new(g.truncate().dot(projector.unit), g.z)
            }
            PlaneProjection::Topography { .. } => g.truncate(),
        }
    }

    /// Distance from a point to the plotted surface.
    #[must_use]
    pub fn distance(&self, p: DVec3) -> f64 {
        match self {
            PlaneProjection::Orthogonal {
                fixed_axis,
                location,
                ..
            } => (p[*fixed_axis] - location).abs(),
            PlaneProjection::Section(projector) => projector.perpendicular_distance(p.truncate()),
            PlaneProjection::Topography { samples } => samples
                .iter()
                .map(|s| s.distance(p))
                .fold(f64::INFINITY, f64::min),
        }
    }

    /// Selection mask of the points closer than `threshold`.
    #[must_use]
    pub fn select(&self, points: impl IntoIterator<Item = DVec3>, threshold: f64) -> Vec<bool> {
        points
            .into_iter()
            .map(|p| self.distance(p) < threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use crate::slicer::{slice_cross_section, CellNumber};
    use proptest::prelude::*;

    fn diagonal() -> Section {
        Section::new(
            "section_SW-NE",
            DVec2::new(250.0, 250.0),
            DVec2::new(1750.0, 1750.0),
            [100, 100],
        )
    }

    #[test]
    fn test_projector_matrix_is_idempotent() {
        let p = SectionProjector::new(&diagonal()).unwrap();
        let m = p.matrix();
        let m2 = m * m;
        for (a, b) in m.to_cols_array().iter().zip(m2.to_cols_array().iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_point_on_and_off_line() {
        let p = SectionProjector::new(&diagonal()).unwrap();
        let on = DVec2::new(1000.0, 1000.0);
        assert!(p.perpendicular_distance(on) < 1e-9);
        assert!((p.along(on) - 750.0 * 2f64.sqrt()).abs() < 1e-9);

        let off = DVec2::new(1000.0, 0.0);
        assert!((p.perpendicular_distance(off) - 1000.0 / 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_anti_diagonal_uses_trace_offset() {
        // The trace y = 2000 - x does not pass through the origin.
        let section = Section::new(
            "section_NW-SE",
            DVec2::new(250.0, 1750.0),
            DVec2::new(1750.0, 250.0),
            [100, 100],
        );
        let p = SectionProjector::new(&section).unwrap();
        assert!(p.perpendicular_distance(DVec2::new(1000.0, 1000.0)) < 1e-9);
        assert!((p.along(DVec2::new(250.0, 1750.0))).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_section() {
        let section = Section::new("dot", DVec2::new(5.0, 5.0), DVec2::new(5.0, 5.0), [2, 2]);
        assert!(matches!(
            SectionProjector::new(&section),
            Err(ViewerError::DegenerateSection(name)) if name == "dot"
        ));
    }

    #[test]
    fn test_orthogonal_selection() {
        let grid = RegularGrid::new([0.0, 1000.0, 0.0, 1000.0, 0.0, 1000.0], [10, 10, 10]).unwrap();
        let slicer = slice_cross_section(&grid, Direction::Y, CellNumber::Mid).unwrap();
        let proj = PlaneProjection::orthogonal(&grid, &slicer);
        // mid cell 5 -> centre at y = 550
        let points = [
            DVec3::new(100.0, 550.0, 10.0),
            DVec3::new(100.0, 700.0, 10.0),
            DVec3::new(100.0, 400.0, 10.0),
        ];
        assert_eq!(proj.select(points, 100.0), vec![true, false, false]);
        assert_eq!(proj.to_plane(points[0]), DVec2::new(100.0, 10.0));
        assert_eq!(proj.labels().x, "X");
    }

    #[test]
    fn test_section_plane_coordinates() {
        let proj = PlaneProjection::section(&diagonal()).unwrap();
        let q = proj.to_plane(DVec3::new(250.0, 250.0, 42.0));
        assert!(q.x.abs() < 1e-9);
        assert_eq!(q.y, 42.0);
        let g = proj.vector_to_plane(DVec3::new(1.0, 1.0, 0.5));
        assert!((g.x - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(g.y, 0.5);
        assert_eq!(proj.labels().y, "Z");
    }

    #[test]
    fn test_topography_selection() {
        let topo = Topography::from_fn([0.0, 100.0, 0.0, 100.0], [11, 11], |_, _| 50.0).unwrap();
        let proj = PlaneProjection::topography(&topo, DEFAULT_TOPO_COMP);
        let mask = proj.select(
            [DVec3::new(50.0, 50.0, 52.0), DVec3::new(50.0, 50.0, 0.0)],
            5.0,
        );
        assert_eq!(mask, vec![true, false]);
    }

    proptest! {
        #[test]
        fn prop_projection_decomposes_point(
            sx in -1e3f64..1e3, sy in -1e3f64..1e3,
            ex in -1e3f64..1e3, ey in -1e3f64..1e3,
            px in -1e3f64..1e3, py in -1e3f64..1e3,
        ) {
            prop_assume!(DVec2::new(ex - sx, ey - sy).length() > 1e-3);
            let section = Section::new("s", DVec2::new(sx, sy), DVec2::new(ex, ey), [2, 2]);
            let proj = SectionProjector::new(&section).unwrap();
            let p = DVec2::new(px, py);
            let rel = p - section.start;
            let along = proj.along(p);
            let perp = proj.perpendicular_distance(p);
            // Pythagoras: |rel|² = along² + perp²
            let lhs = rel.length_squared();
            let rhs = along * along + perp * perp;
            prop_assert!((lhs - rhs).abs() <= 1e-6 * lhs.max(1.0));
        }
    }
}
