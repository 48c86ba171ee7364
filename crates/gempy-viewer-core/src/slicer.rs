//! Slice selection: turns a direction and a cell number into the index
//! triple that extracts a plane from a 3D regular-grid array.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::grid::{axis_label, gradient_label, Direction, RegularGrid};

/// Which cell along the slicing direction to cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CellNumberRepr", into = "CellNumberRepr")]
pub enum CellNumber {
    /// Half the resolution along the slicing axis, rounded down.
    #[default]
    Mid,
    /// Explicit cell index; negative values count from the end.
    Index(i64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CellNumberRepr {
    Index(i64),
    Name(String),
}

impl TryFrom<CellNumberRepr> for CellNumber {
    type Error = ViewerError;

    fn try_from(repr: CellNumberRepr) -> Result<Self> {
        match repr {
            CellNumberRepr::Index(i) => Ok(CellNumber::Index(i)),
            CellNumberRepr::Name(s) => s.parse(),
        }
    }
}

impl From<CellNumber> for CellNumberRepr {
    fn from(cell: CellNumber) -> Self {
        match cell {
            CellNumber::Mid => CellNumberRepr::Name("mid".to_string()),
            CellNumber::Index(i) => CellNumberRepr::Index(i),
        }
    }
}

impl FromStr for CellNumber {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("mid") {
            return Ok(CellNumber::Mid);
        }
        s.trim()
            .parse::<i64>()
            .map(CellNumber::Index)
            .map_err(|_| ViewerError::InvalidCellNumber(s.to_string()))
    }
}

impl From<i64> for CellNumber {
    fn from(index: i64) -> Self {
        CellNumber::Index(index)
    }
}

impl fmt::Display for CellNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellNumber::Mid => f.write_str("mid"),
            CellNumber::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Selection along one array axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSelect {
    /// Every index in the range.
    Full(Range<usize>),
    /// A single fixed index.
    At(usize),
}

impl IndexSelect {
    /// The indices this selection covers.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        match self {
            IndexSelect::Full(r) => r.clone(),
            IndexSelect::At(i) => *i..*i + 1,
        }
    }

    /// The fixed index, if this is a fixed selection.
    #[must_use]
    pub fn fixed(&self) -> Option<usize> {
        match self {
            IndexSelect::At(i) => Some(*i),
            IndexSelect::Full(_) => None,
        }
    }
}

/// Coordinate and gradient labels of the two axes of a 2D plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: &'static str,
    pub y: &'static str,
    pub gx: &'static str,
    pub gy: &'static str,
}

impl AxisLabels {
    /// Labels for a plane spanned by two axis indices.
    #[must_use]
    pub fn for_axes(u: usize, v: usize) -> Self {
        Self {
            x: axis_label(u),
            y: axis_label(v),
            gx: gradient_label(u),
            gy: gradient_label(v),
        }
    }
}

/// A plane cut out of the regular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicerData {
    pub direction: Direction,
    /// Resolved cell index along `direction`.
    pub cell: usize,
    /// One selection per array axis: two full ranges and one fixed index.
    pub index: [IndexSelect; 3],
    /// `[x_min, x_max, y_min, y_max]` of the plane in world coordinates.
    pub extent: [f64; 4],
    pub labels: AxisLabels,
}

impl SlicerData {
    /// The two free array axes in ascending order (image columns, rows).
    #[must_use]
    pub fn free_axes(&self) -> (usize, usize) {
        self.direction.free_axes()
    }

    /// Shape of the sliced plane as `(width, height)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        let (u, v) = self.free_axes();
        (self.index[u].range().len(), self.index[v].range().len())
    }
}

/// Resolves a [`CellNumber`] to an index in `0..resolution[direction]`.
pub fn resolve_cell(grid: &RegularGrid, direction: Direction, cell: CellNumber) -> Result<usize> {
    let size = grid.resolution()[direction.axis()];
    match cell {
        CellNumber::Mid => Ok(size / 2),
        CellNumber::Index(index) => {
            let signed_size = i64::try_from(size).unwrap_or(i64::MAX);
            let resolved = if index < 0 { index + signed_size } else { index };
            if (0..signed_size).contains(&resolved) {
                usize::try_from(resolved).map_err(|_| ViewerError::CellOutOfRange {
                    direction,
                    index,
                    size,
                })
            } else {
                Err(ViewerError::CellOutOfRange {
                    direction,
                    index,
                    size,
                })
            }
        }
    }
}

/// Computes the slice of the regular grid in the given direction.
pub fn slice_cross_section(
    grid: &RegularGrid,
    direction: Direction,
    cell: CellNumber,
) -> Result<SlicerData> {
    let cell = resolve_cell(grid, direction, cell)?;
    let res = grid.resolution();
    let mut index = [
        IndexSelect::Full(0..res[0]),
        IndexSelect::Full(0..res[1]),
        IndexSelect::Full(0..res[2]),
    ];
    index[direction.axis()] = IndexSelect::At(cell);

    let (u, v) = direction.free_axes();
    let (u_min, u_max) = grid.axis_extent(u);
    let (v_min, v_max) = grid.axis_extent(v);

    Ok(SlicerData {
        direction,
        cell,
        index,
        extent: [u_min, u_max, v_min, v_max],
        labels: AxisLabels::for_axes(u, v),
    })
}

/// World coordinate of the slice plane along its fixed axis (cell centre).
#[must_use]
pub fn plane_location(grid: &RegularGrid, slicer: &SlicerData) -> f64 {
    grid.cell_coordinate(slicer.direction.axis(), slicer.cell)
}

/// Map-view trace `(p1, p2)` of an x or y slice, spanning the grid extent.
///
/// A z slice is horizontal and has no trace.
pub fn section_endpoints(grid: &RegularGrid, slicer: &SlicerData) -> Result<(DVec2, DVec2)> {
    let loc = plane_location(grid, slicer);
    let e = grid.extent();
    match slicer.direction {
        Direction::X => Ok((DVec2::new(loc, e[2]), DVec2::new(loc, e[3]))),
        Direction::Y => Ok((DVec2::new(e[0], loc), DVec2::new(e[1], loc))),
        Direction::Z => Err(ViewerError::NotImplemented(
            "topography trace of a horizontal (z) slice",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(res: [usize; 3]) -> RegularGrid {
        RegularGrid::new([0.0, 1000.0, 0.0, 1000.0, 0.0, 1000.0], res).unwrap()
    }

    #[test]
    fn test_mid_y_50() {
        let g = grid([50, 50, 50]);
        let s = slice_cross_section(&g, Direction::Y, CellNumber::Mid).unwrap();
        assert_eq!(s.index[1], IndexSelect::At(25));
        assert_eq!(s.index[0], IndexSelect::Full(0..50));
        assert_eq!(s.index[2], IndexSelect::Full(0..50));
        assert_eq!(s.labels.x, "X");
        assert_eq!(s.labels.y, "Z");
        assert_eq!(s.labels.gx, "G_x");
        assert_eq!(s.labels.gy, "G_z");
        assert_eq!(s.extent, [0.0, 1000.0, 0.0, 1000.0]);
    }

    #[test]
    fn test_labels_per_direction() {
        let g = grid([4, 6, 8]);
        let x = slice_cross_section(&g, Direction::X, CellNumber::Index(1)).unwrap();
        assert_eq!((x.labels.x, x.labels.y), ("Y", "Z"));
        assert_eq!((x.labels.gx, x.labels.gy), ("G_y", "G_z"));
        assert_eq!(x.shape(), (6, 8));

        let z = slice_cross_section(&g, Direction::Z, CellNumber::Index(1)).unwrap();
        assert_eq!((z.labels.x, z.labels.y), ("X", "Y"));
        assert_eq!(z.shape(), (4, 6));
    }

    #[test]
    fn test_negative_and_out_of_range() {
        let g = grid([4, 6, 8]);
        assert_eq!(resolve_cell(&g, Direction::Z, CellNumber::Index(-1)).unwrap(), 7);
        assert_eq!(resolve_cell(&g, Direction::X, CellNumber::Index(-4)).unwrap(), 0);
        assert!(matches!(
            resolve_cell(&g, Direction::X, CellNumber::Index(4)),
            Err(ViewerError::CellOutOfRange { size: 4, .. })
        ));
        assert!(resolve_cell(&g, Direction::X, CellNumber::Index(-5)).is_err());
    }

    #[test]
    fn test_cell_number_parse_and_serde() {
        assert_eq!("mid".parse::<CellNumber>().unwrap(), CellNumber::Mid);
        assert_eq!("-1".parse::<CellNumber>().unwrap(), CellNumber::Index(-1));
        assert!("middle".parse::<CellNumber>().is_err());

        let cells: Vec<CellNumber> = serde_json::from_str(r#"["mid", 3, -2]"#).unwrap();
        assert_eq!(
            cells,
            vec![CellNumber::Mid, CellNumber::Index(3), CellNumber::Index(-2)]
        );
        assert_eq!(serde_json::to_string(&CellNumber::Mid).unwrap(), r#""mid""#);
    }

    #[test]
    fn test_plane_location_and_endpoints() {
        let g = grid([10, 10, 10]);
        let s = slice_cross_section(&g, Direction::Y, CellNumber::Index(2)).unwrap();
        assert!((plane_location(&g, &s) - 250.0).abs() < 1e-9);
        let (p1, p2) = section_endpoints(&g, &s).unwrap();
        assert_eq!(p1, DVec2::new(0.0, 250.0));
        assert_eq!(p2, DVec2::new(1000.0, 250.0));

        let z = slice_cross_section(&g, Direction::Z, CellNumber::Mid).unwrap();
        assert!(matches!(
            section_endpoints(&g, &z),
            Err(ViewerError::NotImplemented(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_mid_is_half_resolution(
            nx in 1usize..80, ny in 1usize..80, nz in 1usize..80, d in 0usize..3
        ) {
            let g = grid([nx, ny, nz]);
            let direction = Direction::ALL[d];
            let s = slice_cross_section(&g, direction, CellNumber::Mid).unwrap();
            let res = g.resolution();
            prop_assert_eq!(s.index[d].fixed(), Some(res[d] / 2));
            for axis in (0..3).filter(|&a| a != d) {
                prop_assert_eq!(s.index[axis].range(), 0..res[axis]);
            }
        }
    }
}
