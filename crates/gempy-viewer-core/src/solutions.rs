//! Solution arrays produced by the modeling engine.
//!
//! The viewer only reads these. Every regular-grid array is flat, in the
//! storage order of [`RegularGrid`](crate::grid::RegularGrid).

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Lithology and per-series scalar fields evaluated on a secondary grid
/// (topography raster or concatenated section samples).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSolution {
    pub lith: Vec<f64>,
    pub scalar_fields: Vec<Vec<f64>>,
}

/// A triangulated surface of one structural element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceMesh {
    /// Name of the structural element the surface belongs to.
    pub element: String,
    pub vertices: Vec<DVec3>,
    /// Triangles as vertex index triples.
    pub edges: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    /// A surface is drawable when it has both vertices and triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.edges.is_empty()
    }
}

/// Raw solution arrays of a computed model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solutions {
    /// Lithology id per regular-grid cell (1-based element ids).
    pub lith_block: Vec<f64>,
    /// One scalar field per series.
    pub scalar_field_matrix: Vec<Vec<f64>>,
    pub values_matrix: Vec<Vec<f64>>,
    pub block_matrix: Vec<Vec<f64>>,
    /// Scalar values at the surface points, per series. Zero marks an
    /// element that does not belong to the series.
    pub scalar_field_at_surface_points: Vec<Vec<f64>>,
    pub geological_map: Option<GridSolution>,
    pub sections: Option<GridSolution>,
    pub surfaces: Vec<SurfaceMesh>,
}

impl Solutions {
    #[must_use]
    pub fn has_lith_block(&self) -> bool {
        !self.lith_block.is_empty()
    }

    #[must_use]
    pub fn has_scalar_field(&self) -> bool {
        self.scalar_field_matrix.iter().any(|s| !s.is_empty())
    }

    #[must_use]
    pub fn has_values(&self) -> bool {
        self.values_matrix.iter().any(|s| !s.is_empty())
    }

    #[must_use]
    pub fn has_block(&self) -> bool {
        self.block_matrix.iter().any(|s| !s.is_empty())
    }

    /// Sorted non-zero contact levels of one series.
    #[must_use]
    pub fn surface_levels(&self, series: usize) -> Vec<f64> {
        let mut levels: Vec<f64> = self
            .scalar_field_at_surface_points
            .get(series)
            .map(|values| values.iter().copied().filter(|v| *v != 0.0).collect())
            .unwrap_or_default();
        levels.sort_by(f64::total_cmp);
        levels
    }

    /// Geological map or [`ViewerError::NotComputed`].
    pub fn geological_map(&self) -> Result<&GridSolution> {
        self.geological_map
            .as_ref()
            .ok_or_else(|| ViewerError::NotComputed("geological map".to_string()))
    }

    /// Section solutions or [`ViewerError::NotComputed`].
    pub fn sections(&self) -> Result<&GridSolution> {
        self.sections
            .as_ref()
            .ok_or_else(|| ViewerError::NotComputed("section solutions".to_string()))
    }
}

/// Picks series `n` out of a per-series matrix.
///
/// An empty matrix is reported as not computed; an index past the last
/// series is a size mismatch.
pub fn series<'a>(matrix: &'a [Vec<f64>], n: usize, what: &str) -> Result<&'a [f64]> {
    if matrix.is_empty() {
        return Err(ViewerError::NotComputed(what.to_string()));
    }
    matrix
        .get(n)
        .map(Vec::as_slice)
        .ok_or(ViewerError::SizeMismatch {
            expected: n + 1,
            actual: matrix.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_levels_sorted_nonzero() {
        let solutions = Solutions {
            scalar_field_at_surface_points: vec![vec![0.3, 0.0, 0.1], vec![]],
            ..Default::default()
        };
        assert_eq!(solutions.surface_levels(0), vec![0.1, 0.3]);
        assert!(solutions.surface_levels(1).is_empty());
        assert!(solutions.surface_levels(7).is_empty());
    }

    #[test]
    fn test_presence_checks() {
        let mut solutions = Solutions::default();
        assert!(!solutions.has_lith_block());
        assert!(!solutions.has_scalar_field());
        solutions.scalar_field_matrix = vec![vec![]];
        assert!(!solutions.has_scalar_field());
        solutions.values_matrix = vec![vec![1.0]];
        assert!(solutions.has_values());
        assert!(matches!(
            solutions.geological_map(),
            Err(ViewerError::NotComputed(_))
        ));
    }

    #[test]
    fn test_series_lookup() {
        let matrix = vec![vec![1.0], vec![2.0]];
        assert_eq!(series(&matrix, 1, "values").unwrap(), &[2.0]);
        assert!(matches!(
            series(&matrix, 2, "values"),
            Err(ViewerError::SizeMismatch { .. })
        ));
        assert!(matches!(
            series(&[], 0, "values"),
            Err(ViewerError::NotComputed(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let solutions: Solutions =
            serde_json::from_str(r#"{"lith_block": [1.0, 2.0]}"#).unwrap();
        assert!(solutions.has_lith_block());
        assert!(solutions.sections.is_none());
    }
}
