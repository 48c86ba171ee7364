//! The geological model as seen by the viewer: input data, structural frame,
//! grids and solutions.

use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::Grid;
use crate::solutions::Solutions;

/// An interface point of a structural element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub position: DVec3,
    /// 1-based id of the structural element.
    pub id: usize,
}

/// An orientation measurement: position and gradient of the scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub position: DVec3,
    pub gradient: DVec3,
    pub id: usize,
}

/// A geological unit with its display colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralElement {
    pub name: String,
    /// Hex colour, `#rrggbb`.
    pub color: String,
    pub id: usize,
}

impl StructuralElement {
    pub fn new(name: impl Into<String>, color: impl Into<String>, id: usize) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            id,
        }
    }
}

/// Ordered structural elements; the last one is the basement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuralFrame {
    elements: Vec<StructuralElement>,
}

impl StructuralFrame {
    #[must_use]
    pub fn new(elements: Vec<StructuralElement>) -> Self {
        Self { elements }
    }

    #[must_use]
    pub fn elements(&self) -> &[StructuralElement] {
        &self.elements
    }

    #[must_use]
    pub fn number_of_elements(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn elements_colors(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.color.as_str()).collect()
    }

    #[must_use]
    pub fn elements_names(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.name.as_str()).collect()
    }

    #[must_use]
    pub fn elements_ids(&self) -> Vec<usize> {
        self.elements.iter().map(|e| e.id).collect()
    }

    /// Colours of the elements that have a contact, i.e. all but the basement.
    #[must_use]
    pub fn elements_colors_contacts(&self) -> Vec<&str> {
        let n = self.elements.len().saturating_sub(1);
        self.elements[..n].iter().map(|e| e.color.as_str()).collect()
    }

    /// Colour of the element with the given 1-based id.
    #[must_use]
    pub fn color_of(&self, id: usize) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.color.as_str())
    }

    /// Name of the element with the given 1-based id.
    #[must_use]
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }
}

/// Model transform. Only the isometric scale matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub isometric_scale: f64,
}

/// A geological model with (optionally) its computed solutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoModel {
    #[serde(default)]
    pub name: String,
    pub structural_frame: StructuralFrame,
    #[serde(default)]
    pub surface_points: Vec<SurfacePoint>,
    #[serde(default)]
    pub orientations: Vec<Orientation>,
    pub grid: Grid,
    #[serde(default)]
    pub solutions: Option<Solutions>,
    #[serde(default)]
    pub transform: Option<Transform>,
}

impl GeoModel {
    /// Creates a model without input data or solutions.
    pub fn new(name: impl Into<String>, structural_frame: StructuralFrame, grid: Grid) -> Self {
        Self {
            name: name.into(),
            structural_frame,
            surface_points: Vec::new(),
            orientations: Vec::new(),
            grid,
            solutions: None,
            transform: None,
        }
    }

    /// Loads a model from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model = serde_json::from_str(json)?;
        Ok(model)
    }

    /// Loads a model from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("loading model from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Serializes the model as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Characteristic length of the model: the isometric scale if a transform
    /// is set, the longest side of the grid extent otherwise.
    #[must_use]
    pub fn model_scale(&self) -> f64 {
        self.transform
            .map_or_else(|| self.grid.regular_grid.max_extent_range(), |t| t.isometric_scale)
    }

    /// Distance within which input data is drawn on a 2D plot by default.
    #[must_use]
    pub fn default_projection_distance(&self) -> f64 {
        0.2 * self.model_scale()
    }

    /// Whether solutions are attached.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.solutions.is_some()
    }

    /// Colour of every surface point, by element id. Unknown ids are black.
    #[must_use]
    pub fn surface_points_colors(&self) -> Vec<&str> {
        self.surface_points
            .iter()
            .map(|p| self.structural_frame.color_of(p.id).unwrap_or("#000000"))
            .collect()
    }

    /// Colour of every orientation, by element id. Unknown ids are black.
    #[must_use]
    pub fn orientations_colors(&self) -> Vec<&str> {
        self.orientations
            .iter()
            .map(|o| self.structural_frame.color_of(o.id).unwrap_or("#000000"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RegularGrid;

    fn frame() -> StructuralFrame {
        StructuralFrame::new(vec![
            StructuralElement::new("rock2", "#9f0052", 1),
            StructuralElement::new("rock1", "#015482", 2),
            StructuralElement::new("basement", "#ffbe00", 3),
        ])
    }

    fn model() -> GeoModel {
        let grid = RegularGrid::new([0.0, 1000.0, 0.0, 500.0, 0.0, 800.0], [4, 4, 4]).unwrap();
        let mut model = GeoModel::new("test", frame(), Grid::new(grid));
        model.surface_points = vec![
            SurfacePoint {
                position: DVec3::new(10.0, 10.0, 10.0),
                id: 2,
            },
            SurfacePoint {
                position: DVec3::ZERO,
                id: 9,
            },
        ];
        model
    }

    #[test]
    fn test_contact_colors_drop_basement() {
        let f = frame();
        assert_eq!(f.number_of_elements(), 3);
        assert_eq!(f.elements_colors_contacts(), vec!["#9f0052", "#015482"]);
        assert_eq!(f.elements_ids(), vec![1, 2, 3]);
        assert_eq!(f.name_of(3), Some("basement"));
    }

    #[test]
    fn test_model_scale() {
        let mut m = model();
        assert_eq!(m.model_scale(), 1000.0);
        assert!((m.default_projection_distance() - 200.0).abs() < 1e-12);
        m.transform = Some(Transform {
            isometric_scale: 0.5,
        });
        assert!((m.default_projection_distance() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_point_colors() {
        let m = model();
        assert_eq!(m.surface_points_colors(), vec!["#015482", "#000000"]);
    }

    #[test]
    fn test_json_round_trip() {
        let m = model();
        let json = m.to_json_string().unwrap();
        let back = GeoModel::from_json_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(!back.is_computed());
    }
}
