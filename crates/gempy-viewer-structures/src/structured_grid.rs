//! Structured grid built from the cell centres of a regular grid.

use gempy_viewer_core::{DVec3, RegularGrid, Result, ViewerError};
use glam::DMat4;
use ply_rs::ply::{DefaultElement, Ply};

use crate::ply_export::PlyBuilder;
use crate::quantity::ScalarQuantity;
use crate::structure::Structure;

/// A regular axis-aligned 3D grid with named cell arrays.
///
/// Cell order follows [`RegularGrid`]: x-slowest, z-fastest.
pub struct StructuredGrid {
    name: String,
    resolution: [usize; 3],
    spacing: DVec3,
    centers: Vec<DVec3>,
    /// Cells above the topography, empty when the grid is unmasked.
    mask: Vec<bool>,
    arrays: Vec<ScalarQuantity>,
    active: Option<usize>,
    enabled: bool,
    transform: DMat4,
    opacity: f32,
}

impl StructuredGrid {
    /// Creates a structured grid over the cells of `grid`, taking over its
    /// topography mask.
    pub fn new(name: impl Into<String>, grid: &RegularGrid) -> Self {
        Self {
            name: name.into(),
            resolution: grid.resolution(),
            spacing: grid.spacing(),
            centers: grid.values(),
            mask: grid.mask_topo().to_vec(),
            arrays: Vec::new(),
            active: None,
            enabled: true,
            transform: DMat4::IDENTITY,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn resolution(&self) -> [usize; 3] {
        self.resolution
    }

    #[must_use]
    pub fn spacing(&self) -> DVec3 {
        self.spacing
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.centers.len()
    }

    /// Adds a cell array. The first array added becomes active.
    pub fn add_scalar_array(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<&mut Self> {
        if values.len() != self.centers.len() {
            return Err(ViewerError::SizeMismatch {
                expected: self.centers.len(),
                actual: values.len(),
            });
        }
        let name: String = name.into();
        log::debug!("structured grid '{}': add array '{name}'", self.name);
        let quantity = ScalarQuantity::new(name, values);
        match self.arrays.iter().position(|a| a.name() == quantity.name()) {
            Some(index) => self.arrays[index] = quantity,
            None => self.arrays.push(quantity),
        }
        if self.active.is_none() {
            self.active = Some(0);
        }
        Ok(self)
    }

    /// Names of the attached arrays, in insertion order.
    #[must_use]
    pub fn array_names(&self) -> Vec<String> {
        self.arrays.iter().map(|a| a.name().to_string()).collect()
    }

    #[must_use]
    pub fn array(&self, name: &str) -> Option<&ScalarQuantity> {
        self.arrays.iter().find(|a| a.name() == name)
    }

    pub fn array_mut(&mut self, name: &str) -> Option<&mut ScalarQuantity> {
        self.arrays.iter_mut().find(|a| a.name() == name)
    }

    /// Makes an array active. `"lith"` is an alias of `"id"`.
    pub fn set_active_scalars(&mut self, name: &str) -> Result<&mut Self> {
        let name = if name == "lith" { "id" } else { name };
        match self.arrays.iter().position(|a| a.name() == name) {
            Some(index) => {
                self.active = Some(index);
                Ok(self)
            }
            None => Err(ViewerError::ScalarFieldNotFound {
                name: name.to_string(),
                available: self.array_names(),
            }),
        }
    }

    #[must_use]
    pub fn active_scalars(&self) -> Option<&ScalarQuantity> {
        self.active.and_then(|i| self.arrays.get(i))
    }

    /// Indices of the cells shown: all of them, or those below the
    /// topography when a mask is set.
    #[must_use]
    pub fn visible_cells(&self) -> Vec<usize> {
        if self.mask.len() != self.centers.len() {
            return (0..self.centers.len()).collect();
        }
        (0..self.centers.len()).filter(|&i| !self.mask[i]).collect()
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) -> &mut Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl Structure for StructuredGrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "StructuredGrid"
    }

    fn positions(&self) -> &[DVec3] {
        &self.centers
    }

    fn transform(&self) -> DMat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: DMat4) {
        self.transform = transform;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Cell centres of the visible cells, colored by the active array.
    fn to_ply(&self) -> Result<Ply<DefaultElement>> {
        let cells = self.visible_cells();
        let world = self.world_positions();
        let positions = cells.iter().map(|&i| world[i]).collect();
        let mut builder = PlyBuilder::new(positions).comment(format!(
            "structured grid {} resolution {:?}",
            self.name, self.resolution
        ));
        if let Some(active) = self.active_scalars() {
            let cmap = active.resolve_color_map()?;
            let colors = active.colors(&cmap);
            builder = builder
                .colors(cells.iter().map(|&i| colors[i]).collect())
                .scalar(
                    active.name(),
                    cells.iter().map(|&i| active.values()[i]).collect(),
                );
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> RegularGrid {
        RegularGrid::new([0.0, 10.0, 0.0, 10.0, 0.0, 10.0], [2, 2, 2]).unwrap()
    }

    #[test]
    fn test_first_array_is_active() {
        let mut sg = StructuredGrid::new("regular", &grid());
        sg.add_scalar_array("id", vec![0.0; 8]).unwrap();
        sg.add_scalar_array("sf_0", vec![1.0; 8]).unwrap();
        assert_eq!(sg.active_scalars().unwrap().name(), "id");
        sg.set_active_scalars("sf_0").unwrap();
        assert_eq!(sg.active_scalars().unwrap().name(), "sf_0");
        sg.set_active_scalars("lith").unwrap();
        assert_eq!(sg.active_scalars().unwrap().name(), "id");
    }

    #[test]
    fn test_unknown_array_lists_available() {
        let mut sg = StructuredGrid::new("regular", &grid());
        sg.add_scalar_array("id", vec![0.0; 8]).unwrap();
        match sg.set_active_scalars("values_3") {
            Err(ViewerError::ScalarFieldNotFound { name, available }) => {
                assert_eq!(name, "values_3");
                assert_eq!(available, vec!["id".to_string()]);
            }
            _ => panic!("expected ScalarFieldNotFound"),
        }
    }

    #[test]
    fn test_array_size_checked() {
        let mut sg = StructuredGrid::new("regular", &grid());
        assert!(matches!(
            sg.add_scalar_array("id", vec![0.0; 3]),
            Err(ViewerError::SizeMismatch { expected: 8, actual: 3 })
        ));
    }

    #[test]
    fn test_mask_drops_cells() {
        let mut mask = vec![false; 8];
        mask[7] = true;
        let masked = grid().with_topography_mask(mask).unwrap();
        let mut sg = StructuredGrid::new("regular", &masked);
        assert_eq!(sg.visible_cells().len(), 7);
        sg.add_scalar_array("id", (0..8).map(f64::from).collect()).unwrap();
        let ply = sg.to_ply().unwrap();
        assert_eq!(ply.payload["vertex"].len(), 7);
    }

    #[test]
    fn test_z_scale_moves_bounds() {
        let mut sg = StructuredGrid::new("regular", &grid());
        sg.set_transform(DMat4::from_scale(DVec3::new(1.0, 1.0, 2.0)));
        let (lo, hi) = sg.bounding_box().unwrap();
        assert!((lo.z - 5.0).abs() < 1e-12);
        assert!((hi.z - 15.0).abs() < 1e-12);
    }
}
