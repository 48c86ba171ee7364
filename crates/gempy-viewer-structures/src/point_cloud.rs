//! Point cloud structure.

use gempy_viewer_core::{DVec3, Result, ViewerError};
use glam::{DMat4, Vec3};
use ply_rs::ply::{DefaultElement, Ply};

use crate::ply_export::PlyBuilder;
use crate::quantity::{ColorQuantity, ScalarQuantity};
use crate::structure::Structure;

/// A point cloud structure.
pub struct PointCloud {
    name: String,
    points: Vec<DVec3>,
    enabled: bool,
    transform: DMat4,
    scalar: Option<ScalarQuantity>,
    colors: Option<ColorQuantity>,
    point_size: f32,
    base_color: Vec3,
}

impl PointCloud {
    /// Creates a new point cloud.
    pub fn new(name: impl Into<String>, points: Vec<DVec3>) -> Self {
        Self {
            name: name.into(),
            points,
            enabled: true,
            transform: DMat4::IDENTITY,
            scalar: None,
            colors: None,
            point_size: 10.0,
            base_color: Vec3::new(0.2, 0.5, 0.8),
        }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    fn check_len(&self, actual: usize) -> Result<()> {
        if actual == self.points.len() {
            Ok(())
        } else {
            Err(ViewerError::SizeMismatch {
                expected: self.points.len(),
                actual,
            })
        }
    }

    /// Adds a scalar quantity to this point cloud.
    pub fn add_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<&mut Self> {
        self.check_len(values.len())?;
        self.scalar = Some(ScalarQuantity::new(name, values));
        Ok(self)
    }

    /// Adds a color quantity to this point cloud. Colors win over scalars
    /// on export.
    pub fn add_color_quantity(
        &mut self,
        name: impl Into<String>,
        colors: Vec<Vec3>,
    ) -> Result<&mut Self> {
        self.check_len(colors.len())?;
        self.colors = Some(ColorQuantity::new(name, colors));
        Ok(self)
    }

    #[must_use]
    pub fn scalar_quantity(&self) -> Option<&ScalarQuantity> {
        self.scalar.as_ref()
    }

    pub fn scalar_quantity_mut(&mut self) -> Option<&mut ScalarQuantity> {
        self.scalar.as_mut()
    }

    #[must_use]
    pub fn color_quantity(&self) -> Option<&ColorQuantity> {
        self.colors.as_ref()
    }

    #[must_use]
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn set_point_size(&mut self, size: f32) -> &mut Self {
        self.point_size = size;
        self
    }

    #[must_use]
    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    pub fn set_base_color(&mut self, color: Vec3) -> &mut Self {
        self.base_color = color;
        self
    }
}

impl Structure for PointCloud {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "PointCloud"
    }

    fn positions(&self) -> &[DVec3] {
        &self.points
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

    fn to_ply(&self) -> Result<Ply<DefaultElement>> {
        let mut builder = PlyBuilder::new(self.world_positions());
        let colors = match (&self.colors, &self.scalar) {
            (Some(c), _) => c.colors().to_vec(),
            (None, Some(s)) => s.colors(&s.resolve_color_map()?),
            (None, None) => vec![self.base_color; self.points.len()],
        };
        builder = builder.colors(colors);
        if let Some(s) = &self.scalar {
            builder = builder.scalar(s.name(), s.values().to_vec());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_quantity_length_checked() {
        let mut pc = PointCloud::new("surface_points", vec![DVec3::ZERO, DVec3::ONE]);
        assert!(pc.add_scalar_quantity("id", vec![1.0]).is_err());
        pc.add_scalar_quantity("id", vec![1.0, 2.0]).unwrap();
        assert_eq!(pc.scalar_quantity().unwrap().range(), (1.0, 2.0));
    }

    #[test]
    fn test_ply_uses_explicit_colors() {
        let mut pc = PointCloud::new("surface_points", vec![DVec3::ZERO]);
        pc.add_scalar_quantity("id", vec![0.0]).unwrap();
        pc.add_color_quantity("element", vec![Vec3::X]).unwrap();
        let ply = pc.to_ply().unwrap();
        let v = &ply.payload["vertex"][0];
        assert_eq!(v["red"], ply_rs::ply::Property::UChar(255));
        assert_eq!(v["green"], ply_rs::ply::Property::UChar(0));
        assert!(v.contains_key("id"));
    }
}
