//! The 3D scene of a model.

use std::fs;
use std::path::{Path, PathBuf};

use gempy_viewer_core::{DVec3, Result};
use gempy_viewer_structures::{
    ArrowGlyphs, CurveNetwork, PointCloud, ScalarBar, Structure, StructuredGrid, TriangleMesh,
};
use glam::DMat4;

/// Structures of a 3D scene, filled by the 3D drawers.
pub struct GemPyToVista {
    extent: [f64; 6],
    z_scale: f64,
    pub regular_grid: Option<StructuredGrid>,
    pub surface_points: Option<PointCloud>,
    pub orientations: Option<ArrowGlyphs>,
    pub topography: Option<TriangleMesh>,
    pub topography_contours: Option<CurveNetwork>,
    pub surfaces: Vec<TriangleMesh>,
    pub scalar_bar: Option<ScalarBar>,
}

impl GemPyToVista {
    /// Creates an empty scene over the model extent.
    pub fn new(extent: [f64; 6]) -> Self {
        Self {
            extent,
            z_scale: 1.0,
            regular_grid: None,
            surface_points: None,
            orientations: None,
            topography: None,
            topography_contours: None,
            surfaces: Vec::new(),
            scalar_bar: None,
        }
    }

    #[must_use]
    pub fn extent(&self) -> [f64; 6] {
        self.extent
    }

    #[must_use]
    pub fn z_scale(&self) -> f64 {
        self.z_scale
    }

    /// Every structure of the scene.
    #[must_use]
    pub fn structures(&self) -> Vec<&dyn Structure> {
        let mut out: Vec<&dyn Structure> = Vec::new();
        if let Some(s) = &self.regular_grid {
            out.push(s);
        }
        if let Some(s) = &self.surface_points {
            out.push(s);
        }
        if let Some(s) = &self.orientations {
            out.push(s);
        }
        if let Some(s) = &self.topography {
            out.push(s);
        }
        if let Some(s) = &self.topography_contours {
            out.push(s);
        }
        out.extend(self.surfaces.iter().map(|s| s as &dyn Structure));
        out
    }

    fn structures_mut(&mut self) -> Vec<&mut dyn Structure> {
        let mut out: Vec<&mut dyn Structure> = Vec::new();
        if let Some(s) = &mut self.regular_grid {
            out.push(s);
        }
        if let Some(s) = &mut self.surface_points {
            out.push(s);
        }
        if let Some(s) = &mut self.orientations {
            out.push(s);
        }
        if let Some(s) = &mut self.topography {
            out.push(s);
        }
        if let Some(s) = &mut self.topography_contours {
            out.push(s);
        }
        out.extend(self.surfaces.iter_mut().map(|s| s as &mut dyn Structure));
        out
    }

    /// Scales z of every structure, e.g. for vertical exaggeration.
    pub fn set_scale(&mut self, z_scale: f64) -> &mut Self {
        self.z_scale = z_scale;
        let transform = DMat4::from_scale(DVec3::new(1.0, 1.0, z_scale));
        for s in self.structures_mut() {
            s.set_transform(transform);
        }
        self
    }

    /// Bounding box of the enabled structures, transforms applied.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        self.structures()
            .into_iter()
            .filter(|s| s.is_enabled())
            .filter_map(|s| s.bounding_box())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Writes every enabled structure to `<dir>/<name>.ply` and returns the
    /// written paths.
    pub fn export_ply(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for s in self.structures().into_iter().filter(|s| s.is_enabled()) {
            let path = dir.join(format!("{}.ply", file_stem(s.name())));
            s.write_ply(&path)?;
            written.push(path);
        }
        log::info!("exported {} structures to {}", written.len(), dir.display());
        Ok(written)
    }
}

/// Structure name made safe for a file name.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("rock 1/a"), "rock_1_a");
        assert_eq!(file_stem("surface_points"), "surface_points");
    }

    #[test]
    fn test_scale_applies_to_structures() {
        let mut vista = GemPyToVista::new([0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        vista.surface_points = Some(PointCloud::new(
            "surface_points",
            vec![DVec3::new(0.0, 0.0, 1.0)],
        ));
        vista.set_scale(3.0);
        let (_, hi) = vista.bounding_box().unwrap();
        assert!((hi.z - 3.0).abs() < 1e-12);
    }
}
