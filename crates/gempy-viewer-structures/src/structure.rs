//! Structure trait.
//!
//! A [`Structure`] is one object of the 3D scene: a structured grid, a point
//! cloud, a glyph set, a triangle mesh or a curve network.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gempy_viewer_core::{DVec3, Result};
use glam::DMat4;
use ply_rs::ply::{DefaultElement, Ply};

/// A geometric object of the 3D scene.
pub trait Structure {
    /// Returns the unique name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g. "`PointCloud`").
    fn type_name(&self) -> &'static str;

    /// Positions in model coordinates, before the transform.
    fn positions(&self) -> &[DVec3];

    /// Returns the current model transform matrix.
    fn transform(&self) -> DMat4;

    /// Sets the model transform matrix.
    fn set_transform(&mut self, transform: DMat4);

    /// Returns whether this structure is currently visible.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);

    /// Builds the PLY representation, transform applied.
    fn to_ply(&self) -> Result<Ply<DefaultElement>>;

    /// Positions with the transform applied.
    fn world_positions(&self) -> Vec<DVec3> {
        let transform = self.transform();
        self.positions()
            .iter()
            .map(|p| transform.transform_point3(*p))
            .collect()
    }

    /// Returns the axis-aligned bounding box in world coordinates.
    ///
    /// Returns `None` if the structure has no points.
    fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let points = self.world_positions();
        let first = *points.first()?;
        Some(
            points
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// Returns a characteristic length scale for this structure.
    fn length_scale(&self) -> f64 {
        self.bounding_box()
            .map_or(0.0, |(lo, hi)| (hi - lo).length())
    }

    /// Resets the transform to identity.
    fn reset_transform(&mut self) {
        self.set_transform(DMat4::IDENTITY);
    }

    /// Writes the structure as an ASCII PLY file.
    fn write_ply(&self, path: &Path) -> Result<()> {
        let mut ply = self.to_ply()?;
        let mut out = BufWriter::new(File::create(path)?);
        ply_rs::writer::Writer::new().write_ply(&mut out, &mut ply)?;
        log::debug!("wrote {} '{}' to {}", self.type_name(), self.name(), path.display());
        Ok(())
    }
}
