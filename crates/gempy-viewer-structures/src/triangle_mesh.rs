//! Triangle mesh structure for surfaces and topography.

use gempy_viewer_core::{DVec3, Result, Topography, ViewerError};
use glam::{DMat4, Vec3};
use ply_rs::ply::{DefaultElement, Ply};

use crate::ply_export::PlyBuilder;
use crate::quantity::{ColorQuantity, ScalarQuantity};
use crate::structure::Structure;

/// A triangle mesh with an optional per-vertex quantity.
pub struct TriangleMesh {
    name: String,
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
    color: Vec3,
    opacity: f32,
    scalar: Option<ScalarQuantity>,
    vertex_colors: Option<ColorQuantity>,
    enabled: bool,
    transform: DMat4,
}

impl TriangleMesh {
    /// Creates a mesh. Face indices must reference existing vertices.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<DVec3>,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self> {
        let n = vertices.len();
        if let Some(bad) = faces
            .iter()
            .flatten()
            .find(|&&i| usize::try_from(i).map_or(true, |i| i >= n))
        {
            return Err(ViewerError::SizeMismatch {
                expected: n,
                actual: usize::try_from(*bad).unwrap_or(usize::MAX).saturating_add(1),
            });
        }
        Ok(Self {
            name: name.into(),
            vertices,
            faces,
            color: Vec3::splat(0.7),
            opacity: 1.0,
            scalar: None,
            vertex_colors: None,
            enabled: true,
            transform: DMat4::IDENTITY,
        })
    }

    /// Triangulates a topography raster, two triangles per raster cell.
    ///
    /// Vertex `i * ny + j` is raster node `(i, j)`.
    pub fn from_topography(name: impl Into<String>, topography: &Topography) -> Result<Self> {
        let [nx, ny] = topography.resolution();
        let index = |i: usize, j: usize| u32::try_from(i * ny + j).unwrap_or(u32::MAX);
        let mut faces = Vec::with_capacity(2 * (nx - 1) * (ny - 1));
        for i in 0..nx - 1 {
            for j in 0..ny - 1 {
                let (a, b) = (index(i, j), index(i + 1, j));
                let (c, d) = (index(i + 1, j + 1), index(i, j + 1));
                faces.push([a, b, c]);
                faces.push([a, c, d]);
            }
        }
        Self::new(name, topography.points(), faces)
    }

    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec3) -> &mut Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) -> &mut Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Adds a per-vertex scalar quantity.
    pub fn add_scalar_quantity(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<&mut Self> {
        if values.len() != self.vertices.len() {
            return Err(ViewerError::SizeMismatch {
                expected: self.vertices.len(),
                actual: values.len(),
            });
        }
        self.scalar = Some(ScalarQuantity::new(name, values));
        Ok(self)
    }

    /// Adds per-vertex colors.
    pub fn add_color_quantity(
        &mut self,
        name: impl Into<String>,
        colors: Vec<Vec3>,
    ) -> Result<&mut Self> {
        if colors.len() != self.vertices.len() {
            return Err(ViewerError::SizeMismatch {
                expected: self.vertices.len(),
                actual: colors.len(),
            });
        }
        self.vertex_colors = Some(ColorQuantity::new(name, colors));
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
        self.vertex_colors.as_ref()
    }
}

impl Structure for TriangleMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "TriangleMesh"
    }

    fn positions(&self) -> &[DVec3] {
        &self.vertices
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
        let colors = match (&self.vertex_colors, &self.scalar) {
            (Some(c), _) => c.colors().to_vec(),
            (None, Some(s)) => s.colors(&s.resolve_color_map()?),
            (None, None) => vec![self.color; self.vertices.len()],
        };
        let mut builder = PlyBuilder::new(self.world_positions())
            .colors(colors)
            .faces(self.faces.clone())
            .comment(format!("triangle mesh {} opacity {}", self.name, self.opacity));
        if let Some(s) = &self.scalar {
            builder = builder.scalar(s.name(), s.values().to_vec());
        }
        builder.build()
    }
}
