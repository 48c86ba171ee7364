//! Curve network structure: nodes joined by straight edges.

use gempy_viewer_core::{
    auto_levels, contour_segments, elevation_image, DVec3, Result, Topography, ViewerError,
};
use glam::{DMat4, Vec3};
use ply_rs::ply::{DefaultElement, Ply};

use crate::ply_export::PlyBuilder;
use crate::structure::Structure;

/// A set of line segments sharing one color.
pub struct CurveNetwork {
    name: String,
    nodes: Vec<DVec3>,
    edges: Vec<[u32; 2]>,
    color: Vec3,
    radius: f32,
    enabled: bool,
    transform: DMat4,
}

impl CurveNetwork {
    /// Creates a curve network. Edge indices must reference existing nodes.
    pub fn new(name: impl Into<String>, nodes: Vec<DVec3>, edges: Vec<[u32; 2]>) -> Result<Self> {
        let n = nodes.len();
        if let Some(bad) = edges
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
            nodes,
            edges,
            color: Vec3::ZERO,
            radius: 1.0,
            enabled: true,
            transform: DMat4::IDENTITY,
        })
    }

    /// Creates a network of disconnected segments.
    pub fn from_segments(name: impl Into<String>, segments: &[[DVec3; 2]]) -> Result<Self> {
        let nodes = segments.iter().flatten().copied().collect();
        let edges = (0..segments.len())
            .map(|i| {
                let a = u32::try_from(2 * i).unwrap_or(u32::MAX);
                [a, a.saturating_add(1)]
            })
            .collect();
        Self::new(name, nodes, edges)
    }

    /// Elevation isolines of a topography raster, `n_levels` levels over
    /// its elevation range, each lifted to its own height.
    pub fn from_height_contours(
        name: impl Into<String>,
        topography: &Topography,
        n_levels: usize,
    ) -> Result<Self> {
        let image = elevation_image(topography)?;
        let extent = topography.node_extent();
        let segments: Vec<[DVec3; 2]> = auto_levels(&image, n_levels)
            .into_iter()
            .flat_map(|level| {
                contour_segments(&image, extent, level)
                    .into_iter()
                    .map(move |[a, b]| [a.extend(level), b.extend(level)])
            })
            .collect();
        Self::from_segments(name, &segments)
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
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
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = radius;
        self
    }
}

impl Structure for CurveNetwork {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "CurveNetwork"
    }

    fn positions(&self) -> &[DVec3] {
        &self.nodes
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
        PlyBuilder::new(self.world_positions())
            .colors(vec![self.color; self.nodes.len()])
            .edges(self.edges.clone())
            .comment(format!("curve network {}", self.name))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_disconnected() {
        let net =
            CurveNetwork::from_segments("lines", &[[DVec3::ZERO, DVec3::X], [DVec3::Y, DVec3::Z]])
                .unwrap();
        assert_eq!(net.num_nodes(), 4);
        assert_eq!(net.edges(), &[[0, 1], [2, 3]]);
    }

    #[test]
    fn test_height_contours_lie_on_levels() {
        let topo = Topography::from_fn([0.0, 10.0, 0.0, 10.0], [11, 11], |x, _| x).unwrap();
        let net = CurveNetwork::from_height_contours("contours", &topo, 5).unwrap();
        assert!(net.num_edges() > 0);
        for p in net.positions() {
            // elevation equals x on this ramp
            assert!((p.z - p.x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bad_edge_rejected() {
        assert!(CurveNetwork::new("bad", vec![DVec3::ZERO], vec![[0, 1]]).is_err());
    }
}
