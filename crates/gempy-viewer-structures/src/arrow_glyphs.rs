//! Arrow glyphs for orientation data.

use gempy_viewer_core::{DVec3, Result, ViewerError};
use glam::{DMat4, Vec3};
use ply_rs::ply::{DefaultElement, Ply};

use crate::ply_export::PlyBuilder;
use crate::structure::Structure;

/// Fraction of the arrow length taken by the head.
const HEAD_FRACTION: f64 = 0.25;

/// Arrows anchored at their tail, one per orientation.
pub struct ArrowGlyphs {
    name: String,
    origins: Vec<DVec3>,
    directions: Vec<DVec3>,
    colors: Vec<Vec3>,
    factor: f64,
    enabled: bool,
    transform: DMat4,
}

impl ArrowGlyphs {
    /// Creates glyphs. Each arrow points along its direction and is `factor`
    /// long times the direction length.
    pub fn new(
        name: impl Into<String>,
        origins: Vec<DVec3>,
        directions: Vec<DVec3>,
        factor: f64,
    ) -> Result<Self> {
        if origins.len() != directions.len() {
            return Err(ViewerError::SizeMismatch {
                expected: origins.len(),
                actual: directions.len(),
            });
        }
        let colors = vec![Vec3::ZERO; origins.len()];
        Ok(Self {
            name: name.into(),
            origins,
            directions,
            colors,
            factor,
            enabled: true,
            transform: DMat4::IDENTITY,
        })
    }

    /// Sets one color per arrow.
    pub fn set_colors(&mut self, colors: Vec<Vec3>) -> Result<&mut Self> {
        if colors.len() != self.origins.len() {
            return Err(ViewerError::SizeMismatch {
                expected: self.origins.len(),
                actual: colors.len(),
            });
        }
        self.colors = colors;
        Ok(self)
    }

    #[must_use]
    pub fn num_arrows(&self) -> usize {
        self.origins.len()
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Tip position of arrow `i`.
    #[must_use]
    pub fn tip(&self, i: usize) -> DVec3 {
        self.origins[i] + self.directions[i] * self.factor
    }

    /// Line geometry of all arrows: a shaft plus four head barbs each.
    #[must_use]
    pub fn line_geometry(&self) -> (Vec<DVec3>, Vec<[u32; 2]>, Vec<Vec3>) {
        let mut nodes = Vec::with_capacity(self.origins.len() * 6);
        let mut edges = Vec::with_capacity(self.origins.len() * 5);
        let mut colors = Vec::with_capacity(self.origins.len() * 6);
        for (i, (&origin, &dir)) in self.origins.iter().zip(&self.directions).enumerate() {
            let shaft = dir * self.factor;
            let length = shaft.length();
            if length == 0.0 {
                continue;
            }
            let tip = origin + shaft;
            let axis = shaft / length;
            let side = axis.any_orthonormal_vector();
            let up = axis.cross(side);
            let base = tip - axis * length * HEAD_FRACTION;
            let width = length * HEAD_FRACTION * 0.5;

            let start = u32::try_from(nodes.len()).unwrap_or(u32::MAX);
            nodes.extend([
                origin,
                tip,
                base + side * width,
                base - side * width,
                base + up * width,
                base - up * width,
            ]);
            colors.extend([self.colors[i]; 6]);
            edges.push([start, start + 1]);
            for barb in 2..6 {
                edges.push([start + 1, start + barb]);
            }
        }
        (nodes, edges, colors)
    }
}

impl Structure for ArrowGlyphs {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "ArrowGlyphs"
    }

    fn positions(&self) -> &[DVec3] {
        &self.origins
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
        let (nodes, edges, colors) = self.line_geometry();
        let world = nodes
            .iter()
            .map(|p| self.transform.transform_point3(*p))
            .collect();
        PlyBuilder::new(world)
            .colors(colors)
            .edges(edges)
            .comment(format!("arrow glyphs {}", self.name))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_uses_factor() {
        let glyphs =
            ArrowGlyphs::new("orientations", vec![DVec3::ZERO], vec![DVec3::Z], 50.0).unwrap();
        assert_eq!(glyphs.tip(0), DVec3::new(0.0, 0.0, 50.0));
    }

    #[test]
    fn test_geometry_per_arrow() {
        let glyphs = ArrowGlyphs::new(
            "orientations",
            vec![DVec3::ZERO, DVec3::ONE, DVec3::X],
            vec![DVec3::X, DVec3::ZERO, DVec3::Y],
            2.0,
        )
        .unwrap();
        let (nodes, edges, colors) = glyphs.line_geometry();
        // zero-length arrow skipped
        assert_eq!(nodes.len(), 12);
        assert_eq!(edges.len(), 10);
        assert_eq!(colors.len(), 12);
        assert_eq!(edges[5], [6, 7]);
        // barbs sit behind the tip
        assert!(nodes[2].x < nodes[1].x);
    }

    #[test]
    fn test_mismatched_inputs() {
        assert!(ArrowGlyphs::new("o", vec![DVec3::ZERO], vec![], 1.0).is_err());
    }
}
