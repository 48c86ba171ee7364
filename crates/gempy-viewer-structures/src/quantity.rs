//! Per-element data attached to structures.

use gempy_viewer_render::{ColorMap, ColorMapRegistry, Norm, RenderResult};
use glam::Vec3;

/// A named scalar array shown through a color map.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarQuantity {
    name: String,
    values: Vec<f64>,
    color_map: String,
    custom_map: Option<ColorMap>,
    range: (f64, f64),
}

impl ScalarQuantity {
    /// Creates a scalar quantity; the range defaults to the finite data range.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let range = match Norm::auto(&values) {
            Norm::Linear { vmin, vmax } => (vmin, vmax),
            Norm::Boundary { .. } => (0.0, 1.0),
        };
        Self {
            name: name.into(),
            values,
            color_map: "viridis".to_string(),
            custom_map: None,
            range,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn color_map(&self) -> &str {
        &self.color_map
    }

    /// Selects a registered color map by name.
    pub fn set_color_map(&mut self, name: impl Into<String>) -> &mut Self {
        self.color_map = name.into();
        self.custom_map = None;
        self
    }

    /// Uses a color map that is not in the registry, e.g. element colors.
    pub fn set_custom_color_map(&mut self, cmap: ColorMap) -> &mut Self {
        self.color_map.clone_from(&cmap.name);
        self.custom_map = Some(cmap);
        self
    }

    /// The color map to draw with.
    pub fn resolve_color_map(&self) -> RenderResult<ColorMap> {
        match &self.custom_map {
            Some(cmap) => Ok(cmap.clone()),
            None => ColorMapRegistry::new().require(&self.color_map),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.range = (min, max);
        self
    }

    /// Colors of every value through `cmap`; NaN maps to black.
    #[must_use]
    pub fn colors(&self, cmap: &ColorMap) -> Vec<Vec3> {
        let norm = Norm::Linear {
            vmin: self.range.0,
            vmax: self.range.1,
        };
        self.values
            .iter()
            .map(|v| norm.apply(*v).map_or(Vec3::ZERO, |t| cmap.sample(t)))
            .collect()
    }
}

/// Explicit per-element colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorQuantity {
    name: String,
    colors: Vec<Vec3>,
}

impl ColorQuantity {
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_range_and_colors() {
        let mut q = ScalarQuantity::new("id", vec![0.0, 1.0, f64::NAN, 2.0]);
        assert_eq!(q.range(), (0.0, 2.0));
        let cmap = ColorMap::new("bw", vec![Vec3::ZERO, Vec3::ONE]);
        let colors = q.colors(&cmap);
        assert_eq!(colors[0], Vec3::ZERO);
        assert_eq!(colors[3], Vec3::ONE);
        assert_eq!(colors[2], Vec3::ZERO);

        q.set_range(0.0, 4.0);
        assert!((q.colors(&cmap)[3].x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_color_map_resolution() {
        let mut q = ScalarQuantity::new("height", vec![0.0]);
        assert_eq!(q.resolve_color_map().unwrap().name, "viridis");
        q.set_color_map("no_such_map");
        assert!(q.resolve_color_map().is_err());
        q.set_custom_color_map(ColorMap::listed("geo_model", vec![Vec3::X]));
        assert_eq!(q.color_map(), "geo_model");
        assert_eq!(q.resolve_color_map().unwrap().colors, vec![Vec3::X]);
    }
}
