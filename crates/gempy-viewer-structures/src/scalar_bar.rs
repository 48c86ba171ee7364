//! Scalar bar describing the active color mapping of the scene.

use gempy_viewer_core::StructuralFrame;

/// Title, label count and range of a scalar bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBar {
    pub title: String,
    pub n_labels: usize,
    pub range: (f64, f64),
    pub color_map: String,
}

impl ScalarBar {
    pub fn new(title: impl Into<String>, n_labels: usize, range: (f64, f64)) -> Self {
        Self {
            title: title.into(),
            n_labels,
            range,
            color_map: "viridis".to_string(),
        }
    }

    /// Lithology bar: one label per element over the 0-based ids.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lithology(frame: &StructuralFrame) -> Self {
        let ids = frame.elements_ids();
        let min = ids.iter().min().copied().unwrap_or(1) as f64;
        let max = ids.iter().max().copied().unwrap_or(1) as f64;
        Self {
            title: "id".to_string(),
            n_labels: frame.number_of_elements(),
            range: (min - 1.0, max - 1.0),
            color_map: "geo_model".to_string(),
        }
    }

    /// Values at the label positions, evenly spaced over the range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn label_values(&self) -> Vec<f64> {
        let (lo, hi) = self.range;
        match self.n_labels {
            0 => Vec::new(),
            1 => vec![lo],
            n => (0..n)
                .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gempy_viewer_core::StructuralElement;

    #[test]
    fn test_lithology_bar() {
        let frame = StructuralFrame::new(vec![
            StructuralElement::new("a", "#ff0000", 1),
            StructuralElement::new("b", "#00ff00", 2),
            StructuralElement::new("basement", "#0000ff", 3),
        ]);
        let bar = ScalarBar::lithology(&frame);
        assert_eq!(bar.title, "id");
        assert_eq!(bar.n_labels, 3);
        assert_eq!(bar.range, (0.0, 2.0));
        assert_eq!(bar.label_values(), vec![0.0, 1.0, 2.0]);
    }
}
