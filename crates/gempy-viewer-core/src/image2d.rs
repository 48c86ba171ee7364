//! A 2D array of scalar samples in image orientation.

use crate::error::{Result, ViewerError};

/// A row-major grid of scalar samples.
///
/// Row 0 is the lower edge of the plot (`origin = lower`), column 0 the left
/// edge. Samples are cell-centred over the extent they are drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct Image2D {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl Image2D {
    /// Creates an image from row-major values.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != width * height {
            return Err(ViewerError::SizeMismatch {
                expected: width * height,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Builds an image by evaluating `f(col, row)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                values.push(f(col, row));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
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

    /// Sample at `(col, row)`.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.width + col]
    }

    /// Range of the finite samples, `None` if there are none.
    #[must_use]
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        (lo <= hi).then_some((lo, hi))
    }

    /// Applies `f` to every sample.
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Bilinear sample at fractional pixel-centre coordinates, clamped to the
    /// image. NaN if any contributing sample is NaN.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample_bilinear(&self, col: f64, row: f64) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        let c = col.clamp(0.0, (self.width - 1) as f64);
        let r = row.clamp(0.0, (self.height - 1) as f64);
        let c0 = c.floor() as usize;
        let r0 = r.floor() as usize;
        let c1 = (c0 + 1).min(self.width - 1);
        let r1 = (r0 + 1).min(self.height - 1);
        let tc = c - c0 as f64;
        let tr = r - r0 as f64;
        let bottom = self.get(c0, r0) * (1.0 - tc) + self.get(c1, r0) * tc;
        let top = self.get(c0, r1) * (1.0 - tc) + self.get(c1, r1) * tc;
        bottom * (1.0 - tr) + top * tr
    }

    /// Central-difference gradient `(d/dcol, d/drow)` at a sample, one-sided
    /// at the borders.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gradient(&self, col: usize, row: usize) -> (f64, f64) {
        let diff = |lo: f64, hi: f64, span: usize| {
            if span == 0 {
                0.0
            } else {
                (hi - lo) / span as f64
            }
        };
        let c0 = col.saturating_sub(1);
        let c1 = (col + 1).min(self.width - 1);
        let r0 = row.saturating_sub(1);
        let r1 = (row + 1).min(self.height - 1);
        (
            diff(self.get(c0, row), self.get(c1, row), c1 - c0),
            diff(self.get(col, r0), self.get(col, r1), r1 - r0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout() {
        #[allow(clippy::cast_precision_loss)]
        let img = Image2D::from_fn(3, 2, |c, r| (r * 10 + c) as f64);
        assert_eq!(img.values(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(img.get(2, 1), 12.0);
        assert_eq!(img.finite_range(), Some((0.0, 12.0)));
    }

    #[test]
    fn test_size_mismatch() {
        assert!(matches!(
            Image2D::new(2, 2, vec![0.0; 5]),
            Err(ViewerError::SizeMismatch {
                expected: 4,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_bilinear_and_gradient() {
        #[allow(clippy::cast_precision_loss)]
        let img = Image2D::from_fn(4, 4, |c, r| 2.0 * c as f64 + r as f64);
        assert!((img.sample_bilinear(1.5, 2.5) - 5.5).abs() < 1e-12);
        assert_eq!(img.gradient(0, 0), (2.0, 1.0));
        assert_eq!(img.gradient(2, 2), (2.0, 1.0));
    }

    #[test]
    fn test_finite_range_ignores_nan() {
        let img = Image2D::new(2, 1, vec![f64::NAN, 3.0]).unwrap();
        assert_eq!(img.finite_range(), Some((3.0, 3.0)));
        let empty = Image2D::new(1, 1, vec![f64::NAN]).unwrap();
        assert_eq!(empty.finite_range(), None);
    }
}
