//! Marching-squares isoline extraction on [`Image2D`] samples.
//!
//! Samples sit at pixel centres of the extent the image is drawn over, the
//! same convention an image layer uses, so contours line up with the image
//! they annotate.

#![allow(clippy::cast_precision_loss)]

use glam::DVec2;

use crate::image2d::Image2D;

/// A straight piece of an isoline in world coordinates.
pub type Segment = [DVec2; 2];

/// `n` evenly spaced levels from `min` to `max` inclusive.
#[must_use]
pub fn linear_levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..n)
            .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Levels for a contour plot of `image`, spanning its finite range.
#[must_use]
pub fn auto_levels(image: &Image2D, n: usize) -> Vec<f64> {
    image
        .finite_range()
        .map(|(lo, hi)| linear_levels(lo, hi, n))
        .unwrap_or_default()
}

/// World position of a (fractional) sample coordinate.
#[must_use]
pub fn sample_to_world(image: &Image2D, extent: [f64; 4], col: f64, row: f64) -> DVec2 {
    let dx = (extent[1] - extent[0]) / image.width().max(1) as f64;
    let dy = (extent[3] - extent[2]) / image.height().max(1) as f64;
    DVec2::new(extent[0] + (col + 0.5) * dx, extent[2] + (row + 0.5) * dy)
}

/// Extracts the isoline of `level` as unordered segments.
///
/// Cells touching a NaN sample are skipped. Saddle cells are resolved with
/// the cell-centre average.
#[must_use]
pub fn contour_segments(image: &Image2D, extent: [f64; 4], level: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    if image.width() < 2 || image.height() < 2 {
        return segments;
    }

    for row in 0..image.height() - 1 {
        for col in 0..image.width() - 1 {
            // corners counter-clockwise from the lower left
            let v = [
                image.get(col, row),
                image.get(col + 1, row),
                image.get(col + 1, row + 1),
                image.get(col, row + 1),
            ];
            if v.iter().any(|x| x.is_nan()) {
                continue;
            }
            let corners = [
                (col as f64, row as f64),
                ((col + 1) as f64, row as f64),
                ((col + 1) as f64, (row + 1) as f64),
                (col as f64, (row + 1) as f64),
            ];
            let mut case = 0u8;
            for (bit, value) in v.iter().enumerate() {
                if *value > level {
                    case |= 1 << bit;
                }
            }

            let edge_point = |edge: usize| {
                let a = edge;
                let b = (edge + 1) % 4;
                let t = interpolate(v[a], v[b], level);
                let c = corners[a].0 + (corners[b].0 - corners[a].0) * t;
                let r = corners[a].1 + (corners[b].1 - corners[a].1) * t;
                sample_to_world(image, extent, c, r)
            };
            let mut push = |e0: usize, e1: usize| segments.push([edge_point(e0), edge_point(e1)]);

            // edge e joins corner e and corner e + 1
            match case {
                1 | 14 => push(3, 0),
                2 | 13 => push(0, 1),
                3 | 12 => push(3, 1),
                4 | 11 => push(1, 2),
                6 | 9 => push(0, 2),
                7 | 8 => push(2, 3),
                5 | 10 => {
                    let centre = v.iter().sum::<f64>() / 4.0;
                    let centre_above = centre > level;
                    // corners 0 and 2 share a side in case 5
                    if (case == 5) == centre_above {
                        push(0, 1);
                        push(2, 3);
                    } else {
                        push(3, 0);
                        push(1, 2);
                    }
                }
                _ => {}
            }
        }
    }
    segments
}

fn interpolate(a: f64, b: f64, level: f64) -> f64 {
    let d = b - a;
    if d.abs() < f64::EPSILON {
        0.5
    } else {
        ((level - a) / d).clamp(0.0, 1.0)
    }
}
