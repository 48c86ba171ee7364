//! Color map system.

use std::collections::HashMap;

use glam::{Vec3, Vec4};

use crate::error::{RenderError, RenderResult};

/// A color map for mapping scalar values to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
    /// Listed maps pick the nearest sample instead of interpolating.
    pub discrete: bool,
}

impl ColorMap {
    /// Creates a new continuous color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
            discrete: false,
        }
    }

    /// Creates a listed color map: one flat color per bin.
    pub fn listed(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
            discrete: true,
        }
    }

    /// Listed color map from hex strings such as `#9f0052`.
    pub fn from_hex(name: impl Into<String>, hex: &[&str]) -> RenderResult<Self> {
        let colors = hex
            .iter()
            .map(|h| parse_color(h).map(Vec4::truncate))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(Self::listed(name, colors))
    }

    /// Continuous map from unevenly spaced `(position, color)` stops,
    /// resampled to `n` even samples.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_stops(name: impl Into<String>, stops: &[(f32, Vec3)], n: usize) -> Self {
        let colors = (0..n.max(2))
            .map(|i| {
                let t = i as f32 / (n.max(2) - 1) as f32;
                let upper = stops
                    .iter()
                    .position(|(p, _)| *p >= t)
                    .unwrap_or(stops.len().saturating_sub(1));
                if upper == 0 {
                    return stops.first().map_or(Vec3::ZERO, |s| s.1);
                }
                let (p0, c0) = stops[upper - 1];
                let (p1, c1) = stops[upper];
                let span = (p1 - p0).max(f32::EPSILON);
                c0.lerp(c1, ((t - p0) / span).clamp(0.0, 1.0))
            })
            .collect();
        Self::new(name, colors)
    }

    /// Number of color samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Samples the color map at a given value (0 to 1).
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);

        if self.colors.is_empty() {
            return Vec3::ZERO;
        }

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        if self.discrete {
            let n = self.colors.len();
            let idx = ((t * n as f32).floor() as usize).min(n - 1);
            return self.colors[idx];
        }

        let n = self.colors.len() - 1;
        let idx = (t * n as f32).floor() as usize;
        let idx = idx.min(n - 1);
        let frac = t * n as f32 - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Same map with the sample order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut colors = self.colors.clone();
        colors.reverse();
        Self {
            name: format!("{}_r", self.name),
            colors,
            discrete: self.discrete,
        }
    }
}

/// Maps data values to the `[0, 1]` color map domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Norm {
    /// Linear between `vmin` and `vmax`, clipped.
    Linear { vmin: f64, vmax: f64 },
    /// Bin index of the value among increasing boundaries; `n + 1`
    /// boundaries define `n` bins, each mapped to the centre of its
    /// color.
    Boundary { boundaries: Vec<f64> },
}

impl Norm {
    /// Linear norm over the finite range of `values`.
    #[must_use]
    pub fn auto(values: &[f64]) -> Self {
        let (vmin, vmax) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if vmin > vmax {
            return Norm::Linear {
                vmin: 0.0,
                vmax: 1.0,
            };
        }
        Norm::Linear { vmin, vmax }
    }

    /// Normalized value, `None` for NaN.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn apply(&self, value: f64) -> Option<f32> {
        if value.is_nan() {
            return None;
        }
        match self {
            Norm::Linear { vmin, vmax } => {
                let span = vmax - vmin;
                if span.abs() < f64::EPSILON {
                    return Some(0.5);
                }
                Some(((value - vmin) / span).clamp(0.0, 1.0) as f32)
            }
            Norm::Boundary { boundaries } => {
                let bins = boundaries.len().saturating_sub(1);
                if bins == 0 {
                    return Some(0.0);
                }
                let bin = boundaries[1..]
                    .iter()
                    .position(|b| value < *b)
                    .unwrap_or(bins - 1);
                Some(((bin as f64 + 0.5) / bins as f64) as f32)
            }
        }
    }
}

/// Listed map of element colors plus the norm sending element id `k`
/// (1-based) to color `k - 1`.
pub fn geo_model_colormap(colors: &[&str]) -> RenderResult<(ColorMap, Norm)> {
    let cmap = ColorMap::from_hex("geo_model", colors)?;
    #[allow(clippy::cast_precision_loss)]
    let boundaries = (0..=colors.len()).map(|i| i as f64 + 0.5).collect();
    Ok((cmap, Norm::Boundary { boundaries }))
}

/// Parses `#rrggbb`, `#rrggbbaa`, `#rgb` or a basic color name into RGBA.
pub fn parse_color(s: &str) -> RenderResult<Vec4> {
    let named = match s.trim().to_ascii_lowercase().as_str() {
        "k" | "black" => Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
        "w" | "white" => Some(Vec4::ONE),
        "r" | "red" => Some(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        "g" | "green" => Some(Vec4::new(0.0, 0.5, 0.0, 1.0)),
        "b" | "blue" => Some(Vec4::new(0.0, 0.0, 1.0, 1.0)),
        "gray" | "grey" => Some(Vec4::new(0.5, 0.5, 0.5, 1.0)),
        _ => None,
    };
    if let Some(c) = named {
        return Ok(c);
    }

    let invalid = || RenderError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    let channel = |i: usize, width: usize| -> RenderResult<f32> {
        let digits = hex.get(i * width..(i + 1) * width).ok_or_else(invalid)?;
        let v = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let v = if width == 1 { v * 17 } else { v };
        Ok(f32::from(v) / 255.0)
    };
    match hex.len() {
        3 => Ok(Vec4::new(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 1.0)),
        6 => Ok(Vec4::new(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 1.0)),
        8 => Ok(Vec4::new(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            channel(3, 2)?,
        )),
        _ => Err(invalid()),
    }
}

/// Registry for managing color maps.
#[derive(Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // Viridis color map
        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        self.register(ColorMap::new(
            "autumn",
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
        ));

        self.register(ColorMap::new("gray", vec![Vec3::ZERO, Vec3::ONE]));

        // Terrain: sea blue, greens, sand, brown, snow
        self.register(ColorMap::from_stops(
            "terrain",
            &[
                (0.0, Vec3::new(0.2, 0.2, 0.6)),
                (0.15, Vec3::new(0.0, 0.6, 1.0)),
                (0.25, Vec3::new(0.0, 0.8, 0.4)),
                (0.5, Vec3::new(1.0, 1.0, 0.6)),
                (0.75, Vec3::new(0.5, 0.36, 0.33)),
                (1.0, Vec3::new(1.0, 1.0, 1.0)),
            ],
            21,
        ));
    }

    /// Registers a color map.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Gets a color map by name, or [`RenderError::UnknownColorMap`].
    pub fn require(&self, name: &str) -> RenderResult<ColorMap> {
        self.get(name)
            .cloned()
            .ok_or_else(|| RenderError::UnknownColorMap(name.to_string()))
    }

    /// Returns all color map names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.color_maps.keys().map(String::as_str)
    }
}
