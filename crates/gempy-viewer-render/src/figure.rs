//! Figure display list.
//!
//! A [`Figure`] holds a grid of [`Axes`]; every axes keeps the primitives
//! drawn on it as [`PlotElement`]s tagged with a z-order. Nothing is drawn
//! until the figure is rasterized, so drawers only ever push elements.

use gempy_viewer_core::contour::{contour_segments, Segment};
use gempy_viewer_core::{DVec2, Image2D};
use glam::Vec4;

use crate::color_maps::{ColorMap, Norm};

/// Maximum number of axes a figure holds.
pub const MAX_AXES: usize = 10;

/// An image layer drawn over a world-space extent.
#[derive(Debug, Clone)]
pub struct ImagePlot {
    pub image: Image2D,
    /// `[x_min, x_max, y_min, y_max]`.
    pub extent: [f64; 4],
    pub cmap: ColorMap,
    pub norm: Norm,
    pub alpha: f32,
}

/// Isolines, one color per level.
#[derive(Debug, Clone)]
pub struct ContourPlot {
    pub levels: Vec<f64>,
    /// Segments of each level, parallel to `levels`.
    pub segments: Vec<Vec<Segment>>,
    pub colors: Vec<Vec4>,
    pub line_width: f32,
}

impl ContourPlot {
    /// Contours `image` at `levels`; colors cycle when there are fewer
    /// colors than levels.
    #[must_use]
    pub fn from_image(
        image: &Image2D,
        extent: [f64; 4],
        levels: &[f64],
        colors: Vec<Vec4>,
    ) -> Self {
        let segments = levels
            .iter()
            .map(|&level| contour_segments(image, extent, level))
            .collect();
        Self {
            levels: levels.to_vec(),
            segments,
            colors,
            line_width: 1.5,
        }
    }

    /// Contours colored by sampling `cmap` evenly across the levels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_cmap(image: &Image2D, extent: [f64; 4], levels: &[f64], cmap: &ColorMap) -> Self {
        let n = levels.len().max(2) - 1;
        let colors = (0..levels.len())
            .map(|i| cmap.sample(i as f32 / n as f32).extend(1.0))
            .collect();
        Self::from_image(image, extent, levels, colors)
    }

    /// Color of level `i`.
    #[must_use]
    pub fn color(&self, i: usize) -> Vec4 {
        if self.colors.is_empty() {
            return Vec4::new(0.0, 0.0, 0.0, 1.0);
        }
        self.colors[i % self.colors.len()]
    }

    /// Total number of segments over all levels.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Filled bands between consecutive levels.
#[derive(Debug, Clone)]
pub struct ContourFillPlot {
    pub image: Image2D,
    pub extent: [f64; 4],
    pub levels: Vec<f64>,
    pub cmap: ColorMap,
    pub alpha: f32,
}

impl ContourFillPlot {
    /// Band index of a value, `None` outside the levels.
    #[must_use]
    pub fn band(&self, value: f64) -> Option<usize> {
        let (first, last) = (self.levels.first()?, self.levels.last()?);
        if value.is_nan() || value < *first || value > *last || self.levels.len() < 2 {
            return None;
        }
        let idx = self.levels[1..]
            .iter()
            .position(|l| value <= *l)
            .unwrap_or(self.levels.len() - 2);
        Some(idx)
    }

    /// Color of a band, sampled at the band centre of the color map.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn band_color(&self, band: usize) -> Vec4 {
        let bands = self.levels.len().saturating_sub(1).max(1);
        let t = if bands == 1 {
            0.5
        } else {
            band as f32 / (bands - 1) as f32
        };
        self.cmap.sample(t).extend(self.alpha)
    }
}

/// Marker scatter.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub points: Vec<DVec2>,
    pub colors: Vec<Vec4>,
    /// Marker area in points², as in the usual scatter convention.
    pub size: f32,
    pub edge_color: Option<Vec4>,
}

/// Arrows anchored at their tail.
#[derive(Debug, Clone)]
pub struct QuiverPlot {
    pub origins: Vec<DVec2>,
    pub vectors: Vec<DVec2>,
    pub colors: Vec<Vec4>,
    /// A vector of unit length spans `1 / scale` of the shorter axes side.
    pub scale: f32,
    pub edge_color: Option<Vec4>,
}

/// A filled polygon.
#[derive(Debug, Clone)]
pub struct FillPlot {
    pub polygon: Vec<DVec2>,
    pub color: Vec4,
}

/// Line style of a [`LinePlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// A polyline.
#[derive(Debug, Clone)]
pub struct LinePlot {
    pub points: Vec<DVec2>,
    pub color: Vec4,
    pub width: f32,
    pub style: LineStyle,
    pub label: Option<String>,
}

/// A text label centred on a data position.
#[derive(Debug, Clone)]
pub struct TextPlot {
    pub position: DVec2,
    pub text: String,
    pub color: Vec4,
    /// Font size in pixels.
    pub size: f32,
}

/// A plot element that can be any type of plot.
#[derive(Debug, Clone)]
pub enum PlotElement {
    Image(ImagePlot),
    Contour(ContourPlot),
    ContourFill(ContourFillPlot),
    Scatter(ScatterPlot),
    Quiver(QuiverPlot),
    Fill(FillPlot),
    Line(LinePlot),
    Text(TextPlot),
}

/// Type of plot, for inspection and legend rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotType {
    Image,
    Contour,
    ContourFill,
    Scatter,
    Quiver,
    Fill,
    Line,
    Text,
}

impl PlotElement {
    #[must_use]
    pub fn plot_type(&self) -> PlotType {
        match self {
            PlotElement::Image(_) => PlotType::Image,
            PlotElement::Contour(_) => PlotType::Contour,
            PlotElement::ContourFill(_) => PlotType::ContourFill,
            PlotElement::Scatter(_) => PlotType::Scatter,
            PlotElement::Quiver(_) => PlotType::Quiver,
            PlotElement::Fill(_) => PlotType::Fill,
            PlotElement::Line(_) => PlotType::Line,
            PlotElement::Text(_) => PlotType::Text,
        }
    }
}

/// A plot element with its drawing order.
#[derive(Debug, Clone)]
pub struct Layer {
    pub zorder: f32,
    pub element: PlotElement,
}

/// Legend entry for a plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Vec4,
    pub plot_type: PlotType,
}

/// A single subplot.
#[derive(Debug, Clone)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// `[x_min, x_max, y_min, y_max]` in data units.
    pub limits: [f64; 4],
    /// Screen length of a y unit relative to an x unit.
    pub aspect: f64,
    pub legend: Vec<LegendEntry>,
    layers: Vec<Layer>,
}

impl Axes {
    /// Creates empty axes spanning `limits`.
    #[must_use]
    pub fn new(limits: [f64; 4]) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            limits,
            aspect: 1.0,
            legend: Vec::new(),
            layers: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_labels(&mut self, x: impl Into<String>, y: impl Into<String>) -> &mut Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn set_aspect(&mut self, aspect: f64) -> &mut Self {
        self.aspect = aspect;
        self
    }

    /// Pushes an element with its z-order.
    pub fn add(&mut self, zorder: f32, element: PlotElement) -> &mut Self {
        log::debug!("axes: add {:?} at zorder {zorder}", element.plot_type());
        self.layers.push(Layer { zorder, element });
        self
    }

    /// Replaces the legend.
    pub fn set_legend(&mut self, entries: Vec<LegendEntry>) -> &mut Self {
        self.legend = entries;
        self
    }

    /// Appends one legend entry.
    pub fn add_legend_entry(&mut self, entry: LegendEntry) -> &mut Self {
        self.legend.push(entry);
        self
    }

    /// Layers in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers sorted by z-order; equal z-orders keep insertion order.
    #[must_use]
    pub fn sorted_layers(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.iter().collect();
        layers.sort_by(|a, b| a.zorder.total_cmp(&b.zorder));
        layers
    }

    /// Number of layers of the given type.
    #[must_use]
    pub fn count(&self, plot_type: PlotType) -> usize {
        self.layers
            .iter()
            .filter(|l| l.element.plot_type() == plot_type)
            .count()
    }

    /// Removes every layer, keeping limits and labels.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.legend.clear();
    }

    /// Width over height of the data box on screen.
    #[must_use]
    pub fn box_aspect(&self) -> f64 {
        let w = (self.limits[1] - self.limits[0]).abs();
        let h = (self.limits[3] - self.limits[2]).abs() * self.aspect;
        if h <= 0.0 {
            1.0
        } else {
            w / h
        }
    }
}

/// A figure: a grid of axes on a canvas.
#[derive(Debug, Clone)]
pub struct Figure {
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub cols: usize,
    pub background_color: Vec4,
    is_legend: bool,
    axes: Vec<Axes>,
}

impl Figure {
    /// Creates an empty figure with a `rows × cols` subplot grid.
    #[must_use]
    pub fn new(width: u32, height: u32, rows: usize, cols: usize) -> Self {
        Self {
            width,
            height,
            rows: rows.max(1),
            cols: cols.max(1),
            background_color: Vec4::ONE,
            is_legend: false,
            axes: Vec::new(),
        }
    }

    /// Adds axes in the next free grid cell and returns their index.
    pub fn add_axes(&mut self, axes: Axes) -> usize {
        self.axes.push(axes);
        self.axes.len() - 1
    }

    #[must_use]
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    #[must_use]
    pub fn axes_at(&self, index: usize) -> Option<&Axes> {
        self.axes.get(index)
    }

    pub fn axes_at_mut(&mut self, index: usize) -> Option<&mut Axes> {
        self.axes.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Whether a data legend was already placed on one of the axes.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.is_legend
    }

    /// Records that a data legend was placed; later axes skip theirs.
    pub fn mark_legend(&mut self) -> &mut Self {
        self.is_legend = true;
        self
    }

    /// Grid `(row, col)` of axes `index`, row-major.
    #[must_use]
    pub fn grid_position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}
