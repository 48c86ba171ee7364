//! Rendering backend for gempy-viewer-rs.
//!
//! This crate turns plots into pixels:
//! - color maps, norms and color parsing
//! - the [`Figure`] display list that 2D drawers push into
//! - hillshading of elevation rasters
//! - rasterization through `plotters` and PNG/JPEG output

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod color_maps;
pub mod error;
pub mod figure;
pub mod light_source;
pub mod raster;
pub mod screenshot;

pub use color_maps::{geo_model_colormap, parse_color, ColorMap, ColorMapRegistry, Norm};
pub use error::{RenderError, RenderResult};
pub use figure::{
    Axes, ContourFillPlot, ContourPlot, Figure, FillPlot, ImagePlot, Layer, LegendEntry, LinePlot,
    LineStyle, PlotElement, PlotType, QuiverPlot, ScatterPlot, TextPlot, MAX_AXES,
};
pub use light_source::LightSource;
pub use raster::{render, render_with_viewports, Viewport};
pub use screenshot::{image_from_raw, save_image, save_to_buffer};

// Re-export glam types for convenience
pub use glam::{Vec3, Vec4};
