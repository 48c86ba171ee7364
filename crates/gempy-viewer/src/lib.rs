//! gempy-viewer-rs: plotting for implicit geological models.
//!
//! Draws cross-sections, cell slices and geological maps of a [`GeoModel`]
//! into a [`Figure`] that is rasterized to PNG, and builds the 3D scene of a
//! model as structures that export to PLY.
//!
//! # Quick Start
//!
//! ```no_run
//! use gempy_viewer::*;
//!
//! fn main() -> Result<()> {
//!     let model = GeoModel::from_json_file("model.json")?;
//!
//!     // Lithology, contacts and input data on the middle y slice
//!     let plot = plot_2d(&model, &Plot2DOptions::default())?;
//!     plot.save_png("section.png")?;
//!
//!     // Two named sections and the map view
//!     let options = Plot2DOptions {
//!         section_names: vec!["section_1".into(), "section_2".into(), "topography".into()],
//!         show: ShowFlags { topography: true, ..ShowFlags::default() },
//!         ..Plot2DOptions::default()
//!     };
//!     plot_2d(&model, &options)?.save_png("sections.png")?;
//!
//!     // 3D scene
//!     plot_3d(&model, &Plot3DOptions::default())?.export_ply("scene")?;
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod drawers;
pub mod plot_2d;
pub mod plot_3d;
pub mod vista;

pub use gempy_viewer_core::{
    CellNumber, DataToShow, Direction, GeoModel, Grid, GridSolution, Orientation, Plot2DOptions,
    Plot3DOptions, RegularGrid, Result, ScalarDataType, Section, ShowFlags, Solutions,
    StructuralElement, StructuralFrame, SurfaceMesh, SurfacePoint, Topography, TopographyDataType,
    TopographyOptions, Transform, ViewerError,
};
pub use gempy_viewer_render::{Axes, Figure, Norm, PlotElement, PlotType, MAX_AXES};
pub use gempy_viewer_structures::{ScalarBar, Structure, StructuredGrid};

pub use drawers::Field;
pub use plot_2d::{
    plot_2d, plot_section_traces, plot_sections, plot_topology, Plot2D, SectionData2D,
    SectionKind, SectionRequest, TOPOGRAPHY_SECTION,
};
pub use plot_3d::plot_3d;
pub use vista::GemPyToVista;

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3};
