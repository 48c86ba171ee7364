//! Core data model for gempy-viewer-rs.
//!
//! This crate holds everything that does not depend on a drawing backend:
//! - [`GeoModel`] with its grids, input data and [`Solutions`]
//! - the slice selector ([`slice_cross_section`]) and the plane projections
//!   used to place 3D data on a 2D plot
//! - the image compositor that cuts planes out of flat solution arrays
//! - marching-squares contouring and plot configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Show flags are a set of independent switches
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod compositor;
pub mod contour;
pub mod error;
pub mod grid;
pub mod image2d;
pub mod model;
pub mod options;
pub mod projection;
pub mod slicer;
pub mod solutions;

pub use compositor::{elevation_image, section_image, slice_block, topography_image};
pub use contour::{auto_levels, contour_segments, linear_levels, Segment};
pub use error::{Result, ViewerError};
pub use grid::{Direction, Grid, RegularGrid, Section, Sections, Topography};
pub use image2d::Image2D;
pub use model::{GeoModel, Orientation, StructuralElement, StructuralFrame, SurfacePoint, Transform};
pub use options::{
    DataToShow, Plot2DOptions, Plot3DOptions, ScalarDataType, ShowFlags, TopographyDataType,
    TopographyOptions,
};
pub use projection::{PlaneProjection, SectionProjector, DEFAULT_TOPO_COMP};
pub use slicer::{
    plane_location, resolve_cell, section_endpoints, slice_cross_section, AxisLabels, CellNumber,
    IndexSelect, SlicerData,
};
pub use solutions::{GridSolution, Solutions, SurfaceMesh};

// Re-export glam types for convenience
pub use glam::{DMat2, DVec2, DVec3};
