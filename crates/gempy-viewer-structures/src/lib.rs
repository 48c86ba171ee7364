//! 3D scene structures for gempy-viewer-rs.
//!
//! This crate provides the objects a 3D scene of a geological model is made
//! of, each exportable as PLY:
//! - [`StructuredGrid`] with named cell arrays and an active scalar
//! - [`PointCloud`] for surface points
//! - [`ArrowGlyphs`] for orientations
//! - [`TriangleMesh`] for surfaces and topography
//! - [`CurveNetwork`] for contour lines
//! - [`ScalarBar`] describing the active color mapping

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod arrow_glyphs;
pub mod curve_network;
pub mod ply_export;
pub mod point_cloud;
pub mod quantity;
pub mod scalar_bar;
pub mod structure;
pub mod structured_grid;
pub mod triangle_mesh;

pub use arrow_glyphs::ArrowGlyphs;
pub use curve_network::CurveNetwork;
pub use ply_export::PlyBuilder;
pub use point_cloud::PointCloud;
pub use quantity::{ColorQuantity, ScalarQuantity};
pub use scalar_bar::ScalarBar;
pub use structure::Structure;
pub use structured_grid::StructuredGrid;
pub use triangle_mesh::TriangleMesh;
