//! 2D drawers.
//!
//! A drawer reads one kind of model data, cuts the plane shown by an axes
//! and pushes plot elements onto it. Drawers never render anything.

pub mod contacts;
pub mod data;
pub mod solutions;
pub mod topography;
pub mod topology;
pub mod traces;

use gempy_viewer_core::solutions::series;
use gempy_viewer_core::{
    section_image, slice_block, topography_image, GeoModel, GridSolution, Image2D, Result,
    Solutions, ViewerError,
};
use gempy_viewer_render::{parse_color, Axes, Figure};
use glam::Vec4;

use crate::plot_2d::{SectionData2D, SectionKind};

pub use contacts::draw_contacts;
pub use data::draw_data;
pub use solutions::{draw_block, draw_lith, draw_regular_grid, draw_scalar_field, draw_values};
pub use topography::draw_topography;
pub use topology::draw_topology;
pub use traces::draw_section_traces;

/// A solution array that can be cut into a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Lith,
    ScalarField(usize),
    Values(usize),
    Block(usize),
}

impl Field {
    fn describe(self) -> &'static str {
        match self {
            Field::Lith => "lithology block",
            Field::ScalarField(_) => "scalar field",
            Field::Values(_) => "values matrix",
            Field::Block(_) => "block matrix",
        }
    }
}

/// Whether `field` has data for the plane of `kind`.
#[must_use]
pub fn has_field(model: &GeoModel, kind: &SectionKind, field: Field) -> bool {
    let Some(sol) = &model.solutions else {
        return false;
    };
    let on_grid = |g: &GridSolution| match field {
        Field::Lith => !g.lith.is_empty(),
        Field::ScalarField(_) => g.scalar_fields.iter().any(|s| !s.is_empty()),
        Field::Values(_) | Field::Block(_) => false,
    };
    match kind {
        SectionKind::Orthogonal(_) => match field {
            Field::Lith => sol.has_lith_block(),
            Field::ScalarField(_) => sol.has_scalar_field(),
            Field::Values(_) => sol.has_values(),
            Field::Block(_) => sol.has_block(),
        },
        SectionKind::Section(_) => sol.sections.as_ref().is_some_and(on_grid),
        SectionKind::Topography => sol.geological_map.as_ref().is_some_and(on_grid),
    }
}

pub(crate) fn require_solutions(model: &GeoModel) -> Result<&Solutions> {
    model
        .solutions
        .as_ref()
        .ok_or_else(|| ViewerError::NotComputed("solutions".to_string()))
}

/// Scalar fields of every series on the plane of `kind`.
pub(crate) fn scalar_fields<'a>(model: &'a GeoModel, kind: &SectionKind) -> Result<&'a [Vec<f64>]> {
    let sol = require_solutions(model)?;
    Ok(match kind {
        SectionKind::Orthogonal(_) => &sol.scalar_field_matrix,
        SectionKind::Section(_) => &sol.sections()?.scalar_fields,
        SectionKind::Topography => &sol.geological_map()?.scalar_fields,
    })
}

fn grid_field(g: &GridSolution, field: Field) -> Result<&[f64]> {
    match field {
        Field::Lith => Ok(&g.lith),
        Field::ScalarField(n) => series(&g.scalar_fields, n, field.describe()),
        Field::Values(_) | Field::Block(_) => Err(ViewerError::NotImplemented(
            "values and block on named sections or the geological map",
        )),
    }
}

/// Cuts `field` on the plane of `section`; returns the image and the
/// world extent it covers.
pub fn plane_image(
    model: &GeoModel,
    section: &SectionData2D,
    field: Field,
) -> Result<(Image2D, [f64; 4])> {
    let sol = require_solutions(model)?;
    let what = field.describe();

    match &section.kind {
        SectionKind::Orthogonal(slicer) => {
            let block = match field {
                Field::Lith => sol.lith_block.as_slice(),
                Field::ScalarField(n) => series(&sol.scalar_field_matrix, n, what)?,
                Field::Values(n) => series(&sol.values_matrix, n, what)?,
                Field::Block(n) => series(&sol.block_matrix, n, what)?,
            };
            let resolution = model.grid.regular_grid.resolution();
            Ok((slice_block(block, resolution, slicer, what)?, slicer.extent))
        }
        SectionKind::Section(name) => {
            let values = grid_field(sol.sections()?, field)?;
            let image = section_image(values, &model.grid.sections, name)?;
            Ok((image, section.extent))
        }
        SectionKind::Topography => {
            let topography = model.grid.topography()?;
            let values = grid_field(sol.geological_map()?, field)?;
            let image = topography_image(values, topography)?;
            Ok((image, topography.node_extent()))
        }
    }
}

/// Axes of a section, or an error if the figure lost them.
pub(crate) fn axes_of<'a>(figure: &'a mut Figure, section: &SectionData2D) -> Result<&'a mut Axes> {
    figure
        .axes_at_mut(section.axes_index)
        .ok_or_else(|| ViewerError::RenderError(format!("axes {} not found", section.axes_index)))
}

/// Parses a list of color strings.
pub(crate) fn parse_colors<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Vec4>> {
    colors
        .iter()
        .map(|c| parse_color(c.as_ref()).map_err(ViewerError::from))
        .collect()
}
