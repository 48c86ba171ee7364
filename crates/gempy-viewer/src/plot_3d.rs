//! 3D scene construction.

use gempy_viewer_core::{
    GeoModel, Plot3DOptions, Result, ScalarDataType, Solutions, StructuralFrame,
    TopographyDataType, ViewerError,
};
use gempy_viewer_render::{parse_color, ColorMap};
use gempy_viewer_structures::{
    ArrowGlyphs, CurveNetwork, PointCloud, ScalarBar, StructuredGrid, TriangleMesh,
};
use glam::Vec3;

use crate::drawers::require_solutions;
use crate::vista::GemPyToVista;

const CONTOUR_LEVELS: usize = 10;

fn rgb(colors: Vec<&str>) -> Result<Vec<Vec3>> {
    colors
        .into_iter()
        .map(|c| parse_color(c).map(|c| c.truncate()).map_err(ViewerError::from))
        .collect()
}

fn element_colors(frame: &StructuralFrame) -> Result<Vec<Vec3>> {
    rgb(frame.elements_colors())
}

/// Listed map of element colors over the 0-based lithology ids.
fn lithology_color_map(frame: &StructuralFrame) -> Result<ColorMap> {
    Ok(ColorMap::listed("geo_model", element_colors(frame)?))
}

/// Adds the arrays of `data_type` to the structured grid of the scene,
/// creating the grid on first use.
///
/// Lithology becomes `id` (0-based), the scalar field of series `e`
/// `sf_<e>` and its values `values_<e>`.
#[allow(clippy::cast_precision_loss)]
pub fn plot_structured_grid(
    vista: &mut GemPyToVista,
    model: &GeoModel,
    data_type: ScalarDataType,
) -> Result<()> {
    let sol = require_solutions(model)?;
    let grid = vista
        .regular_grid
        .get_or_insert_with(|| StructuredGrid::new("regular_grid", &model.grid.regular_grid));

    let lith = matches!(data_type, ScalarDataType::Lithology | ScalarDataType::All);
    let scalar = matches!(data_type, ScalarDataType::ScalarField | ScalarDataType::All);
    let values = matches!(data_type, ScalarDataType::Values | ScalarDataType::All);

    if lith {
        if !sol.has_lith_block() {
            return Err(ViewerError::NotComputed("lithology block".to_string()));
        }
        let ids = sol.lith_block.iter().map(|v| v - 1.0).collect();
        let n = model.structural_frame.number_of_elements().max(1);
        grid.add_scalar_array("id", ids)?;
        if let Some(id) = grid.array_mut("id") {
            id.set_custom_color_map(lithology_color_map(&model.structural_frame)?)
                .set_range(0.0, (n - 1) as f64);
        }
    }
    if scalar {
        for (e, field) in sol.scalar_field_matrix.iter().enumerate() {
            grid.add_scalar_array(format!("sf_{e}"), field.clone())?;
        }
    }
    if values {
        for (e, field) in sol.values_matrix.iter().enumerate() {
            grid.add_scalar_array(format!("values_{e}"), field.clone())?;
        }
    }
    log::debug!("structured grid arrays: {:?}", grid.array_names());
    Ok(())
}

/// Surface points as a point cloud with `id` scalars and element colors,
/// orientations as arrows `arrow_size` percent of the shortest model side
/// long.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn plot_data(
    vista: &mut GemPyToVista,
    model: &GeoModel,
    arrow_size: f64,
    point_size: f64,
) -> Result<()> {
    let mut points = PointCloud::new(
        "surface_points",
        model.surface_points.iter().map(|p| p.position).collect(),
    );
    points
        .add_scalar_quantity("id", model.surface_points.iter().map(|p| p.id as f64).collect())?
        .add_color_quantity("element", rgb(model.surface_points_colors())?)?
        .set_point_size(point_size as f32);
    vista.surface_points = Some(points);

    let factor = arrow_size * model.grid.regular_grid.min_extent_range() / 100.0;
    let mut arrows = ArrowGlyphs::new(
        "orientations",
        model.orientations.iter().map(|o| o.position).collect(),
        model.orientations.iter().map(|o| o.gradient).collect(),
        factor,
    )?;
    arrows.set_colors(rgb(model.orientations_colors())?)?;
    vista.orientations = Some(arrows);

    log::debug!(
        "3D data: {} surface points, {} orientations, arrow factor {factor}",
        model.surface_points.len(),
        model.orientations.len()
    );
    Ok(())
}

/// Topography as a triangulated raster colored by `data_type`, with
/// optional white height contours.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plot_topography_3d(
    vista: &mut GemPyToVista,
    model: &GeoModel,
    data_type: TopographyDataType,
    contours: bool,
) -> Result<()> {
    let topography = model.grid.topography()?;
    let mut mesh = TriangleMesh::from_topography("topography", topography)?;

    match data_type {
        TopographyDataType::Geomap => {
            let lith = &require_solutions(model)?.geological_map()?.lith;
            if lith.is_empty() {
                return Err(ViewerError::NotComputed("geological map".to_string()));
            }
            let palette = element_colors(&model.structural_frame)?;
            let colors = lith
                .iter()
                .map(|id| {
                    let index = (id.round() - 1.0).max(0.0) as usize;
                    palette.get(index).copied().unwrap_or(Vec3::ZERO)
                })
                .collect();
            mesh.add_color_quantity("geological_map", colors)?;
        }
        TopographyDataType::Topography => {
            mesh.add_scalar_quantity("height", topography.elevation().to_vec())?;
            if let Some(height) = mesh.scalar_quantity_mut() {
                height.set_color_map("terrain");
            }
        }
        TopographyDataType::Scalars => {
            return Err(ViewerError::NotImplemented("scalar field colors on the 3D topography"));
        }
    }
    vista.topography = Some(mesh);

    if contours {
        let mut lines =
            CurveNetwork::from_height_contours("topography_contours", topography, CONTOUR_LEVELS)?;
        lines.set_color(Vec3::ONE);
        vista.topography_contours = Some(lines);
    }
    Ok(())
}

/// One triangle mesh per structural element with a non-empty surface.
pub fn plot_surfaces(vista: &mut GemPyToVista, model: &GeoModel) -> Result<()> {
    let frame = &model.structural_frame;
    for surface in require_solutions(model)?.surfaces.iter().filter(|s| !s.is_empty()) {
        let mut mesh = TriangleMesh::new(
            surface.element.clone(),
            surface.vertices.clone(),
            surface.edges.clone(),
        )?;
        let color = frame
            .elements()
            .iter()
            .find(|e| e.name == surface.element)
            .map(|e| parse_color(&e.color))
            .transpose()?;
        if let Some(color) = color {
            mesh.set_color(color.truncate());
        }
        vista.surfaces.push(mesh);
    }
    Ok(())
}

/// Builds the 3D scene of a model.
///
/// # Example
/// ```no_run
/// use gempy_viewer::*;
///
/// let model = GeoModel::from_json_file("model.json").unwrap();
/// let vista = plot_3d(&model, &Plot3DOptions::default()).unwrap();
/// vista.export_ply("scene").unwrap();
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn plot_3d(model: &GeoModel, options: &Plot3DOptions) -> Result<GemPyToVista> {
    let _ = env_logger::try_init();

    let show = options.show.resolved(model.is_computed());
    let mut vista = GemPyToVista::new(model.grid.regular_grid.extent());

    let sol = model.solutions.as_ref();
    for (on, data_type) in [
        (show.lith && sol.is_some_and(Solutions::has_lith_block), ScalarDataType::Lithology),
        (show.scalar && sol.is_some_and(Solutions::has_scalar_field), ScalarDataType::ScalarField),
        (show.values && sol.is_some_and(Solutions::has_values), ScalarDataType::Values),
    ] {
        if on {
            plot_structured_grid(&mut vista, model, data_type)?;
        }
    }
    if let Some(name) = &options.active_scalar_field {
        match vista.regular_grid.as_mut() {
            Some(grid) => {
                grid.set_active_scalars(name)?;
            }
            None => {
                return Err(ViewerError::ScalarFieldNotFound {
                    name: name.clone(),
                    available: Vec::new(),
                })
            }
        }
    }
    if let Some(grid) = vista.regular_grid.as_mut() {
        grid.set_opacity(options.opacity as f32);
    }

    if show.data {
        plot_data(&mut vista, model, options.arrow_size, options.point_size)?;
    }
    if show.topography {
        if model.grid.topography.is_some() {
            plot_topography_3d(
                &mut vista,
                model,
                options.topography_scalar_type,
                options.topography_contours,
            )?;
        } else {
            log::warn!("no topography on the grid, 3D scene drawn without it");
        }
    }
    if show.surfaces {
        plot_surfaces(&mut vista, model)?;
    }

    vista.scalar_bar = Some(ScalarBar::lithology(&model.structural_frame));
    if let Some(ve) = options.ve {
        vista.set_scale(ve);
    }
    log::info!("3D scene with {} structures", vista.structures().len());
    Ok(vista)
}
