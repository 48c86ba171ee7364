//! Input data: surface points and orientations near the plotted plane.

use gempy_viewer_core::{GeoModel, Plot2DOptions, Result};
use gempy_viewer_render::{Figure, LegendEntry, PlotElement, PlotType, QuiverPlot, ScatterPlot};
use glam::Vec4;

use super::{axes_of, parse_colors};
use crate::plot_2d::SectionData2D;

const DATA_ZORDER: f32 = 102.0;
const POINT_SIZE: f32 = 70.0;
const QUIVER_SCALE: f32 = 30.0;

/// Scatters the surface points and draws the orientations that lie within
/// the projection distance of the plane. The element legend is added to the
/// first axes that draws data.
pub fn draw_data(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    options: &Plot2DOptions,
) -> Result<()> {
    let threshold = options
        .projection_distance
        .unwrap_or_else(|| model.default_projection_distance());
    let projection = &section.projection;

    let point_colors = parse_colors(&model.surface_points_colors())?;
    let selected = projection.select(model.surface_points.iter().map(|p| p.position), threshold);
    let (points, colors): (Vec<_>, Vec<_>) = model
        .surface_points
        .iter()
        .zip(point_colors)
        .zip(&selected)
        .filter(|(_, keep)| **keep)
        .map(|((p, color), _)| (projection.to_plane(p.position), color))
        .unzip();

    let orientation_colors = parse_colors(&model.orientations_colors())?;
    let selected = projection.select(model.orientations.iter().map(|o| o.position), threshold);
    let mut origins = Vec::new();
    let mut vectors = Vec::new();
    let mut arrow_colors = Vec::new();
    for ((o, color), keep) in model.orientations.iter().zip(orientation_colors).zip(selected) {
        if keep {
            origins.push(projection.to_plane(o.position));
            vectors.push(projection.vector_to_plane(o.gradient));
            arrow_colors.push(color);
        }
    }
    log::debug!(
        "axes {}: {} surface points, {} orientations within {threshold}",
        section.axes_index,
        points.len(),
        origins.len()
    );

    let add_legend = options.legend && !figure.has_legend();
    let legend = if add_legend {
        let frame = &model.structural_frame;
        let colors = parse_colors(&frame.elements_colors())?;
        frame
            .elements_names()
            .into_iter()
            .zip(colors)
            .map(|(name, color)| LegendEntry {
                label: name.to_string(),
                color,
                plot_type: PlotType::Scatter,
            })
            .collect()
    } else {
        Vec::new()
    };

    let axes = axes_of(figure, section)?;
    if !points.is_empty() {
        axes.add(
            DATA_ZORDER,
            PlotElement::Scatter(ScatterPlot {
                points,
                colors,
                size: POINT_SIZE,
                edge_color: Some(Vec4::ONE),
            }),
        );
    }
    if !origins.is_empty() {
        axes.add(
            DATA_ZORDER,
            PlotElement::Quiver(QuiverPlot {
                origins,
                vectors,
                colors: arrow_colors,
                scale: QUIVER_SCALE,
                edge_color: Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            }),
        );
    }
    if add_legend {
        axes.set_legend(legend);
        figure.mark_legend();
    }
    Ok(())
}
