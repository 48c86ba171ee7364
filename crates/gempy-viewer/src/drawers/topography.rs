//! Topography on sections, slices and the geological map.

use gempy_viewer_core::{
    auto_levels, elevation_image, section_endpoints, DVec2, GeoModel, Result, Topography,
    TopographyOptions, ViewerError,
};
use gempy_viewer_render::{
    ColorMapRegistry, ContourFillPlot, ContourPlot, Figure, FillPlot, ImagePlot, LightSource,
    Norm, PlotElement,
};
use glam::Vec4;

use super::axes_of;
use crate::plot_2d::{SectionData2D, SectionKind};

const MASK_ZORDER: f32 = 10.0;
const CELL_MASK_ZORDER: f32 = 1.0;
const HILLSHADE_ZORDER: f32 = 11.0;
const ELEVATION_CONTOUR_ZORDER: f32 = 2.0;
const ELEVATION_FILL_ZORDER: f32 = 1.0;
const ELEVATION_LEVELS: usize = 10;

/// Draws the topography on one axes.
///
/// A section or an x/y cell slice gets a black polygon masking everything
/// above the ground. The geological map gets elevation contours, filled
/// contours when `fill_contour` is set, and a hillshade. Without topography
/// on the grid nothing is drawn.
#[allow(clippy::cast_precision_loss)]
pub fn draw_topography(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    options: &TopographyOptions,
    fill_contour: bool,
) -> Result<()> {
    let Some(topography) = &model.grid.topography else {
        log::warn!("no topography on the grid, axes {} drawn without it", section.axes_index);
        return Ok(());
    };
    let top = model.grid.regular_grid.extent()[5];

    match &section.kind {
        SectionKind::Section(name) => {
            let trace = model.grid.sections.get(name)?;
            let dist = trace.dist();
            let profile = topography.profile(trace.start, trace.stop, topography.resolution()[0]);
            let n = profile.len().max(2) - 1;
            let ground = profile
                .iter()
                .enumerate()
                .map(|(i, p)| DVec2::new(dist * i as f64 / n as f64, p.z))
                .collect();
            add_mask(figure, section, ground, (0.0, dist), top, MASK_ZORDER)
        }
        SectionKind::Orthogonal(slicer) => {
            let grid = &model.grid.regular_grid;
            let (p1, p2) = section_endpoints(grid, slicer)?;
            let profile = topography.profile(p1, p2, grid.resolution()[0]);
            let (u, _) = slicer.free_axes();
            let ground = profile.iter().map(|p| DVec2::new(p[u], p.z)).collect();
            add_mask(figure, section, ground, grid.axis_extent(u), top, CELL_MASK_ZORDER)
        }
        SectionKind::Topography => draw_map(figure, section, topography, options, fill_contour),
    }
}

/// Closes the ground profile along the top of the model and fills it black.
fn add_mask(
    figure: &mut Figure,
    section: &SectionData2D,
    mut polygon: Vec<DVec2>,
    (start, end): (f64, f64),
    top: f64,
    zorder: f32,
) -> Result<()> {
    let (Some(first), Some(last)) = (polygon.first().copied(), polygon.last().copied()) else {
        return Ok(());
    };
    polygon.extend([
        DVec2::new(end, last.y),
        DVec2::new(end, top),
        DVec2::new(start, top),
        DVec2::new(start, first.y),
    ]);
    axes_of(figure, section)?.add(
        zorder,
        PlotElement::Fill(FillPlot {
            polygon,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }),
    );
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_map(
    figure: &mut Figure,
    section: &SectionData2D,
    topography: &Topography,
    options: &TopographyOptions,
    fill_contour: bool,
) -> Result<()> {
    let elevation = elevation_image(topography)?;
    let extent = topography.node_extent();
    let levels = auto_levels(&elevation, ELEVATION_LEVELS);
    let registry = ColorMapRegistry::new();
    let axes = axes_of(figure, section)?;

    if options.contour {
        let black = vec![Vec4::new(0.0, 0.0, 0.0, 1.0)];
        axes.add(
            ELEVATION_CONTOUR_ZORDER,
            PlotElement::Contour(ContourPlot::from_image(&elevation, extent, &levels, black)),
        );
    }
    if fill_contour {
        axes.add(
            ELEVATION_FILL_ZORDER,
            PlotElement::ContourFill(ContourFillPlot {
                image: elevation.clone(),
                extent,
                levels,
                cmap: registry.require(&options.cmap)?,
                alpha: 1.0,
            }),
        );
    }
    if options.hillshade {
        let [nx, ny] = topography.resolution();
        let e = topography.extent();
        let dx = (e[1] - e[0]) / (nx - 1) as f64;
        let dy = (e[3] - e[2]) / (ny - 1) as f64;
        if dx <= 0.0 || dy <= 0.0 {
            return Err(ViewerError::InvalidGrid(format!("topography extent {e:?} is empty")));
        }
        let shade =
            LightSource::new(options.azdeg, options.altdeg).hillshade(&elevation, dx, dy, 1.0);
        axes.add(
            HILLSHADE_ZORDER,
            PlotElement::Image(ImagePlot {
                image: shade,
                extent,
                cmap: registry.require("gray")?,
                norm: Norm::Linear { vmin: 0.0, vmax: 1.0 },
                alpha: 0.5,
            }),
        );
    }
    Ok(())
}
