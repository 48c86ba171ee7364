//! Dense solution layers: lithology, values, block, scalar field and a
//! user supplied regular-grid block.

use gempy_viewer_core::{auto_levels, slice_block, GeoModel, Result};
use gempy_viewer_render::{
    geo_model_colormap, ColorMapRegistry, ContourFillPlot, ContourPlot, Figure, ImagePlot, Norm,
    PlotElement,
};

use super::{axes_of, plane_image, Field};
use crate::plot_2d::{SectionData2D, SectionKind};

const DENSE_ZORDER: f32 = -100.0;
const OVERLAY_ZORDER: f32 = 0.0;
const SCALAR_CONTOUR_ZORDER: f32 = 8.0;
const SCALAR_FILL_ZORDER: f32 = 7.0;

/// Lithology ids with the element colors.
pub fn draw_lith(figure: &mut Figure, model: &GeoModel, section: &SectionData2D) -> Result<()> {
    let (image, extent) = plane_image(model, section, Field::Lith)?;
    let (cmap, norm) = geo_model_colormap(&model.structural_frame.elements_colors())?;
    axes_of(figure, section)?.add(
        DENSE_ZORDER,
        PlotElement::Image(ImagePlot {
            image,
            extent,
            cmap,
            norm,
            alpha: 1.0,
        }),
    );
    Ok(())
}

fn draw_viridis(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    field: Field,
) -> Result<()> {
    let (image, extent) = plane_image(model, section, field)?;
    let cmap = ColorMapRegistry::new().require("viridis")?;
    let norm = Norm::auto(image.values());
    axes_of(figure, section)?.add(
        DENSE_ZORDER,
        PlotElement::Image(ImagePlot {
            image,
            extent,
            cmap,
            norm,
            alpha: 1.0,
        }),
    );
    Ok(())
}

/// Values matrix of series `series_n`.
pub fn draw_values(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    series_n: usize,
) -> Result<()> {
    draw_viridis(figure, model, section, Field::Values(series_n))
}

/// Block matrix of series `series_n`.
pub fn draw_block(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    series_n: usize,
) -> Result<()> {
    draw_viridis(figure, model, section, Field::Block(series_n))
}

/// Scalar field of series `series_n` as isolines over filled bands.
pub fn draw_scalar_field(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    series_n: usize,
    n_levels: usize,
) -> Result<()> {
    let (image, extent) = plane_image(model, section, Field::ScalarField(series_n))?;
    let cmap = ColorMapRegistry::new().require("autumn")?;
    let levels = auto_levels(&image, n_levels);

    let contour = ContourPlot::from_cmap(&image, extent, &levels, &cmap);
    let fill = ContourFillPlot {
        image,
        extent,
        levels,
        cmap,
        alpha: 0.8,
    };
    axes_of(figure, section)?
        .add(SCALAR_CONTOUR_ZORDER, PlotElement::Contour(contour))
        .add(SCALAR_FILL_ZORDER, PlotElement::ContourFill(fill));
    Ok(())
}

/// A block sized to the regular grid, cut like the lithology. Only cell
/// slices cut the regular grid; other axes are skipped.
pub fn draw_regular_grid(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    block: &[f64],
) -> Result<()> {
    let SectionKind::Orthogonal(slicer) = &section.kind else {
        log::warn!(
            "regular grid overlay skipped on {:?}: it only applies to cell slices",
            section.section_name()
        );
        return Ok(());
    };
    let resolution = model.grid.regular_grid.resolution();
    let image = slice_block(block, resolution, slicer, "regular grid")?;
    let cmap = ColorMapRegistry::new().require("viridis")?;
    let norm = Norm::auto(image.values());
    axes_of(figure, section)?.add(
        OVERLAY_ZORDER,
        PlotElement::Image(ImagePlot {
            image,
            extent: slicer.extent,
            cmap,
            norm,
            alpha: 1.0,
        }),
    );
    Ok(())
}
