//! 2D plots: figure layout and the per-axis drawing sequence.

use std::collections::HashMap;
use std::path::Path;

use gempy_viewer_core::{
    slice_cross_section, CellNumber, DataToShow, Direction, GeoModel, PlaneProjection,
    Plot2DOptions, Result, ShowFlags, SlicerData, ViewerError,
};
use gempy_viewer_render::{render, save_image, save_to_buffer, Axes, Figure, MAX_AXES};
use glam::DVec3;
use image::RgbaImage;

use crate::drawers::{self, has_field, Field};

/// Name of the map-view section.
pub const TOPOGRAPHY_SECTION: &str = "topography";

/// Pixel size of one subplot when the figure size is not given.
const CELL_SIZE: [u32; 2] = [640, 480];

/// One plot requested from [`plot_sections`].
#[derive(Debug, Clone, PartialEq)]
pub enum SectionRequest {
    /// A section trace of the model grid, or [`TOPOGRAPHY_SECTION`].
    Named(String),
    /// An axis-aligned cut of the regular grid.
    Cell { direction: Direction, cell: CellNumber },
}

/// What an axes shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    Section(String),
    Orthogonal(SlicerData),
    Topography,
}

/// Everything the drawers need to know about one axes.
#[derive(Debug, Clone)]
pub struct SectionData2D {
    pub kind: SectionKind,
    pub axes_index: usize,
    /// Axes limits in plot coordinates.
    pub extent: [f64; 4],
    pub projection: PlaneProjection,
}

impl SectionData2D {
    /// Name of the named section, if any.
    #[must_use]
    pub fn section_name(&self) -> Option<&str> {
        match &self.kind {
            SectionKind::Section(name) => Some(name),
            SectionKind::Topography => Some(TOPOGRAPHY_SECTION),
            SectionKind::Orthogonal(_) => None,
        }
    }
}

/// A 2D figure of a model and the sections drawn on it.
pub struct Plot2D {
    figure: Figure,
    sections: Vec<SectionData2D>,
}

impl Plot2D {
    /// Creates an empty figure with a `rows × cols` subplot grid.
    pub fn new(width: u32, height: u32, rows: usize, cols: usize) -> Self {
        log::info!("creating figure {width}x{height} with {rows}x{cols} axes");
        Self {
            figure: Figure::new(width, height, rows, cols),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    /// Sections in axes order.
    #[must_use]
    pub fn sections(&self) -> &[SectionData2D] {
        &self.sections
    }

    /// Axes `index` of the figure.
    #[must_use]
    pub fn axes(&self, index: usize) -> Option<&Axes> {
        self.figure.axes_at(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Adds the axes of one section and returns its data.
    pub fn add_section(
        &mut self,
        model: &GeoModel,
        request: &SectionRequest,
        ve: f64,
        topo_comp: usize,
    ) -> Result<&SectionData2D> {
        if self.figure.len() >= MAX_AXES {
            return Err(ViewerError::TooManyAxes {
                requested: self.figure.len() + 1,
                max: MAX_AXES,
            });
        }

        let grid = &model.grid.regular_grid;
        let extent3 = grid.extent();
        let (kind, extent, projection, title) = match request {
            SectionRequest::Named(name) if name == TOPOGRAPHY_SECTION => {
                let topography = model.grid.topography()?;
                (
                    SectionKind::Topography,
                    topography.extent(),
                    PlaneProjection::topography(topography, topo_comp),
                    "Geological map".to_string(),
                )
            }
            SectionRequest::Named(name) => {
                let section = model.grid.sections.get(name)?;
                let projection = PlaneProjection::section(section)?;
                (
                    SectionKind::Section(name.clone()),
                    [0.0, section.dist(), extent3[4], extent3[5]],
                    projection,
                    name.clone(),
                )
            }
            SectionRequest::Cell { direction, cell } => {
                let slicer = slice_cross_section(grid, *direction, *cell)?;
                let projection = PlaneProjection::orthogonal(grid, &slicer);
                let title = format!("Cell Number: {} Direction: {direction}", slicer.cell);
                (SectionKind::Orthogonal(slicer.clone()), slicer.extent, projection, title)
            }
        };

        let labels = projection.labels();
        let mut axes = Axes::new(extent);
        axes.set_title(title)
            .set_labels(labels.x, labels.y)
            .set_aspect(ve);
        let axes_index = self.figure.add_axes(axes);
        log::debug!("axes {axes_index}: {kind:?}");

        self.sections.push(SectionData2D {
            kind,
            axes_index,
            extent,
            projection,
        });
        Ok(&self.sections[self.sections.len() - 1])
    }

    /// Rasterizes the figure.
    pub fn render(&self) -> Result<RgbaImage> {
        Ok(render(&self.figure)?)
    }

    /// Rasterizes the figure and saves it; the format follows the extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let img = self.render()?;
        save_image(path, &img)?;
        Ok(())
    }

    /// Rasterizes the figure into PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let img = self.render()?;
        Ok(save_to_buffer(&img)?)
    }
}

/// Subplot grid `(rows, cols)` for `n` axes: one column for a single axis,
/// two otherwise.
#[must_use]
pub fn layout(n: usize) -> (usize, usize) {
    let cols = if n < 2 { 1 } else { 2 };
    (n.div_ceil(cols).max(1), cols)
}

/// Sections first, then cell slices.
#[must_use]
pub fn requests(options: &Plot2DOptions) -> Vec<SectionRequest> {
    let named = options
        .section_names
        .iter()
        .map(|name| SectionRequest::Named(name.clone()));
    let cells = options
        .effective_cells()
        .into_iter()
        .enumerate()
        .map(|(i, cell)| SectionRequest::Cell {
            direction: options.direction(i),
            cell,
        });
    named.chain(cells).collect()
}

/// Plots 2D sections of a model.
///
/// Named sections come first, then cell slices. Up to [`MAX_AXES`] axes fit
/// on a figure.
///
/// # Example
/// ```no_run
/// use gempy_viewer::*;
///
/// let model = GeoModel::from_json_file("model.json").unwrap();
/// let plot = plot_2d(&model, &Plot2DOptions::default()).unwrap();
/// plot.save_png("section.png").unwrap();
/// ```
pub fn plot_2d(model: &GeoModel, options: &Plot2DOptions) -> Result<Plot2D> {
    let _ = env_logger::try_init();

    let requests = requests(options);
    if requests.len() > MAX_AXES {
        return Err(ViewerError::TooManyAxes {
            requested: requests.len(),
            max: MAX_AXES,
        });
    }

    let (rows, cols) = layout(requests.len());
    let [width, height] = options.figure_size.unwrap_or_else(|| {
        let (r, c) = (u32::try_from(rows).unwrap_or(1), u32::try_from(cols).unwrap_or(1));
        [CELL_SIZE[0] * c, CELL_SIZE[1] * r]
    });

    let mut plot = Plot2D::new(width, height, rows, cols);
    plot_sections(&mut plot, model, &requests, options)?;
    Ok(plot)
}

/// Adds one axes per request to `plot` and draws on each.
///
/// Axes drawn before a failing one are kept.
pub fn plot_sections(
    plot: &mut Plot2D,
    model: &GeoModel,
    requests: &[SectionRequest],
    options: &Plot2DOptions,
) -> Result<()> {
    let n_axis = options.n_axis.unwrap_or(requests.len()).max(requests.len());
    let show = DataToShow::new(options.show, n_axis, model.is_computed());

    for request in requests {
        let e = plot.len();
        let section = plot
            .add_section(model, request, options.ve, options.topography.topo_comp)?
            .clone();
        draw_section(plot, model, &section, show.axis(e), options.series(e), options)?;
    }
    Ok(())
}

/// The dense layer of an axes: first of lithology, values and block that
/// is switched on and computed.
#[must_use]
pub fn dense_layer(
    model: &GeoModel,
    kind: &SectionKind,
    flags: ShowFlags,
    series_n: usize,
) -> Option<Field> {
    [
        (flags.lith, Field::Lith),
        (flags.values, Field::Values(series_n)),
        (flags.block, Field::Block(series_n)),
    ]
    .into_iter()
    .find(|(on, field)| *on && has_field(model, kind, *field))
    .map(|(_, field)| field)
}

fn draw_section(
    plot: &mut Plot2D,
    model: &GeoModel,
    section: &SectionData2D,
    flags: ShowFlags,
    series_n: usize,
    options: &Plot2DOptions,
) -> Result<()> {
    let figure = plot.figure_mut();
    let scalar = flags.scalar && has_field(model, &section.kind, Field::ScalarField(series_n));
    let boundaries = flags.boundaries && has_field(model, &section.kind, Field::ScalarField(0));
    let dense = dense_layer(model, &section.kind, flags, series_n);

    if flags.data {
        drawers::draw_data(figure, model, section, options)?;
    }

    let is_cell = matches!(section.kind, SectionKind::Orthogonal(_));
    if is_cell && flags.topography {
        drawers::draw_topography(figure, model, section, &options.topography, false)?;
    }

    match dense {
        Some(Field::Lith) => drawers::draw_lith(figure, model, section)?,
        Some(Field::Values(n)) => drawers::draw_values(figure, model, section, n)?,
        Some(Field::Block(n)) => drawers::draw_block(figure, model, section, n)?,
        _ => {}
    }
    if scalar {
        drawers::draw_scalar_field(figure, model, section, series_n, options.scalar_levels)?;
    }
    if boundaries {
        drawers::draw_contacts(figure, model, section, false)?;
    }

    if !is_cell && flags.topography {
        let is_filled = dense.is_some() || scalar;
        let fill_contour = options.topography.fill_contour.unwrap_or(!is_filled);
        drawers::draw_topography(figure, model, section, &options.topography, fill_contour)?;
        if flags.section_traces && section.kind == SectionKind::Topography {
            drawers::draw_section_traces(figure, model, section, None)?;
        }
    }

    if let Some(block) = &options.regular_grid {
        drawers::draw_regular_grid(figure, model, section, block)?;
    }
    Ok(())
}

/// Map view of the section traces over a z slice at the top cell.
pub fn plot_section_traces(model: &GeoModel) -> Result<Plot2D> {
    let options = Plot2DOptions {
        cell_numbers: Some(vec![CellNumber::Index(-1)]),
        directions: vec![Direction::Z],
        n_axis: Some(1),
        show: ShowFlags {
            data: false,
            boundaries: false,
            lith: false,
            ..ShowFlags::default()
        },
        ..Plot2DOptions::default()
    };
    let mut plot = plot_2d(model, &options)?;
    let section = plot
        .sections()
        .first()
        .cloned()
        .ok_or_else(|| ViewerError::RenderError("section traces figure has no axes".to_string()))?;
    drawers::draw_section_traces(plot.figure_mut(), model, &section, None)?;
    Ok(plot)
}

/// Draws a topology graph on the last axes of `plot`.
///
/// `edges` pair node ids and `centroids` hold their positions in cell units
/// of the regular grid; `scale` maps those to model coordinates. An empty
/// plot first gets a mid cell slice along `direction`.
pub fn plot_topology(
    plot: &mut Plot2D,
    model: &GeoModel,
    edges: &[(usize, usize)],
    centroids: &HashMap<usize, DVec3>,
    direction: Direction,
    scale: bool,
) -> Result<()> {
    if plot.is_empty() {
        let defaults = Plot2DOptions::default();
        let request = SectionRequest::Cell {
            direction,
            cell: CellNumber::Mid,
        };
        plot.add_section(model, &request, defaults.ve, defaults.topography.topo_comp)?;
    }
    let section = plot
        .sections()
        .last()
        .cloned()
        .ok_or_else(|| ViewerError::RenderError("topology figure has no axes".to_string()))?;
    drawers::draw_topology(
        plot.figure_mut(),
        model,
        &section,
        edges,
        centroids,
        direction,
        scale,
    )
}
