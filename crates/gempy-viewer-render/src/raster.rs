//! Rasterizes a [`Figure`] through `plotters` into an RGBA image.
//!
//! The canvas is split evenly into the subplot grid; each axes becomes a
//! cartesian chart whose data box is fitted inside its cell keeping the
//! on-screen aspect. Layers are drawn in z-order, then the legend.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use gempy_viewer_core::DVec2;
use glam::Vec4;
use image::{DynamicImage, RgbImage, RgbaImage};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::error::{RenderError, RenderResult};
use crate::figure::{
    Axes, ContourFillPlot, ContourPlot, Figure, FillPlot, ImagePlot, LinePlot, LineStyle,
    PlotElement, PlotType, QuiverPlot, ScatterPlot, TextPlot,
};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const FONT: &str = "sans-serif";
/// Height reserved for a caption when fitting the data box.
const TITLE_HEIGHT: i32 = 22;
const MARGIN: i32 = 8;
const X_LABEL_AREA: i32 = 30;
const Y_LABEL_AREA: i32 = 45;
/// Sub-cells per image cell and side when filling contour bands.
const FILL_SUBDIVISIONS: usize = 4;
const DASH_ON: f64 = 6.0;
const DASH_OFF: f64 = 4.0;

/// Pixel rectangle of an axes data box and the data limits it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x0: f64,
    pub y0: f64,
    pub width: f64,
    pub height: f64,
    pub limits: [f64; 4],
}

impl Viewport {
    fn of_chart<DB: DrawingBackend>(chart: &Chart<'_, DB>, limits: [f64; 4]) -> Self {
        let (xs, ys) = chart.plotting_area().get_pixel_range();
        Self {
            x0: f64::from(xs.start),
            y0: f64::from(ys.start),
            width: f64::from(xs.end - xs.start).max(1.0),
            height: f64::from(ys.end - ys.start).max(1.0),
            limits,
        }
    }

    /// Pixel position of a data point (y grows downwards).
    #[must_use]
    pub fn to_pixel(&self, p: DVec2) -> DVec2 {
        let [x_min, x_max, y_min, y_max] = self.limits;
        DVec2::new(
            self.x0 + (p.x - x_min) / (x_max - x_min) * self.width,
            self.y0 + self.height - (p.y - y_min) / (y_max - y_min) * self.height,
        )
    }

    /// Data position of a pixel position.
    #[must_use]
    pub fn to_data(&self, px: f64, py: f64) -> DVec2 {
        let [x_min, x_max, y_min, y_max] = self.limits;
        DVec2::new(
            x_min + (px - self.x0) / self.width * (x_max - x_min),
            y_min + (self.y0 + self.height - py) / self.height * (y_max - y_min),
        )
    }
}

fn to_color(color: Vec4) -> RGBAColor {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    RGBAColor(c.x as u8, c.y as u8, c.z as u8, f64::from(color.w.clamp(0.0, 1.0)))
}

fn stroke_px(width: f32) -> u32 {
    width.round().max(1.0) as u32
}

fn coord(p: DVec2) -> (f64, f64) {
    (p.x, p.y)
}

/// Intersection of `[x0, x1, y0, y1]` with the axes limits.
fn clip_rect(rect: [f64; 4], limits: [f64; 4]) -> Option<[(f64, f64); 2]> {
    let x0 = rect[0].min(rect[1]).max(limits[0].min(limits[1]));
    let x1 = rect[0].max(rect[1]).min(limits[0].max(limits[1]));
    let y0 = rect[2].min(rect[3]).max(limits[2].min(limits[3]));
    let y1 = rect[2].max(rect[3]).min(limits[2].max(limits[3]));
    (x0 < x1 && y0 < y1).then_some([(x0, y0), (x1, y1)])
}

/// Fractional sample coordinate of a data point over an image extent
/// (pixel-centre convention).
fn sample_coordinate(extent: [f64; 4], width: usize, height: usize, p: DVec2) -> (f64, f64) {
    let col = (p.x - extent[0]) / (extent[1] - extent[0]) * width as f64 - 0.5;
    let row = (p.y - extent[2]) / (extent[3] - extent[2]) * height as f64 - 0.5;
    (col, row)
}

/// Shrinks a grid cell so that the chart built on it has a data box of
/// the axes' on-screen aspect.
fn fitted_cell<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> DrawingArea<DB, Shift> {
    let (width, height) = cell.dim_in_pixel();
    let title = if axes.title.is_some() {
        TITLE_HEIGHT
    } else {
        0
    };
    let avail_w = f64::from((width as i32 - 2 * MARGIN - Y_LABEL_AREA).max(1));
    let avail_h = f64::from((height as i32 - 2 * MARGIN - X_LABEL_AREA - title).max(1));

    let aspect = axes.box_aspect();
    let (box_w, box_h) = if avail_w / avail_h > aspect {
        (avail_h * aspect, avail_h)
    } else {
        (avail_w, avail_w / aspect)
    };
    let pad_x = ((avail_w - box_w) / 2.0).floor() as i32;
    let pad_y = ((avail_h - box_h) / 2.0).floor() as i32;
    cell.margin(pad_y, pad_y, pad_x, pad_x)
}

fn draw_image<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    limits: [f64; 4],
    plot: &ImagePlot,
) -> RenderResult<()> {
    let (w, h) = (plot.image.width(), plot.image.height());
    if w == 0 || h == 0 {
        return Ok(());
    }
    let dx = (plot.extent[1] - plot.extent[0]) / w as f64;
    let dy = (plot.extent[3] - plot.extent[2]) / h as f64;
    let cells = (0..h)
        .flat_map(|row| (0..w).map(move |col| (col, row)))
        .filter_map(|(col, row)| {
            let t = plot.norm.apply(plot.image.get(col, row))?;
            let x0 = plot.extent[0] + col as f64 * dx;
            let y0 = plot.extent[2] + row as f64 * dy;
            let corners = clip_rect([x0, x0 + dx, y0, y0 + dy], limits)?;
            let color = to_color(plot.cmap.sample(t).extend(plot.alpha));
            Some(Rectangle::new(corners, color.filled()))
        });
    chart.draw_series(cells)?;
    Ok(())
}

fn draw_contour_fill<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    limits: [f64; 4],
    plot: &ContourFillPlot,
) -> RenderResult<()> {
    let (w, h) = (plot.image.width(), plot.image.height());
    if w == 0 || h == 0 {
        return Ok(());
    }
    let (nx, ny) = (w * FILL_SUBDIVISIONS, h * FILL_SUBDIVISIONS);
    let dx = (plot.extent[1] - plot.extent[0]) / nx as f64;
    let dy = (plot.extent[3] - plot.extent[2]) / ny as f64;
    let cells = (0..ny)
        .flat_map(|j| (0..nx).map(move |i| (i, j)))
        .filter_map(|(i, j)| {
            let x0 = plot.extent[0] + i as f64 * dx;
            let y0 = plot.extent[2] + j as f64 * dy;
            let centre = DVec2::new(x0 + dx / 2.0, y0 + dy / 2.0);
            let (c, r) = sample_coordinate(plot.extent, w, h, centre);
            let band = plot.band(plot.image.sample_bilinear(c, r))?;
            let corners = clip_rect([x0, x0 + dx, y0, y0 + dy], limits)?;
            Some(Rectangle::new(corners, to_color(plot.band_color(band)).filled()))
        });
    chart.draw_series(cells)?;
    Ok(())
}

fn draw_contour<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    plot: &ContourPlot,
) -> RenderResult<()> {
    for (i, segments) in plot.segments.iter().enumerate() {
        let style = to_color(plot.color(i)).stroke_width(stroke_px(plot.line_width));
        chart.draw_series(
            segments
                .iter()
                .map(move |[a, b]| PathElement::new(vec![coord(*a), coord(*b)], style)),
        )?;
    }
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    plot: &ScatterPlot,
) -> RenderResult<()> {
    let radius = (f64::from(plot.size).sqrt() / 2.0).round().max(1.0) as i32;
    if let Some(edge) = plot.edge_color {
        let style = to_color(edge).filled();
        chart.draw_series(
            plot.points
                .iter()
                .map(|p| Circle::new(coord(*p), radius + 1, style)),
        )?;
    }
    let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
    chart.draw_series(plot.points.iter().enumerate().map(|(i, p)| {
        let color = plot
            .colors
            .get(i)
            .or_else(|| plot.colors.last())
            .copied()
            .unwrap_or(black);
        Circle::new(coord(*p), radius, to_color(color).filled())
    }))?;
    Ok(())
}

/// Shaft and head polylines of one arrow, in data coordinates.
struct Arrow {
    shaft: Vec<(f64, f64)>,
    head: Vec<(f64, f64)>,
    color: Vec4,
}

fn arrows(viewport: &Viewport, plot: &QuiverPlot) -> Vec<Arrow> {
    let unit = viewport.width.min(viewport.height) / f64::from(plot.scale.max(f32::EPSILON));
    let to_data = |p: DVec2| coord(viewport.to_data(p.x, p.y));
    plot.origins
        .iter()
        .zip(&plot.vectors)
        .enumerate()
        .filter_map(|(i, (origin, vector))| {
            let tail = viewport.to_pixel(*origin);
            // screen y grows downwards
            let v = DVec2::new(vector.x, -vector.y) * unit;
            if v.length_squared() == 0.0 {
                return None;
            }
            let tip = tail + v;
            let back = -v.normalize() * (v.length() * 0.3).min(8.0);
            let left = tip + DVec2::from_angle(0.5).rotate(back);
            let right = tip + DVec2::from_angle(-0.5).rotate(back);
            Some(Arrow {
                shaft: vec![to_data(tail), to_data(tip)],
                head: vec![to_data(left), to_data(tip), to_data(right)],
                color: plot
                    .colors
                    .get(i)
                    .copied()
                    .unwrap_or(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            })
        })
        .collect()
}

fn draw_quiver<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    viewport: &Viewport,
    plot: &QuiverPlot,
) -> RenderResult<()> {
    let arrows = arrows(viewport, plot);
    let paths = |arrow: &Arrow, style: ShapeStyle| {
        [
            PathElement::new(arrow.shaft.clone(), style),
            PathElement::new(arrow.head.clone(), style),
        ]
    };
    if let Some(edge) = plot.edge_color {
        let style = to_color(edge).stroke_width(3);
        chart.draw_series(arrows.iter().flat_map(|a| paths(a, style)))?;
    }
    chart.draw_series(
        arrows
            .iter()
            .flat_map(|a| paths(a, to_color(a.color).stroke_width(2))),
    )?;
    Ok(())
}

fn draw_fill<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, plot: &FillPlot) -> RenderResult<()> {
    if plot.polygon.len() < 3 {
        return Ok(());
    }
    let points: Vec<(f64, f64)> = plot.polygon.iter().copied().map(coord).collect();
    chart.draw_series(std::iter::once(Polygon::new(
        points,
        to_color(plot.color).filled(),
    )))?;
    Ok(())
}

/// Splits a polyline into dashes measured in pixels.
fn dashes(points: &[DVec2], viewport: &Viewport) -> Vec<Vec<(f64, f64)>> {
    let period = DASH_ON + DASH_OFF;
    let to_data = |p: DVec2| coord(viewport.to_data(p.x, p.y));
    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut travelled = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (viewport.to_pixel(pair[0]), viewport.to_pixel(pair[1]));
        let length = (b - a).length();
        let mut s = 0.0;
        while s < length {
            let phase = travelled % period;
            let on = phase < DASH_ON;
            let remaining = if on { DASH_ON - phase } else { period - phase };
            let step = remaining.min(length - s);
            if on {
                if current.is_empty() {
                    current.push(to_data(a.lerp(b, s / length)));
                }
                current.push(to_data(a.lerp(b, (s + step) / length)));
            } else if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }
            s += step;
            travelled += step;
        }
    }
    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

fn draw_line<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    viewport: &Viewport,
    plot: &LinePlot,
) -> RenderResult<()> {
    let style = to_color(plot.color).stroke_width(stroke_px(plot.width));
    let pieces = match plot.style {
        LineStyle::Solid => vec![plot.points.iter().copied().map(coord).collect()],
        LineStyle::Dashed => dashes(&plot.points, viewport),
    };
    chart.draw_series(pieces.into_iter().map(|piece| PathElement::new(piece, style)))?;
    Ok(())
}

fn draw_text<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, plot: &TextPlot) -> RenderResult<()> {
    let style = FontDesc::new(FontFamily::SansSerif, f64::from(plot.size), FontStyle::Normal)
        .color(&to_color(plot.color))
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(std::iter::once(Text::new(
        plot.text.clone(),
        coord(plot.position),
        style,
    )))?;
    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut Chart<'a, DB>, axes: &Axes) -> RenderResult<()> {
    if axes.legend.is_empty() {
        return Ok(());
    }
    for entry in &axes.legend {
        let color = to_color(entry.color);
        let anno = chart.draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?;
        anno.label(entry.label.as_str());
        if entry.plot_type == PlotType::Line {
            anno.legend(move |(x, y)| {
                PathElement::new(vec![(x - 6, y), (x + 6, y)], color.stroke_width(2))
            });
        } else {
            anno.legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 11))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Draws one axes into its grid cell and returns where its data box
/// landed.
fn draw_axes<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> RenderResult<Viewport> {
    let area = fitted_cell(cell, axes);
    let [x_min, x_max, y_min, y_max] = axes.limits;

    let mut builder = ChartBuilder::on(&area);
    builder
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA);
    if let Some(title) = &axes.title {
        builder.caption(title, (FONT, 14));
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(5)
            .y_labels(5)
            .label_style((FONT, 11));
        if let Some(label) = &axes.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &axes.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }

    let viewport = Viewport::of_chart(&chart, axes.limits);
    for layer in axes.sorted_layers() {
        match &layer.element {
            PlotElement::Image(p) => draw_image(&mut chart, axes.limits, p)?,
            PlotElement::ContourFill(p) => draw_contour_fill(&mut chart, axes.limits, p)?,
            PlotElement::Contour(p) => draw_contour(&mut chart, p)?,
            PlotElement::Scatter(p) => draw_scatter(&mut chart, p)?,
            PlotElement::Quiver(p) => draw_quiver(&mut chart, &viewport, p)?,
            PlotElement::Fill(p) => draw_fill(&mut chart, p)?,
            PlotElement::Line(p) => draw_line(&mut chart, &viewport, p)?,
            PlotElement::Text(p) => draw_text(&mut chart, p)?,
        }
    }
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x_min, y_min), (x_max, y_max)],
        BLACK.stroke_width(1),
    )))?;
    draw_legend(&mut chart, axes)?;
    Ok(viewport)
}

/// Rasterizes a figure and reports the data box of every axes.
pub fn render_with_viewports(figure: &Figure) -> RenderResult<(RgbaImage, Vec<Viewport>)> {
    if figure.width == 0 || figure.height == 0 {
        return Err(RenderError::InvalidFigureSize {
            width: figure.width,
            height: figure.height,
        });
    }
    let (width, height) = (figure.width, figure.height);
    let mut buffer = vec![0_u8; width as usize * height as usize * 3];
    let viewports = {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&to_color(figure.background_color))?;
        let cells = root.split_evenly((figure.rows, figure.cols));
        let viewports = figure
            .axes()
            .iter()
            .zip(&cells)
            .map(|(axes, cell)| draw_axes(cell, axes))
            .collect::<RenderResult<Vec<_>>>()?;
        root.present()?;
        viewports
    };
    let rgb = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::InvalidImageData)?;
    log::debug!(
        "rasterized figure {}x{} with {} axes",
        width,
        height,
        figure.len()
    );
    Ok((DynamicImage::ImageRgb8(rgb).to_rgba8(), viewports))
}

/// Rasterizes a figure.
pub fn render(figure: &Figure) -> RenderResult<RgbaImage> {
    render_with_viewports(figure).map(|(image, _)| image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_maps::{geo_model_colormap, ColorMap, Norm};
    use crate::figure::{LegendEntry, PlotElement};
    use gempy_viewer_core::Image2D;
    use glam::Vec3;
    use image::Rgba;

    fn single_axes(limits: [f64; 4]) -> Figure {
        let mut fig = Figure::new(200, 200, 1, 1);
        fig.add_axes(Axes::new(limits));
        fig
    }

    fn pixel_at(fig: &Figure, p: DVec2) -> Rgba<u8> {
        let (img, viewports) = render_with_viewports(fig).unwrap();
        let px = viewports[0].to_pixel(p);
        *img.get_pixel(px.x as u32, px.y as u32)
    }

    #[test]
    fn test_viewport_round_trip() {
        let fig = single_axes([0.0, 100.0, -50.0, 50.0]);
        let (_, viewports) = render_with_viewports(&fig).unwrap();
        let vp = viewports[0];
        let p = DVec2::new(25.0, 10.0);
        let px = vp.to_pixel(p);
        let back = vp.to_data(px.x, px.y);
        assert!((back - p).length() < 1e-9);
        // square box in a square cell, give or take the pixel rounding
        assert!((vp.width - vp.height).abs() <= 2.0);
    }

    #[test]
    fn test_label_areas_and_title_shrink_the_box() {
        let mut fig = single_axes([0.0, 1.0, 0.0, 1.0]);
        let (_, plain) = render_with_viewports(&fig).unwrap();
        assert!(plain[0].x0 >= f64::from(Y_LABEL_AREA));
        assert!(plain[0].y0 + plain[0].height <= f64::from(200 - X_LABEL_AREA));

        fig.axes_at_mut(0)
            .unwrap()
            .set_title("Cell Number: mid Direction: y")
            .set_labels("X", "Z");
        let (_, titled) = render_with_viewports(&fig).unwrap();
        assert!(titled[0].y0 > plain[0].y0);
        assert!(titled[0].y0 + titled[0].height <= f64::from(200 - X_LABEL_AREA));
    }

    #[test]
    fn test_zero_size_figure_fails() {
        let fig = Figure::new(0, 10, 1, 1);
        assert!(matches!(
            render(&fig),
            Err(RenderError::InvalidFigureSize { width: 0, .. })
        ));
    }

    #[test]
    fn test_image_layer_colors_pixels() {
        let mut fig = single_axes([0.0, 2.0, 0.0, 2.0]);
        let (cmap, norm) = geo_model_colormap(&["#ff0000", "#0000ff"]).unwrap();
        // left column id 1 (red), right column id 2 (blue)
        #[allow(clippy::cast_precision_loss)]
        let image = Image2D::from_fn(2, 2, |c, _| (c + 1) as f64);
        fig.axes_at_mut(0).unwrap().add(
            -100.0,
            PlotElement::Image(ImagePlot {
                image,
                extent: [0.0, 2.0, 0.0, 2.0],
                cmap,
                norm,
                alpha: 1.0,
            }),
        );
        assert_eq!(
            pixel_at(&fig, DVec2::new(0.5, 1.0)),
            Rgba([255, 0, 0, 255])
        );
        assert_eq!(
            pixel_at(&fig, DVec2::new(1.5, 1.0)),
            Rgba([0, 0, 255, 255])
        );
    }

    #[test]
    fn test_zorder_decides_overlap() {
        let mut fig = single_axes([0.0, 1.0, 0.0, 1.0]);
        let square = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let ax = fig.axes_at_mut(0).unwrap();
        ax.add(
            10.0,
            PlotElement::Fill(FillPlot {
                polygon: square.clone(),
                color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            }),
        );
        ax.add(
            -100.0,
            PlotElement::Image(ImagePlot {
                image: Image2D::from_fn(1, 1, |_, _| 0.0),
                extent: [0.0, 1.0, 0.0, 1.0],
                cmap: ColorMap::new("white", vec![Vec3::ONE]),
                norm: Norm::Linear {
                    vmin: 0.0,
                    vmax: 1.0,
                },
                alpha: 1.0,
            }),
        );
        // the fill has the higher z-order even though it was added first
        assert_eq!(pixel_at(&fig, DVec2::new(0.5, 0.5)), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_nan_pixels_stay_background() {
        let mut fig = single_axes([0.0, 1.0, 0.0, 1.0]);
        fig.axes_at_mut(0).unwrap().add(
            0.0,
            PlotElement::Image(ImagePlot {
                image: Image2D::from_fn(1, 1, |_, _| f64::NAN),
                extent: [0.0, 1.0, 0.0, 1.0],
                cmap: ColorMap::new("black", vec![Vec3::ZERO]),
                norm: Norm::Linear {
                    vmin: 0.0,
                    vmax: 1.0,
                },
                alpha: 1.0,
            }),
        );
        assert_eq!(
            pixel_at(&fig, DVec2::new(0.5, 0.5)),
            Rgba([255, 255, 255, 255])
        );
    }

    #[test]
    fn test_legend_is_drawn() {
        let plain = single_axes([0.0, 1.0, 0.0, 1.0]);
        let mut legend = plain.clone();
        legend.axes_at_mut(0).unwrap().add_legend_entry(LegendEntry {
            label: "rock1".to_string(),
            color: Vec4::new(0.0, 0.33, 0.51, 1.0),
            plot_type: PlotType::Scatter,
        });
        assert_ne!(render(&plain).unwrap(), render(&legend).unwrap());
    }

    #[test]
    fn test_dashes_leave_gaps() {
        let fig = single_axes([0.0, 100.0, 0.0, 100.0]);
        let (_, viewports) = render_with_viewports(&fig).unwrap();
        let line = [DVec2::new(0.0, 50.0), DVec2::new(100.0, 50.0)];
        let pieces = dashes(&line, &viewports[0]);
        assert!(pieces.len() > 1);
        assert!(pieces.iter().all(|piece| piece.len() >= 2));
        // consecutive dashes do not touch
        assert!(pieces[1][0].0 > pieces[0][pieces[0].len() - 1].0);
    }
}
