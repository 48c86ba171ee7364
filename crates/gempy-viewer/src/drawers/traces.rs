//! Section traces in map view.

use gempy_viewer_core::{GeoModel, Result};
use gempy_viewer_render::{Figure, LegendEntry, LinePlot, LineStyle, PlotElement, PlotType};

use super::{axes_of, parse_colors};
use crate::plot_2d::SectionData2D;

const TRACE_ZORDER: f32 = 12.0;

/// Line color cycle.
const TRACE_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Draws a dashed line from start to stop of each section, labelled with
/// its name. `names` restricts the traces drawn; unknown names are skipped.
pub fn draw_section_traces(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    names: Option<&[String]>,
) -> Result<()> {
    let sections = &model.grid.sections;
    let selected: Vec<_> = match names {
        Some(names) => names
            .iter()
            .filter_map(|name| sections.get(name).ok())
            .collect(),
        None => sections.iter().collect(),
    };
    let colors = parse_colors(&TRACE_COLORS)?;

    let axes = axes_of(figure, section)?;
    for (i, trace) in selected.into_iter().enumerate() {
        let color = colors[i % colors.len()];
        axes.add(
            TRACE_ZORDER,
            PlotElement::Line(LinePlot {
                points: vec![trace.start, trace.stop],
                color,
                width: 1.5,
                style: LineStyle::Dashed,
                label: Some(trace.name.clone()),
            }),
        )
        .add_legend_entry(LegendEntry {
            label: trace.name.clone(),
            color,
            plot_type: PlotType::Line,
        });
    }
    Ok(())
}
