//! Topology graph: unit adjacency edges and labelled nodes on a slice.

use std::collections::{BTreeSet, HashMap};

use gempy_viewer_core::{Direction, GeoModel, Result, ViewerError};
use gempy_viewer_render::{Figure, LinePlot, LineStyle, PlotElement, ScatterPlot, TextPlot};
use glam::{DVec2, DVec3, Vec4};

use super::axes_of;
use crate::plot_2d::SectionData2D;

const EDGE_ZORDER: f32 = 20.0;
const NODE_ZORDER: f32 = 21.0;
const LABEL_ZORDER: f32 = 22.0;
const NODE_SIZE: f32 = 300.0;
const LABEL_SIZE: f32 = 13.0;

/// Plane position of a centroid given in cell units.
///
/// With `scale` the cell units are mapped to model coordinates through the
/// extent and resolution of the regular grid.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn topology_position(
    model: &GeoModel,
    centroid: DVec3,
    direction: Direction,
    scale: bool,
) -> DVec2 {
    let (a, b) = direction.free_axes();
    let p = DVec2::new(centroid[a], centroid[b]);
    if !scale {
        return p;
    }
    let grid = &model.grid.regular_grid;
    let resolution = grid.resolution();
    let world = |value: f64, axis: usize| {
        let (lo, hi) = grid.axis_extent(axis);
        value * (hi - lo) / resolution[axis] as f64 + lo
    };
    DVec2::new(world(p.x, a), world(p.y, b))
}

/// Draws `edges` between node centroids and a label on every node.
pub fn draw_topology(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    edges: &[(usize, usize)],
    centroids: &HashMap<usize, DVec3>,
    direction: Direction,
    scale: bool,
) -> Result<()> {
    let position = |node: usize| {
        centroids
            .get(&node)
            .map(|c| topology_position(model, *c, direction, scale))
            .ok_or(ViewerError::MissingCentroid(node))
    };
    let lines = edges
        .iter()
        .map(|&(a, b)| Ok([position(a)?, position(b)?]))
        .collect::<Result<Vec<_>>>()?;
    let nodes = edges
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|node| Ok((node, position(node)?)))
        .collect::<Result<Vec<_>>>()?;

    let black = Vec4::new(0.0, 0.0, 0.0, 1.0);
    let axes = axes_of(figure, section)?;
    for [a, b] in lines {
        axes.add(
            EDGE_ZORDER,
            PlotElement::Line(LinePlot {
                points: vec![a, b],
                color: black,
                width: 1.0,
                style: LineStyle::Solid,
                label: None,
            }),
        );
    }
    axes.add(
        NODE_ZORDER,
        PlotElement::Scatter(ScatterPlot {
            points: nodes.iter().map(|(_, p)| *p).collect(),
            colors: vec![black],
            size: NODE_SIZE,
            edge_color: None,
        }),
    );
    for (node, p) in &nodes {
        axes.add(
            LABEL_ZORDER,
            PlotElement::Text(TextPlot {
                position: *p,
                text: node.to_string(),
                color: Vec4::ONE,
                size: LABEL_SIZE,
            }),
        );
    }
    log::debug!(
        "topology: {} edges, {} nodes on axes {}",
        edges.len(),
        nodes.len(),
        section.axes_index
    );
    Ok(())
}
