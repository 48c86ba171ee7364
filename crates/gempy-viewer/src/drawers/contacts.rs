//! Surface contacts: isolines of each series' scalar field at the values
//! it takes on the surface points.

use gempy_viewer_core::{GeoModel, Result, ViewerError};
use gempy_viewer_render::{ContourPlot, Figure, PlotElement};

use super::{axes_of, parse_colors, plane_image, require_solutions, scalar_fields, Field};
use crate::plot_2d::SectionData2D;

const CONTACT_ZORDER: f32 = 100.0;

/// Draws the contacts of every series on the plane of `section`.
///
/// Contact colors are handed out in series order, reversed within a
/// series. Later series, and series with more surfaces, sit lower.
#[allow(clippy::cast_precision_loss)]
pub fn draw_contacts(
    figure: &mut Figure,
    model: &GeoModel,
    section: &SectionData2D,
    only_faults: bool,
) -> Result<()> {
    if only_faults {
        return Err(ViewerError::NotImplemented("fault-only contacts"));
    }
    let sol = require_solutions(model)?;
    let all_colors = parse_colors(&model.structural_frame.elements_colors_contacts())?;
    let n_series = scalar_fields(model, &section.kind)?.len();

    let mut c_id = 0;
    for e in 0..n_series {
        let levels = sol.surface_levels(e);
        let c_id2 = c_id + levels.len();
        let mut colors = all_colors
            .get(c_id.min(all_colors.len())..c_id2.min(all_colors.len()))
            .unwrap_or_default()
            .to_vec();
        colors.reverse();
        c_id = c_id2;

        if levels.is_empty() {
            continue;
        }
        let (image, extent) = match plane_image(model, section, Field::ScalarField(e)) {
            Ok(plane) => plane,
            Err(ViewerError::NotComputed(what)) => {
                log::debug!("series {e}: {what} not computed, no contacts");
                continue;
            }
            Err(err) => return Err(err),
        };

        let contour = ContourPlot::from_image(&image, extent, &levels, colors);
        log::debug!(
            "axes {}: series {e} contacts, {} segments",
            section.axes_index,
            contour.segment_count()
        );
        let zorder = CONTACT_ZORDER - (e + levels.len()) as f32;
        axes_of(figure, section)?.add(zorder, PlotElement::Contour(contour));
    }
    Ok(())
}
