//! Image compositing: reshapes flat solution arrays and cuts the 2D plane a
//! plot displays.

use crate::error::{Result, ViewerError};
use crate::grid::{Sections, Topography};
use crate::image2d::Image2D;
use crate::slicer::SlicerData;

fn check_len(values: &[f64], expected: usize, what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(ViewerError::NotComputed(what.to_string()));
    }
    if values.len() != expected {
        return Err(ViewerError::SizeMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Cuts the plane selected by `slicer` out of a flat regular-grid array.
///
/// The result is transposed to image orientation: columns follow the first
/// free axis, rows the second.
pub fn slice_block(
    block: &[f64],
    resolution: [usize; 3],
    slicer: &SlicerData,
    what: &str,
) -> Result<Image2D> {
    check_len(block, resolution.iter().product(), what)?;

    let (u, v) = slicer.free_axes();
    let (width, height) = slicer.shape();
    let [_, ny, nz] = resolution;
    let mut idx = [0usize; 3];
    let fixed = slicer.direction.axis();
    idx[fixed] = slicer.index[fixed].range().start;

    let u_start = slicer.index[u].range().start;
    let v_start = slicer.index[v].range().start;
    Ok(Image2D::from_fn(width, height, |col, row| {
        let mut ijk = idx;
        ijk[u] = u_start + col;
        ijk[v] = v_start + row;
        block[(ijk[0] * ny + ijk[1]) * nz + ijk[2]]
    }))
}

/// Image of one named section out of the concatenated section solutions.
///
/// Section samples are stored along-trace-slowest, so the reshaped
/// `[n_along, n_z]` block is transposed to put z on the rows.
pub fn section_image(values: &[f64], sections: &Sections, name: &str) -> Result<Image2D> {
    if values.is_empty() {
        return Err(ViewerError::NotComputed(format!("section solution '{name}'")));
    }
    let (l0, l1) = sections.section_args(name)?;
    if values.len() < l1 {
        return Err(ViewerError::SizeMismatch {
            expected: sections.total_points(),
            actual: values.len(),
        });
    }
    let [n_along, n_z] = sections.get(name)?.resolution;
    let block = &values[l0..l1];
    Ok(Image2D::from_fn(n_along, n_z, |col, row| {
        block[col * n_z + row]
    }))
}

/// Image of a geological-map array over the topography raster.
pub fn topography_image(values: &[f64], topography: &Topography) -> Result<Image2D> {
    let [nx, ny] = topography.resolution();
    check_len(values, nx * ny, "geological map")?;
    Ok(Image2D::from_fn(nx, ny, |col, row| values[col * ny + row]))
}

/// Elevation of the topography raster as an image (rows follow y).
pub fn elevation_image(topography: &Topography) -> Result<Image2D> {
    topography_image(topography.elevation(), topography)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Direction, RegularGrid, Section};
    use crate::slicer::{slice_cross_section, CellNumber};
    use glam::DVec2;

    #[allow(clippy::cast_precision_loss)]
    fn encoded_block(res: [usize; 3]) -> Vec<f64> {
        // value = 100 * i + 10 * j + k
        let mut out = Vec::new();
        for i in 0..res[0] {
            for j in 0..res[1] {
                for k in 0..res[2] {
                    out.push((100 * i + 10 * j + k) as f64);
                }
            }
        }
        out
    }

    fn grid(res: [usize; 3]) -> RegularGrid {
        RegularGrid::new([0.0, 1.0, 0.0, 1.0, 0.0, 1.0], res).unwrap()
    }

    #[test]
    fn test_slice_y_transposed() {
        let res = [3, 4, 5];
        let g = grid(res);
        let s = slice_cross_section(&g, Direction::Y, CellNumber::Index(2)).unwrap();
        let img = slice_block(&encoded_block(res), res, &s, "lith block").unwrap();
        assert_eq!((img.width(), img.height()), (3, 5));
        // column = x index, row = z index
        assert_eq!(img.get(1, 4), 100.0 + 20.0 + 4.0);
        assert_eq!(img.get(2, 0), 220.0);
    }

    #[test]
    fn test_slice_x_and_z() {
        let res = [3, 4, 5];
        let g = grid(res);
        let block = encoded_block(res);

        let sx = slice_cross_section(&g, Direction::X, CellNumber::Index(1)).unwrap();
        let ix = slice_block(&block, res, &sx, "block").unwrap();
        assert_eq!((ix.width(), ix.height()), (4, 5));
        assert_eq!(ix.get(3, 2), 100.0 + 30.0 + 2.0);

        let sz = slice_cross_section(&g, Direction::Z, CellNumber::Mid).unwrap();
        let iz = slice_block(&block, res, &sz, "block").unwrap();
        assert_eq!((iz.width(), iz.height()), (3, 4));
        assert_eq!(iz.get(2, 3), 200.0 + 30.0 + 2.0);
    }

    #[test]
    fn test_empty_block_is_not_computed() {
        let res = [2, 2, 2];
        let g = grid(res);
        let s = slice_cross_section(&g, Direction::Y, CellNumber::Mid).unwrap();
        assert!(matches!(
            slice_block(&[], res, &s, "lith block"),
            Err(ViewerError::NotComputed(what)) if what == "lith block"
        ));
        assert!(matches!(
            slice_block(&[0.0; 7], res, &s, "lith block"),
            Err(ViewerError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_section_image() {
        let sections: Sections = [
            Section::new("a", DVec2::ZERO, DVec2::X, [2, 3]),
            Section::new("b", DVec2::ZERO, DVec2::Y, [3, 2]),
        ]
        .into_iter()
        .collect();
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = (0..12).map(|v| v as f64).collect();

        let b = section_image(&values, &sections, "b").unwrap();
        assert_eq!((b.width(), b.height()), (3, 2));
        // b occupies 6..12, sample (along=2, z=1) -> 6 + 2 * 2 + 1
        assert_eq!(b.get(2, 1), 11.0);
        assert!(section_image(&values, &sections, "missing").is_err());
        assert!(matches!(
            section_image(&[], &sections, "a"),
            Err(ViewerError::NotComputed(_))
        ));
    }

    #[test]
    fn test_topography_image() {
        let topo = Topography::from_fn([0.0, 1.0, 0.0, 1.0], [3, 2], |x, y| x + 10.0 * y).unwrap();
        let img = elevation_image(&topo).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert!((img.get(2, 1) - 11.0).abs() < 1e-12);
        assert!(topography_image(&[1.0; 5], &topo).is_err());
    }
}
