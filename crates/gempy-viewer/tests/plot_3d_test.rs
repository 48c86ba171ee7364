//! 3D scene integration tests for gempy-viewer-rs.
//!
//! These tests build the scene of a small layered model and check the
//! structures, arrays and color mappings it carries, plus the PLY export.

mod common;

use common::{layered_model, uncomputed_model};
use gempy_viewer::*;

fn with_topography(data_type: TopographyDataType) -> Plot3DOptions {
    Plot3DOptions {
        show: ShowFlags {
            topography: true,
            ..ShowFlags::default()
        },
        topography_scalar_type: data_type,
        ..Plot3DOptions::default()
    }
}

#[test]
fn default_scene() {
    let model = layered_model([10, 10, 10]);
    let vista = plot_3d(&model, &Plot3DOptions::default()).unwrap();

    let grid = vista.regular_grid.as_ref().unwrap();
    assert_eq!(grid.array_names(), vec!["id".to_string()]);
    assert_eq!(grid.active_scalars().unwrap().name(), "id");
    assert_eq!(grid.active_scalars().unwrap().range(), (0.0, 2.0));
    assert!((grid.opacity() - 0.5).abs() < f32::EPSILON);
    // Ids are shifted to start at zero
    let ids = grid.array("id").unwrap().values();
    assert!(ids.iter().all(|id| (0.0..=2.0).contains(id)));

    let bar = vista.scalar_bar.as_ref().unwrap();
    assert_eq!(bar.title, "id");
    assert_eq!(bar.n_labels, 3);
    assert_eq!(bar.range, (0.0, 2.0));

    let names: Vec<_> = vista.structures().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(names, vec!["regular_grid", "surface_points", "orientations", "rock1"]);
    assert!(vista.topography.is_none());
}

#[test]
fn scalar_and_value_arrays() {
    let model = layered_model([10, 10, 10]);
    let show = ShowFlags {
        scalar: true,
        values: true,
        ..ShowFlags::default()
    };

    let options = Plot3DOptions {
        show,
        active_scalar_field: Some("sf_0".to_string()),
        ..Plot3DOptions::default()
    };
    let vista = plot_3d(&model, &options).unwrap();
    let grid = vista.regular_grid.as_ref().unwrap();
    assert_eq!(
        grid.array_names(),
        vec!["id".to_string(), "sf_0".to_string(), "values_0".to_string()]
    );
    assert_eq!(grid.active_scalars().unwrap().name(), "sf_0");

    let options = Plot3DOptions {
        show,
        active_scalar_field: Some("lith".to_string()),
        ..Plot3DOptions::default()
    };
    let vista = plot_3d(&model, &options).unwrap();
    assert_eq!(vista.regular_grid.as_ref().unwrap().active_scalars().unwrap().name(), "id");
}

#[test]
fn unknown_active_scalar_field() {
    let model = layered_model([10, 10, 10]);
    let options = Plot3DOptions {
        active_scalar_field: Some("porosity".to_string()),
        ..Plot3DOptions::default()
    };
    match plot_3d(&model, &options) {
        Err(ViewerError::ScalarFieldNotFound { name, available }) => {
            assert_eq!(name, "porosity");
            assert_eq!(available, vec!["id".to_string()]);
        }
        other => panic!("expected ScalarFieldNotFound, got {:?}", other.is_ok()),
    }

    let uncomputed = uncomputed_model([10, 10, 10]);
    let options = Plot3DOptions {
        active_scalar_field: Some("lith".to_string()),
        ..Plot3DOptions::default()
    };
    assert!(matches!(
        plot_3d(&uncomputed, &options),
        Err(ViewerError::ScalarFieldNotFound { available, .. }) if available.is_empty()
    ));
}

#[test]
fn uncomputed_scene_has_only_data() {
    let model = uncomputed_model([10, 10, 10]);
    let vista = plot_3d(&model, &Plot3DOptions::default()).unwrap();

    assert!(vista.regular_grid.is_none());
    assert!(vista.surfaces.is_empty());
    assert_eq!(vista.surface_points.as_ref().unwrap().num_points(), 3);
    assert_eq!(vista.orientations.as_ref().unwrap().num_arrows(), 1);
}

#[test]
fn arrow_length_follows_model_size() {
    let model = layered_model([10, 10, 10]);
    let vista = plot_3d(&model, &Plot3DOptions::default()).unwrap();
    let arrows = vista.orientations.as_ref().unwrap();

    // 10 % of the 1000 m shortest side
    assert!((arrows.factor() - 100.0).abs() < 1e-9);
    let tip = arrows.tip(0);
    assert!((tip - DVec3::new(500.0, 550.0, 550.0)).length() < 1e-9);
}

#[test]
fn geomap_topography() {
    let model = layered_model([10, 10, 10]);
    let vista = plot_3d(&model, &with_topography(TopographyDataType::Geomap)).unwrap();

    let topography = vista.topography.as_ref().unwrap();
    let colors = topography.color_quantity().unwrap().colors();
    assert_eq!(colors.len(), 121);
    // The whole surface lies in the top unit
    let rock2 = DVec3::new(159.0, 0.0, 82.0) / 255.0;
    assert!(colors.iter().all(|c| (c.as_dvec3() - rock2).length() < 1e-6));

    let contours = vista.topography_contours.as_ref().unwrap();
    assert!(contours.num_edges() > 0);
}

#[test]
fn height_topography_uses_terrain() {
    let model = layered_model([10, 10, 10]);
    let mut options = with_topography(TopographyDataType::Topography);
    options.topography_contours = false;
    let vista = plot_3d(&model, &options).unwrap();

    let height = vista.topography.as_ref().unwrap().scalar_quantity().unwrap();
    assert_eq!(height.name(), "height");
    assert_eq!(height.color_map(), "terrain");
    assert!(vista.topography_contours.is_none());
}

#[test]
fn scalar_topography_is_not_implemented() {
    let model = layered_model([10, 10, 10]);
    assert!(matches!(
        plot_3d(&model, &with_topography(TopographyDataType::Scalars)),
        Err(ViewerError::NotImplemented(_))
    ));
}

#[test]
fn missing_topography_is_skipped() {
    let mut model = layered_model([10, 10, 10]);
    model.grid.topography = None;
    let vista = plot_3d(&model, &with_topography(TopographyDataType::Geomap)).unwrap();
    assert!(vista.topography.is_none());
}

#[test]
fn only_non_empty_surfaces_are_meshed() {
    let model = layered_model([10, 10, 10]);
    let vista = plot_3d(&model, &Plot3DOptions::default()).unwrap();

    assert_eq!(vista.surfaces.len(), 1);
    let rock1 = &vista.surfaces[0];
    assert_eq!(rock1.name(), "rock1");
    assert_eq!(rock1.num_faces(), 1);
    let blue = DVec3::new(1.0, 84.0, 130.0) / 255.0;
    assert!((rock1.color().as_dvec3() - blue).length() < 1e-6);
}

#[test]
fn vertical_exaggeration_scales_z() {
    let model = layered_model([10, 10, 10]);
    let flat = plot_3d(&model, &Plot3DOptions::default()).unwrap();
    let options = Plot3DOptions {
        ve: Some(2.0),
        ..Plot3DOptions::default()
    };
    let tall = plot_3d(&model, &options).unwrap();

    assert!((tall.z_scale() - 2.0).abs() < f64::EPSILON);
    let (flat_lo, flat_hi) = flat.bounding_box().unwrap();
    let (tall_lo, tall_hi) = tall.bounding_box().unwrap();
    assert!((tall_hi.z - 2.0 * flat_hi.z).abs() < 1e-9);
    assert!((tall_lo.z - 2.0 * flat_lo.z).abs() < 1e-9);
    assert!((tall_hi.x - flat_hi.x).abs() < 1e-9);
}

#[test]
fn scene_exports_ply() {
    let model = layered_model([4, 4, 4]);
    let vista = plot_3d(&model, &with_topography(TopographyDataType::Geomap)).unwrap();

    let dir = std::env::temp_dir().join(format!("gempy_viewer_scene_{}", std::process::id()));
    let written = vista.export_ply(&dir).unwrap();
    assert_eq!(written.len(), vista.structures().len());
    assert!(written.iter().any(|p| p.ends_with("topography.ply")));
    for path in &written {
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("ply"), "{} is not a PLY file", path.display());
    }
    let _ = std::fs::remove_dir_all(&dir);
}
