//! A small three-layer model shared by the integration tests.

#![allow(dead_code)]

use gempy_viewer::*;

pub const EXTENT: [f64; 6] = [0.0, 1000.0, 0.0, 1000.0, 0.0, 1000.0];

/// Lithology id at height `z`: rock2 on top, rock1, basement below.
pub fn lith_at(z: f64) -> f64 {
    if z < 300.0 {
        3.0
    } else if z < 600.0 {
        2.0
    } else {
        1.0
    }
}

pub fn scalar_at(z: f64) -> f64 {
    z / 1000.0
}

pub fn frame() -> StructuralFrame {
    StructuralFrame::new(vec![
        StructuralElement::new("rock2", "#9f0052", 1),
        StructuralElement::new("rock1", "#015482", 2),
        StructuralElement::new("basement", "#ffbe00", 3),
    ])
}

/// The model with its grids and input data but no solutions.
pub fn uncomputed_model(resolution: [usize; 3]) -> GeoModel {
    let regular_grid = RegularGrid::new(EXTENT, resolution).unwrap();
    let mut grid = Grid::new(regular_grid);
    grid.set_sections([
        Section::new("section_1", DVec2::new(100.0, 500.0), DVec2::new(900.0, 500.0), [20, 10]),
        Section::new("section_2", DVec2::new(500.0, 100.0), DVec2::new(500.0, 900.0), [20, 10]),
    ]);
    grid.set_topography(
        Topography::from_fn([0.0, 1000.0, 0.0, 1000.0], [11, 11], |x, _| 800.0 + 0.1 * x).unwrap(),
    );

    let mut model = GeoModel::new("layers", frame(), grid);
    model.surface_points = vec![
        SurfacePoint {
            position: DVec3::new(500.0, 500.0, 300.0),
            id: 2,
        },
        SurfacePoint {
            position: DVec3::new(500.0, 500.0, 600.0),
            id: 1,
        },
        SurfacePoint {
            position: DVec3::new(500.0, 50.0, 450.0),
            id: 2,
        },
    ];
    model.orientations = vec![Orientation {
        position: DVec3::new(500.0, 550.0, 450.0),
        gradient: DVec3::new(0.0, 0.0, 1.0),
        id: 1,
    }];
    model
}

/// The model with solutions on every grid.
pub fn layered_model(resolution: [usize; 3]) -> GeoModel {
    let mut model = uncomputed_model(resolution);
    let centers = model.grid.regular_grid.values();
    let lith_block: Vec<f64> = centers.iter().map(|c| lith_at(c.z)).collect();
    let scalar: Vec<f64> = centers.iter().map(|c| scalar_at(c.z)).collect();

    // Sections: along-trace slowest, z cell centres 50, 150, ..., 950
    let mut section_lith = Vec::new();
    let mut section_sf = Vec::new();
    for _ in 0..model.grid.sections.len() {
        for _along in 0..20 {
            for k in 0..10_u32 {
                let z = 50.0 + 100.0 * f64::from(k);
                section_lith.push(lith_at(z));
                section_sf.push(scalar_at(z));
            }
        }
    }

    let topo_points = model.grid.topography().unwrap().points();
    let map_lith = topo_points.iter().map(|p| lith_at(p.z)).collect();
    let map_sf = topo_points.iter().map(|p| scalar_at(p.z)).collect();

    model.solutions = Some(Solutions {
        lith_block: lith_block.clone(),
        scalar_field_matrix: vec![scalar.clone()],
        values_matrix: vec![scalar.iter().map(|v| v * 10.0).collect()],
        block_matrix: vec![lith_block],
        scalar_field_at_surface_points: vec![vec![0.6, 0.3, 0.0]],
        geological_map: Some(GridSolution {
            lith: map_lith,
            scalar_fields: vec![map_sf],
        }),
        sections: Some(GridSolution {
            lith: section_lith,
            scalar_fields: vec![section_sf],
        }),
        surfaces: vec![
            SurfaceMesh {
                element: "rock1".to_string(),
                vertices: vec![
                    DVec3::new(0.0, 0.0, 300.0),
                    DVec3::new(1000.0, 0.0, 300.0),
                    DVec3::new(0.0, 1000.0, 300.0),
                ],
                edges: vec![[0, 1, 2]],
            },
            SurfaceMesh {
                element: "rock2".to_string(),
                vertices: Vec::new(),
                edges: Vec::new(),
            },
        ],
    });
    model
}
