//! Mesh fixtures shared by the integration tests.

#![allow(dead_code)]

use surface_proximity::{DeformingMesh, FacetField, SurfaceSource, Vec3};

/// Facets of an `n × n` triangulated (or quad) grid over nodes `offset..`,
/// wound counter-clockwise from `+z` when `up` is set.
pub fn grid(n: usize, offset: usize, up: bool, quads: bool) -> Vec<Vec<usize>> {
    let index = |i: usize, j: usize| offset + j * (n + 1) + i;
    let mut facets = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let (v00, v10, v11, v01) = (index(i, j), index(i + 1, j), index(i + 1, j + 1), index(i, j + 1));
            match (quads, up) {
                (true, true) => facets.push(vec![v00, v10, v11, v01]),
                (true, false) => facets.push(vec![v00, v01, v11, v10]),
                (false, true) => facets.extend([vec![v00, v10, v11], vec![v00, v11, v01]]),
                (false, false) => facets.extend([vec![v00, v11, v10], vec![v00, v01, v11]]),
            }
        }
    }
    facets
}

/// Grid nodes over the unit square at height `z`.
pub fn square(n: usize, z: f64) -> Vec<Vec3> {
    (0..=n)
        .flat_map(|j| (0..=n).map(move |i| Vec3::new(i as f64 / n as f64, j as f64 / n as f64, z)))
        .collect()
}

/// Facet ids of two plates in one mesh.
pub struct Plates {
    pub mesh: DeformingMesh,
    pub a: Vec<usize>,
    pub b: Vec<usize>,
}

/// Two plates over the unit square: `A` at `z = 0`, `B` at `z = gap`.
///
/// `facing` makes them face each other (`A` up, `B` down), otherwise they
/// face away. `a_quads`/`b_quads` choose quadrilateral facets per plate.
/// `B` is displaced by `motion(sample)` at each of `samples` time samples.
pub fn plates(
    n: usize,
    gap: f64,
    facing: bool,
    a_quads: bool,
    b_quads: bool,
    samples: usize,
    motion: impl Fn(usize) -> Vec3,
) -> Plates {
    let nodes = (n + 1) * (n + 1);
    let mut facets = grid(n, 0, facing, a_quads);
    let a: Vec<usize> = (0..facets.len()).collect();
    facets.extend(grid(n, nodes, !facing, b_quads));
    let b: Vec<usize> = (a.len()..facets.len()).collect();

    let frames = (0..samples)
        .map(|sample| {
            let offset = motion(sample);
            let mut frame = square(n, 0.0);
            frame.extend(square(n, gap).into_iter().map(|p| p + offset));
            frame
        })
        .collect();
    let mesh = DeformingMesh::new(facets, frames).unwrap();
    Plates { mesh, a, b }
}

/// Facing triangulated plates, static over one sample.
pub fn facing(n: usize, gap: f64) -> Plates {
    plates(n, gap, true, false, false, 1, |_| Vec3::ZERO)
}

/// Every corner value of `facets` at `sample`.
pub fn corners(field: &FacetField, sample: usize, facets: &[usize]) -> Vec<f64> {
    facets
        .iter()
        .flat_map(|&f| field.facet_values(sample, f).unwrap_or_default().to_vec())
        .collect()
}

/// Zeroed sink for `mesh`.
pub fn sink(mesh: &DeformingMesh) -> FacetField {
    FacetField::for_source(mesh)
}

/// Number of time samples of `mesh`.
pub fn samples(mesh: &DeformingMesh) -> usize {
    mesh.sample_count()
}
