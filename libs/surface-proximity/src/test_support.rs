//! Mesh fixtures shared by unit tests.

use crate::core::vec3::Vec3;
use crate::source::DeformingMesh;

/// Node index of grid point `(i, j)` in an `n × n` cell grid.
pub fn grid_index(n: usize, i: usize, j: usize) -> usize {
    j * (n + 1) + i
}

/// Facets of an `n × n` cell grid over nodes `offset..`.
///
/// Triangulated grids split each cell along its diagonal. `up` selects
/// counter-clockwise winding seen from `+z`.
pub fn grid_facets(n: usize, offset: usize, up: bool, quads: bool) -> Vec<Vec<usize>> {
    let mut facets = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let v00 = offset + grid_index(n, i, j);
            let v10 = offset + grid_index(n, i + 1, j);
            let v11 = offset + grid_index(n, i + 1, j + 1);
            let v01 = offset + grid_index(n, i, j + 1);
            match (quads, up) {
                (true, true) => facets.push(vec![v00, v10, v11, v01]),
                (true, false) => facets.push(vec![v00, v01, v11, v10]),
                (false, true) => {
                    facets.push(vec![v00, v10, v11]);
                    facets.push(vec![v00, v11, v01]);
                }
                (false, false) => {
                    facets.push(vec![v00, v11, v10]);
                    facets.push(vec![v00, v01, v11]);
                }
            }
        }
    }
    facets
}

/// Node positions of an `n × n` cell grid over the unit square, lifted by
/// `height(x, y)`.
pub fn grid_positions(n: usize, height: impl Fn(f64, f64) -> f64) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            let x = i as f64 / n as f64;
            let y = j as f64 / n as f64;
            positions.push(Vec3::new(x, y, height(x, y)));
        }
    }
    positions
}

/// Two unit squares: `A` at `z = 0` facing `+z`, `B` at `z = gap` facing `-z`.
///
/// Returns the mesh plus the facet ids of `A` and `B`.
pub fn facing_plates(n: usize, gap: f64, quads: bool) -> (DeformingMesh, Vec<usize>, Vec<usize>) {
    let nodes = (n + 1) * (n + 1);
    let mut facets = grid_facets(n, 0, true, quads);
    let a: Vec<usize> = (0..facets.len()).collect();
    facets.extend(grid_facets(n, nodes, false, quads));
    let b: Vec<usize> = (a.len()..facets.len()).collect();

    let mut frame = grid_positions(n, |_, _| 0.0);
    frame.extend(grid_positions(n, |_, _| gap));

    let mesh = DeformingMesh::new(facets, vec![frame]).unwrap();
    (mesh, a, b)
}

/// A dome over the unit square, convex seen from above, and a flat grid
/// hovering above it. Returns the mesh, the dome facets and the flat facets.
pub fn dome_under_plate(n: usize) -> (DeformingMesh, Vec<usize>, Vec<usize>) {
    let nodes = (n + 1) * (n + 1);
    let mut facets = grid_facets(n, 0, true, false);
    let dome: Vec<usize> = (0..facets.len()).collect();
    facets.extend(grid_facets(n, nodes, false, false));
    let plate: Vec<usize> = (dome.len()..facets.len()).collect();

    let mut frame = grid_positions(n, |x, y| 0.5 - (x - 0.5).powi(2) - (y - 0.5).powi(2));
    frame.extend(grid_positions(n, |x, y| 0.8 + 0.1 * x - 0.05 * y));

    let mesh = DeformingMesh::new(facets, vec![frame]).unwrap();
    (mesh, dome, plate)
}
