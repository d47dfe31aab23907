//! Per-sample normal field of a surface view.
//!
//! Facet normals come from the first two edges of each facet. A node normal
//! is the normalized sum of the unit normals of its facets.

use super::SurfaceView;
use crate::core::vec3::{facet_normal, Vec3};

/// Recomputes facet and node normals from the cached positions.
pub(super) fn compute(view: &mut SurfaceView, flip: bool) {
    view.node_normals.fill(Vec3::ZERO);

    for facet in 0..view.corners.len() {
        let normal = facet_normal(view.facet_points(facet).as_slice());
        view.facet_normals[facet] = normal;
        for &node in view.corners[facet].as_slice() {
            view.node_normals[node] += normal;
        }
    }

    for normal in &mut view.node_normals {
        *normal = normal.normalize_or_zero();
    }

    if flip {
        for normal in view.node_normals.iter_mut().chain(view.facet_normals.iter_mut()) {
            *normal = -*normal;
        }
    }
}
