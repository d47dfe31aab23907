//! # Host Interfaces
//!
//! The engine sees the surrounding model through two narrow interfaces:
//!
//! - [`SurfaceSource`]: facet corner node ids and node positions per time
//!   sample (topology is fixed, geometry deforms)
//! - [`FieldSink`]: a per-sample nodal scalar slot keyed by facet id and local
//!   corner index
//!
//! [`DeformingMesh`] and [`FacetField`] are in-memory implementations of both.

mod field;
mod mesh;

pub use field::FacetField;
pub use mesh::DeformingMesh;

use crate::core::vec3::Vec3;

/// A mesh whose node positions vary over discrete time samples.
pub trait SurfaceSource {
    /// Number of facets in the mesh.
    fn facet_count(&self) -> usize;

    /// Node ids at the corners of `facet`, in winding order.
    ///
    /// Facets have between `MIN_FACET_CORNERS` and `MAX_FACET_CORNERS`
    /// corners.
    fn facet_nodes(&self, facet: usize) -> &[usize];

    /// World position of `node` at time sample `sample`.
    fn node_position(&self, node: usize, sample: usize) -> Vec3;

    /// Number of time samples.
    fn sample_count(&self) -> usize;
}

/// Destination of per-node scalar values.
pub trait FieldSink {
    /// Stores `value` for corner `corner` of facet `facet` at time `sample`.
    fn write(&mut self, sample: usize, facet: usize, corner: usize, value: f64);
}
