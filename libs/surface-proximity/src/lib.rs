//! # Surface Proximity
//!
//! Distance and coverage fields between two surfaces of a deforming mesh.
//!
//! For every time sample of a mesh whose topology is fixed but whose node
//! positions change, the engine computes
//!
//! - the (optionally signed) distance from each node of one surface to the
//!   other surface, and
//! - whether each node is "covered" by the opposite surface along its normal.
//!
//! ## Architecture
//!
//! ```text
//! SurfaceSource (facets + positions per sample)
//!       ↓
//! SurfaceView (facet subset, local nodes, adjacency) → normals per sample
//!       ↓
//! intersect (point→facet projection, ray→facet intersection)
//!       ↓
//! ProximityQuery (nearest node star, exhaustive fallback)
//!       ↓
//! DistanceField / CoverageField → FieldSink (facet, corner, sample)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use surface_proximity::{
//!     DeformingMesh, DistanceField, FacetField, SampledField, SurfaceSlot, Vec3,
//! };
//!
//! // Two unit triangles, one at z = 0 facing up, one at z = 1 facing down.
//! let facets = vec![vec![0, 1, 2], vec![3, 5, 4]];
//! let frame = vec![
//!     Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0),
//!     Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0),
//! ];
//! let mesh = DeformingMesh::new(facets, vec![frame]).unwrap();
//!
//! let mut map = DistanceField::new();
//! map.set_selection(&mesh, SurfaceSlot::Primary, vec![0]).unwrap();
//! map.set_selection(&mesh, SurfaceSlot::Secondary, vec![1]).unwrap();
//!
//! let mut field = FacetField::for_source(&mesh);
//! map.apply(&mesh, &mut field).unwrap();
//! assert!((field.value(0, 0, 0).unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod core;
pub mod coverage;
pub mod distance;
pub mod error;
pub mod field;
pub mod intersect;
pub mod query;
pub mod source;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::config::ProximityConfig;
pub use crate::core::vec3::Vec3;
pub use coverage::{CoverageField, CoverageSettings};
pub use distance::{DistanceField, DistanceSettings, SignConvention};
pub use error::{ProximityError, ProximityResult};
pub use field::{ApplyReport, CancelToken, SampleReport, SampledField, SurfacePair, SurfaceSlot};
pub use intersect::{Intersection, Ray, RayFilter};
pub use query::{Projection, ProximityQuery, SearchStrategy, SearchTier};
pub use source::{DeformingMesh, FacetField, FieldSink, SurfaceSource};
pub use surface::SurfaceView;
