//! # Error Types
//!
//! Error types for surface proximity operations.
//!
//! ## Error Policy
//!
//! - Degenerate geometry (no projection, no intersection, zero-area facets)
//!   is not an error: the affected node keeps a zero value
//! - Structural misuse (empty surfaces, unknown facets, bad sample indices,
//!   invalid settings) is reported explicitly

use config::constants::ConfigError;
use thiserror::Error;

use crate::field::SurfaceSlot;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building surfaces or evaluating fields.
///
/// ## Example
///
/// ```rust
/// use surface_proximity::{DistanceField, FacetField, ProximityError, SampledField, SurfaceSlot};
/// use surface_proximity::{DeformingMesh, Vec3};
///
/// let mesh = DeformingMesh::new(vec![vec![0, 1, 2]], vec![vec![Vec3::ZERO, Vec3::X, Vec3::Y]]).unwrap();
/// let mut map = DistanceField::new();
/// let mut field = FacetField::for_source(&mesh);
///
/// match map.apply(&mesh, &mut field) {
///     Err(ProximityError::EmptySurface { slot }) => assert_eq!(slot, SurfaceSlot::Primary),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ProximityError {
    /// A surface slot has no facets assigned.
    ///
    /// Both surfaces must be non-empty before a field is applied.
    #[error("{slot} surface has no facets")]
    EmptySurface {
        /// Slot that is empty
        slot: SurfaceSlot,
    },

    /// A selection references a facet the source does not have.
    #[error("facet {facet} out of range (source has {facet_count} facets)")]
    FacetOutOfRange {
        /// Offending facet id
        facet: usize,
        /// Number of facets in the source
        facet_count: usize,
    },

    /// A facet has a corner count other than 3 or 4.
    #[error("facet {facet} has {corners} corners; only triangles and quadrilaterals are supported")]
    UnsupportedFacet {
        /// Offending facet id
        facet: usize,
        /// Corner count found
        corners: usize,
    },

    /// A facet references a node that has no position.
    #[error("facet {facet} references node {node} but frames have {node_count} nodes")]
    NodeOutOfRange {
        /// Offending facet id
        facet: usize,
        /// Offending node id
        node: usize,
        /// Number of nodes per frame
        node_count: usize,
    },

    /// A time sample index past the end of the source.
    #[error("sample {sample} out of range (source has {samples} samples)")]
    SampleOutOfRange {
        /// Requested sample
        sample: usize,
        /// Number of samples in the source
        samples: usize,
    },

    /// Position frames of a deforming mesh disagree in length.
    #[error("frame {frame} has {found} positions, expected {expected}")]
    FrameSizeMismatch {
        /// Offending frame (time sample)
        frame: usize,
        /// Positions in the first frame
        expected: usize,
        /// Positions in the offending frame
        found: usize,
    },

    /// Invalid numeric configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl ProximityError {
    /// Creates an empty surface error.
    pub fn empty_surface(slot: SurfaceSlot) -> Self {
        Self::EmptySurface { slot }
    }

    /// Creates a sample out of range error.
    pub fn sample_out_of_range(sample: usize, samples: usize) -> Self {
        Self::SampleOutOfRange { sample, samples }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for surface proximity operations.
pub type ProximityResult<T> = Result<T, ProximityError>;

// =============================================================================
// TESTS
// =============================================================================
