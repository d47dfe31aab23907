//! In-memory time-varying mesh.

use config::constants::{MAX_FACET_CORNERS, MIN_FACET_CORNERS};

use super::SurfaceSource;
use crate::core::vec3::Vec3;
use crate::error::{ProximityError, ProximityResult};

/// A facet table plus one position frame per time sample.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{DeformingMesh, SurfaceSource, Vec3};
///
/// let frames = vec![
///     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
///     vec![Vec3::Z, Vec3::X + Vec3::Z, Vec3::Y + Vec3::Z],
/// ];
/// let mesh = DeformingMesh::new(vec![vec![0, 1, 2]], frames).unwrap();
/// assert_eq!(mesh.sample_count(), 2);
/// assert_eq!(mesh.node_position(0, 1), Vec3::Z);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeformingMesh {
    facets: Vec<Vec<usize>>,
    frames: Vec<Vec<Vec3>>,
}

impl DeformingMesh {
    /// Creates a mesh, validating facet sizes, node references and frame
    /// lengths.
    pub fn new(facets: Vec<Vec<usize>>, frames: Vec<Vec<Vec3>>) -> ProximityResult<Self> {
        let node_count = frames.first().map_or(0, Vec::len);

        for (frame, positions) in frames.iter().enumerate() {
            if positions.len() != node_count {
                return Err(ProximityError::FrameSizeMismatch {
                    frame,
                    expected: node_count,
                    found: positions.len(),
                });
            }
        }

        for (facet, nodes) in facets.iter().enumerate() {
            if !(MIN_FACET_CORNERS..=MAX_FACET_CORNERS).contains(&nodes.len()) {
                return Err(ProximityError::UnsupportedFacet {
                    facet,
                    corners: nodes.len(),
                });
            }
            if let Some(&node) = nodes.iter().find(|&&n| n >= node_count) {
                return Err(ProximityError::NodeOutOfRange {
                    facet,
                    node,
                    node_count,
                });
            }
        }

        Ok(Self { facets, frames })
    }

    /// Creates a mesh from one frame, then derives every further frame by
    /// applying `deform(sample, rest_position)`.
    ///
    /// Useful for synthetic motions such as rigid translations.
    pub fn from_motion<F>(
        facets: Vec<Vec<usize>>,
        rest: Vec<Vec3>,
        samples: usize,
        deform: F,
    ) -> ProximityResult<Self>
    where
        F: Fn(usize, Vec3) -> Vec3,
    {
        let frames = (0..samples)
            .map(|sample| rest.iter().map(|&p| deform(sample, p)).collect())
            .collect();
        Self::new(facets, frames)
    }

    /// Number of nodes per frame.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.frames.first().map_or(0, Vec::len)
    }

    /// Positions of every node at `sample`, if the sample exists.
    pub fn frame(&self, sample: usize) -> Option<&[Vec3]> {
        self.frames.get(sample).map(Vec::as_slice)
    }
}

impl SurfaceSource for DeformingMesh {
    #[inline]
    fn facet_count(&self) -> usize {
        self.facets.len()
    }

    #[inline]
    fn facet_nodes(&self, facet: usize) -> &[usize] {
        &self.facets[facet]
    }

    #[inline]
    fn node_position(&self, node: usize, sample: usize) -> Vec3 {
        self.frames[sample][node]
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.frames.len()
    }
}
