//! # Surface Views
//!
//! A [`SurfaceView`] is the subset of a mesh's facets designated by a user
//! selection, together with the nodes those facets touch.
//!
//! ## Structure
//!
//! - Facet ids reference the source mesh; facet *indices* are positions in
//!   the view's facet list
//! - Nodes get local indices `0..N` in first-seen order while walking facets
//!   in list order; local index and node id form a bijection
//! - Each node keeps the list of view facets that touch it (its "star")
//! - Position and normal caches hold one time sample and are overwritten by
//!   [`SurfaceView::update`]

mod normals;

use std::collections::HashMap;

use config::constants::{MAX_FACET_CORNERS, MIN_FACET_CORNERS};

use crate::core::vec3::Vec3;
use crate::error::{ProximityError, ProximityResult};
use crate::source::SurfaceSource;

/// Local node indices at the corners of one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetCorners {
    nodes: [usize; MAX_FACET_CORNERS],
    len: usize,
}

impl FacetCorners {
    /// Local node indices in winding order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.nodes[..self.len]
    }

    /// Number of corners (3 or 4).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; facets have at least three corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Corner positions of one facet at the cached time sample.
#[derive(Debug, Clone, Copy)]
pub struct FacetPoints {
    points: [Vec3; MAX_FACET_CORNERS],
    len: usize,
}

impl FacetPoints {
    /// Corner positions in winding order.
    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points[..self.len]
    }
}

/// A facet subset of a mesh with cached per-sample geometry.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{DeformingMesh, SurfaceView, Vec3};
///
/// let frame = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
/// let mesh = DeformingMesh::new(vec![vec![0, 1, 2], vec![1, 3, 2]], vec![frame]).unwrap();
///
/// let mut view = SurfaceView::build(&mesh, vec![1, 0]).unwrap();
/// assert_eq!(view.node_ids(), &[1, 3, 2, 0]);
/// assert_eq!(view.node_facets(0), &[0, 1]);
///
/// view.update(&mesh, 0, false);
/// assert_eq!(view.node_normal(0), Vec3::Z);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurfaceView {
    /// Facet ids in selection order
    facets: Vec<usize>,
    /// Node ids by local index
    nodes: Vec<usize>,
    /// Node id -> local index
    local: HashMap<usize, usize>,
    /// Local corner table per facet
    corners: Vec<FacetCorners>,
    /// Facet indices touching each local node
    node_facets: Vec<Vec<usize>>,
    /// Node positions at the cached sample
    positions: Vec<Vec3>,
    /// Unit node normals at the cached sample
    node_normals: Vec<Vec3>,
    /// Unit facet normals at the cached sample
    facet_normals: Vec<Vec3>,
    /// Sample the caches hold, if any
    sample: Option<usize>,
}

impl SurfaceView {
    /// Builds a view over `facets`.
    ///
    /// An empty list yields a view with no nodes; every query on it is a
    /// no-op. Facet ids past the end of the source and facets with an
    /// unsupported corner count are rejected.
    pub fn build<S: SurfaceSource + ?Sized>(
        source: &S,
        facets: Vec<usize>,
    ) -> ProximityResult<Self> {
        let facet_count = source.facet_count();
        let mut nodes = Vec::new();
        let mut local = HashMap::new();
        let mut corners = Vec::with_capacity(facets.len());

        for &facet in &facets {
            if facet >= facet_count {
                return Err(ProximityError::FacetOutOfRange { facet, facet_count });
            }
            let ids = source.facet_nodes(facet);
            if !(MIN_FACET_CORNERS..=MAX_FACET_CORNERS).contains(&ids.len()) {
                return Err(ProximityError::UnsupportedFacet {
                    facet,
                    corners: ids.len(),
                });
            }

            let mut table = FacetCorners {
                nodes: [0; MAX_FACET_CORNERS],
                len: ids.len(),
            };
            for (slot, &id) in table.nodes.iter_mut().zip(ids) {
                *slot = *local.entry(id).or_insert_with(|| {
                    nodes.push(id);
                    nodes.len() - 1
                });
            }
            corners.push(table);
        }

        let mut node_facets = vec![Vec::new(); nodes.len()];
        for (index, table) in corners.iter().enumerate() {
            for &node in table.as_slice() {
                node_facets[node].push(index);
            }
        }

        Ok(Self {
            positions: vec![Vec3::ZERO; nodes.len()],
            node_normals: vec![Vec3::ZERO; nodes.len()],
            facet_normals: vec![Vec3::ZERO; facets.len()],
            facets,
            nodes,
            local,
            corners,
            node_facets,
            sample: None,
        })
    }

    /// Refreshes positions and normals for time sample `sample`.
    ///
    /// Normals point along the facet winding unless `flip` is set.
    pub fn update<S: SurfaceSource + ?Sized>(&mut self, source: &S, sample: usize, flip: bool) {
        for (position, &node) in self.positions.iter_mut().zip(&self.nodes) {
            *position = source.node_position(node, sample);
        }
        normals::compute(self, flip);
        self.sample = Some(sample);
    }

    /// Number of facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Number of distinct nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the view has no facets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Facet ids in selection order.
    #[inline]
    pub fn facet_ids(&self) -> &[usize] {
        &self.facets
    }

    /// Node ids by local index.
    #[inline]
    pub fn node_ids(&self) -> &[usize] {
        &self.nodes
    }

    /// Local index of node id `node`, if the node belongs to the view.
    #[inline]
    pub fn local_index(&self, node: usize) -> Option<usize> {
        self.local.get(&node).copied()
    }

    /// Local corner table of facet index `facet`.
    #[inline]
    pub fn corners(&self, facet: usize) -> &FacetCorners {
        &self.corners[facet]
    }

    /// Facet indices touching local node `node`.
    #[inline]
    pub fn node_facets(&self, node: usize) -> &[usize] {
        &self.node_facets[node]
    }

    /// Cached position of local node `node`.
    #[inline]
    pub fn position(&self, node: usize) -> Vec3 {
        self.positions[node]
    }

    /// Cached positions of every node.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Cached unit normal of local node `node`.
    #[inline]
    pub fn node_normal(&self, node: usize) -> Vec3 {
        self.node_normals[node]
    }

    /// Cached unit normal of facet index `facet`.
    #[inline]
    pub fn facet_normal(&self, facet: usize) -> Vec3 {
        self.facet_normals[facet]
    }

    /// Time sample held by the caches, if [`SurfaceView::update`] ran.
    #[inline]
    pub fn sample(&self) -> Option<usize> {
        self.sample
    }

    /// Cached corner positions of facet index `facet`.
    pub fn facet_points(&self, facet: usize) -> FacetPoints {
        let table = &self.corners[facet];
        let mut points = [Vec3::ZERO; MAX_FACET_CORNERS];
        for (point, &node) in points.iter_mut().zip(table.as_slice()) {
            *point = self.positions[node];
        }
        FacetPoints {
            points,
            len: table.len,
        }
    }
}
