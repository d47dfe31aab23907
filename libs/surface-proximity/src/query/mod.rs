//! # Proximity Query
//!
//! Nearest-point projection of a world point onto a [`SurfaceView`].
//!
//! ## Search Tiers
//!
//! 1. **Node star**: find the surface node nearest to the point by a linear
//!    scan, then project onto every facet touching that node.
//! 2. **Exhaustive**: if no star facet accepts the projection, project onto
//!    every facet of the surface.
//!
//! The second tier only runs when the first finds nothing, which happens on
//! concave geometry where the nearest node's star does not contain the
//! closest point. Each [`Projection`] records the tier that produced it so
//! callers can count fallbacks.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ProximityConfig;
use crate::core::vec3::Vec3;
use crate::intersect::project_point_to_facet;
use crate::surface::SurfaceView;

/// How a [`ProximityQuery`] searches its target surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Node star first, exhaustive search as fallback.
    #[default]
    Tiered,
    /// Always search every facet.
    Exhaustive,
}

/// Search tier that produced a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// Found among the facets of the nearest node.
    NodeStar,
    /// Found by scanning every facet.
    Exhaustive,
}

/// Closest point on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Closest position on the surface
    pub position: Vec3,
    /// Unit normal of the facet holding `position`
    pub normal: Vec3,
    /// Facet index within the target view
    pub facet: usize,
    /// Distance from the query point to `position`
    pub distance: f64,
    /// Tier that found the projection
    pub tier: SearchTier,
}

/// Projects points onto one target surface.
///
/// The target's position and normal caches must hold the sample being
/// evaluated. Queries only read the view, so one query can be shared across
/// worker threads.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{DeformingMesh, ProximityConfig, ProximityQuery, SearchTier, SurfaceView, Vec3};
///
/// let frame = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
/// let mesh = DeformingMesh::new(vec![vec![0, 1, 2]], vec![frame]).unwrap();
/// let mut view = SurfaceView::build(&mesh, vec![0]).unwrap();
/// view.update(&mesh, 0, false);
///
/// let query = ProximityQuery::new(&view, ProximityConfig::default());
/// let hit = query.project(Vec3::new(0.25, 0.25, 0.5)).unwrap();
/// assert_eq!(hit.position, Vec3::new(0.25, 0.25, 0.0));
/// assert_eq!(hit.tier, SearchTier::NodeStar);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery<'a> {
    target: &'a SurfaceView,
    config: ProximityConfig,
    strategy: SearchStrategy,
}

impl<'a> ProximityQuery<'a> {
    /// Creates a tiered query against `target`.
    pub fn new(target: &'a SurfaceView, config: ProximityConfig) -> Self {
        Self {
            target,
            config,
            strategy: SearchStrategy::Tiered,
        }
    }

    /// Sets the search strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Closest point on the target surface to `point`.
    ///
    /// Returns `None` when no facet accepts a projection.
    pub fn project(&self, point: Vec3) -> Option<Projection> {
        match self.strategy {
            SearchStrategy::Tiered => self.project_node_star(point).or_else(|| {
                let hit = self.project_exhaustive(point);
                trace!(
                    x = point.x,
                    y = point.y,
                    z = point.z,
                    found = hit.is_some(),
                    "node star missed, searched every facet"
                );
                hit
            }),
            SearchStrategy::Exhaustive => self.project_exhaustive(point),
        }
    }

    /// Local index of the target node nearest to `point`.
    ///
    /// Ties resolve to the lowest index.
    pub fn nearest_node(&self, point: Vec3) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (node, position) in self.target.positions().iter().enumerate() {
            let d2 = position.distance_squared(point);
            if best.map_or(true, |(_, min)| d2 < min) {
                best = Some((node, d2));
            }
        }
        best.map(|(node, _)| node)
    }

    /// First tier: projection onto the facets of the nearest node.
    pub fn project_node_star(&self, point: Vec3) -> Option<Projection> {
        let node = self.nearest_node(point)?;
        self.closest_among(
            self.target.node_facets(node).iter().copied(),
            point,
            SearchTier::NodeStar,
        )
    }

    /// Second tier: projection onto every facet.
    pub fn project_exhaustive(&self, point: Vec3) -> Option<Projection> {
        self.closest_among(0..self.target.facet_count(), point, SearchTier::Exhaustive)
    }

    fn closest_among(
        &self,
        facets: impl Iterator<Item = usize>,
        point: Vec3,
        tier: SearchTier,
    ) -> Option<Projection> {
        let mut best: Option<Projection> = None;
        for facet in facets {
            let points = self.target.facet_points(facet);
            let Some(position) = project_point_to_facet(point, points.as_slice(), &self.config)
            else {
                continue;
            };
            let distance = position.distance(point);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Projection {
                    position,
                    normal: self.target.facet_normal(facet),
                    facet,
                    distance,
                    tier,
                });
            }
        }
        best
    }
}
