//! # Coverage Field
//!
//! Marks each node whose normal ray meets the opposite surface.
//!
//! For each time sample both views are refreshed with outward normals (no
//! flips). Every node casts a ray along its normal and tests it against
//! every facet of the opposite surface; there is no nearest-node pruning
//! because the ray direction can point far away from the nearest node.
//! A node with a qualifying hit gets `1.0`, any other node `0.0`.
//!
//! Hits qualify through a [`RayFilter`]: the angle between the ray and the
//! hit facet's normal must exceed the threshold, and hits behind the node
//! count only when back intersections are allowed (within the back search
//! radius, if one is set).

use config::constants::ConfigError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProximityConfig;
use crate::error::ProximityResult;
use crate::field::{write_nodal, SampleReport, SampledField, SurfacePair, SurfaceSlot};
use crate::intersect::{intersect_ray, Intersection, Ray, RayFilter};
use crate::source::{FieldSink, SurfaceSource};

/// User-facing options of a [`CoverageField`].
///
/// Defaults: angle threshold 0, no back intersections, unlimited radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageSettings {
    /// Angle in degrees that the ray/facet-normal angle must exceed
    pub angle_threshold: f64,
    /// Count hits behind the node
    pub allow_back_intersections: bool,
    /// Farthest back hit counted; zero means unlimited
    pub back_search_radius: f64,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        let filter = RayFilter::default();
        Self {
            angle_threshold: filter.angle_threshold,
            allow_back_intersections: filter.allow_back,
            back_search_radius: filter.back_search_radius,
        }
    }
}

impl CoverageSettings {
    /// Validated ray filter for these settings.
    pub fn filter(&self) -> Result<RayFilter, ConfigError> {
        RayFilter::new(
            self.angle_threshold,
            self.allow_back_intersections,
            self.back_search_radius,
        )
    }
}

impl From<RayFilter> for CoverageSettings {
    fn from(filter: RayFilter) -> Self {
        Self {
            angle_threshold: filter.angle_threshold,
            allow_back_intersections: filter.allow_back,
            back_search_radius: filter.back_search_radius,
        }
    }
}

/// Coverage indicator between two surfaces of a deforming mesh.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{CoverageField, CoverageSettings};
///
/// let mut map = CoverageField::new();
/// map.set_angle_threshold(45.0).unwrap();
/// map.set_allow_back_intersections(true);
/// assert!(map.set_back_search_radius(-1.0).is_err());
///
/// let settings = map.settings();
/// assert_eq!(settings.angle_threshold, 45.0);
/// assert_eq!(settings.back_search_radius, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoverageField {
    surfaces: SurfacePair,
    filter: RayFilter,
    config: ProximityConfig,
}

impl CoverageField {
    /// Creates a field with default settings and no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field with validated settings.
    pub fn with_settings(settings: CoverageSettings) -> ProximityResult<Self> {
        Ok(Self {
            filter: settings.filter()?,
            ..Self::default()
        })
    }

    /// Selects the facets of `slot`.
    pub fn set_selection<S: SurfaceSource + ?Sized>(
        &mut self,
        source: &S,
        slot: SurfaceSlot,
        facets: Vec<usize>,
    ) -> ProximityResult<()> {
        self.surfaces.set_selection(source, slot, facets)
    }

    /// Number of facets selected for `slot`.
    pub fn surface_size(&self, slot: SurfaceSlot) -> usize {
        self.surfaces.surface_size(slot)
    }

    /// Current settings.
    pub fn settings(&self) -> CoverageSettings {
        self.filter.into()
    }

    /// Angle threshold in degrees.
    pub fn angle_threshold(&self) -> f64 {
        self.filter.angle_threshold
    }

    /// Sets the angle threshold; must lie in `[0, 180]` degrees.
    pub fn set_angle_threshold(&mut self, degrees: f64) -> ProximityResult<()> {
        self.filter = RayFilter::new(degrees, self.filter.allow_back, self.filter.back_search_radius)?;
        Ok(())
    }

    /// Whether hits behind the node count.
    pub fn allow_back_intersections(&self) -> bool {
        self.filter.allow_back
    }

    /// Enables or disables hits behind the node.
    pub fn set_allow_back_intersections(&mut self, allow: bool) {
        self.filter.allow_back = allow;
    }

    /// Back search radius; zero means unlimited.
    pub fn back_search_radius(&self) -> f64 {
        self.filter.back_search_radius
    }

    /// Sets the back search radius; must be non-negative.
    pub fn set_back_search_radius(&mut self, radius: f64) -> ProximityResult<()> {
        self.filter = RayFilter::new(self.filter.angle_threshold, self.filter.allow_back, radius)?;
        Ok(())
    }

    /// Numeric configuration.
    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Replaces the numeric configuration.
    pub fn set_config(&mut self, config: ProximityConfig) {
        self.config = config;
    }

    /// Closest qualifying hit of `ray` on the surface of `slot`.
    ///
    /// Closeness is the absolute ray distance, so a back hit can win over
    /// a farther front hit when back intersections are allowed.
    fn closest_hit(&self, slot: SurfaceSlot, ray: &Ray) -> Option<Intersection> {
        let target = self.surfaces.view(slot);
        let mut best: Option<Intersection> = None;
        for facet in 0..target.facet_count() {
            let Some(hit) = intersect_ray(
                ray,
                target.facet_points(facet).as_slice(),
                target.facet_normal(facet),
                facet,
                &self.filter,
                &self.config,
            ) else {
                continue;
            };
            if best.map_or(true, |b| hit.distance.abs() < b.distance.abs()) {
                best = Some(hit);
            }
        }
        best
    }

    /// Coverage of every node of `slot` by the opposite surface.
    fn cover(&self, slot: SurfaceSlot) -> (Vec<f64>, SampleReport) {
        let from = self.surfaces.view(slot);
        let values: Vec<f64> = (0..from.node_count())
            .into_par_iter()
            .map(|node| {
                let ray = Ray::new(from.position(node), from.node_normal(node));
                match self.closest_hit(slot.other(), &ray) {
                    Some(_) => 1.0,
                    None => 0.0,
                }
            })
            .collect();

        let report = SampleReport {
            uncovered_nodes: values.iter().filter(|&&v| v == 0.0).count(),
            ..SampleReport::default()
        };
        (values, report)
    }
}

impl SampledField for CoverageField {
    const NAME: &'static str = "coverage";

    fn surfaces(&self) -> &SurfacePair {
        &self.surfaces
    }

    fn apply_state<S, K>(
        &mut self,
        source: &S,
        sink: &mut K,
        sample: usize,
    ) -> ProximityResult<SampleReport>
    where
        S: SurfaceSource + ?Sized,
        K: FieldSink + ?Sized,
    {
        self.surfaces.prepare(source, sample, [false, false])?;

        let mut report = SampleReport::default();
        for slot in SurfaceSlot::ALL {
            let (values, counts) = self.cover(slot);
            write_nodal(self.surfaces.view(slot), &values, sink, sample);
            report += counts;
        }

        debug!(
            sample,
            uncovered_nodes = report.uncovered_nodes,
            "coverage sample evaluated"
        );
        Ok(report)
    }
}
