//! # Distance Field
//!
//! Per-node distance from each surface to the opposite one.
//!
//! ## Algorithm
//!
//! For each time sample, both views are refreshed with their flip flags.
//! Every node of the primary surface is projected onto the secondary
//! surface, then every secondary node onto the primary. The value is the
//! distance to the projection, optionally signed.
//!
//! ## Sign Conventions
//!
//! The sign is that of `(hit - node) · reference`, where the reference
//! normal is either
//!
//! - the normal of the facet that was hit ([`SignConvention::HitFacetNormal`]), or
//! - the querying node's own normal ([`SignConvention::QueryNodeNormal`]).
//!
//! The two agree on flat, facing surfaces up to a global sign but diverge
//! on concave geometry, so both stay selectable.

use config::constants::validate_tolerance;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProximityConfig;
use crate::error::ProximityResult;
use crate::field::{write_nodal, SampleReport, SampledField, SurfacePair, SurfaceSlot};
use crate::query::{Projection, ProximityQuery, SearchStrategy, SearchTier};
use crate::source::{FieldSink, SurfaceSource};
use crate::surface::SurfaceView;

/// Reference normal for signed distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignConvention {
    /// Normal of the facet holding the projection
    #[default]
    HitFacetNormal,
    /// Normal of the node being measured
    QueryNodeNormal,
}

/// User-facing options of a [`DistanceField`].
///
/// Defaults: unsigned, no flips, hit-facet sign convention, tiered search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceSettings {
    /// Report signed distances
    pub signed: bool,
    /// Negate the primary surface's normals
    pub flip_primary: bool,
    /// Negate the secondary surface's normals
    pub flip_secondary: bool,
    /// Reference normal for the sign
    pub sign_convention: SignConvention,
    /// Projection search strategy
    pub search: SearchStrategy,
}

impl DistanceSettings {
    /// Flip flag of `slot`.
    pub fn flip(&self, slot: SurfaceSlot) -> bool {
        match slot {
            SurfaceSlot::Primary => self.flip_primary,
            SurfaceSlot::Secondary => self.flip_secondary,
        }
    }
}

/// Distance between two surfaces of a deforming mesh.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{DistanceField, SignConvention, SurfaceSlot};
///
/// let mut map = DistanceField::new();
/// map.set_signed(true);
/// map.set_flip(SurfaceSlot::Secondary, true);
/// map.set_sign_convention(SignConvention::QueryNodeNormal);
///
/// let settings = map.settings();
/// assert!(settings.signed && settings.flip_secondary && !settings.flip_primary);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceField {
    surfaces: SurfacePair,
    settings: DistanceSettings,
    config: ProximityConfig,
}

impl DistanceField {
    /// Creates a field with default settings and no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a field with the given settings.
    pub fn with_settings(settings: DistanceSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
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
    pub fn settings(&self) -> DistanceSettings {
        self.settings
    }

    /// Replaces all settings.
    pub fn set_settings(&mut self, settings: DistanceSettings) {
        self.settings = settings;
    }

    /// Whether distances are signed.
    pub fn signed(&self) -> bool {
        self.settings.signed
    }

    /// Enables or disables signed distances.
    pub fn set_signed(&mut self, signed: bool) {
        self.settings.signed = signed;
    }

    /// Whether the normals of `slot` are flipped.
    pub fn flip(&self, slot: SurfaceSlot) -> bool {
        self.settings.flip(slot)
    }

    /// Sets the normal flip flag of `slot`.
    pub fn set_flip(&mut self, slot: SurfaceSlot, flip: bool) {
        match slot {
            SurfaceSlot::Primary => self.settings.flip_primary = flip,
            SurfaceSlot::Secondary => self.settings.flip_secondary = flip,
        }
    }

    /// Current sign convention.
    pub fn sign_convention(&self) -> SignConvention {
        self.settings.sign_convention
    }

    /// Sets the sign convention.
    pub fn set_sign_convention(&mut self, convention: SignConvention) {
        self.settings.sign_convention = convention;
    }

    /// Current search strategy.
    pub fn search_strategy(&self) -> SearchStrategy {
        self.settings.search
    }

    /// Sets the search strategy.
    pub fn set_search_strategy(&mut self, strategy: SearchStrategy) {
        self.settings.search = strategy;
    }

    /// Numeric configuration.
    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    /// Replaces the numeric configuration.
    pub fn set_config(&mut self, config: ProximityConfig) {
        self.config = config;
    }

    /// Sets the projection tolerance, keeping the rest of the configuration.
    pub fn set_projection_tolerance(&mut self, tolerance: f64) -> ProximityResult<()> {
        self.config.projection_tolerance = validate_tolerance(tolerance)?;
        Ok(())
    }

    /// Distances of every node of `slot` to the opposite surface.
    fn measure(&self, slot: SurfaceSlot) -> (Vec<f64>, SampleReport) {
        let from = self.surfaces.view(slot);
        let query = ProximityQuery::new(self.surfaces.view(slot.other()), self.config)
            .with_strategy(self.settings.search);

        let hits: Vec<Option<Projection>> = (0..from.node_count())
            .into_par_iter()
            .map(|node| query.project(from.position(node)))
            .collect();

        let mut report = SampleReport::default();
        let values = hits
            .iter()
            .enumerate()
            .map(|(node, hit)| match hit {
                Some(hit) => {
                    if hit.tier == SearchTier::Exhaustive {
                        report.fallback_projections += 1;
                    }
                    self.value(from, node, hit)
                }
                None => {
                    report.unresolved_nodes += 1;
                    0.0
                }
            })
            .collect();
        (values, report)
    }

    fn value(&self, from: &SurfaceView, node: usize, hit: &Projection) -> f64 {
        if !self.settings.signed {
            return hit.distance;
        }
        let reference = match self.settings.sign_convention {
            SignConvention::HitFacetNormal => hit.normal,
            SignConvention::QueryNodeNormal => from.node_normal(node),
        };
        if (hit.position - from.position(node)).dot(reference) < 0.0 {
            -hit.distance
        } else {
            hit.distance
        }
    }
}

impl SampledField for DistanceField {
    const NAME: &'static str = "distance";

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
        let flip = [self.settings.flip_primary, self.settings.flip_secondary];
        self.surfaces.prepare(source, sample, flip)?;

        let mut report = SampleReport::default();
        for slot in SurfaceSlot::ALL {
            let (values, counts) = self.measure(slot);
            write_nodal(self.surfaces.view(slot), &values, sink, sample);
            report += counts;
        }

        debug!(
            sample,
            fallback_projections = report.fallback_projections,
            unresolved_nodes = report.unresolved_nodes,
            "distance sample evaluated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests;
