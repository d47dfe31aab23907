//! # Sampled Fields
//!
//! Shared machinery for fields evaluated over every time sample of a
//! deforming mesh.
//!
//! ## Evaluation Model
//!
//! ```text
//! for sample in 0..samples          (sequential, cancellable between samples)
//!     update primary + secondary views   (positions, normals)
//!     evaluate nodes of each surface     (parallel over nodes)
//!     write values per facet corner      (sequential, into the sink)
//! ```
//!
//! View caches are overwritten in place, so samples never run concurrently.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ProximityError, ProximityResult};
use crate::source::{FieldSink, SurfaceSource};
use crate::surface::SurfaceView;

// =============================================================================
// SURFACE SLOTS
// =============================================================================

/// Which of the two surfaces of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceSlot {
    /// First surface
    Primary,
    /// Second surface
    Secondary,
}

impl SurfaceSlot {
    /// Both slots, primary first.
    pub const ALL: [SurfaceSlot; 2] = [SurfaceSlot::Primary, SurfaceSlot::Secondary];

    /// The opposite slot.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

impl fmt::Display for SurfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// The primary and secondary surfaces of a field.
#[derive(Debug, Clone, Default)]
pub struct SurfacePair {
    primary: SurfaceView,
    secondary: SurfaceView,
}

impl SurfacePair {
    /// Creates a pair of empty surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the facet selection of `slot` and rebuilds its view.
    ///
    /// On error the previous selection is kept.
    pub fn set_selection<S: SurfaceSource + ?Sized>(
        &mut self,
        source: &S,
        slot: SurfaceSlot,
        facets: Vec<usize>,
    ) -> ProximityResult<()> {
        *self.view_mut(slot) = SurfaceView::build(source, facets)?;
        Ok(())
    }

    /// Number of facets selected for `slot`.
    #[inline]
    pub fn surface_size(&self, slot: SurfaceSlot) -> usize {
        self.view(slot).facet_count()
    }

    /// View of `slot`.
    #[inline]
    pub fn view(&self, slot: SurfaceSlot) -> &SurfaceView {
        match slot {
            SurfaceSlot::Primary => &self.primary,
            SurfaceSlot::Secondary => &self.secondary,
        }
    }

    fn view_mut(&mut self, slot: SurfaceSlot) -> &mut SurfaceView {
        match slot {
            SurfaceSlot::Primary => &mut self.primary,
            SurfaceSlot::Secondary => &mut self.secondary,
        }
    }

    /// Fails with [`ProximityError::EmptySurface`] unless both surfaces have
    /// facets.
    pub fn ensure_ready(&self) -> ProximityResult<()> {
        for slot in SurfaceSlot::ALL {
            if self.view(slot).is_empty() {
                return Err(ProximityError::empty_surface(slot));
            }
        }
        Ok(())
    }

    /// Validates the pair and `sample`, then refreshes both views.
    ///
    /// `flip` holds the normal flip flags of the primary and secondary
    /// surface.
    pub(crate) fn prepare<S: SurfaceSource + ?Sized>(
        &mut self,
        source: &S,
        sample: usize,
        flip: [bool; 2],
    ) -> ProximityResult<()> {
        self.ensure_ready()?;
        let samples = source.sample_count();
        if sample >= samples {
            return Err(ProximityError::sample_out_of_range(sample, samples));
        }
        self.primary.update(source, sample, flip[0]);
        self.secondary.update(source, sample, flip[1]);
        Ok(())
    }
}

/// Writes one value per local node of `view` to every facet corner that
/// references the node.
pub(crate) fn write_nodal<K: FieldSink + ?Sized>(
    view: &SurfaceView,
    values: &[f64],
    sink: &mut K,
    sample: usize,
) {
    for (index, &facet) in view.facet_ids().iter().enumerate() {
        for (corner, &node) in view.corners(index).as_slice().iter().enumerate() {
            sink.write(sample, facet, corner, values[node]);
        }
    }
}

// =============================================================================
// CANCELLATION
// =============================================================================

/// Shared flag that stops a multi-sample run at the next sample boundary.
///
/// Clones share the same flag.
///
/// # Example
///
/// ```rust
/// use surface_proximity::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// Counters for one evaluated time sample, summed over both surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleReport {
    /// Projections resolved by the exhaustive search tier
    pub fallback_projections: usize,
    /// Distance nodes left at zero because no facet accepts a projection
    pub unresolved_nodes: usize,
    /// Coverage nodes whose ray found no qualifying hit
    pub uncovered_nodes: usize,
}

impl std::ops::AddAssign for SampleReport {
    fn add_assign(&mut self, rhs: Self) {
        self.fallback_projections += rhs.fallback_projections;
        self.unresolved_nodes += rhs.unresolved_nodes;
        self.uncovered_nodes += rhs.uncovered_nodes;
    }
}

/// Outcome of a multi-sample run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Samples in the source
    pub samples_total: usize,
    /// Samples fully written to the sink
    pub samples_completed: usize,
    /// Whether the run stopped early on a cancel request
    pub cancelled: bool,
    /// Fallback projections over all completed samples
    pub fallback_projections: usize,
    /// Unresolved nodes over all completed samples
    pub unresolved_nodes: usize,
    /// Uncovered nodes over all completed samples
    pub uncovered_nodes: usize,
}

impl ApplyReport {
    fn record(&mut self, sample: SampleReport) {
        self.samples_completed += 1;
        self.fallback_projections += sample.fallback_projections;
        self.unresolved_nodes += sample.unresolved_nodes;
        self.uncovered_nodes += sample.uncovered_nodes;
    }
}

// =============================================================================
// SAMPLED FIELD
// =============================================================================

/// A per-node scalar field between two surfaces, evaluated per time sample.
pub trait SampledField {
    /// Field name used in log records.
    const NAME: &'static str;

    /// The field's surfaces.
    fn surfaces(&self) -> &SurfacePair;

    /// Evaluates time sample `sample` and writes both surfaces' values.
    ///
    /// Every node of both surfaces is written, including nodes that resolve
    /// to zero, so re-running a sample overwrites earlier results.
    fn apply_state<S, K>(
        &mut self,
        source: &S,
        sink: &mut K,
        sample: usize,
    ) -> ProximityResult<SampleReport>
    where
        S: SurfaceSource + ?Sized,
        K: FieldSink + ?Sized;

    /// Evaluates every time sample in order.
    fn apply<S, K>(&mut self, source: &S, sink: &mut K) -> ProximityResult<ApplyReport>
    where
        S: SurfaceSource + ?Sized,
        K: FieldSink + ?Sized,
    {
        self.apply_with(source, sink, &CancelToken::new(), |_, _| {})
    }

    /// Evaluates every time sample in order, checking `cancel` before each
    /// sample and calling `progress(completed, total)` after each.
    ///
    /// A cancelled run returns `Ok` with `cancelled` set; samples already
    /// written stay in the sink.
    fn apply_with<S, K, P>(
        &mut self,
        source: &S,
        sink: &mut K,
        cancel: &CancelToken,
        mut progress: P,
    ) -> ProximityResult<ApplyReport>
    where
        S: SurfaceSource + ?Sized,
        K: FieldSink + ?Sized,
        P: FnMut(usize, usize),
    {
        self.surfaces().ensure_ready()?;

        let total = source.sample_count();
        info!(
            field = Self::NAME,
            samples = total,
            primary_facets = self.surfaces().surface_size(SurfaceSlot::Primary),
            secondary_facets = self.surfaces().surface_size(SurfaceSlot::Secondary),
            "applying field"
        );

        let mut report = ApplyReport {
            samples_total: total,
            ..ApplyReport::default()
        };
        for sample in 0..total {
            if cancel.is_cancelled() {
                report.cancelled = true;
                info!(field = Self::NAME, completed = sample, samples = total, "field cancelled");
                return Ok(report);
            }
            report.record(self.apply_state(source, sink, sample)?);
            progress(sample + 1, total);
        }

        info!(
            field = Self::NAME,
            samples = total,
            fallback_projections = report.fallback_projections,
            unresolved_nodes = report.unresolved_nodes,
            uncovered_nodes = report.uncovered_nodes,
            "field applied"
        );
        Ok(report)
    }
}
