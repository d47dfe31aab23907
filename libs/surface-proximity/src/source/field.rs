//! In-memory nodal facet field.

use super::{FieldSink, SurfaceSource};

/// Per-sample scalar values stored per facet corner.
///
/// Storage is variable-length: a triangle owns three slots and a
/// quadrilateral four, addressed through a per-facet offset table. Mixed
/// triangle/quad surfaces therefore never share or overwrite slots.
///
/// Every slot starts at zero.
///
/// # Example
///
/// ```rust
/// use surface_proximity::{FacetField, FieldSink};
///
/// let mut field = FacetField::new(&[3, 4], 2);
/// field.write(1, 1, 3, 0.5);
/// assert_eq!(field.value(1, 1, 3), Some(0.5));
/// assert_eq!(field.value(0, 1, 3), Some(0.0));
/// assert_eq!(field.value(0, 0, 3), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FacetField {
    /// Start of each facet's slots; `offsets[f + 1] - offsets[f]` is its corner count
    offsets: Vec<usize>,
    /// One value block per sample
    samples: Vec<Vec<f64>>,
}

impl FacetField {
    /// Creates a zeroed field for facets with the given corner counts.
    pub fn new(corner_counts: &[usize], sample_count: usize) -> Self {
        let mut offsets = Vec::with_capacity(corner_counts.len() + 1);
        let mut total = 0;
        offsets.push(total);
        for &count in corner_counts {
            total += count;
            offsets.push(total);
        }
        Self {
            offsets,
            samples: vec![vec![0.0; total]; sample_count],
        }
    }

    /// Creates a zeroed field matching every facet and sample of `source`.
    pub fn for_source<S: SurfaceSource + ?Sized>(source: &S) -> Self {
        let counts: Vec<usize> = (0..source.facet_count())
            .map(|f| source.facet_nodes(f).len())
            .collect();
        Self::new(&counts, source.sample_count())
    }

    /// Number of time samples.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of facets.
    #[inline]
    pub fn facet_count(&self) -> usize {
        self.offsets.len() - 1
    }

    fn slot(&self, facet: usize, corner: usize) -> Option<usize> {
        let start = *self.offsets.get(facet)?;
        let end = *self.offsets.get(facet + 1)?;
        (start + corner < end).then_some(start + corner)
    }

    /// Value at a facet corner, or `None` when out of range.
    pub fn value(&self, sample: usize, facet: usize, corner: usize) -> Option<f64> {
        let slot = self.slot(facet, corner)?;
        self.samples.get(sample).map(|values| values[slot])
    }

    /// Values of every corner of `facet` at `sample`.
    pub fn facet_values(&self, sample: usize, facet: usize) -> Option<&[f64]> {
        let start = *self.offsets.get(facet)?;
        let end = *self.offsets.get(facet + 1)?;
        self.samples.get(sample).map(|values| &values[start..end])
    }

    /// Resets every slot of every sample to zero.
    pub fn clear(&mut self) {
        for values in &mut self.samples {
            values.fill(0.0);
        }
    }
}

impl FieldSink for FacetField {
    /// Out-of-range writes are ignored.
    fn write(&mut self, sample: usize, facet: usize, corner: usize, value: f64) {
        let Some(slot) = self.slot(facet, corner) else {
            return;
        };
        if let Some(values) = self.samples.get_mut(sample) {
            values[slot] = value;
        }
    }
}
