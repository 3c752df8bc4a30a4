//! `EulerEstimator` — integrates sensor counts over the overhearing complex.

use std::collections::BTreeMap;

use tracing::debug;

use sp_core::{Position, SensorId, SpError, SpResult};
use sp_sensor::SensorSource;

use crate::{FaceMin, HeightRule, OverhearingBuilder, OverhearingConfig, SimplicialComplex};

/// Estimates the number of distinct targets seen by a set of counting
/// sensors.
///
/// # Lifecycle
///
/// ```text
/// rebuild(source)  →  set_counts(..)  →  estimate()
///                 └→  estimate_from_targets(source, targets)
/// ```
///
/// Nothing tracks the source after [`rebuild`](Self::rebuild): when sensors
/// move or change, rebuild again.  Only vertices hold counts; every higher
/// simplex's height is derived from its faces through `H` whenever it is
/// asked for.
#[derive(Clone, Debug)]
pub struct EulerEstimator<H = FaceMin> {
    builder: OverhearingBuilder,
    rule:    H,
    complex: Option<SimplicialComplex>,
    counts:  BTreeMap<SensorId, i64>,
}

impl EulerEstimator<FaceMin> {
    /// An estimator using the minimum-over-faces rule and no dimension cap.
    pub fn new() -> Self {
        Self::with_rule(FaceMin)
    }
}

impl Default for EulerEstimator<FaceMin> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HeightRule> EulerEstimator<H> {
    pub fn with_rule(rule: H) -> Self {
        Self {
            builder: OverhearingBuilder::default(),
            rule,
            complex: None,
            counts: BTreeMap::new(),
        }
    }

    pub fn with_config(mut self, config: OverhearingConfig) -> Self {
        self.builder = OverhearingBuilder::new(config);
        self.complex = None;
        self
    }

    // ── Complex ───────────────────────────────────────────────────────────

    /// Rebuild the overhearing complex from `source` and clear all counts.
    pub fn rebuild<S: SensorSource + ?Sized>(&mut self, source: &S) -> SpResult<()> {
        self.complex = Some(self.builder.from_source(source)?);
        self.counts.clear();
        Ok(())
    }

    /// The complex, building it from `source` on first use.
    pub fn overhearing<S: SensorSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> SpResult<&SimplicialComplex> {
        if self.complex.is_none() {
            self.rebuild(source)?;
        }
        self.built()
    }

    /// The complex from the last rebuild, if any.
    #[inline]
    pub fn complex(&self) -> Option<&SimplicialComplex> {
        self.complex.as_ref()
    }

    fn built(&self) -> SpResult<&SimplicialComplex> {
        self.complex.as_ref().ok_or_else(|| {
            SpError::InvalidOperation("the overhearing complex has not been built".to_owned())
        })
    }

    // ── Counts ────────────────────────────────────────────────────────────

    /// Reset every vertex to zero.
    pub fn clear_counts(&mut self) {
        self.counts.clear();
    }

    /// Replace all vertex counts.  Sensors not mentioned count zero; a
    /// sensor mentioned twice keeps its last value.
    ///
    /// # Errors
    /// [`SpError::SensorNotFound`] for a sensor outside the complex (counts
    /// are left cleared), or [`SpError::InvalidOperation`] if unbuilt.
    pub fn set_counts<I>(&mut self, counts: I) -> SpResult<()>
    where
        I: IntoIterator<Item = (SensorId, i64)>,
    {
        self.counts.clear();
        for (id, n) in counts {
            if let Err(e) = self.set_height(&[id], n) {
                self.counts.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Assign a height directly.  Only vertices may be assigned.
    ///
    /// # Errors
    /// - [`SpError::SensorNotFound`] / [`SpError::SimplexNotFound`] if
    ///   `basis` is not in the complex.
    /// - [`SpError::NonLeafAssignment`] for a simplex of order above zero.
    pub fn set_height(&mut self, basis: &[SensorId], value: i64) -> SpResult<()> {
        let present = self.built()?.contains(basis);
        match (basis, present) {
            ([id], true) => {
                self.counts.insert(*id, value);
                Ok(())
            }
            ([id], false) => Err(SpError::SensorNotFound(*id)),
            (_, true) => Err(SpError::NonLeafAssignment(basis.to_vec())),
            (_, false) => Err(SpError::SimplexNotFound(basis.to_vec())),
        }
    }

    /// Height of the simplex on `basis`: the count for a vertex, otherwise
    /// the rule applied to its faces' heights.
    pub fn height(&self, basis: &[SensorId]) -> SpResult<i64> {
        let complex = self.built()?;
        let simplex = complex
            .simplex(basis)
            .ok_or_else(|| SpError::SimplexNotFound(basis.to_vec()))?;
        if simplex.is_vertex() {
            return Ok(self.counts.get(&simplex.basis()[0]).copied().unwrap_or(0));
        }
        let faces = simplex.faces().map(|f| self.height(&f)).collect::<SpResult<Vec<_>>>()?;
        Ok(self.rule.combine(&faces))
    }

    // ── Estimation ────────────────────────────────────────────────────────

    /// `Σ_k (-1)^k · Σ_{dim s = k} height(s)` over the built complex.
    ///
    /// Heights are not clamped; a negative count contributes as given.
    pub fn estimate(&self) -> SpResult<i64> {
        let complex = self.built()?;
        let Some(top) = complex.max_order() else {
            return Ok(0);
        };

        // Heights order by order, each computed from the previous order's.
        let mut below: Vec<i64> = complex
            .simplices_of_order(0)
            .iter()
            .map(|s| self.counts.get(&s.basis()[0]).copied().unwrap_or(0))
            .collect();
        let mut total: i64 = below.iter().sum();
        for k in 1..=top {
            let mut heights = Vec::with_capacity(complex.number_of_simplices_of_order(k));
            for s in complex.simplices_of_order(k) {
                let mut faces = Vec::with_capacity(k + 1);
                for f in s.faces() {
                    let (_, slot) = complex
                        .locate(&f)
                        .ok_or_else(|| SpError::SimplexNotFound(f.clone()))?;
                    faces.push(below[slot]);
                }
                heights.push(self.rule.combine(&faces));
            }
            let level: i64 = heights.iter().sum();
            if k % 2 == 0 { total += level } else { total -= level }
            below = heights;
        }
        Ok(total)
    }

    /// Set the counts and estimate.  The complex must already be built.
    pub fn estimate_from_counts<I>(&mut self, counts: I) -> SpResult<i64>
    where
        I: IntoIterator<Item = (SensorId, i64)>,
    {
        self.set_counts(counts)?;
        self.estimate()
    }

    /// Count `targets` at every sensor of the complex, then estimate.  Builds
    /// the complex from `source` on first use.
    pub fn estimate_from_targets<S: SensorSource + ?Sized>(
        &mut self,
        source:  &S,
        targets: &[Position],
    ) -> SpResult<i64> {
        let vertices: Vec<SensorId> = self.overhearing(source)?.vertices().collect();
        let mut counts = Vec::with_capacity(vertices.len());
        for id in vertices {
            let n = source.sensor_counts(id, targets)?;
            let n = i64::try_from(n)
                .map_err(|_| SpError::InvalidValue(format!("count {n} at {id} overflows")))?;
            counts.push((id, n));
        }
        let estimate = self.estimate_from_counts(counts)?;
        debug!(targets = targets.len(), estimate, "estimated from targets");
        Ok(estimate)
    }
}
