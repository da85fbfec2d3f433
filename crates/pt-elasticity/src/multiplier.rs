//! Per-origin demand multipliers and their diagnostics.

use std::collections::BTreeMap;

use pt_core::{ODPair, ZoneClusterLookup, ZoneId};
use pt_skim::{SkimMap, SkimVector};

use crate::{ElasticityEntry, ElasticityModel, ElasticityResult, SkimType};

// ── MetricFactors ─────────────────────────────────────────────────────────────

/// The three per-metric factors of one OD pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricFactors {
    pub journey_time:    f64,
    pub adaptation_time: f64,
    pub transfers:       f64,
}

impl MetricFactors {
    pub const NEUTRAL: MetricFactors = MetricFactors {
        journey_time:    1.0,
        adaptation_time: 1.0,
        transfers:       1.0,
    };

    /// Combined OD multiplier.
    #[inline]
    pub fn product(&self) -> f64 {
        self.journey_time * self.adaptation_time * self.transfers
    }

    /// `[journey_time, adaptation_time, transfers]`.
    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.journey_time, self.adaptation_time, self.transfers]
    }
}

// ── ElasticityReport ──────────────────────────────────────────────────────────

/// Diagnostic bundle of one origin zone: every factor the multiplier
/// computed, plus the skims it compared.
#[derive(Debug, Clone)]
pub struct ElasticityReport {
    pub origin:    ZoneId,
    pub factors:   BTreeMap<ZoneId, MetricFactors>,
    pub reference: SkimMap,
    pub variant:   SkimMap,
}

impl ElasticityReport {
    /// Combined multiplier for `destination`; 1 if it was never evaluated.
    pub fn factor(&self, destination: ZoneId) -> f64 {
        self.factors.get(&destination).map_or(1.0, MetricFactors::product)
    }
}

// ── Multiplier ────────────────────────────────────────────────────────────────

/// Demand multipliers for the OD pairs of a single origin zone.
///
/// Factors are computed lazily and cached per destination.  The cache is
/// plain per-instance state: a `Multiplier` belongs to exactly one origin
/// zone's task.
pub struct Multiplier<'a> {
    model:     &'a ElasticityModel,
    origin:    ZoneId,
    reference: &'a SkimMap,
    variant:   &'a SkimMap,
    lookup:    &'a dyn ZoneClusterLookup,
    factors:   BTreeMap<ZoneId, MetricFactors>,
}

impl<'a> Multiplier<'a> {
    pub(crate) fn new(
        model:     &'a ElasticityModel,
        origin:    ZoneId,
        reference: &'a SkimMap,
        variant:   &'a SkimMap,
        lookup:    &'a dyn ZoneClusterLookup,
    ) -> Self {
        Self {
            model,
            origin,
            reference,
            variant,
            lookup,
            factors: BTreeMap::new(),
        }
    }

    pub fn origin(&self) -> ZoneId {
        self.origin
    }

    /// Combined multiplier for `origin → destination`.
    ///
    /// Returns 1 without touching the elasticity table when either scenario
    /// has no skim for the destination.
    pub fn factor(&mut self, destination: ZoneId) -> ElasticityResult<f64> {
        Ok(self.metric_factors(destination)?.product())
    }

    /// Like [`factor`][Self::factor] for an arbitrary OD pair.  Pairs of
    /// another origin have no skims here and are neutral.
    pub fn od_factor(&mut self, od: ODPair) -> ElasticityResult<f64> {
        if od.origin != self.origin {
            return Ok(1.0);
        }
        self.factor(od.destination)
    }

    /// Per-metric factors for `destination`.
    pub fn metric_factors(&mut self, destination: ZoneId) -> ElasticityResult<MetricFactors> {
        if let Some(&cached) = self.factors.get(&destination) {
            return Ok(cached);
        }
        let (reference_map, variant_map): (&'a SkimMap, &'a SkimMap) = (self.reference, self.variant);
        let (Some(reference), Some(variant)) =
            (reference_map.get(&destination), variant_map.get(&destination))
        else {
            return Ok(MetricFactors::NEUTRAL);
        };

        let factors = self.compute(destination, reference, variant)?;
        self.factors.insert(destination, factors);
        Ok(factors)
    }

    /// Evaluate every destination present in either scenario.
    pub fn evaluate_all(&mut self) -> ElasticityResult<()> {
        let destinations: Vec<ZoneId> = self
            .reference
            .keys()
            .chain(self.variant.keys())
            .copied()
            .collect();
        for dest in destinations {
            self.metric_factors(dest)?;
        }
        Ok(())
    }

    /// Consume the multiplier and package its diagnostics.
    pub fn into_report(self) -> ElasticityReport {
        ElasticityReport {
            origin:    self.origin,
            factors:   self.factors,
            reference: self.reference.clone(),
            variant:   self.variant.clone(),
        }
    }

    fn compute(
        &self,
        destination: ZoneId,
        reference:   &SkimVector,
        variant:     &SkimVector,
    ) -> ElasticityResult<MetricFactors> {
        let model = self.model;
        let cluster = model.cluster_of(ODPair::new(self.origin, destination), self.lookup)?;
        let (ax, bx) = model.covariates(cluster, reference)?;

        let mut out = MetricFactors::NEUTRAL;
        for skim_type in SkimType::EVALUATED {
            let entry = model.entry(cluster, skim_type)?;
            let f = metric_factor(entry, reference, variant, ax, bx, model.transfer_offset());
            match skim_type {
                SkimType::Jrt => out.journey_time = f,
                SkimType::Adt => out.adaptation_time = f,
                SkimType::Ntr => out.transfers = f,
                SkimType::Pm  => {}
            }
        }
        Ok(out)
    }
}

/// Factor of one skim metric, clamped into the entry's `[f_min, f_max]`.
///
/// Non-finite skim values (e.g. from zero-demand normalization) and a zero
/// reference for a ratio metric give the unclamped neutral factor 1.
fn metric_factor(
    entry:     &ElasticityEntry,
    reference: &SkimVector,
    variant:   &SkimVector,
    ax:        f64,
    bx:        f64,
    offset:    f64,
) -> f64 {
    let Some(metric) = entry.skim_type.skim_metric() else {
        return 1.0;
    };
    let (r, v) = (reference[metric], variant[metric]);
    if !r.is_finite() || !v.is_finite() {
        return 1.0;
    }

    let ratio = match entry.skim_type {
        SkimType::Ntr => (v + offset) / (r + offset),
        _ if r == 0.0 => return 1.0,
        _ => v / r,
    };
    let f = ratio.powf(entry.elasticity(ax, bx));
    if f.is_nan() { 1.0 } else { entry.clamp_factor(f) }
}
