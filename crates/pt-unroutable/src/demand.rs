//! Recording and aggregating unroutable demand.

use std::collections::BTreeMap;

use tracing::warn;

use pt_core::{DemandMatrix, EvalResult, UnroutableDemandPart, ZoneId};

use crate::{UnroutableDemandStats, UnroutableDemandZone};

/// Share of a zone's demand above which it is flagged by default.
pub const DEFAULT_SHARE_LIMIT: f64 = 0.95;

// ── Recorder ──────────────────────────────────────────────────────────────────

/// Append-only collector for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct UnroutableDemandRecorder {
    parts: Vec<UnroutableDemandPart>,
}

impl UnroutableDemandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one part.  Negative or non-finite demand is dropped with a
    /// warning.
    pub fn record(&mut self, from: ZoneId, to: ZoneId, demand: f64) {
        if !demand.is_finite() || demand < 0.0 {
            warn!(%from, %to, demand, "ignoring invalid unroutable demand");
            return;
        }
        self.parts.push(UnroutableDemandPart { from, to, demand });
    }

    pub fn extend<I: IntoIterator<Item = UnroutableDemandPart>>(&mut self, parts: I) {
        for p in parts {
            self.record(p.from, p.to, p.demand);
        }
    }

    /// A closure suitable as a router failure callback.
    pub fn callback(&mut self) -> impl FnMut(ZoneId, ZoneId, f64) + '_ {
        move |from, to, demand| self.record(from, to, demand)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// End the recording phase.
    pub fn freeze(self) -> UnroutableDemand {
        UnroutableDemand { parts: self.parts }
    }
}

// ── Frozen collection ─────────────────────────────────────────────────────────

/// Read-only, ordered collection of unroutable demand parts.
#[derive(Debug, Clone, Default)]
pub struct UnroutableDemand {
    parts: Vec<UnroutableDemandPart>,
}

impl UnroutableDemand {
    /// Parts in recording order.
    pub fn parts(&self) -> &[UnroutableDemandPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Σ demand over all parts.
    pub fn total(&self) -> f64 {
        self.parts.iter().map(|p| p.demand).sum()
    }

    /// Unroutable demand as a share of the matrix grand total; 0 if the
    /// matrix is empty.
    pub fn percent(&self, matrix: &dyn DemandMatrix) -> f64 {
        let grand_total = matrix.sum();
        if grand_total == 0.0 { 0.0 } else { self.total() / grand_total }
    }

    /// Unroutable demand summed per origin zone, ascending by zone.
    pub fn by_origin(&self) -> BTreeMap<ZoneId, f64> {
        let mut sums: BTreeMap<ZoneId, f64> = BTreeMap::new();
        for p in &self.parts {
            *sums.entry(p.from).or_insert(0.0) += p.demand;
        }
        sums
    }

    /// Among origin zones whose unroutable share exceeds `limit`, the one
    /// with the largest total demand.
    ///
    /// Zones are visited in ascending id order and only a strictly larger
    /// total replaces the current best, so ties go to the lowest zone id.
    pub fn largest_zone(&self, matrix: &dyn DemandMatrix, limit: f64) -> EvalResult<UnroutableDemandZone> {
        let mut best = UnroutableDemandZone::Empty;

        for (zone, unroutable) in self.by_origin() {
            let total = matrix.origin_sum(zone)?;
            let share = if total == 0.0 { 0.0 } else { unroutable / total };
            if share <= limit {
                continue;
            }
            if best.is_empty() || total > best.demand() {
                best = UnroutableDemandZone::Zone { zone, demand: total };
            }
        }

        Ok(best)
    }

    /// All diagnostics in one pass over the matrix collaborator.
    pub fn stats(&self, matrix: &dyn DemandMatrix, limit: f64) -> EvalResult<UnroutableDemandStats> {
        Ok(UnroutableDemandStats {
            total:   self.total(),
            percent: self.percent(matrix),
            largest: self.largest_zone(matrix, limit)?,
        })
    }
}

impl FromIterator<UnroutableDemandPart> for UnroutableDemandRecorder {
    fn from_iter<I: IntoIterator<Item = UnroutableDemandPart>>(iter: I) -> Self {
        let mut recorder = Self::new();
        recorder.extend(iter);
        recorder
    }
}
