//! Read-only collaborators shared by every worker thread.
//!
//! Both traits are `Send + Sync` and take `&self`: implementations are built
//! once before the worker pool starts and never mutated afterwards, so no
//! locking is needed on the read path.

use rustc_hash::FxHashMap;

use crate::{EvalError, EvalResult, ODPair, ZoneId};

// ── Zone → region ─────────────────────────────────────────────────────────────

/// Maps a zone to its region code (e.g. an ISO country code).
pub trait ZoneClusterLookup: Send + Sync {
    /// Region code of `zone`, or [`EvalError::ZoneNotFound`].
    fn region(&self, zone: ZoneId) -> EvalResult<&str>;
}

/// In-memory [`ZoneClusterLookup`].
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: FxHashMap<ZoneId, String>,
}

impl RegionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: ZoneId, region: impl Into<String>) {
        self.regions.insert(zone, region.into());
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<(ZoneId, String)> for RegionMap {
    fn from_iter<I: IntoIterator<Item = (ZoneId, String)>>(iter: I) -> Self {
        Self { regions: iter.into_iter().collect() }
    }
}

impl ZoneClusterLookup for RegionMap {
    fn region(&self, zone: ZoneId) -> EvalResult<&str> {
        self.regions
            .get(&zone)
            .map(String::as_str)
            .ok_or(EvalError::ZoneNotFound(zone))
    }
}

// ── Demand matrix ─────────────────────────────────────────────────────────────

/// Zone-indexed OD demand (routable and unroutable together).
pub trait DemandMatrix: Send + Sync {
    /// Total demand leaving `zone`, or [`EvalError::ZoneNotFound`].
    fn origin_sum(&self, zone: ZoneId) -> EvalResult<f64>;

    /// Grand total over all cells.
    fn sum(&self) -> f64;
}

/// Sparse in-memory [`DemandMatrix`].
///
/// Row sums are maintained on insert so `origin_sum` is O(1).  Every zone
/// that appears as an origin or a destination is known to the matrix; a
/// destination-only zone has an origin sum of 0.
#[derive(Debug, Clone, Default)]
pub struct OdMatrix {
    cells:       FxHashMap<ODPair, f64>,
    origin_sums: FxHashMap<ZoneId, f64>,
    total:       f64,
}

impl OdMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `demand` to the cell `od` (cells accumulate).
    pub fn add(&mut self, od: ODPair, demand: f64) {
        *self.cells.entry(od).or_insert(0.0) += demand;
        *self.origin_sums.entry(od.origin).or_insert(0.0) += demand;
        self.origin_sums.entry(od.destination).or_insert(0.0);
        self.total += demand;
    }

    /// Register a zone with no demand so lookups for it succeed.
    pub fn add_zone(&mut self, zone: ZoneId) {
        self.origin_sums.entry(zone).or_insert(0.0);
    }

    /// Demand in one cell; `None` if the cell was never written.
    pub fn get(&self, od: ODPair) -> Option<f64> {
        self.cells.get(&od).copied()
    }

    pub fn zone_count(&self) -> usize {
        self.origin_sums.len()
    }
}

impl DemandMatrix for OdMatrix {
    fn origin_sum(&self, zone: ZoneId) -> EvalResult<f64> {
        self.origin_sums
            .get(&zone)
            .copied()
            .ok_or(EvalError::ZoneNotFound(zone))
    }

    fn sum(&self) -> f64 {
        self.total
    }
}
