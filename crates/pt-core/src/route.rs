//! Router output consumed by the evaluator.
//!
//! The route search itself lives upstream.  What reaches this crate is, per
//! origin zone, the list of found routes for every destination plus the
//! demand the router could not place on any route.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::{EvalError, EvalResult, ZoneId};

// ── FoundRoute ────────────────────────────────────────────────────────────────

/// One route found by the router, carrying its share of the OD demand.
///
/// All times are seconds since midnight of the service day; `arrival_secs`
/// may exceed 86 400 for journeys that cross midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundRoute {
    pub destination:     ZoneId,
    /// Trips assigned to this route (≥ 0).
    pub demand:          f64,
    pub departure_secs:  f64,
    pub arrival_secs:    f64,
    pub transfers:       u32,
    /// Schedule adaptation time (delta-T) of the assigned travellers.
    pub adaptation_secs: f64,
}

impl FoundRoute {
    /// In-vehicle plus transfer time, door to door.
    #[inline]
    pub fn journey_secs(&self) -> f64 {
        self.arrival_secs - self.departure_secs
    }
}

// ── UnroutableDemandPart ──────────────────────────────────────────────────────

/// Demand between two zones that the router could not assign to any route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnroutableDemandPart {
    pub from:   ZoneId,
    pub to:     ZoneId,
    pub demand: f64,
}

// ── ZoneRoutes ────────────────────────────────────────────────────────────────

/// Everything the router produced for one origin zone.
///
/// Destinations are kept in a `BTreeMap` so downstream skims iterate in
/// ascending zone order regardless of the order routes were found in.
#[derive(Debug, Clone, Default)]
pub struct ZoneRoutes {
    pub by_destination: BTreeMap<ZoneId, Vec<FoundRoute>>,
    pub unroutable:     Vec<UnroutableDemandPart>,
}

impl ZoneRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `route` under its destination zone.
    pub fn push(&mut self, route: FoundRoute) {
        self.by_destination.entry(route.destination).or_default().push(route);
    }

    /// Record demand from `from` to `to` that could not be routed.
    pub fn push_unroutable(&mut self, from: ZoneId, to: ZoneId, demand: f64) {
        self.unroutable.push(UnroutableDemandPart { from, to, demand });
    }

    /// Total demand carried by all found routes (unroutable parts excluded).
    pub fn routed_demand(&self) -> f64 {
        self.by_destination
            .values()
            .flat_map(|routes| routes.iter())
            .map(|r| r.demand)
            .sum()
    }

    pub fn route_count(&self) -> usize {
        self.by_destination.values().map(Vec::len).sum()
    }
}

// ── Router collaborator ───────────────────────────────────────────────────────

/// Source of per-origin router output.
///
/// # Contract
///
/// - Called at most once per origin zone per scenario within a run.
/// - Called concurrently from worker threads, hence `Send + Sync`.
/// - Must return [`EvalError::ZoneNotFound`] for origins it does not know.
pub trait ZoneRouter: Send + Sync {
    fn route_zone(&self, origin: ZoneId) -> EvalResult<ZoneRoutes>;
}

/// A [`ZoneRouter`] backed by router output computed ahead of time.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    zones: FxHashMap<ZoneId, ZoneRoutes>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, origin: ZoneId, routes: ZoneRoutes) {
        self.zones.insert(origin, routes);
    }

    /// Origins known to this table, ascending.
    pub fn origins(&self) -> Vec<ZoneId> {
        let mut origins: Vec<ZoneId> = self.zones.keys().copied().collect();
        origins.sort_unstable();
        origins
    }
}

impl ZoneRouter for RouteTable {
    fn route_zone(&self, origin: ZoneId) -> EvalResult<ZoneRoutes> {
        self.zones
            .get(&origin)
            .cloned()
            .ok_or(EvalError::ZoneNotFound(origin))
    }
}
