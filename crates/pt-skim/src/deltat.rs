//! Schedule adaptation time ("delta-T").
//!
//! A traveller wants to leave at `departure`; the service they can use runs
//! within `[start, end]`.  Adaptation time is how far they must shift their
//! departure to meet that service: *early* if they must leave earlier than
//! desired, *late* if they must leave later.
//!
//! Timetables repeat daily, so every raw difference is folded into the
//! half-open range (−12 h, +12 h] before use.  An interval may itself wrap
//! midnight (e.g. 23:00 – 01:00).

/// Seconds in one service day.
pub const DAY_SECS: f64 = 86_400.0;

/// Half a service day; the fold boundary of [`normalize`].
pub const HALF_DAY_SECS: f64 = 43_200.0;

/// Fold a time difference into (−12 h, +12 h].
///
/// `normalize(x) == normalize(x + k·24 h)` for every integer `k`.
#[inline]
pub fn normalize(delta_secs: f64) -> f64 {
    let r = delta_secs.rem_euclid(DAY_SECS);
    if r > HALF_DAY_SECS { r - DAY_SECS } else { r }
}

// ── DeltaT ────────────────────────────────────────────────────────────────────

/// Early and late adaptation time of one evaluation.  Both are ≥ 0 and at
/// most one of them is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeltaT {
    pub early: f64,
    pub late:  f64,
}

impl DeltaT {
    pub const ZERO: DeltaT = DeltaT { early: 0.0, late: 0.0 };

    /// Build from raw (clamped) sides, keeping only the smaller one if both
    /// are positive.  That happens only for intervals longer than 12 h, where
    /// the nearer edge is the one the traveller would adapt to.
    fn exclusive(early: f64, late: f64) -> DeltaT {
        match (early > 0.0, late > 0.0) {
            (true, true) if early <= late => DeltaT { early, late: 0.0 },
            (true, true) => DeltaT { early: 0.0, late },
            _ => DeltaT { early, late },
        }
    }

    /// `early + late`; since one side is zero, this is the adaptation time.
    #[inline]
    pub fn total(&self) -> f64 {
        self.early + self.late
    }
}

// ── Calculator trait ──────────────────────────────────────────────────────────

/// A delta-T policy.
///
/// Implementations are stateless and `Send + Sync`, so a single instance may
/// be shared by every router thread.
pub trait DeltaTCalculator: Send + Sync {
    /// Adaptation time for a desired `departure` against the service window
    /// `[start, end]`.  All arguments are seconds since midnight.
    fn delta_t(&self, departure: f64, start: f64, end: f64) -> DeltaT;

    fn calculate_early(&self, departure: f64, start: f64, end: f64) -> f64 {
        self.delta_t(departure, start, end).early
    }

    fn calculate_late(&self, departure: f64, start: f64, end: f64) -> f64 {
        self.delta_t(departure, start, end).late
    }
}

/// Measures against the window edges: a departure inside the window, or
/// exactly on an edge, needs no adaptation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalBoundary;

impl DeltaTCalculator for IntervalBoundary {
    fn delta_t(&self, departure: f64, start: f64, end: f64) -> DeltaT {
        let early = (-normalize(departure - start)).max(0.0);
        let late = normalize(departure - end).max(0.0);
        DeltaT::exclusive(early, late)
    }
}

/// Measures against the window midpoint.  Only a departure exactly at the
/// midpoint needs no adaptation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalCenter;

impl IntervalCenter {
    /// Midpoint of `[start, end]`, following the window forward across
    /// midnight if it wraps.  Windows of any length up to a full day are
    /// measured forward from `start`.
    #[inline]
    pub fn midpoint(start: f64, end: f64) -> f64 {
        start + (end - start).rem_euclid(DAY_SECS) / 2.0
    }
}

impl DeltaTCalculator for IntervalCenter {
    fn delta_t(&self, departure: f64, start: f64, end: f64) -> DeltaT {
        let d = normalize(departure - Self::midpoint(start, end));
        DeltaT::exclusive((-d).max(0.0), d.max(0.0))
    }
}
