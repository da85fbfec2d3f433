//! Skim aggregation engine.
//!
//! The six metrics form a closed set evaluated in fixed order.  Each metric
//! is an (accumulate, finalize) pair: `accumulate` maps one route to its
//! contribution, `finalize` turns the folded sum into the reported value.
//! `Demand` sits at index 0 and finalizes to itself, so the divisor for the
//! demand-weighted metrics is complete before any of them is divided.

use std::collections::BTreeMap;
use std::ops::Index;

use pt_core::{FoundRoute, ODPair, ZeroDemandPolicy, ZoneId};

// ── SkimMetric ────────────────────────────────────────────────────────────────

/// One entry of a [`SkimVector`].  Discriminants are vector indices.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SkimMetric {
    Demand                 = 0,
    JourneyTime            = 1,
    NumberOfRoutes         = 2,
    WeightedJourneyTime    = 3,
    WeightedTransfers      = 4,
    WeightedAdaptationTime = 5,
}

impl SkimMetric {
    /// All metrics in evaluation order.
    pub const ALL: [SkimMetric; 6] = [
        SkimMetric::Demand,
        SkimMetric::JourneyTime,
        SkimMetric::NumberOfRoutes,
        SkimMetric::WeightedJourneyTime,
        SkimMetric::WeightedTransfers,
        SkimMetric::WeightedAdaptationTime,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by writers.
    pub fn name(self) -> &'static str {
        match self {
            SkimMetric::Demand                 => "demand",
            SkimMetric::JourneyTime            => "journey_time",
            SkimMetric::NumberOfRoutes         => "number_of_routes",
            SkimMetric::WeightedJourneyTime    => "weighted_journey_time",
            SkimMetric::WeightedTransfers      => "weighted_transfers",
            SkimMetric::WeightedAdaptationTime => "weighted_adaptation_time",
        }
    }

    /// `true` for the metrics divided by total demand after folding.
    #[inline]
    pub fn is_demand_weighted(self) -> bool {
        matches!(
            self,
            SkimMetric::WeightedJourneyTime
                | SkimMetric::WeightedTransfers
                | SkimMetric::WeightedAdaptationTime
        )
    }

    /// Contribution of a single route to this metric's running sum.
    #[inline]
    pub fn accumulate(self, route: &FoundRoute) -> f64 {
        match self {
            SkimMetric::Demand                 => route.demand,
            SkimMetric::JourneyTime            => route.journey_secs(),
            SkimMetric::NumberOfRoutes         => 1.0,
            SkimMetric::WeightedJourneyTime    => route.demand * route.journey_secs(),
            SkimMetric::WeightedTransfers      => route.demand * route.transfers as f64,
            SkimMetric::WeightedAdaptationTime => route.demand * route.adaptation_secs,
        }
    }

    /// Turn a folded sum into the reported value.  `demand` must already be
    /// the final demand of the OD pair.
    #[inline]
    pub fn finalize(self, sum: f64, demand: f64, policy: ZeroDemandPolicy) -> f64 {
        if !self.is_demand_weighted() {
            return sum;
        }
        match policy {
            ZeroDemandPolicy::Zero if demand == 0.0 => 0.0,
            _ => sum / demand,
        }
    }
}

// ── SkimVector ────────────────────────────────────────────────────────────────

/// The six skim values of one OD pair, indexed by [`SkimMetric`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkimVector(pub [f64; 6]);

impl SkimVector {
    #[inline]
    pub fn get(&self, metric: SkimMetric) -> f64 {
        self.0[metric.index()]
    }

    #[inline]
    pub fn demand(&self) -> f64 {
        self.get(SkimMetric::Demand)
    }

    #[inline]
    pub fn as_array(&self) -> &[f64; 6] {
        &self.0
    }

    /// `true` if every entry is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<SkimMetric> for SkimVector {
    type Output = f64;

    #[inline]
    fn index(&self, metric: SkimMetric) -> &f64 {
        &self.0[metric.index()]
    }
}

/// Skims of one origin zone, keyed by destination zone.
pub type SkimMap = BTreeMap<ZoneId, SkimVector>;

/// Iterate a per-origin [`SkimMap`] as `(ODPair, &SkimVector)`.
pub fn od_skims(origin: ZoneId, skims: &SkimMap) -> impl Iterator<Item = (ODPair, &SkimVector)> {
    skims.iter().map(move |(&dest, v)| (ODPair::new(origin, dest), v))
}

// ── SkimAggregator ────────────────────────────────────────────────────────────

/// Folds found routes into skim vectors.
///
/// Holds no state between calls beyond its policy, so one instance can be
/// shared by all workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkimAggregator {
    pub zero_demand: ZeroDemandPolicy,
}

impl SkimAggregator {
    pub fn new(zero_demand: ZeroDemandPolicy) -> Self {
        Self { zero_demand }
    }

    /// Skim vector of a single destination's route list.
    pub fn aggregate_routes(&self, routes: &[FoundRoute]) -> SkimVector {
        let mut sums = [0.0f64; 6];
        for route in routes {
            for metric in SkimMetric::ALL {
                sums[metric.index()] += metric.accumulate(route);
            }
        }

        let demand = sums[SkimMetric::Demand.index()];
        let mut out = [0.0f64; 6];
        for metric in SkimMetric::ALL {
            out[metric.index()] = metric.finalize(sums[metric.index()], demand, self.zero_demand);
        }
        SkimVector(out)
    }

    /// Skims of one origin zone: one vector per destination that has at
    /// least an (empty) route list.
    pub fn aggregate(&self, by_destination: &BTreeMap<ZoneId, Vec<FoundRoute>>) -> SkimMap {
        by_destination
            .iter()
            .map(|(&dest, routes)| (dest, self.aggregate_routes(routes)))
            .collect()
    }
}
