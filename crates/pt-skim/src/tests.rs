//! Unit tests for pt-skim.

use std::collections::BTreeMap;

use pt_core::{FoundRoute, ZoneId};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn route(dest: u32, demand: f64, journey: f64, transfers: u32, adaptation: f64) -> FoundRoute {
    FoundRoute {
        destination:     ZoneId(dest),
        demand,
        departure_secs:  7.0 * 3_600.0,
        arrival_secs:    7.0 * 3_600.0 + journey,
        transfers,
        adaptation_secs: adaptation,
    }
}

// ── normalize ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod normalize_tests {
    use crate::{normalize, DAY_SECS, HALF_DAY_SECS};

    #[test]
    fn stays_within_half_open_range() {
        for x in [-200_000.0, -86_400.0, -43_200.0, -43_199.0, 0.0, 1.0, 43_200.0, 43_201.0, 90_000.0] {
            let n = normalize(x);
            assert!(n > -HALF_DAY_SECS && n <= HALF_DAY_SECS, "normalize({x}) = {n}");
        }
    }

    #[test]
    fn half_day_boundaries() {
        assert_eq!(normalize(HALF_DAY_SECS), HALF_DAY_SECS);
        assert_eq!(normalize(-HALF_DAY_SECS), HALF_DAY_SECS);
        assert_eq!(normalize(HALF_DAY_SECS + 1.0), -HALF_DAY_SECS + 1.0);
    }

    #[test]
    fn periodic_in_whole_days() {
        for x in [-5_000.0, 0.0, 123.0, 40_000.0] {
            for k in -3..=3 {
                assert_eq!(normalize(x), normalize(x + DAY_SECS * k as f64), "x={x} k={k}");
            }
        }
    }
}

// ── DeltaT ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod deltat_tests {
    use crate::{DeltaTCalculator, IntervalBoundary, IntervalCenter};

    #[test]
    fn boundary_before_interval_is_early() {
        let c = IntervalBoundary;
        assert_eq!(c.calculate_early(2900.0, 3000.0, 3100.0), 100.0);
        assert_eq!(c.calculate_late(2900.0, 3000.0, 3100.0), 0.0);
    }

    #[test]
    fn boundary_after_interval_is_late() {
        let c = IntervalBoundary;
        assert_eq!(c.calculate_early(3200.0, 3000.0, 3100.0), 0.0);
        assert_eq!(c.calculate_late(3200.0, 3000.0, 3100.0), 100.0);
    }

    #[test]
    fn boundary_edges_and_inside_are_zero() {
        let c = IntervalBoundary;
        for dep in [3000.0, 3050.0, 3100.0] {
            assert_eq!(c.calculate_early(dep, 3000.0, 3100.0), 0.0);
            assert_eq!(c.calculate_late(dep, 3000.0, 3100.0), 0.0);
        }
    }

    #[test]
    fn boundary_across_midnight() {
        let c = IntervalBoundary;
        // Service 00:05–00:10, traveller wants 23:55 the evening before.
        let dt = c.delta_t(86_100.0, 300.0, 600.0);
        assert_eq!(dt.early, 600.0);
        assert_eq!(dt.late, 0.0);
        // Service 23:50–23:55, traveller wants 00:05.
        let dt = c.delta_t(300.0, 85_800.0, 86_100.0);
        assert_eq!(dt.late, 600.0);
        assert_eq!(dt.early, 0.0);
    }

    #[test]
    fn at_most_one_side_non_zero() {
        let c = IntervalBoundary;
        // A 20 h window: both raw sides would be positive for 23:00.
        let dt = c.delta_t(82_800.0, 0.0, 72_000.0);
        assert!(dt.early == 0.0 || dt.late == 0.0, "{dt:?}");
        assert_eq!(dt.total(), 3_600.0);
    }

    #[test]
    fn center_measures_from_midpoint() {
        let c = IntervalCenter;
        assert_eq!(c.calculate_early(2900.0, 3000.0, 3100.0), 150.0);
        assert_eq!(c.calculate_late(2900.0, 3000.0, 3100.0), 0.0);
        assert_eq!(c.calculate_late(3200.0, 3000.0, 3100.0), 150.0);
        assert_eq!(c.delta_t(3050.0, 3000.0, 3100.0).total(), 0.0);
    }

    #[test]
    fn center_midpoint_wraps() {
        assert_eq!(IntervalCenter::midpoint(86_000.0, 400.0), 86_400.0);
        let dt = IntervalCenter.delta_t(0.0, 86_000.0, 400.0);
        assert_eq!(dt.total(), 0.0);
    }

    #[test]
    fn center_of_long_window() {
        // 00:00–20:00 and 05:00–24:00 both exceed half a day.
        assert_eq!(IntervalCenter::midpoint(0.0, 72_000.0), 36_000.0);
        assert_eq!(IntervalCenter.delta_t(36_000.0, 0.0, 72_000.0).total(), 0.0);
        assert_eq!(IntervalCenter::midpoint(18_000.0, 86_400.0), 52_200.0);
        assert_eq!(IntervalCenter.delta_t(52_200.0, 18_000.0, 86_400.0).total(), 0.0);

        let dt = IntervalCenter.delta_t(30_000.0, 0.0, 72_000.0);
        assert_eq!(dt.early, 6_000.0);
        assert_eq!(dt.late, 0.0);
    }

    #[test]
    fn usable_as_trait_object() {
        let policies: Vec<Box<dyn DeltaTCalculator>> = vec![Box::new(IntervalBoundary), Box::new(IntervalCenter)];
        for p in &policies {
            let dt = p.delta_t(0.0, 3000.0, 3100.0);
            assert!(dt.early > 0.0 && dt.late == 0.0);
        }
    }
}

// ── Skim aggregation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod skim_tests {
    use super::*;
    use crate::{od_skims, SkimAggregator, SkimMetric};
    use pt_core::ZeroDemandPolicy;

    #[test]
    fn metrics_for_one_destination() {
        let routes = vec![
            route(1, 10.0, 1_000.0, 0, 60.0),
            route(1, 30.0, 2_000.0, 2, 120.0),
        ];
        let v = SkimAggregator::default().aggregate_routes(&routes);

        assert_eq!(v[SkimMetric::Demand], 40.0);
        assert_eq!(v[SkimMetric::JourneyTime], 3_000.0);
        assert_eq!(v[SkimMetric::NumberOfRoutes], 2.0);
        assert_eq!(v[SkimMetric::WeightedJourneyTime], (10.0 * 1_000.0 + 30.0 * 2_000.0) / 40.0);
        assert_eq!(v[SkimMetric::WeightedTransfers], 60.0 / 40.0);
        assert_eq!(v[SkimMetric::WeightedAdaptationTime], (600.0 + 3_600.0) / 40.0);
    }

    #[test]
    fn demand_sums_match_route_demand() {
        let mut by_dest: BTreeMap<ZoneId, Vec<FoundRoute>> = BTreeMap::new();
        let routes = [
            route(1, 1.5, 900.0, 0, 0.0),
            route(2, 2.25, 900.0, 1, 30.0),
            route(2, 4.0, 1_200.0, 1, 30.0),
            route(3, 0.25, 3_000.0, 3, 600.0),
        ];
        for r in routes {
            by_dest.entry(r.destination).or_default().push(r);
        }
        let skims = SkimAggregator::default().aggregate(&by_dest);

        let skim_total: f64 = skims.values().map(|v| v.demand()).sum();
        let route_total: f64 = routes.iter().map(|r| r.demand).sum();
        assert_eq!(skims.len(), 3);
        assert!((skim_total - route_total).abs() < 1e-12);
    }

    #[test]
    fn zero_demand_propagates_nan_by_default() {
        let v = SkimAggregator::default().aggregate_routes(&[route(1, 0.0, 600.0, 1, 0.0)]);
        assert_eq!(v.demand(), 0.0);
        assert_eq!(v[SkimMetric::NumberOfRoutes], 1.0);
        assert!(v[SkimMetric::WeightedJourneyTime].is_nan());
        assert!(!v.is_finite());
    }

    #[test]
    fn zero_demand_policy_zero() {
        let agg = SkimAggregator::new(ZeroDemandPolicy::Zero);
        let v = agg.aggregate_routes(&[route(1, 0.0, 600.0, 1, 0.0)]);
        assert_eq!(v[SkimMetric::WeightedJourneyTime], 0.0);
        assert_eq!(v[SkimMetric::WeightedTransfers], 0.0);
        assert_eq!(v[SkimMetric::JourneyTime], 600.0);
        assert!(v.is_finite());
    }

    #[test]
    fn od_iteration_carries_origin() {
        let mut by_dest = BTreeMap::new();
        by_dest.insert(ZoneId(4), vec![route(4, 1.0, 60.0, 0, 0.0)]);
        let skims = SkimAggregator::default().aggregate(&by_dest);
        let pairs: Vec<_> = od_skims(ZoneId(9), &skims).map(|(od, _)| od.to_string()).collect();
        assert_eq!(pairs, vec!["9->4"]);
    }

    #[test]
    fn metric_order_is_fixed() {
        let idx: Vec<usize> = SkimMetric::ALL.iter().map(|m| m.index()).collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(SkimMetric::ALL[0], SkimMetric::Demand);
    }
}
