//! Unit tests for pt-elasticity.

use pt_core::{EvalConfig, RegionMap, ZoneId};
use pt_skim::{SkimMap, SkimVector};

use crate::{Cluster, ElasticityEntry, ElasticityModel, SkimType};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn entry(cluster: Cluster, segment: &str, skim_type: SkimType, e0: f64) -> ElasticityEntry {
    ElasticityEntry {
        cluster,
        segment: segment.to_owned(),
        description: format!("{skim_type}"),
        skim_type,
        elasticity0: e0,
        a: 0.0,
        b: 0.0,
        min: -2.0,
        max: 0.0,
        f_min: 0.1,
        f_max: 10.0,
        kg_max: None,
    }
}

/// Business segment, both clusters, plus a leisure segment that must be
/// filtered out.
fn table() -> Vec<ElasticityEntry> {
    let mut rows = Vec::new();
    for (cluster, scale) in [(Cluster::Domestic, 1.0), (Cluster::International, 0.5)] {
        rows.push(entry(cluster, "business", SkimType::Jrt, -0.8 * scale));
        rows.push(entry(cluster, "business", SkimType::Adt, -0.3 * scale));
        rows.push(entry(cluster, "business", SkimType::Ntr, -0.2 * scale));
        rows.push(entry(cluster, "business", SkimType::Pm, -0.5 * scale));
    }
    rows.push(entry(Cluster::Domestic, "leisure", SkimType::Jrt, -1.5));
    rows
}

fn config() -> EvalConfig {
    EvalConfig {
        segment:      "business".to_owned(),
        home_country: "CH".to_owned(),
        ..EvalConfig::default()
    }
}

fn model() -> ElasticityModel {
    ElasticityModel::new(table(), &config()).unwrap()
}

/// Zones 1–3 in CH, zone 9 in DE.
fn regions() -> RegionMap {
    let mut r = RegionMap::new();
    for z in 1..=3 {
        r.insert(ZoneId(z), "CH");
    }
    r.insert(ZoneId(9), "DE");
    r
}

/// Skim vector with the elasticity-relevant entries set (times in seconds).
fn skim(jrt: f64, ntr: f64, adt: f64) -> SkimVector {
    SkimVector([10.0, jrt, 1.0, jrt, ntr, adt])
}

fn skims(pairs: &[(u32, SkimVector)]) -> SkimMap {
    pairs.iter().map(|&(z, v)| (ZoneId(z), v)).collect()
}

// ── Model construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::ElasticityError;

    #[test]
    fn filters_to_segment() {
        let m = model();
        assert_eq!(m.segment(), "business");
        assert_eq!(m.len(), 8);
        assert_eq!(m.entry(Cluster::Domestic, SkimType::Jrt).unwrap().elasticity0, -0.8);
    }

    #[test]
    fn unknown_segment_fails_eagerly() {
        let cfg = EvalConfig { segment: "commuter".to_owned(), ..config() };
        let err = ElasticityModel::new(table(), &cfg).unwrap_err();
        assert!(matches!(err, ElasticityError::NoEntriesForSegment(ref s) if s == "commuter"));
    }

    #[test]
    fn missing_metric_fails_eagerly() {
        let rows: Vec<_> = table()
            .into_iter()
            .filter(|e| !(e.cluster == Cluster::International && e.skim_type == SkimType::Ntr))
            .collect();
        let err = ElasticityModel::new(rows, &config()).unwrap_err();
        assert!(matches!(
            err,
            ElasticityError::MissingEntry { cluster: Cluster::International, skim_type: SkimType::Ntr, .. }
        ));
    }

    #[test]
    fn single_cluster_table_fails_eagerly() {
        let rows: Vec<_> = table().into_iter().filter(|e| e.cluster == Cluster::Domestic).collect();
        let err = ElasticityModel::new(rows, &config()).unwrap_err();
        assert!(matches!(
            err,
            ElasticityError::MissingEntry { cluster: Cluster::International, skim_type: SkimType::Jrt, .. }
        ));
    }

    #[test]
    fn duplicate_row_rejected() {
        let mut rows = table();
        rows.push(entry(Cluster::Domestic, "business", SkimType::Adt, -0.1));
        let err = ElasticityModel::new(rows, &config()).unwrap_err();
        assert!(matches!(err, ElasticityError::DuplicateEntry { skim_type: SkimType::Adt, .. }));
    }

    #[test]
    fn elasticity_is_clamped() {
        let mut e = entry(Cluster::Domestic, "x", SkimType::Jrt, -5.0);
        assert_eq!(e.elasticity(0.0, 0.0), -2.0);
        e.elasticity0 = 1.0;
        assert_eq!(e.elasticity(0.0, 0.0), 0.0);
        e.elasticity0 = -0.5;
        e.a = -0.1;
        e.b = 0.2;
        assert!((e.elasticity(2.0, 1.0) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn covariates_use_minutes_and_cap() {
        let m = model();
        // ADT 120 min capped at 60 → ax = 4; JRT 45 min → bx = 1.
        let (ax, bx) = m.covariates(Cluster::Domestic, &skim(2_700.0, 0.0, 7_200.0)).unwrap();
        assert_eq!(ax, 4.0);
        assert_eq!(bx, 1.0);
    }

    #[test]
    fn kg_max_overrides_cap() {
        let mut rows = table();
        for r in rows.iter_mut() {
            if r.skim_type == SkimType::Adt {
                r.kg_max = Some(90.0);
            }
        }
        let m = ElasticityModel::new(rows, &config()).unwrap();
        let (ax, _) = m.covariates(Cluster::Domestic, &skim(2_700.0, 0.0, 7_200.0)).unwrap();
        assert_eq!(ax, 6.0);
    }

    #[test]
    fn cluster_classification() {
        let m = model();
        let r = regions();
        let od = |a, b| pt_core::ODPair::new(ZoneId(a), ZoneId(b));
        assert_eq!(m.cluster_of(od(1, 2), &r).unwrap(), Cluster::Domestic);
        assert_eq!(m.cluster_of(od(1, 9), &r).unwrap(), Cluster::International);
        assert_eq!(m.cluster_of(od(9, 1), &r).unwrap(), Cluster::International);
        assert!(matches!(
            m.cluster_of(od(1, 77), &r),
            Err(ElasticityError::Eval(pt_core::EvalError::ZoneNotFound(ZoneId(77))))
        ));
    }
}

// ── Multiplier ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod multiplier_tests {
    use super::*;
    use crate::ElasticityError;

    #[test]
    fn empty_maps_are_neutral() {
        let m = model();
        let empty = RegionMap::new();
        let (reference, variant) = (SkimMap::new(), SkimMap::new());
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &empty);
        for dest in [0, 1, 2, 500] {
            assert_eq!(mult.factor(ZoneId(dest)).unwrap(), 1.0);
            assert_eq!(mult.od_factor(pt_core::ODPair::new(ZoneId(42), ZoneId(dest))).unwrap(), 1.0);
        }
        assert!(mult.into_report().factors.is_empty());
    }

    #[test]
    fn missing_in_one_scenario_is_neutral() {
        let m = model();
        let r = RegionMap::new(); // lookup must not be consulted
        let reference = skims(&[(2, skim(3_600.0, 1.0, 600.0))]);
        let variant = SkimMap::new();
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        assert_eq!(mult.factor(ZoneId(2)).unwrap(), 1.0);
    }

    #[test]
    fn identical_scenarios_are_neutral() {
        let m = model();
        let r = regions();
        let s = skims(&[(2, skim(3_600.0, 1.0, 600.0)), (9, skim(7_200.0, 2.0, 900.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &s, &s, &r);
        assert_eq!(mult.factor(ZoneId(2)).unwrap(), 1.0);
        assert_eq!(mult.factor(ZoneId(9)).unwrap(), 1.0);
    }

    #[test]
    fn faster_journey_raises_demand() {
        let m = model();
        let r = regions();
        let reference = skims(&[(2, skim(3_600.0, 1.0, 600.0))]);
        let variant = skims(&[(2, skim(1_800.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);

        let expected = 0.5f64.powf(-0.8);
        let f = mult.metric_factors(ZoneId(2)).unwrap();
        assert!((f.journey_time - expected).abs() < 1e-12);
        assert_eq!(f.adaptation_time, 1.0);
        assert_eq!(f.transfers, 1.0);
        assert!((mult.factor(ZoneId(2)).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn international_curves_apply_across_border() {
        let m = model();
        let r = regions();
        let reference = skims(&[(9, skim(3_600.0, 1.0, 600.0))]);
        let variant = skims(&[(9, skim(1_800.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        let expected = 0.5f64.powf(-0.4);
        assert!((mult.factor(ZoneId(9)).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn transfer_offset_handles_zero_transfers() {
        let m = model();
        let r = regions();
        let reference = skims(&[(2, skim(3_600.0, 0.0, 600.0))]);
        let variant = skims(&[(2, skim(3_600.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        let f = mult.metric_factors(ZoneId(2)).unwrap();
        assert!((f.transfers - 2.0f64.powf(-0.2)).abs() < 1e-12);
    }

    #[test]
    fn zero_reference_ratio_is_neutral() {
        let m = model();
        let r = regions();
        let reference = skims(&[(2, skim(3_600.0, 1.0, 0.0))]);
        let variant = skims(&[(2, skim(3_600.0, 1.0, 900.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        assert_eq!(mult.metric_factors(ZoneId(2)).unwrap().adaptation_time, 1.0);
    }

    #[test]
    fn non_finite_skims_are_neutral() {
        let m = model();
        let r = regions();
        let nan = SkimVector([0.0, 600.0, 1.0, f64::NAN, f64::NAN, f64::NAN]);
        let reference = skims(&[(2, nan)]);
        let variant = skims(&[(2, skim(1_800.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        assert_eq!(mult.factor(ZoneId(2)).unwrap(), 1.0);
    }

    #[test]
    fn factors_stay_within_bounds() {
        let m = model();
        let r = regions();
        let reference = skims(&[(2, skim(3_600.0, 1.0, 600.0)), (9, skim(3_600.0, 1.0, 600.0))]);
        for v in [0.0, 1.0, 60.0, 600.0, 3_600.0, 36_000.0, 1e9] {
            let variant = skims(&[(2, skim(v, v / 600.0, v)), (9, skim(v, 0.0, v))]);
            let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
            mult.evaluate_all().unwrap();
            for f in mult.into_report().factors.values() {
                for x in f.as_array() {
                    assert!((0.1..=10.0).contains(&x), "factor {x} for variant {v}");
                }
            }
        }
    }

    #[test]
    fn unknown_zone_propagates() {
        let m = model();
        let r = regions();
        let reference = skims(&[(77, skim(3_600.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &reference, &r);
        assert!(matches!(mult.factor(ZoneId(77)), Err(ElasticityError::Eval(_))));
    }

    #[test]
    fn report_records_evaluated_destinations() {
        let m = model();
        let r = regions();
        let reference = skims(&[(2, skim(3_600.0, 1.0, 600.0)), (3, skim(3_600.0, 1.0, 600.0))]);
        let variant = skims(&[(2, skim(1_800.0, 1.0, 600.0)), (9, skim(1_800.0, 1.0, 600.0))]);
        let mut mult = m.create_multiplier(ZoneId(1), &reference, &variant, &r);
        mult.evaluate_all().unwrap();

        let report = mult.into_report();
        assert_eq!(report.origin, ZoneId(1));
        // Only zone 2 is present in both scenarios.
        assert_eq!(report.factors.keys().copied().collect::<Vec<_>>(), vec![ZoneId(2)]);
        assert!(report.factor(ZoneId(2)) > 1.0);
        assert_eq!(report.factor(ZoneId(3)), 1.0);
        assert_eq!(report.reference.len(), 2);
        assert_eq!(report.variant.len(), 2);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use super::*;
    use crate::{load_elasticities_csv, load_elasticities_reader, ElasticityError};

    const HEADER: &str = "cluster,segment,description,skim_type,elasticity0,a,b,min,max,f_min,f_max,kg_max\n";

    #[test]
    fn parses_rows() {
        let csv = format!(
            "{HEADER}\
             domestic,business,journey time,JRT,-0.8,0.05,-0.1,-2.0,-0.1,0.1,10.0,\n\
             international,business,adaptation, ADT ,-0.3,0,0,-1,0,0.1,10,90\n"
        );
        let rows = load_elasticities_reader(Cursor::new(csv)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cluster, Cluster::Domestic);
        assert_eq!(rows[0].skim_type, SkimType::Jrt);
        assert_eq!(rows[0].kg_max, None);
        assert_eq!(rows[1].skim_type, SkimType::Adt);
        assert_eq!(rows[1].kg_max, Some(90.0));
    }

    #[test]
    fn kg_max_column_optional() {
        let csv = "cluster,segment,description,skim_type,elasticity0,a,b,min,max,f_min,f_max\n\
                   domestic,business,price,PM,-0.5,0,0,-1,0,0.1,10\n";
        let rows = load_elasticities_reader(Cursor::new(csv)).unwrap();
        assert_eq!(rows[0].skim_type, SkimType::Pm);
        assert_eq!(rows[0].kg_max, None);
    }

    #[test]
    fn unknown_skim_type_rejected() {
        let csv = format!("{HEADER}domestic,business,x,XYZ,-0.8,0,0,-2,0,0.1,10,\n");
        assert!(matches!(load_elasticities_reader(Cursor::new(csv)), Err(ElasticityError::Parse(_))));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let csv = format!("{HEADER}domestic,business,x,JRT,-0.8,0,0,0,-2,0.1,10,\n");
        let err = load_elasticities_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ElasticityError::Parse(ref m) if m.contains("row 1")));
    }

    #[test]
    fn loaded_table_builds_model() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("elasticities.csv");
        let mut body = String::from(HEADER);
        for c in ["domestic", "international"] {
            for t in ["JRT", "ADT", "NTR"] {
                body.push_str(&format!("{c},business,{t},{t},-0.5,0,0,-2,0,0.1,10,\n"));
            }
        }
        std::fs::write(&path, body).unwrap();

        let rows = load_elasticities_csv(&path).unwrap();
        let m = ElasticityModel::new(rows, &config()).unwrap();
        assert_eq!(m.len(), 6);
    }
}
