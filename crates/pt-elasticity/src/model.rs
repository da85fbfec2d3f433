//! The immutable elasticity index for one demand segment.

use rustc_hash::FxHashMap;
use tracing::debug;

use pt_core::{EvalConfig, ODPair, ZoneClusterLookup, ZoneId};
use pt_skim::{SkimMap, SkimMetric, SkimVector};

use crate::{Cluster, ElasticityEntry, ElasticityError, ElasticityResult, Multiplier, SkimType};

/// Minutes of reference adaptation time that make `ax = 1`.
const ADAPTATION_SCALE_MIN: f64 = 15.0;

/// Minutes of reference journey time that make `bx = 1`.
const JOURNEY_SCALE_MIN: f64 = 45.0;

/// Elasticity curves of one segment, keyed by `(cluster, skim type)`.
///
/// Built once and validated eagerly; never mutated afterwards, so it can be
/// shared by reference across all worker threads.
#[derive(Debug, Clone)]
pub struct ElasticityModel {
    segment:                 String,
    home_country:            String,
    adaptation_time_cap_min: f64,
    transfer_offset:         f64,
    entries:                 FxHashMap<(Cluster, SkimType), ElasticityEntry>,
}

impl ElasticityModel {
    /// Index the rows of `config.segment`.
    ///
    /// # Errors
    ///
    /// - [`ElasticityError::NoEntriesForSegment`] if no row matches the segment.
    /// - [`ElasticityError::MissingEntry`] if either cluster lacks a JRT, ADT
    ///   or NTR row.
    /// - [`ElasticityError::DuplicateEntry`] if a `(cluster, skim type)` occurs twice.
    pub fn new<I>(entries: I, config: &EvalConfig) -> ElasticityResult<Self>
    where
        I: IntoIterator<Item = ElasticityEntry>,
    {
        let segment = config.segment.as_str();
        let mut index: FxHashMap<(Cluster, SkimType), ElasticityEntry> = FxHashMap::default();

        for entry in entries.into_iter().filter(|e| e.segment == segment) {
            let key = (entry.cluster, entry.skim_type);
            if index.contains_key(&key) {
                return Err(ElasticityError::DuplicateEntry {
                    segment:   segment.to_owned(),
                    cluster:   entry.cluster,
                    skim_type: entry.skim_type,
                });
            }
            index.insert(key, entry);
        }

        if index.is_empty() {
            return Err(ElasticityError::NoEntriesForSegment(segment.to_owned()));
        }

        // Any OD pair may fall in either cluster.
        for cluster in Cluster::ALL {
            for skim_type in SkimType::EVALUATED {
                if !index.contains_key(&(cluster, skim_type)) {
                    return Err(ElasticityError::MissingEntry {
                        segment: segment.to_owned(),
                        cluster,
                        skim_type,
                    });
                }
            }
        }

        debug!(segment, entries = index.len(), "elasticity model built");

        Ok(Self {
            segment:                 segment.to_owned(),
            home_country:            config.home_country.clone(),
            adaptation_time_cap_min: config.adaptation_time_cap_min,
            transfer_offset:         config.transfer_offset,
            entries:                 index,
        })
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn transfer_offset(&self) -> f64 {
        self.transfer_offset
    }

    /// Number of indexed rows (including PM rows).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The curve for `(cluster, skim_type)`.
    pub fn entry(&self, cluster: Cluster, skim_type: SkimType) -> ElasticityResult<&ElasticityEntry> {
        self.entries
            .get(&(cluster, skim_type))
            .ok_or_else(|| ElasticityError::MissingEntry {
                segment: self.segment.clone(),
                cluster,
                skim_type,
            })
    }

    /// Cluster of an OD pair.  Unknown zones propagate as
    /// [`pt_core::EvalError::ZoneNotFound`].
    pub fn cluster_of(&self, od: ODPair, lookup: &dyn ZoneClusterLookup) -> ElasticityResult<Cluster> {
        let from = lookup.region(od.origin)?;
        let to = lookup.region(od.destination)?;
        Ok(Cluster::classify(from, to, &self.home_country))
    }

    /// The `(ax, bx)` covariates of a reference skim vector.
    ///
    /// Skim times are seconds; the curves are calibrated in minutes.
    pub fn covariates(&self, cluster: Cluster, reference: &SkimVector) -> ElasticityResult<(f64, f64)> {
        let cap = self
            .entry(cluster, SkimType::Adt)?
            .kg_max
            .unwrap_or(self.adaptation_time_cap_min);
        let adt_min = reference[SkimMetric::WeightedAdaptationTime] / 60.0;
        let jrt_min = reference[SkimMetric::WeightedJourneyTime] / 60.0;
        Ok((adt_min.min(cap) / ADAPTATION_SCALE_MIN, jrt_min / JOURNEY_SCALE_MIN))
    }

    /// Start a per-origin evaluation.
    ///
    /// The returned [`Multiplier`] borrows the model and both skim maps and
    /// owns its own factor cache; create one per origin zone and do not
    /// share it between threads.
    pub fn create_multiplier<'a>(
        &'a self,
        origin:    ZoneId,
        reference: &'a SkimMap,
        variant:   &'a SkimMap,
        lookup:    &'a dyn ZoneClusterLookup,
    ) -> Multiplier<'a> {
        Multiplier::new(self, origin, reference, variant, lookup)
    }
}
