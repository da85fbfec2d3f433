//! Elasticity table rows.

use std::fmt;

use serde::Deserialize;

use pt_skim::SkimMetric;

// ── Cluster ───────────────────────────────────────────────────────────────────

/// OD classification selecting which elasticity curves apply.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Domestic,
    International,
}

impl Cluster {
    pub const ALL: [Cluster; 2] = [Cluster::Domestic, Cluster::International];

    /// Domestic only if both ends lie in the home region.
    pub fn classify(origin_region: &str, destination_region: &str, home: &str) -> Cluster {
        if origin_region == home && destination_region == home {
            Cluster::Domestic
        } else {
            Cluster::International
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Domestic      => write!(f, "domestic"),
            Cluster::International => write!(f, "international"),
        }
    }
}

// ── SkimType ──────────────────────────────────────────────────────────────────

/// Skim metric an elasticity row applies to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkimType {
    /// Journey time.
    Jrt,
    /// Number of transfers.
    Ntr,
    /// Adaptation time.
    Adt,
    /// Price.  Carried in the table but not evaluated.
    Pm,
}

impl SkimType {
    /// The three skim types that enter the multiplier, in evaluation order.
    pub const EVALUATED: [SkimType; 3] = [SkimType::Jrt, SkimType::Adt, SkimType::Ntr];

    /// Skim vector entry this type reads, if any.
    pub fn skim_metric(self) -> Option<SkimMetric> {
        match self {
            SkimType::Jrt => Some(SkimMetric::WeightedJourneyTime),
            SkimType::Ntr => Some(SkimMetric::WeightedTransfers),
            SkimType::Adt => Some(SkimMetric::WeightedAdaptationTime),
            SkimType::Pm  => None,
        }
    }
}

impl fmt::Display for SkimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkimType::Jrt => "JRT",
            SkimType::Ntr => "NTR",
            SkimType::Adt => "ADT",
            SkimType::Pm  => "PM",
        };
        f.write_str(s)
    }
}

// ── ElasticityEntry ───────────────────────────────────────────────────────────

/// One row of the elasticity table: the curve for a (cluster, segment,
/// skim type) combination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElasticityEntry {
    pub cluster:     Cluster,
    pub segment:     String,
    #[serde(default)]
    pub description: String,
    pub skim_type:   SkimType,
    pub elasticity0: f64,
    pub a:           f64,
    pub b:           f64,
    pub min:         f64,
    pub max:         f64,
    pub f_min:       f64,
    pub f_max:       f64,
    /// Row-specific adaptation time cap (minutes); see `ElasticityModel`.
    #[serde(default)]
    pub kg_max:      Option<f64>,
}

impl ElasticityEntry {
    /// `e0 + a·ax + b·bx`, clamped into `[min, max]`.
    #[inline]
    pub fn elasticity(&self, ax: f64, bx: f64) -> f64 {
        (self.elasticity0 + self.a * ax + self.b * bx).max(self.min).min(self.max)
    }

    /// Clamp a computed factor into `[f_min, f_max]`.
    #[inline]
    pub fn clamp_factor(&self, factor: f64) -> f64 {
        factor.max(self.f_min).min(self.f_max)
    }

    /// Check the row's bounds are usable.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [self.elasticity0, self.a, self.b, self.min, self.max, self.f_min, self.f_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(format!("{} {} {}: non-finite coefficient", self.cluster, self.segment, self.skim_type));
        }
        if self.min > self.max {
            return Err(format!(
                "{} {} {}: min {} exceeds max {}",
                self.cluster, self.segment, self.skim_type, self.min, self.max
            ));
        }
        if self.f_min <= 0.0 || self.f_min > self.f_max {
            return Err(format!(
                "{} {} {}: factor bounds [{}, {}] must satisfy 0 < f_min ≤ f_max",
                self.cluster, self.segment, self.skim_type, self.f_min, self.f_max
            ));
        }
        if let Some(kg) = self.kg_max {
            if !(kg.is_finite() && kg >= 0.0) {
                return Err(format!("{} {} {}: invalid kg_max {kg}", self.cluster, self.segment, self.skim_type));
            }
        }
        Ok(())
    }
}
