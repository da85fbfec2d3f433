//! Evaluation run configuration.
//!
//! Typically filled in by the application crate (from its own config file or
//! CLI) and handed to the evaluator; this crate does not read files for it.

use crate::{EvalError, EvalResult};

/// What the skim engine does with demand-weighted metrics when an OD pair's
/// total demand is zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroDemandPolicy {
    /// Divide anyway; the metric becomes NaN (0/0) or ±∞.
    #[default]
    Propagate,
    /// Report 0 for every demand-weighted metric.
    Zero,
}

/// Top-level evaluation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalConfig {
    /// Worker thread count.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Deliver work results to the handler in submission order.  When
    /// `false`, results are handed over as soon as each zone completes.
    pub ordered_results: bool,

    /// Demand segment whose elasticity rows are used (e.g. `"business"`).
    pub segment: String,

    /// Region code of the home country.  OD pairs with both ends in this
    /// region use the domestic elasticity cluster.
    pub home_country: String,

    /// Upper bound (minutes) applied to the reference adaptation time before
    /// it enters the elasticity curve, unless the table row sets `kg_max`.
    pub adaptation_time_cap_min: f64,

    /// Added to both transfer counts before forming their ratio, so that
    /// zero-transfer connections do not divide by zero.
    pub transfer_offset: f64,

    /// Unroutable share of an origin zone's demand above which the zone is
    /// flagged as the largest unroutable zone.  Must lie in `[0, 1]`.
    pub unroutable_share_limit: f64,

    pub zero_demand: ZeroDemandPolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            num_threads:             None,
            ordered_results:         false,
            segment:                 String::new(),
            home_country:            String::new(),
            adaptation_time_cap_min: 60.0,
            transfer_offset:         1.0,
            unroutable_share_limit:  0.95,
            zero_demand:             ZeroDemandPolicy::Propagate,
        }
    }
}

impl EvalConfig {
    /// Worker count actually used by the pool.
    pub fn worker_count(&self) -> usize {
        self.num_threads
            .filter(|&n| n > 0)
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
    }

    /// Reject numeric settings outside their domain.
    ///
    /// # Errors
    ///
    /// [`EvalError::Config`] naming the first offending field.
    pub fn validate(&self) -> EvalResult<()> {
        if !(0.0..=1.0).contains(&self.unroutable_share_limit) {
            return Err(EvalError::Config(format!(
                "unroutable_share_limit must lie in [0, 1], got {}",
                self.unroutable_share_limit
            )));
        }
        if !(self.adaptation_time_cap_min.is_finite() && self.adaptation_time_cap_min > 0.0) {
            return Err(EvalError::Config(format!(
                "adaptation_time_cap_min must be positive, got {}",
                self.adaptation_time_cap_min
            )));
        }
        if !(self.transfer_offset.is_finite() && self.transfer_offset >= 0.0) {
            return Err(EvalError::Config(format!(
                "transfer_offset must be non-negative, got {}",
                self.transfer_offset
            )));
        }
        Ok(())
    }
}
