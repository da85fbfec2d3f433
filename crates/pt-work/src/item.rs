//! Work items, their results, and the run summary.

use pt_core::{UnroutableDemandPart, ZoneId};
use pt_elasticity::ElasticityReport;
use pt_skim::SkimMap;

use crate::WorkError;

/// The unit of parallel work: one origin zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub origin: ZoneId,
}

impl WorkItem {
    pub fn new(origin: ZoneId) -> Self {
        Self { origin }
    }
}

impl From<ZoneId> for WorkItem {
    fn from(origin: ZoneId) -> Self {
        Self { origin }
    }
}

/// Everything computed for one origin zone.
#[derive(Debug, Clone)]
pub struct WorkResult {
    pub origin:     ZoneId,
    /// Reference-scenario skims, keyed by destination.
    pub skims:      SkimMap,
    /// Present when the run compares against a variant scenario; carries
    /// the variant skims as well.
    pub elasticity: Option<ElasticityReport>,
    /// Reference-scenario demand from this origin the router could not place.
    pub unroutable: Vec<UnroutableDemandPart>,
}

/// The single message a work item sends back on the run channel.
#[derive(Debug)]
pub struct WorkOutcome {
    /// Submission index within the run.
    pub seq:    usize,
    pub origin: ZoneId,
    pub result: Result<WorkResult, WorkError>,
}

/// What happened to the items of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub submitted: usize,
    /// Results handed to the handler.
    pub delivered: usize,
    /// Failed zones, in delivery order.
    pub failed:    Vec<(ZoneId, WorkError)>,
}

impl RunSummary {
    /// `true` if every submitted item was delivered.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.delivered == self.submitted
    }

    pub fn failed_zones(&self) -> Vec<ZoneId> {
        self.failed.iter().map(|(z, _)| *z).collect()
    }
}
