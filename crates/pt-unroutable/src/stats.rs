//! Result values of unroutable demand accounting.

use pt_core::ZoneId;

/// The origin zone flagged by
/// [`UnroutableDemand::largest_zone`][crate::UnroutableDemand::largest_zone].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UnroutableDemandZone {
    /// No zone exceeded the share limit.
    #[default]
    Empty,
    /// `demand` is the zone's total (routable + unroutable) demand.
    Zone { zone: ZoneId, demand: f64 },
}

impl UnroutableDemandZone {
    pub fn is_empty(&self) -> bool {
        matches!(self, UnroutableDemandZone::Empty)
    }

    pub fn zone(&self) -> Option<ZoneId> {
        match self {
            UnroutableDemandZone::Empty => None,
            UnroutableDemandZone::Zone { zone, .. } => Some(*zone),
        }
    }

    /// Total demand of the flagged zone; 0 when empty.
    pub fn demand(&self) -> f64 {
        match self {
            UnroutableDemandZone::Empty => 0.0,
            UnroutableDemandZone::Zone { demand, .. } => *demand,
        }
    }
}

/// Summary handed to writers after a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnroutableDemandStats {
    pub total:   f64,
    /// Share of the matrix grand total, in `[0, 1]` for consistent inputs.
    pub percent: f64,
    pub largest: UnroutableDemandZone,
}
