//! Consumers of work results.

use pt_core::{DemandMatrix, EvalConfig, EvalResult, ZoneId};
use pt_unroutable::{
    UnroutableDemand, UnroutableDemandRecorder, UnroutableDemandStats, DEFAULT_SHARE_LIMIT,
};

use crate::{HandlerError, WorkError, WorkResult};

/// Receives the results of a run, one zone at a time, on the caller's thread.
///
/// `on_failure` and `finish` have defaults so simple handlers only implement
/// [`handle`][Self::handle].
///
/// # Contract
///
/// - Each submitted zone reaches either `handle` or `on_failure`, once,
///   unless the run is aborted by an earlier handler error.
/// - `finish` is called exactly once per run after the last delivery, on
///   both the success and the failure path.
pub trait WorkResultHandler {
    /// Consume one completed zone.  Returning an error aborts the run.
    fn handle(&mut self, result: WorkResult) -> Result<(), HandlerError>;

    /// Called for a zone whose work item failed.
    fn on_failure(&mut self, _origin: ZoneId, _error: &WorkError) {}

    /// Release resources (flush writers, close files, …).
    fn finish(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// A [`WorkResultHandler`] that keeps everything in memory.
///
/// Unroutable parts of every delivered zone are merged into one run-level
/// recorder, in delivery order.
#[derive(Debug)]
pub struct CollectingHandler {
    results:      Vec<WorkResult>,
    failed:       Vec<ZoneId>,
    unroutable:   UnroutableDemandRecorder,
    share_limit:  f64,
    finish_calls: usize,
}

impl Default for CollectingHandler {
    fn default() -> Self {
        Self {
            results:      Vec::new(),
            failed:       Vec::new(),
            unroutable:   UnroutableDemandRecorder::default(),
            share_limit:  DEFAULT_SHARE_LIMIT,
            finish_calls: 0,
        }
    }
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler flagging unroutable zones at `config.unroutable_share_limit`.
    pub fn for_config(config: &EvalConfig) -> Self {
        Self { share_limit: config.unroutable_share_limit, ..Self::default() }
    }

    pub fn share_limit(&self) -> f64 {
        self.share_limit
    }

    /// Delivered results, in delivery order.
    pub fn results(&self) -> &[WorkResult] {
        &self.results
    }

    pub fn delivered_zones(&self) -> Vec<ZoneId> {
        self.results.iter().map(|r| r.origin).collect()
    }

    pub fn failed_zones(&self) -> &[ZoneId] {
        &self.failed
    }

    /// How often `finish` ran; 1 after any completed or aborted run.
    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }

    /// Snapshot of the merged unroutable demand.
    pub fn unroutable(&self) -> UnroutableDemand {
        self.unroutable.clone().freeze()
    }

    /// Run-level unroutable statistics, flagging at [`share_limit`][Self::share_limit].
    pub fn unroutable_stats(&self, matrix: &dyn DemandMatrix) -> EvalResult<UnroutableDemandStats> {
        self.unroutable().stats(matrix, self.share_limit)
    }

    pub fn into_results(self) -> (Vec<WorkResult>, UnroutableDemand) {
        (self.results, self.unroutable.freeze())
    }
}

impl WorkResultHandler for CollectingHandler {
    fn handle(&mut self, result: WorkResult) -> Result<(), HandlerError> {
        self.unroutable.extend(result.unroutable.iter().copied());
        self.results.push(result);
        Ok(())
    }

    fn on_failure(&mut self, origin: ZoneId, _error: &WorkError) {
        self.failed.push(origin);
    }

    fn finish(&mut self) -> Result<(), HandlerError> {
        self.finish_calls += 1;
        Ok(())
    }
}
