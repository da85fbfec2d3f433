//! The worker pool and the result drain.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use pt_core::{EvalConfig, ZoneClusterLookup, ZoneId, ZoneRouter};
use pt_elasticity::ElasticityModel;
use pt_skim::SkimAggregator;

use crate::task::{evaluate_zone, Comparison, EvalContext};
use crate::{
    PipelineError, PipelineResult, RunSummary, WorkError, WorkItem, WorkOutcome, WorkResult,
    WorkResultHandler,
};

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`Evaluator`].
///
/// # Example
///
/// ```rust,ignore
/// let model = ElasticityModel::new(load_elasticities_csv(path)?, &config)?;
/// let evaluator = EvaluatorBuilder::new(config, &reference_routes)
///     .compare_with(&variant_routes, &model, &regions)
///     .build()?;
/// let mut handler = CollectingHandler::new();
/// let summary = evaluator.run(origins.into_iter().map(WorkItem::new), &mut handler)?;
/// ```
pub struct EvaluatorBuilder<'a> {
    config:     EvalConfig,
    reference:  &'a dyn ZoneRouter,
    comparison: Option<Comparison<'a>>,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(config: EvalConfig, reference: &'a dyn ZoneRouter) -> Self {
        Self { config, reference, comparison: None }
    }

    /// Also evaluate a variant scenario against the reference.
    pub fn compare_with(
        mut self,
        variant: &'a dyn ZoneRouter,
        model:   &'a ElasticityModel,
        lookup:  &'a dyn ZoneClusterLookup,
    ) -> Self {
        self.comparison = Some(Comparison { variant, model, lookup });
        self
    }

    /// Validate the configuration and start the worker pool.
    pub fn build(self) -> PipelineResult<Evaluator<'a>> {
        self.config.validate()?;

        if let Some(cmp) = &self.comparison {
            if cmp.model.segment() != self.config.segment {
                return Err(PipelineError::Config(format!(
                    "elasticity model is for segment {:?} but the run is configured for {:?}",
                    cmp.model.segment(),
                    self.config.segment
                )));
            }
        }

        let workers = self.config.worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pt-eval-{i}"))
            .build()?;

        Ok(Evaluator {
            ctx: EvalContext {
                aggregator: SkimAggregator::new(self.config.zero_demand),
                reference:  self.reference,
                comparison: self.comparison,
            },
            ordered: self.config.ordered_results,
            workers,
            pool,
        })
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

/// Runs work items on a bounded pool and feeds their results to a handler.
///
/// Create via [`EvaluatorBuilder`].
pub struct Evaluator<'a> {
    ctx:     EvalContext<'a>,
    ordered: bool,
    workers: usize,
    pool:    ThreadPool,
}

impl<'a> Evaluator<'a> {
    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Process every item and deliver each outcome to `handler`.
    ///
    /// Zone failures do not abort the run; they are passed to
    /// [`WorkResultHandler::on_failure`] and listed in the returned summary.
    /// A handler error aborts delivery (workers already started still run to
    /// completion).  `handler.finish()` runs exactly once in every case.
    pub fn run<I, H>(&self, items: I, handler: &mut H) -> PipelineResult<RunSummary>
    where
        I: IntoIterator<Item = WorkItem>,
        H: WorkResultHandler,
    {
        let items: Vec<WorkItem> = items.into_iter().collect();
        let mut summary = RunSummary { submitted: items.len(), ..RunSummary::default() };
        info!(zones = items.len(), workers = self.workers, ordered = self.ordered, "evaluation run started");

        let mut guard = FinishGuard::new(handler);
        let (tx, rx) = mpsc::channel::<WorkOutcome>();
        let ctx = &self.ctx;

        let drained = self.pool.in_place_scope(|scope| {
            for (seq, item) in items.iter().enumerate() {
                let tx = tx.clone();
                let origin = item.origin;
                scope.spawn(move |_| {
                    let result = evaluate_isolated(ctx, origin);
                    // The receiver is gone only if delivery was aborted.
                    let _ = tx.send(WorkOutcome { seq, origin, result });
                });
            }
            drop(tx);
            drain(rx, self.ordered, guard.handler(), &mut summary)
        });
        drained?;
        guard.finish()?;

        info!(
            delivered = summary.delivered,
            failed = summary.failed.len(),
            "evaluation run finished"
        );
        Ok(summary)
    }

    /// Shorthand for [`run`][Self::run] over plain zone ids.
    pub fn run_zones<I, H>(&self, origins: I, handler: &mut H) -> PipelineResult<RunSummary>
    where
        I: IntoIterator<Item = ZoneId>,
        H: WorkResultHandler,
    {
        self.run(origins.into_iter().map(WorkItem::new), handler)
    }
}

/// Run one zone, turning a panic into a failed outcome for that zone.
fn evaluate_isolated(ctx: &EvalContext<'_>, origin: ZoneId) -> Result<WorkResult, WorkError> {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluate_zone(ctx, origin))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_owned());
            Err(WorkError::Panicked { origin, message })
        }
    }
}

// ── Drain ─────────────────────────────────────────────────────────────────────

/// Receive outcomes until every sender is gone.
///
/// In ordered mode outcomes are buffered by submission index and released
/// as soon as the next expected index is present.
fn drain<H: WorkResultHandler>(
    rx:      Receiver<WorkOutcome>,
    ordered: bool,
    handler: &mut H,
    summary: &mut RunSummary,
) -> PipelineResult<()> {
    if !ordered {
        for outcome in rx {
            deliver(outcome, handler, summary)?;
        }
        return Ok(());
    }

    let mut pending: BTreeMap<usize, WorkOutcome> = BTreeMap::new();
    let mut next = 0usize;
    for outcome in rx {
        pending.insert(outcome.seq, outcome);
        while let Some(ready) = pending.remove(&next) {
            deliver(ready, handler, summary)?;
            next += 1;
        }
    }
    // Every item sends exactly once, so this only matters if one was lost.
    for (_, outcome) in pending {
        deliver(outcome, handler, summary)?;
    }
    Ok(())
}

fn deliver<H: WorkResultHandler>(
    outcome: WorkOutcome,
    handler: &mut H,
    summary: &mut RunSummary,
) -> PipelineResult<()> {
    let origin = outcome.origin;
    match outcome.result {
        Ok(result) => {
            debug!(%origin, destinations = result.skims.len(), "zone evaluated");
            handler
                .handle(result)
                .map_err(|source| PipelineError::Handler { origin, source })?;
            summary.delivered += 1;
        }
        Err(error) => {
            warn!(%origin, %error, "zone evaluation failed");
            handler.on_failure(origin, &error);
            summary.failed.push((origin, error));
        }
    }
    Ok(())
}

// ── Scoped shutdown ───────────────────────────────────────────────────────────

/// Calls `finish` on the wrapped handler exactly once: explicitly via
/// [`FinishGuard::finish`], or on drop if the run bailed out early.
struct FinishGuard<'h, H: WorkResultHandler> {
    handler:  &'h mut H,
    finished: bool,
}

impl<'h, H: WorkResultHandler> FinishGuard<'h, H> {
    fn new(handler: &'h mut H) -> Self {
        Self { handler, finished: false }
    }

    fn handler(&mut self) -> &mut H {
        &mut *self.handler
    }

    fn finish(mut self) -> PipelineResult<()> {
        self.finished = true;
        self.handler.finish().map_err(PipelineError::Finish)
    }
}

impl<H: WorkResultHandler> Drop for FinishGuard<'_, H> {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            if let Err(e) = self.handler.finish() {
                warn!(error = %e, "result handler failed to finish after an aborted run");
            }
        }
    }
}
