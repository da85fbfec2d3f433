//! The computation of one work item.

use pt_core::{ZoneClusterLookup, ZoneId, ZoneRouter};
use pt_elasticity::ElasticityModel;
use pt_skim::SkimAggregator;

use crate::{WorkError, WorkResult};

/// Variant scenario and the curves used to compare it with the reference.
#[derive(Clone, Copy)]
pub struct Comparison<'a> {
    pub variant: &'a dyn ZoneRouter,
    pub model:   &'a ElasticityModel,
    pub lookup:  &'a dyn ZoneClusterLookup,
}

/// Read-only inputs shared by every work item of a run.
///
/// All members are `Sync`; the context is borrowed by worker threads, never
/// mutated.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub aggregator: SkimAggregator,
    pub reference:  &'a dyn ZoneRouter,
    pub comparison: Option<Comparison<'a>>,
}

/// Evaluate one origin zone: skims, optional elasticity report, and
/// unroutable parts.
///
/// The elasticity [`Multiplier`][pt_elasticity::Multiplier] is created here
/// and dropped before returning, so its cache never outlives or leaves the
/// task.
pub fn evaluate_zone(ctx: &EvalContext<'_>, origin: ZoneId) -> Result<WorkResult, WorkError> {
    let reference = ctx.reference.route_zone(origin)?;
    let skims = ctx.aggregator.aggregate(&reference.by_destination);

    let elasticity = match &ctx.comparison {
        None => None,
        Some(cmp) => {
            let variant = cmp.variant.route_zone(origin)?;
            let variant_skims = ctx.aggregator.aggregate(&variant.by_destination);

            let mut multiplier = cmp.model.create_multiplier(origin, &skims, &variant_skims, cmp.lookup);
            multiplier.evaluate_all()?;
            Some(multiplier.into_report())
        }
    };

    Ok(WorkResult {
        origin,
        skims,
        elasticity,
        unroutable: reference.unroutable,
    })
}
