use pt_core::{EvalError, ZoneId};
use pt_elasticity::ElasticityError;
use thiserror::Error;

/// Why one origin zone's work item failed.
#[derive(Debug, Error)]
pub enum WorkError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Elasticity(#[from] ElasticityError),

    #[error("worker for zone {origin} panicked: {message}")]
    Panicked { origin: ZoneId, message: String },
}

/// Failure reported by a [`WorkResultHandler`][crate::WorkResultHandler].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("evaluator configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("result handler failed on zone {origin}: {source}")]
    Handler {
        origin: ZoneId,
        #[source]
        source: HandlerError,
    },

    #[error("result handler failed to finish: {0}")]
    Finish(#[source] HandlerError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
