//! Evaluator error type.
//!
//! Sub-crates define their own error enums and wrap `EvalError` as one
//! variant, so a zone lookup failure keeps its identity all the way up to the
//! work-result channel.

use thiserror::Error;

use crate::ZoneId;

/// The base error type shared by all `pt-*` crates.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `pt-*` crates.
pub type EvalResult<T> = Result<T, EvalError>;
