use pt_core::EvalError;
use thiserror::Error;

use crate::{Cluster, SkimType};

#[derive(Debug, Error)]
pub enum ElasticityError {
    #[error("no elasticity entries for segment {0:?}")]
    NoEntriesForSegment(String),

    #[error("segment {segment:?} has no {skim_type} entry for cluster {cluster}")]
    MissingEntry {
        segment:   String,
        cluster:   Cluster,
        skim_type: SkimType,
    },

    #[error("segment {segment:?} has more than one {skim_type} entry for cluster {cluster}")]
    DuplicateEntry {
        segment:   String,
        cluster:   Cluster,
        skim_type: SkimType,
    },

    #[error("elasticity table parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ElasticityResult<T> = Result<T, ElasticityError>;
