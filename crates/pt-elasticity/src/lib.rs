//! `pt-elasticity` — demand response to skim changes between two scenarios.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`entry`]       | `Cluster`, `SkimType`, `ElasticityEntry`                   |
//! | [`loader`]      | `load_elasticities_csv`, `load_elasticities_reader`        |
//! | [`model`]       | `ElasticityModel` — immutable `(cluster, skim type)` index |
//! | [`multiplier`]  | `Multiplier` (per origin), `MetricFactors`, `ElasticityReport` |
//! | [`error`]       | `ElasticityError`, `ElasticityResult<T>`                   |
//!
//! # Evaluation (summary)
//!
//! For an OD pair present in both the reference and the variant skims:
//!
//! ```text
//! cluster  = domestic if both zones lie in the home country, else international
//! ax       = min(ref ADT [min], cap) / 15
//! bx       = ref JRT [min] / 45
//! e(m)     = clamp(e0 + a·ax + b·bx, min, max)              m ∈ {JRT, ADT, NTR}
//! f(JRT)   = (var / ref) ^ e          (1 if ref = 0)
//! f(ADT)   = (var / ref) ^ e          (1 if ref = 0)
//! f(NTR)   = ((var + off) / (ref + off)) ^ e
//! f(m)     = clamp(f(m), f_min, f_max)
//! factor   = f(JRT) · f(ADT) · f(NTR)
//! ```
//!
//! OD pairs missing from either scenario get the neutral factor 1.
//!
//! # Ownership
//!
//! [`ElasticityModel`] is immutable and shared by all workers.  Each worker
//! obtains its own [`Multiplier`] from [`ElasticityModel::create_multiplier`];
//! the multiplier caches per-destination factors and is never shared.

pub mod entry;
pub mod error;
pub mod loader;
pub mod model;
pub mod multiplier;

#[cfg(test)]
mod tests;

pub use entry::{Cluster, ElasticityEntry, SkimType};
pub use error::{ElasticityError, ElasticityResult};
pub use loader::{load_elasticities_csv, load_elasticities_reader};
pub use model::ElasticityModel;
pub use multiplier::{ElasticityReport, MetricFactors, Multiplier};
