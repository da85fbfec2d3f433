//! `pt-unroutable` — demand the router could not place on any route.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`demand`]  | `UnroutableDemandRecorder` (append) → `UnroutableDemand` (read) |
//! | [`stats`]   | `UnroutableDemandZone`, `UnroutableDemandStats`              |
//!
//! # Lifecycle
//!
//! A recorder is created empty for each evaluation run and receives parts
//! from the router's failure callback (or from per-zone work results).
//! [`UnroutableDemandRecorder::freeze`] turns it into an [`UnroutableDemand`],
//! which has no mutating methods; all accounting happens on the frozen value.
//!
//! Zone lookups against the demand matrix propagate
//! [`EvalError::ZoneNotFound`][pt_core::EvalError::ZoneNotFound] unchanged.

pub mod demand;
pub mod stats;


pub use demand::{UnroutableDemand, UnroutableDemandRecorder, DEFAULT_SHARE_LIMIT};
pub use pt_core::UnroutableDemandPart;
pub use stats::{UnroutableDemandStats, UnroutableDemandZone};
