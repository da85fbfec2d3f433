//! `pt-skim` — schedule adaptation time and skim aggregation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`deltat`]  | `normalize`, `DeltaT`, `DeltaTCalculator`, `IntervalBoundary`, `IntervalCenter` |
//! | [`skim`]    | `SkimMetric`, `SkimVector`, `SkimMap`, `SkimAggregator`         |
//!
//! # Aggregation model (summary)
//!
//! For one origin zone the router hands over `destination → Vec<FoundRoute>`.
//! Each destination's routes are folded into a six-entry [`SkimVector`]:
//!
//! ```text
//! [0] demand                    Σ d
//! [1] journey time              Σ t            (unweighted sum)
//! [2] number of routes          n
//! [3] weighted journey time     Σ d·t   / [0]
//! [4] weighted transfers        Σ d·k   / [0]
//! [5] weighted adaptation time  Σ d·δ   / [0]
//! ```
//!
//! Entries 3–5 are divided only after every route has been folded, using the
//! finished demand in entry 0.

pub mod deltat;
pub mod skim;

#[cfg(test)]
mod tests;

pub use deltat::{
    normalize, DeltaT, DeltaTCalculator, IntervalBoundary, IntervalCenter, DAY_SECS, HALF_DAY_SECS,
};
pub use skim::{od_skims, SkimAggregator, SkimMap, SkimMetric, SkimVector};
