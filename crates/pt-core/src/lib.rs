//! `pt-core` — foundational types for the `pt_eval` assignment evaluator.
//!
//! This crate is a dependency of every other `pt-*` crate.  It has no `pt-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `ZoneId`, `ODPair`                                        |
//! | [`route`]    | `FoundRoute`, `ZoneRoutes`, `ZoneRouter`, `RouteTable`, `UnroutableDemandPart` |
//! | [`lookup`]   | `ZoneClusterLookup`, `DemandMatrix`, `RegionMap`, `OdMatrix` |
//! | [`loader`]   | CSV loaders for region tables and OD demand matrices      |
//! | [`config`]   | `EvalConfig`, `ZeroDemandPolicy`                          |
//! | [`error`]    | `EvalError`, `EvalResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to IDs and `EvalConfig`.    |

pub mod config;
pub mod error;
pub mod ids;
pub mod loader;
pub mod lookup;
pub mod route;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EvalConfig, ZeroDemandPolicy};
pub use error::{EvalError, EvalResult};
pub use ids::{ODPair, ZoneId};
pub use loader::{load_demand_csv, load_demand_reader, load_regions_csv, load_regions_reader};
pub use lookup::{DemandMatrix, OdMatrix, RegionMap, ZoneClusterLookup};
pub use route::{FoundRoute, RouteTable, UnroutableDemandPart, ZoneRoutes, ZoneRouter};
