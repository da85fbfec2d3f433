//! `pt-work` — one work item per origin zone, run on a bounded worker pool.
//!
//! # Pipeline
//!
//! ```text
//! caller thread                         worker pool (num_threads)
//! ─────────────                         ─────────────────────────
//! submit WorkItem(origin) ──spawn──▶    evaluate_zone(origin)
//!                                         ├─ reference router → skims
//!                                         ├─ variant router   → skims ┐
//!                                         ├─ Multiplier (own instance)┘→ report
//!                                         └─ unroutable parts
//! drain channel  ◀────── WorkOutcome ───  (exactly one message per item)
//!   └─ WorkResultHandler::handle / on_failure
//! WorkResultHandler::finish  (exactly once, success or failure)
//! ```
//!
//! Workers complete in any order.  With `EvalConfig::ordered_results` the
//! drain buffers early completions and releases them in submission order.
//!
//! A failing or panicking zone produces a failed outcome for that zone only;
//! its siblings run to completion.  Whether any failure is fatal is up to
//! the caller, who receives every failure in [`RunSummary::failed`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`item`]      | `WorkItem`, `WorkResult`, `WorkOutcome`, `RunSummary`     |
//! | [`task`]      | `EvalContext`, `Comparison`, `evaluate_zone`              |
//! | [`handler`]   | `WorkResultHandler` trait, `CollectingHandler`            |
//! | [`evaluator`] | `EvaluatorBuilder`, `Evaluator`                           |
//! | [`error`]     | `WorkError`, `HandlerError`, `PipelineError`              |

pub mod error;
pub mod evaluator;
pub mod handler;
pub mod item;
pub mod task;


pub use error::{HandlerError, PipelineError, PipelineResult, WorkError};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use handler::{CollectingHandler, WorkResultHandler};
pub use item::{RunSummary, WorkItem, WorkOutcome, WorkResult};
pub use task::{evaluate_zone, Comparison, EvalContext};
