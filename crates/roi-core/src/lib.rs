//! # roi-core
//! Foundation types for the accounts-payable savings calculator.
//!
//! - [`constants`]: published benchmarks, currency table, input domains, query keys
//! - [`types`]: `Currency`, `InputState`, `DerivedMetrics`
//! - [`format`]: display rules for days, percentages, currency and counts
//! - [`report`]: formatted projection of inputs and metrics
//! - [`traits`]: seams implemented by the engine and the session providers

pub mod constants;
pub mod error;
pub mod format;
pub mod report;
pub mod traits;
pub mod types;

pub use constants::Benchmarks;
pub use report::SavingsReport;
pub use types::{Currency, DerivedMetrics, InputState};
