//! # roi-calc — Savings calculator engine.
//!
//! Derives accounts-payable savings from a validated input set:
//! - **Cycle time**: days saved against average and best-in-class PO and
//!   non-PO benchmarks, floored at zero.
//! - **Touchless processing**: PO invoices processed without manual
//!   intervention at benchmark rates, and the uplift over the current rate.
//! - **Payment savings**: a linear yield range over annual payables spend.
//!
//! The engine is pure. It holds only its benchmarks and performs O(1) work
//! per derivation, so callers may recompute on every input event.

pub mod engine;

pub use engine::SavingsEngine;
