//! Savings engine implementing the [`SavingsCalculator`] trait.
//!
//! Every "saved" quantity is floored at zero: a process already faster than a
//! benchmark, or already more touchless than it, shows no gain rather than a
//! negative one. Payment savings are linear in spend with no discounting.

use roi_core::constants::Benchmarks;
use roi_core::traits::SavingsCalculator;
use roi_core::types::{DerivedMetrics, InputState};

/// The production savings calculator.
#[derive(Debug, Clone, Default)]
pub struct SavingsEngine {
    benchmarks: Benchmarks,
}

impl SavingsEngine {
    /// Engine measured against the published benchmarks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine measured against a custom benchmark set.
    pub fn with_benchmarks(benchmarks: Benchmarks) -> Self {
        Self { benchmarks }
    }
}

/// Days saved moving from `current` to `benchmark`, never negative.
fn days_saved(current: f64, benchmark: f64) -> f64 {
    (current - benchmark).max(0.0)
}

/// Additional touchless invoices when moving from `current_rate` to
/// `benchmark_rate`, never negative.
fn touchless_uplift(volume: f64, benchmark_rate: f64, current_rate: f64) -> f64 {
    (volume * (benchmark_rate - current_rate)).max(0.0)
}

impl SavingsCalculator for SavingsEngine {
    fn benchmarks(&self) -> &Benchmarks {
        &self.benchmarks
    }

    fn derive(&self, input: &InputState) -> DerivedMetrics {
        let b = &self.benchmarks;
        let days = input.current_days_to_process;
        let po_volume = f64::from(input.po_invoice_volume);
        let spend = input.annual_payables_spend as f64;

        // Manual intervention is stored as a whole percentage.
        let current_touchless_rate = 1.0 - f64::from(input.po_manual_intervention_pct) / 100.0;

        DerivedMetrics {
            po_days_saved_avg: days_saved(days, b.po_cycle_time.average),
            po_days_saved_best: days_saved(days, b.po_cycle_time.best),
            non_po_days_saved_avg: days_saved(days, b.non_po_cycle_time.average),
            non_po_days_saved_best: days_saved(days, b.non_po_cycle_time.best),
            current_touchless_rate,
            touchless_total_avg: po_volume * b.touchless_rate.average,
            touchless_total_best: po_volume * b.touchless_rate.best,
            touchless_additional_avg: touchless_uplift(
                po_volume,
                b.touchless_rate.average,
                current_touchless_rate,
            ),
            touchless_additional_best: touchless_uplift(
                po_volume,
                b.touchless_rate.best,
                current_touchless_rate,
            ),
            payment_savings_low: spend * b.payment_yield.low,
            payment_savings_high: spend * b.payment_yield.high,
        }
    }
}
