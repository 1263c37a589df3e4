//! Formatted projection of an input set and its metrics, as rendered by the
//! results panel and attached to CLI and HTTP output.

use serde::Serialize;

use crate::format::{
    day_label, format_count, format_currency, format_days, format_days_range, format_percent,
    RANGE_SEPARATOR,
};
use crate::types::{DerivedMetrics, InputState};

pub const ALREADY_OPTIMIZED: &str = "Already optimized";
pub const ALREADY_AT_BENCHMARK: &str = "Already at benchmark";

/// Display strings for the current inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedInputs {
    pub currency: String,
    pub po_invoice_volume: String,
    pub non_po_invoice_volume: String,
    pub current_days_to_process: String,
    pub po_manual_intervention_pct: String,
    pub current_touchless_rate: String,
    pub annual_payables_spend: String,
}

/// Display strings for every results card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsReport {
    pub currency_symbol: String,
    pub po_cycle_time: String,
    pub non_po_cycle_time: String,
    pub touchless_additional: String,
    pub touchless_total: String,
    pub payment_savings: String,
    pub inputs: FormattedInputs,
}

impl SavingsReport {
    pub fn new(inputs: &InputState, metrics: &DerivedMetrics) -> Self {
        let symbol = inputs.currency.symbol();

        let po_cycle_time = if metrics.po_cycle_improves() {
            cycle_time_line(metrics.po_days_saved_avg, metrics.po_days_saved_best)
        } else {
            ALREADY_OPTIMIZED.to_string()
        };
        let non_po_cycle_time = if metrics.non_po_cycle_improves() {
            cycle_time_line(metrics.non_po_days_saved_avg, metrics.non_po_days_saved_best)
        } else {
            ALREADY_OPTIMIZED.to_string()
        };
        let touchless_additional = if metrics.touchless_improves() {
            format!(
                "+{}{RANGE_SEPARATOR}+{}",
                format_count(metrics.touchless_additional_avg),
                format_count(metrics.touchless_additional_best)
            )
        } else {
            ALREADY_AT_BENCHMARK.to_string()
        };

        Self {
            currency_symbol: symbol.to_string(),
            po_cycle_time,
            non_po_cycle_time,
            touchless_additional,
            touchless_total: format!(
                "{}{RANGE_SEPARATOR}{}",
                format_count(metrics.touchless_total_avg),
                format_count(metrics.touchless_total_best)
            ),
            payment_savings: format!(
                "{}{RANGE_SEPARATOR}{}",
                format_currency(metrics.payment_savings_low, symbol),
                format_currency(metrics.payment_savings_high, symbol)
            ),
            inputs: FormattedInputs {
                currency: format!("{} ({})", inputs.currency.code(), symbol),
                po_invoice_volume: format_count(f64::from(inputs.po_invoice_volume)),
                non_po_invoice_volume: format_count(f64::from(inputs.non_po_invoice_volume)),
                current_days_to_process: format_days(inputs.current_days_to_process),
                po_manual_intervention_pct: format!("{}%", inputs.po_manual_intervention_pct),
                // Integer arithmetic on the stored percentage avoids `65.0%` from 1 - 0.35.
                current_touchless_rate: format!(
                    "{}%",
                    100u16.saturating_sub(u16::from(inputs.po_manual_intervention_pct))
                ),
                annual_payables_spend: format_currency(
                    inputs.annual_payables_spend as f64,
                    symbol,
                ),
            },
        }
    }
}

/// `"<avg> – <floor(best)> day(s)"`; the label agrees with the floored bound.
fn cycle_time_line(avg: f64, best: f64) -> String {
    format!("{} {}", format_days_range(avg, best), day_label(best.floor()))
}

/// Benchmark touchless rates as displayed next to the manual-intervention control.
pub fn touchless_benchmark_line(average: f64, best: f64) -> String {
    format!(
        "{}{RANGE_SEPARATOR}{}",
        format_percent(average * 100.0),
        format_percent(best * 100.0)
    )
}
