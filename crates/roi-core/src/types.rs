//! Calculator data types: currency codes, the user-adjustable input set and
//! the metrics derived from it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::{
    ANNUAL_PAYABLES_SPEND, DAYS_TO_PROCESS, MANUAL_INTERVENTION_PCT, NON_PO_INVOICE_VOLUME,
    PO_INVOICE_VOLUME,
};
use crate::error::CurrencyError;

/// One of the nine currencies the calculator can display amounts in.
///
/// Only the symbol changes; amounts are never converted.
///
/// # Examples
///
/// ```
/// use roi_core::types::Currency;
/// let c: Currency = "CAD".parse().unwrap();
/// assert_eq!(c.symbol(), "C$");
/// assert!("cad".parse::<Currency>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    Chf,
    Jpy,
    Sek,
    Nok,
}

impl Currency {
    /// All supported currencies in selector order.
    pub const ALL: [Currency; 9] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Cad,
        Self::Aud,
        Self::Chf,
        Self::Jpy,
        Self::Sek,
        Self::Nok,
    ];

    /// ISO 4217 code, as carried in the `c` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Jpy => "JPY",
            Self::Sek => "SEK",
            Self::Nok => "NOK",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Cad => "C$",
            Self::Aud => "A$",
            Self::Chf => "CHF",
            Self::Jpy => "¥",
            Self::Sek | Self::Nok => "kr",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Chf => "Swiss Franc",
            Self::Jpy => "Japanese Yen",
            Self::Sek => "Swedish Krona",
            Self::Nok => "Norwegian Krone",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Exact, case-sensitive code match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| CurrencyError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The user-adjustable inputs.
///
/// Every field is expected to lie inside its domain in
/// [`constants`](crate::constants). The store in `roi-session` is the only
/// writer that enforces this; the calculator trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    pub currency: Currency,
    pub po_invoice_volume: u32,
    pub non_po_invoice_volume: u32,
    /// Days, 0.1 resolution.
    pub current_days_to_process: f64,
    /// Integer percentage in `[0, 80]`, not a fraction.
    pub po_manual_intervention_pct: u8,
    pub annual_payables_spend: u64,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            currency: Currency::Usd,
            po_invoice_volume: PO_INVOICE_VOLUME.default as u32,
            non_po_invoice_volume: NON_PO_INVOICE_VOLUME.default as u32,
            current_days_to_process: DAYS_TO_PROCESS.default,
            po_manual_intervention_pct: MANUAL_INTERVENTION_PCT.default as u8,
            annual_payables_spend: ANNUAL_PAYABLES_SPEND.default as u64,
        }
    }
}

/// Savings figures projected from an [`InputState`].
///
/// Never stored and never encoded into a URL; recomputed on every change.
/// Rates are fractions, volumes are invoice counts, savings are currency units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub po_days_saved_avg: f64,
    pub po_days_saved_best: f64,
    pub non_po_days_saved_avg: f64,
    pub non_po_days_saved_best: f64,
    pub current_touchless_rate: f64,
    pub touchless_total_avg: f64,
    pub touchless_total_best: f64,
    pub touchless_additional_avg: f64,
    pub touchless_additional_best: f64,
    pub payment_savings_low: f64,
    pub payment_savings_high: f64,
}

impl DerivedMetrics {
    /// Whether any PO cycle-time saving exists. `false` renders "Already optimized".
    pub fn po_cycle_improves(&self) -> bool {
        self.po_days_saved_avg > 0.0 || self.po_days_saved_best > 0.0
    }

    /// Whether any non-PO cycle-time saving exists.
    pub fn non_po_cycle_improves(&self) -> bool {
        self.non_po_days_saved_avg > 0.0 || self.non_po_days_saved_best > 0.0
    }

    /// Whether reaching a benchmark adds touchless invoices.
    pub fn touchless_improves(&self) -> bool {
        self.touchless_additional_avg > 0.0 || self.touchless_additional_best > 0.0
    }
}
