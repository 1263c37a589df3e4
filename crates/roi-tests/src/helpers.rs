//! Shared test helpers for scenario and property tests.

use proptest::prelude::*;
use roi_calc::SavingsEngine;
use roi_core::constants::{
    ANNUAL_PAYABLES_SPEND, MANUAL_INTERVENTION_PCT, NON_PO_INVOICE_VOLUME, PO_INVOICE_VOLUME,
};
use roi_core::traits::SavingsCalculator;
use roi_core::types::{Currency, DerivedMetrics, InputState};
use roi_session::{decode, CalculatorSession, MemoryLocation};
use url::Url;

/// Page the test sessions run on.
pub const PAGE_URL: &str = "https://ap.example.com/roi-calculator";

/// Tolerance for comparing derived figures against hand-computed values.
pub const EPS: f64 = 1e-6;

pub type TestSession = CalculatorSession<MemoryLocation, SavingsEngine>;

pub fn page_url() -> Url {
    Url::parse(PAGE_URL).unwrap()
}

/// Open a session on [`PAGE_URL`] with `query` in the address bar.
pub fn open_session(query: &str) -> TestSession {
    let mut url = page_url();
    if !query.is_empty() {
        url.set_query(Some(query.trim_start_matches('?')));
    }
    CalculatorSession::open(MemoryLocation::new(url), SavingsEngine::new())
}

/// Decode `query` and derive metrics with the published benchmarks.
pub fn calculate(query: &str) -> (InputState, DerivedMetrics) {
    let inputs = decode(query);
    let metrics = SavingsEngine::new().derive(&inputs);
    (inputs, metrics)
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}

// --- proptest strategies ---

pub fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Days on the 0.1 grid inside `[1, 20]`, built the way the store snaps them.
pub fn days() -> impl Strategy<Value = f64> {
    (10u32..=200).prop_map(|tenths| f64::from(tenths) / 10.0)
}

/// Any input set the store can hold.
pub fn input_state() -> impl Strategy<Value = InputState> {
    (
        currency(),
        PO_INVOICE_VOLUME.min..=PO_INVOICE_VOLUME.max,
        NON_PO_INVOICE_VOLUME.min..=NON_PO_INVOICE_VOLUME.max,
        days(),
        MANUAL_INTERVENTION_PCT.min..=MANUAL_INTERVENTION_PCT.max,
        ANNUAL_PAYABLES_SPEND.min..=ANNUAL_PAYABLES_SPEND.max,
    )
        .prop_map(|(currency, po, npo, days, manual, spend)| InputState {
            currency,
            po_invoice_volume: po as u32,
            non_po_invoice_volume: npo as u32,
            current_days_to_process: days,
            po_manual_intervention_pct: manual as u8,
            annual_payables_spend: spend as u64,
        })
}

/// Arbitrary query-string noise: known keys with junk values, unknown keys,
/// stray separators and escapes.
pub fn noisy_query() -> impl Strategy<Value = String> {
    let key = prop::sample::select(vec!["c", "po", "npo", "days", "manual", "spend", "x", ""]);
    let value = "[a-zA-Z0-9%+.\\-=]{0,12}";
    prop::collection::vec((key, value), 0..10).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    })
}
