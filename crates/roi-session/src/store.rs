//! Clamping store for the calculator inputs.
//!
//! Every write, whether from a UI control or from a decoded query string, goes
//! through one of these mutators, so an [`InputState`] held by the store is
//! always in domain.

use roi_core::constants::{
    ANNUAL_PAYABLES_SPEND, DAYS_TO_PROCESS, MANUAL_INTERVENTION_PCT, NON_PO_INVOICE_VOLUME,
    PO_INVOICE_VOLUME,
};
use roi_core::types::{Currency, InputState};

/// Holds the current inputs. Mutators return whether the value changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputStore {
    state: InputState,
}

impl InputStore {
    /// Store holding the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from an arbitrary state. Each field is clamped on the way in.
    pub fn with_state(state: InputState) -> Self {
        let mut store = Self::new();
        store.set_currency(state.currency);
        store.set_po_invoice_volume(i64::from(state.po_invoice_volume));
        store.set_non_po_invoice_volume(i64::from(state.non_po_invoice_volume));
        store.set_current_days_to_process(state.current_days_to_process);
        store.set_po_manual_intervention_pct(i64::from(state.po_manual_intervention_pct));
        store.set_annual_payables_spend(
            i64::try_from(state.annual_payables_spend).unwrap_or(i64::MAX),
        );
        store
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn into_state(self) -> InputState {
        self.state
    }

    pub fn set_currency(&mut self, currency: Currency) -> bool {
        replace(&mut self.state.currency, currency)
    }

    /// Set the currency from its code. Unknown codes leave the store untouched.
    pub fn set_currency_code(&mut self, code: &str) -> bool {
        match code.parse::<Currency>() {
            Ok(currency) => self.set_currency(currency),
            Err(_) => false,
        }
    }

    pub fn set_po_invoice_volume(&mut self, raw: i64) -> bool {
        let v = PO_INVOICE_VOLUME.clamp(raw) as u32;
        replace(&mut self.state.po_invoice_volume, v)
    }

    pub fn set_non_po_invoice_volume(&mut self, raw: i64) -> bool {
        let v = NON_PO_INVOICE_VOLUME.clamp(raw) as u32;
        replace(&mut self.state.non_po_invoice_volume, v)
    }

    /// Clamps to `[1, 20]` and snaps to 0.1. NaN and infinities are ignored.
    pub fn set_current_days_to_process(&mut self, raw: f64) -> bool {
        match DAYS_TO_PROCESS.clamp(raw) {
            Some(v) => replace(&mut self.state.current_days_to_process, v),
            None => false,
        }
    }

    pub fn set_po_manual_intervention_pct(&mut self, raw: i64) -> bool {
        let v = MANUAL_INTERVENTION_PCT.clamp(raw) as u8;
        replace(&mut self.state.po_manual_intervention_pct, v)
    }

    pub fn set_annual_payables_spend(&mut self, raw: i64) -> bool {
        let v = ANNUAL_PAYABLES_SPEND.clamp(raw) as u64;
        replace(&mut self.state.annual_payables_spend, v)
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) -> bool {
        let defaults = InputState::default();
        let changed = self.state != defaults;
        self.state = defaults;
        changed
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
