//! Reactive calculator session.
//!
//! One input event runs the whole pipeline synchronously:
//! clamp → store → recompute → notify subscribers → write the address bar.
//!
//! The location is decoded once in [`CalculatorSession::open`] before
//! synchronization is armed, so a shared link's parameters are read before
//! anything is written back.

use roi_core::error::SessionError;
use roi_core::report::SavingsReport;
use roi_core::traits::{ClipboardSink, LocationProvider, SavingsCalculator};
use roi_core::types::{Currency, DerivedMetrics, InputState};
use tracing::debug;
use url::Url;

use crate::codec;
use crate::store::InputStore;

/// Callback run after every committed input change.
pub type Listener = Box<dyn FnMut(&InputState, &DerivedMetrics)>;

/// Handle returned by [`CalculatorSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct CalculatorSession<L, C> {
    location: L,
    calculator: C,
    store: InputStore,
    metrics: DerivedMetrics,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<L: LocationProvider, C: SavingsCalculator> CalculatorSession<L, C> {
    /// Decode the current location and derive metrics, then write the
    /// canonical query once. Nothing is written before the decode.
    pub fn open(location: L, calculator: C) -> Self {
        let initial = location.read();
        let inputs = codec::decode(initial.query().unwrap_or(""));
        let metrics = calculator.derive(&inputs);

        let mut session = Self {
            location,
            calculator,
            store: InputStore::with_state(inputs),
            metrics,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        session.sync_location();
        session
    }

    pub fn inputs(&self) -> &InputState {
        self.store.state()
    }

    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Formatted view of the current inputs and metrics.
    pub fn report(&self) -> SavingsReport {
        SavingsReport::new(self.store.state(), &self.metrics)
    }

    /// Copy of the current inputs and metrics, e.g. for a lead submission.
    pub fn snapshot(&self) -> (InputState, DerivedMetrics) {
        (*self.store.state(), self.metrics)
    }

    // --- subscribers ---

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&InputState, &DerivedMetrics) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // --- mutators ---

    pub fn set_currency(&mut self, currency: Currency) {
        if self.store.set_currency(currency) {
            self.commit();
        }
    }

    /// Returns `false` for an unknown code; the session is left unchanged.
    pub fn set_currency_code(&mut self, code: &str) -> bool {
        match code.parse::<Currency>() {
            Ok(currency) => {
                self.set_currency(currency);
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_po_invoice_volume(&mut self, raw: i64) {
        if self.store.set_po_invoice_volume(raw) {
            self.commit();
        }
    }

    pub fn set_non_po_invoice_volume(&mut self, raw: i64) {
        if self.store.set_non_po_invoice_volume(raw) {
            self.commit();
        }
    }

    pub fn set_current_days_to_process(&mut self, raw: f64) {
        if self.store.set_current_days_to_process(raw) {
            self.commit();
        }
    }

    pub fn set_po_manual_intervention_pct(&mut self, raw: i64) {
        if self.store.set_po_manual_intervention_pct(raw) {
            self.commit();
        }
    }

    pub fn set_annual_payables_spend(&mut self, raw: i64) {
        if self.store.set_annual_payables_spend(raw) {
            self.commit();
        }
    }

    /// Restore defaults and put the address bar back to the bare path.
    pub fn reset(&mut self) {
        if self.store.reset() {
            self.recompute();
            self.notify();
        }
        let bare = codec::bare_url(&self.location.read());
        debug!(url = %bare, "location reset");
        self.location.write(bare);
    }

    // --- sharing ---

    /// Current share link. Uses the same encoder as the address-bar sync.
    pub fn share_link(&self) -> Url {
        codec::share_url(&self.location.read(), self.store.state())
    }

    /// Put the share link on `clipboard` and return it.
    pub fn share(&self, clipboard: &mut impl ClipboardSink) -> Result<Url, SessionError> {
        let link = self.share_link();
        clipboard.write_text(link.as_str())?;
        Ok(link)
    }

    // --- pipeline ---

    fn commit(&mut self) {
        self.recompute();
        self.notify();
        self.sync_location();
    }

    fn recompute(&mut self) {
        self.metrics = self.calculator.derive(self.store.state());
    }

    fn notify(&mut self) {
        let inputs = *self.store.state();
        let metrics = self.metrics;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&inputs, &metrics);
        }
    }

    fn sync_location(&mut self) {
        let url = codec::share_url(&self.location.read(), self.store.state());
        debug!(url = %url, "location synced");
        self.location.write(url);
    }
}
