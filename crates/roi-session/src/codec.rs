//! Query-string form of the calculator inputs.
//!
//! `encode` always emits all six keys in canonical order from raw values, so
//! the passive address-bar sync and the explicit share action produce the
//! same bytes. `decode` never fails: absent, unparseable or unknown values
//! fall back to defaults and out-of-range values are clamped by the store.

use std::borrow::Cow;

use roi_core::constants::{
    KEY_CURRENCY, KEY_DAYS, KEY_MANUAL_PCT, KEY_NON_PO_VOLUME, KEY_PO_VOLUME, KEY_SPEND,
};
use roi_core::types::InputState;
use tracing::debug;
use url::{form_urlencoded, Url};

use crate::store::InputStore;

/// Serialize `state` as `c=…&po=…&npo=…&days=…&manual=…&spend=…`.
///
/// Numbers use their shortest round-trip decimal form (`10`, `7.3`).
pub fn encode(state: &InputState) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(KEY_CURRENCY, state.currency.code())
        .append_pair(KEY_PO_VOLUME, &state.po_invoice_volume.to_string())
        .append_pair(KEY_NON_PO_VOLUME, &state.non_po_invoice_volume.to_string())
        .append_pair(KEY_DAYS, &state.current_days_to_process.to_string())
        .append_pair(KEY_MANUAL_PCT, &state.po_manual_intervention_pct.to_string())
        .append_pair(KEY_SPEND, &state.annual_payables_spend.to_string())
        .finish()
}

/// Parse a query string (leading `?` optional) into a clamped input set.
pub fn decode(query: &str) -> InputState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params = Params::parse(query);
    let mut store = InputStore::new();

    if let Some(code) = params.get(KEY_CURRENCY) {
        if !store.set_currency_code(code) {
            debug!(key = KEY_CURRENCY, value = %code, "unrecognized currency, using default");
        }
    }
    if let Some(v) = params.integer(KEY_PO_VOLUME) {
        store.set_po_invoice_volume(v);
    }
    if let Some(v) = params.integer(KEY_NON_PO_VOLUME) {
        store.set_non_po_invoice_volume(v);
    }
    if let Some(v) = params.number(KEY_DAYS) {
        store.set_current_days_to_process(v);
    }
    if let Some(v) = params.integer(KEY_MANUAL_PCT) {
        store.set_po_manual_intervention_pct(v);
    }
    if let Some(v) = params.integer(KEY_SPEND) {
        store.set_annual_payables_spend(v);
    }

    store.into_state()
}

/// Absolute link for the clipboard: `base` with its query replaced by
/// [`encode`] and any fragment dropped.
pub fn share_url(base: &Url, state: &InputState) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(Some(&encode(state)));
    url
}

/// `base` with no query string or fragment, as written on reset.
pub fn bare_url(base: &Url) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    url.set_query(None);
    url
}

/// Decoded key/value pairs. Lookups return the first occurrence of a key.
struct Params<'a> {
    pairs: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> Params<'a> {
    fn parse(query: &'a str) -> Self {
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Longest decimal prefix, e.g. `"7.5days"` reads as 7.5. `Infinity`
    /// saturates so that it clamps to the domain bound.
    fn number(&self, key: &str) -> Option<f64> {
        let raw = self.get(key)?;
        let parsed = float_prefix(raw).map(|v| v.clamp(f64::MIN, f64::MAX));
        if parsed.is_none() {
            debug!(key, value = %raw, "unparseable number, using default");
        }
        parsed
    }

    /// Optional sign and leading digits, e.g. `"1.5e8"` reads as 1.
    fn integer(&self, key: &str) -> Option<i64> {
        let raw = self.get(key)?;
        let parsed = integer_prefix(raw);
        if parsed.is_none() {
            debug!(key, value = %raw, "unparseable integer, using default");
        }
        parsed
    }
}

/// Split an optional leading sign off `s`. Returns `(negative, rest)`.
fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Base-10 integer prefix after leading whitespace. Saturates on overflow.
fn integer_prefix(raw: &str) -> Option<i64> {
    let (negative, rest) = split_sign(raw.trim_start());
    let digits = &rest[..count_digits(rest.as_bytes())];
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Decimal prefix after leading whitespace: sign, digits, fraction and
/// exponent, or `Infinity`.
fn float_prefix(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = split_sign(trimmed);
    if rest.starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let bytes = rest.as_bytes();
    let int_digits = count_digits(bytes);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp = &bytes[end + 1..];
        let signed = usize::from(matches!(exp.first(), Some(b'+' | b'-')));
        let exp_digits = count_digits(&exp[signed..]);
        if exp_digits > 0 {
            end += 1 + signed + exp_digits;
        }
    }

    let sign_len = trimmed.len() - rest.len();
    trimmed[..sign_len + end].parse().ok()
}
