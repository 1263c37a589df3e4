//! Cross-crate test suite for the AP savings calculator.
//!
//! Scenario tests pin published figures end to end (query string → store →
//! engine → report). Property tests cover the URL round trip and the
//! non-negative savings floors over the whole input domain.

pub mod helpers;
