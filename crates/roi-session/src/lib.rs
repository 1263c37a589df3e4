//! # roi-session — Calculator state and its shareable URL form.
//!
//! # Modules
//!
//! - [`store`] — clamping input store, the single validation boundary
//! - [`codec`] — query-string encode/decode and share links
//! - [`provider`] — in-memory location and clipboard providers
//! - [`session`] — reactive session: setter, recompute, notify, sync URL
//! - [`lead`] — email-capture flow with a pluggable delivery sink

pub mod codec;
pub mod lead;
pub mod provider;
pub mod session;
pub mod store;

// Re-exports for convenient access
pub use codec::{decode, encode, share_url};
pub use lead::{deliver, LeadCapture, LeadForm, LeadSink, LeadState, LeadSubmission, LeadTiming, LoggingLeadSink};
pub use provider::{MemoryClipboard, MemoryLocation};
pub use session::{CalculatorSession, SubscriptionId};
pub use store::InputStore;
