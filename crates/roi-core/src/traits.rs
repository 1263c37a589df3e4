//! Trait interfaces between crates:
//! - [`SavingsCalculator`]: pure derivation of metrics (roi-calc implements)
//! - [`LocationProvider`]: read/write of the shareable page URL (roi-session implements)
//! - [`ClipboardSink`]: destination of the share link (roi-session implements)

use url::Url;

use crate::constants::Benchmarks;
use crate::error::ClipboardError;
use crate::types::{DerivedMetrics, InputState};

/// Maps a valid input set to its derived savings metrics.
///
/// Implementations must be total and referentially transparent over in-domain
/// input. They do not re-validate: clamping is the store's job.
pub trait SavingsCalculator: Send + Sync {
    /// Benchmarks the derivation is measured against.
    fn benchmarks(&self) -> &Benchmarks;

    fn derive(&self, input: &InputState) -> DerivedMetrics;
}

/// The address bar, abstracted so encode/decode can run without a browser.
pub trait LocationProvider {
    /// Current absolute page URL, query string included.
    fn read(&self) -> Url;

    /// Replace the current URL without adding a history entry.
    fn write(&mut self, url: Url);
}

/// Where an explicit share action puts its link.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
