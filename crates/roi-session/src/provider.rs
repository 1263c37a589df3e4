//! In-memory location and clipboard providers.
//!
//! Stand-ins for the browser address bar and clipboard, used by the CLI and
//! by tests.

use roi_core::error::ClipboardError;
use roi_core::traits::{ClipboardSink, LocationProvider};
use url::Url;

/// Address bar held in memory. Counts writes so callers can check when
/// synchronization happened.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    current: Url,
    writes: usize,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            writes: 0,
        }
    }

    /// Number of `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LocationProvider for MemoryLocation {
    fn read(&self) -> Url {
        self.current.clone()
    }

    fn write(&mut self, url: Url) {
        self.current = url;
        self.writes += 1;
    }
}

/// Clipboard held in memory. An unavailable clipboard rejects every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    available: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self {
            contents: None,
            available: true,
        }
    }

    /// A clipboard that refuses writes, as in a non-secure browsing context.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.available {
            return Err(ClipboardError::Unavailable);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_write_replaces_and_counts() {
        let mut loc = MemoryLocation::new(Url::parse("https://example.com/roi").unwrap());
        assert_eq!(loc.writes(), 0);
        loc.write(Url::parse("https://example.com/roi?po=1").unwrap());
        assert_eq!(loc.read().query(), Some("po=1"));
        assert_eq!(loc.writes(), 1);
    }

    #[test]
    fn clipboard_holds_last_write() {
        let mut clip = MemoryClipboard::new();
        assert_eq!(clip.contents(), None);
        clip.write_text("a").unwrap();
        clip.write_text("b").unwrap();
        assert_eq!(clip.contents(), Some("b"));
    }

    #[test]
    fn unavailable_clipboard_rejects() {
        let mut clip = MemoryClipboard::unavailable();
        assert_eq!(clip.write_text("x"), Err(ClipboardError::Unavailable));
        assert_eq!(clip.contents(), None);
    }
}
