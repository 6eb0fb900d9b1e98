//! Clipboard capability used by the `email` command.

use crate::{Error, Result};

/// Write-only access to a clipboard. May be unavailable or denied.
pub trait ClipboardSink: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// The system clipboard via `arboard`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// A clipboard that always refuses, for environments without one.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn copy(&self, _text: &str) -> Result<()> {
        Err(Error::Clipboard("no clipboard available".to_string()))
    }
}
