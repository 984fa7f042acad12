//! Clipboard seam.
//!
//! Copy failures are low severity: callers log them and move on.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard is reachable (headless session, missing display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard rejected the write.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via `arboard`.
///
/// The handle is created on first use and kept, because some platforms drop
/// the clipboard contents when the owning handle goes away. Writes run on
/// the blocking pool since the platform call can wait on the display server.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl SystemClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_owned();
        tokio::task::spawn_blocking(move || set_text(&inner, text))
            .await
            .map_err(|e| ClipboardError::Unavailable(format!("clipboard task failed: {e}")))?
    }
}

fn set_text(inner: &Mutex<Option<arboard::Clipboard>>, text: String) -> Result<(), ClipboardError> {
    let mut guard = inner
        .lock()
        .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".to_owned()))?;
    if guard.is_none() {
        let handle = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        *guard = Some(handle);
    }
    let Some(handle) = guard.as_mut() else {
        return Err(ClipboardError::Unavailable("clipboard handle missing".to_owned()));
    };
    handle.set_text(text).map_err(|e| ClipboardError::Write(e.to_string()))
}

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;
