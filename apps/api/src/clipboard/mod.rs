//! Clipboard exporter: writes the final document to a clipboard and drives the
//! transient "Copied!" acknowledgment on the control that triggered it.
//!
//! `AppState` carries an `Arc<dyn Clipboard>`, chosen at startup from
//! `CLIPBOARD_BACKEND`.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// How long the acknowledgment stays up after a successful copy.
pub const ACK_DURATION: Duration = Duration::from_secs(2);

pub const ACK_LABEL: &str = "Copied!";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    Write(String),
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

/// The OS clipboard of the machine running the service.
pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        // arboard blocks on some platforms; keep it off the runtime threads.
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Write(e.to_string()))?
    }
}

/// Keeps the last written text in memory. Used headless and in tests.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: String) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        *contents = Some(text);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Copy control
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct AckState {
    /// Bumped on every successful copy; a revert only applies to its own copy.
    generation: u64,
    acknowledged: bool,
}

/// State of one copy control: its resting label and whether the
/// acknowledgment is currently showing.
///
/// Cloning shares the state, so a revert timer can outlive the borrow of the
/// façade that owns the control.
#[derive(Clone)]
pub struct CopyButton {
    label: &'static str,
    state: Arc<Mutex<AckState>>,
}

impl fmt::Debug for CopyButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyButton")
            .field("label", &self.label)
            .field("acknowledged", &self.is_acknowledged())
            .finish()
    }
}

impl CopyButton {
    pub fn new(label: &'static str) -> Self {
        CopyButton {
            label,
            state: Arc::new(Mutex::new(AckState::default())),
        }
    }

    /// The text the control shows right now.
    pub fn label(&self) -> &'static str {
        if self.is_acknowledged() {
            ACK_LABEL
        } else {
            self.label
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        self.state.lock().map(|s| s.acknowledged).unwrap_or(false)
    }

    /// Writes `text` and, on success, shows the acknowledgment for
    /// `ACK_DURATION`. Failures are logged and otherwise ignored.
    ///
    /// Returns whether the write succeeded.
    pub async fn copy(&self, clipboard: &dyn Clipboard, text: String) -> bool {
        let len = text.len();
        if let Err(e) = clipboard.write_text(text).await {
            warn!("Clipboard write failed, keeping '{}' label: {e}", self.label);
            return false;
        }

        let generation = match self.state.lock() {
            Ok(mut s) => {
                s.generation += 1;
                s.acknowledged = true;
                s.generation
            }
            Err(_) => return true,
        };
        debug!(bytes = len, generation, "copied to clipboard");

        let state = Arc::clone(&self.state);
        let revert_at = tokio::time::Instant::now() + ACK_DURATION;
        tokio::spawn(async move {
            tokio::time::sleep_until(revert_at).await;
            if let Ok(mut s) = state.lock() {
                if s.generation == generation {
                    s.acknowledged = false;
                }
            }
        });

        true
    }

    /// Drops any acknowledgment immediately, e.g. when the control is re-rendered
    /// from scratch.
    pub fn clear(&self) {
        if let Ok(mut s) = self.state.lock() {
            s.generation += 1;
            s.acknowledged = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClipboard;

    #[async_trait]
    impl Clipboard for FailingClipboard {
        async fn write_text(&self, _text: String) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledgment_reverts_after_two_seconds() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::new("Copy Instructions");

        assert!(button.copy(&clipboard, "doc".into()).await);
        assert_eq!(clipboard.contents().as_deref(), Some("doc"));
        assert_eq!(button.label(), "Copied!");

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(button.label(), "Copied!");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(button.label(), "Copy Instructions");
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_copies_revert_once_to_original_label() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::new("Copy Instructions");

        assert!(button.copy(&clipboard, "first".into()).await);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(button.copy(&clipboard, "second".into()).await);

        // First copy's timer fires at 2s but belongs to a stale generation.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(button.label(), "Copied!");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(button.label(), "Copy Instructions");

        // Nothing left pending that could flip it back.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(button.label(), "Copy Instructions");
        assert_eq!(clipboard.contents().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_original_label() {
        let button = CopyButton::new("Copy Final Instructions");
        assert!(!button.copy(&FailingClipboard, "doc".into()).await);
        assert_eq!(button.label(), "Copy Final Instructions");
        assert!(!button.is_acknowledged());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_acknowledgment() {
        let clipboard = MemoryClipboard::default();
        let button = CopyButton::new("Copy Instructions");
        button.copy(&clipboard, "doc".into()).await;
        button.clear();
        assert_eq!(button.label(), "Copy Instructions");
        tokio::time::sleep(ACK_DURATION * 2).await;
        assert_eq!(button.label(), "Copy Instructions");
    }
}
