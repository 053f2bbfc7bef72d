use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Builder and workshop sessions. Memory only; gone on restart.
    pub sessions: Arc<SessionStore>,
    /// Clipboard backend for the copy routes, picked via CLIPBOARD_BACKEND.
    pub clipboard: Arc<dyn Clipboard>,
}
