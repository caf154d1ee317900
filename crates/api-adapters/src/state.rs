//! Shared HTTP adapter state.
//!
//! Handlers only see the services, never the adapters behind them.

use std::sync::Arc;

use services::{EntryService, ModerationService};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<EntryService>,
    pub moderation: Arc<ModerationService>,
}

impl AppState {
    pub fn new(entries: Arc<EntryService>, moderation: Arc<ModerationService>) -> Self {
        Self {
            entries,
            moderation,
        }
    }
}
