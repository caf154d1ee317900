//! # ModerationService
//!
//! The only path to state changes after creation. Every call is gated behind
//! the admin credential, which is checked before the store is touched so a
//! failed attempt reveals nothing about the target entry.

use std::sync::Arc;

use domains::errors::{DomainError, Result};
use domains::listing::stored_order;
use domains::models::{
    export_timestamp, EntryFlag, EntryId, ExportDocument, ExportedEntry, ModerationAction,
};
use domains::ports::{AuthenticationCheck, Clock, EntryRepository, SystemClock};
use tracing::{info, warn};

const EXPORTED_BY: &str = "admin";

pub struct ModerationService {
    repo: Arc<dyn EntryRepository>,
    auth: Arc<dyn AuthenticationCheck>,
    clock: Arc<dyn Clock>,
}

impl ModerationService {
    pub fn new(repo: Arc<dyn EntryRepository>, auth: Arc<dyn AuthenticationCheck>) -> Self {
        Self::with_clock(repo, auth, Arc::new(SystemClock))
    }

    /// `clock` stamps export documents.
    pub fn with_clock(
        repo: Arc<dyn EntryRepository>,
        auth: Arc<dyn AuthenticationCheck>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, auth, clock }
    }

    pub async fn delete(&self, id: &EntryId, credential: &str) -> Result<()> {
        self.apply(id, ModerationAction::Delete, credential).await
    }

    pub async fn set_hidden(&self, id: &EntryId, hidden: bool, credential: &str) -> Result<()> {
        self.apply(id, ModerationAction::SetHidden(hidden), credential)
            .await
    }

    pub async fn set_pinned(&self, id: &EntryId, pinned: bool, credential: &str) -> Result<()> {
        self.apply(id, ModerationAction::SetPinned(pinned), credential)
            .await
    }

    /// Setters are idempotent: applying the same value twice leaves the entry
    /// in the same state, so two admins racing on one entry cannot flip it back.
    pub async fn apply(
        &self,
        id: &EntryId,
        action: ModerationAction,
        credential: &str,
    ) -> Result<()> {
        self.authorize(credential).await?;

        let found = match action {
            ModerationAction::Delete => self.repo.remove(id).await?,
            ModerationAction::SetHidden(value) => {
                self.repo.set_flag(id, EntryFlag::Hidden, value).await?
            }
            ModerationAction::SetPinned(value) => {
                self.repo.set_flag(id, EntryFlag::Pinned, value).await?
            }
        };

        if !found {
            return Err(DomainError::NotFound(id.clone()));
        }

        info!(entry_id = %id, ?action, "moderation applied");
        Ok(())
    }

    /// Unredacted dump of the board in listing order, without creator addresses.
    pub async fn export(&self, credential: &str) -> Result<ExportDocument> {
        self.authorize(credential).await?;

        let mut entries = self.repo.load_all().await?;
        entries.sort_by(stored_order);

        let entries: Vec<ExportedEntry> = entries.iter().map(ExportedEntry::from).collect();
        info!(total = entries.len(), "entries exported");

        Ok(ExportDocument {
            export_time: export_timestamp(self.clock.now()),
            total_entries: entries.len(),
            exported_by: EXPORTED_BY.to_string(),
            entries,
        })
    }

    async fn authorize(&self, credential: &str) -> Result<()> {
        if credential.is_empty() || !self.auth.verify(credential).await {
            warn!("admin credential rejected");
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }
}
