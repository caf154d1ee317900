//! # EntryService
//!
//! Public-facing use cases: reading the board and submitting new entries.

use std::sync::Arc;

use domains::errors::{DomainError, Result};
use domains::listing::sort_for_listing;
use domains::models::{CreatorAddr, Entry, NewEntry, PublicEntry};
use domains::ports::EntryRepository;
use domains::visibility::project;
use tracing::info;

pub struct EntryService {
    repo: Arc<dyn EntryRepository>,
}

impl EntryService {
    pub fn new(repo: Arc<dyn EntryRepository>) -> Self {
        Self { repo }
    }

    /// Redacted entries in display order. Recomputed from the store on every call.
    pub async fn list_public(&self) -> Result<Vec<PublicEntry>> {
        let entries = self.repo.load_all().await?;
        let mut public: Vec<PublicEntry> = entries.iter().map(project).collect();
        sort_for_listing(&mut public);
        Ok(public)
    }

    /// Text is required; both fields are trimmed before they are stored.
    pub async fn create(&self, text: &str, note: &str, creator: CreatorAddr) -> Result<Entry> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("text must not be empty".to_string()));
        }

        let entry = self
            .repo
            .append(NewEntry {
                text: text.to_string(),
                note: note.trim().to_string(),
                creator,
            })
            .await?;

        info!(entry_id = %entry.id, "entry created");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use domains::models::EntryId;
    use domains::ports::MockEntryRepository;
    use tokio_test::{assert_err, assert_ok};

    fn stored(id: &str, minutes: i64, pinned: bool, hidden: bool) -> Entry {
        Entry {
            id: EntryId::new(id),
            text: format!("text of {id}"),
            note: format!("note of {id}"),
            time: Utc.with_ymd_and_hms(2025, 3, 4, 8, 0, 0).unwrap() + Duration::minutes(minutes),
            pinned,
            hidden,
            ipv4: Some("192.0.2.1".to_string()),
            ipv6: None,
        }
    }

    #[tokio::test]
    async fn listing_is_redacted_and_ordered() {
        let mut repo = MockEntryRepository::new();
        repo.expect_load_all().times(1).returning(|| {
            Ok(vec![
                stored("a", 0, false, false),
                stored("b", 10, false, true),
                stored("c", 5, true, false),
            ])
        });

        let service = EntryService::new(Arc::new(repo));
        let listing = assert_ok!(service.list_public().await);

        let notes: Vec<&str> = listing.iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, ["note of c", "note of b", "note of a"]);
        assert_eq!(listing[1].text, "");
        assert_eq!(listing[0].text, "text of c");
    }

    #[tokio::test]
    async fn listing_surfaces_storage_failure() {
        let mut repo = MockEntryRepository::new();
        repo.expect_load_all()
            .returning(|| Err(DomainError::StorageUnavailable("corrupt".into())));

        let service = EntryService::new(Arc::new(repo));
        let err = assert_err!(service.list_public().await);
        assert!(matches!(err, DomainError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn blank_text_never_reaches_the_store() {
        let mut repo = MockEntryRepository::new();
        repo.expect_append().never();

        let service = EntryService::new(Arc::new(repo));
        let err = assert_err!(service.create("   \n\t", "note", CreatorAddr::default()).await);
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_trims_fields_and_passes_creator() {
        let mut repo = MockEntryRepository::new();
        repo.expect_append()
            .withf(|new| {
                new.text == "hello"
                    && new.note.is_empty()
                    && new.creator.ipv4.as_deref() == Some("198.51.100.4")
            })
            .times(1)
            .returning(|new| {
                Ok(Entry {
                    id: EntryId::new("fresh"),
                    text: new.text,
                    note: new.note,
                    time: Utc::now(),
                    pinned: false,
                    hidden: false,
                    ipv4: new.creator.ipv4,
                    ipv6: new.creator.ipv6,
                })
            });

        let service = EntryService::new(Arc::new(repo));
        let creator = CreatorAddr {
            ipv4: Some("198.51.100.4".to_string()),
            ipv6: None,
        };
        let entry = assert_ok!(service.create("  hello ", "  ", creator).await);
        assert_eq!(entry.id, EntryId::new("fresh"));
        assert!(!entry.pinned && !entry.hidden);
    }
}
