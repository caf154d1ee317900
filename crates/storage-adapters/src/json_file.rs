//! # JsonFileEntryRepository
//!
//! Flat-file implementation of `EntryRepository`.
//! The whole board lives in one JSON array. Writes go to a temp file in the
//! same directory, are fsynced, then renamed over the document, so readers
//! only ever see a complete file.

use std::collections::HashSet;
use std::fmt::Display;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use domains::errors::{DomainError, Result};
use domains::models::{Entry, EntryFlag, EntryId, NewEntry};
use domains::ports::{Clock, EntryRepository, SystemClock};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub struct JsonFileEntryRepository {
    /// Location of the JSON document (e.g., "./data/entries.json")
    path: PathBuf,
    clock: Arc<dyn Clock>,
    /// Held for the whole load-modify-persist cycle of every mutation.
    write_lock: Mutex<()>,
}

impl JsonFileEntryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Vec<Entry>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "entry store not found, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(storage_error("read", &self.path, err)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            warn!(path = %self.path.display(), "entry store is blank, treating as empty");
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|err| storage_error("parse", &self.path, err))
    }

    async fn write_document(&self, entries: &[Entry]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|err| storage_error("encode", &self.path, err))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| storage_error("create directory for", &self.path, err))?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "entries.json".to_string());
        let tmp_path = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

        if let Err(err) = write_synced(&tmp_path, &bytes).await {
            discard(&tmp_path).await;
            return Err(storage_error("write", &tmp_path, err));
        }
        if let Err(err) = fs::rename(&tmp_path, &self.path).await {
            discard(&tmp_path).await;
            return Err(storage_error("replace", &self.path, err));
        }

        debug!(path = %self.path.display(), count = entries.len(), "entry store written");
        Ok(())
    }

    /// Runs `change` under the write lock. `None` means nothing changed and
    /// the document is left alone.
    async fn modify<T, F>(&self, change: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Vec<Entry>) -> Option<T>,
    {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_document().await?;
        let outcome = change(&mut entries);
        if outcome.is_some() {
            self.write_document(&entries).await?;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl EntryRepository for JsonFileEntryRepository {
    async fn load_all(&self) -> Result<Vec<Entry>> {
        self.read_document().await
    }

    async fn append(&self, new: NewEntry) -> Result<Entry> {
        let time = self.clock.now();
        let created = self
            .modify(|entries| {
                let entry = Entry {
                    id: fresh_id(entries),
                    text: new.text,
                    note: new.note,
                    time,
                    pinned: false,
                    hidden: false,
                    ipv4: new.creator.ipv4,
                    ipv6: new.creator.ipv6,
                };
                entries.push(entry.clone());
                Some(entry)
            })
            .await?;

        created.ok_or_else(|| DomainError::StorageUnavailable("append produced no entry".into()))
    }

    async fn remove(&self, id: &EntryId) -> Result<bool> {
        let removed = self
            .modify(|entries| {
                let index = entries.iter().position(|entry| &entry.id == id)?;
                Some(entries.remove(index))
            })
            .await?;
        Ok(removed.is_some())
    }

    async fn set_flag(&self, id: &EntryId, flag: EntryFlag, value: bool) -> Result<bool> {
        let updated = self
            .modify(|entries| {
                let entry = entries.iter_mut().find(|entry| &entry.id == id)?;
                match flag {
                    EntryFlag::Hidden => entry.hidden = value,
                    EntryFlag::Pinned => entry.pinned = value,
                }
                Some(())
            })
            .await?;
        Ok(updated.is_some())
    }
}

/// Time-ordered id that is checked against every id already in the document.
fn fresh_id(entries: &[Entry]) -> EntryId {
    let taken: HashSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
    loop {
        let candidate = Uuid::now_v7().simple().to_string();
        if !taken.contains(candidate.as_str()) {
            return EntryId::new(candidate);
        }
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

async fn discard(tmp_path: &Path) {
    if let Err(err) = fs::remove_file(tmp_path).await {
        if err.kind() != ErrorKind::NotFound {
            warn!(path = %tmp_path.display(), error = %err, "could not remove temp file");
        }
    }
}

fn storage_error(action: &str, path: &Path, err: impl Display) -> DomainError {
    error!(path = %path.display(), error = %err, "failed to {action} entry store");
    DomainError::StorageUnavailable(format!("failed to {action} {}: {err}", path.display()))
}
