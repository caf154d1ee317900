//! # Ports
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::models::{Entry, EntryFlag, EntryId, NewEntry};

/// Durable collection of entries.
///
/// Every mutating call is a full read-modify-write of the backing document and
/// implementations must serialize them against each other.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Reads every stored entry in document order.
    async fn load_all(&self) -> Result<Vec<Entry>>;

    /// Stores a new entry with a fresh id and the current time.
    async fn append(&self, entry: NewEntry) -> Result<Entry>;

    /// Returns `false` when no entry has this id.
    async fn remove(&self, id: &EntryId) -> Result<bool>;

    /// Returns `false` when no entry has this id.
    async fn set_flag(&self, id: &EntryId, flag: EntryFlag, value: bool) -> Result<bool>;
}

/// Decides whether a credential grants admin rights.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthenticationCheck: Send + Sync {
    async fn verify(&self, credential: &str) -> bool;
}

/// Source of creation timestamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
