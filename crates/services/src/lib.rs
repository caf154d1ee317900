//! # services
//!
//! Use cases sitting between the HTTP adapter and the storage/auth ports.

pub mod entries;
pub mod moderation;

pub use entries::EntryService;
pub use moderation::ModerationService;
