//! Public projection of stored entries.

use crate::models::{Entry, PublicEntry};

/// Strips internal fields and blanks the text of hidden entries.
///
/// The note survives redaction so an admin can leave a public explanation on
/// a hidden entry.
pub fn project(entry: &Entry) -> PublicEntry {
    PublicEntry {
        text: if entry.hidden {
            String::new()
        } else {
            entry.text.clone()
        },
        note: entry.note.clone(),
        time: entry.time,
        pinned: entry.pinned,
        hidden: entry.hidden,
    }
}
