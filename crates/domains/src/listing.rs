//! Display order for the public board.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{Entry, PublicEntry};

/// Pinned entries first, newest first within each group.
fn key_order(a: (bool, DateTime<Utc>), b: (bool, DateTime<Utc>)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

pub fn listing_order(a: &PublicEntry, b: &PublicEntry) -> Ordering {
    key_order((a.pinned, a.time), (b.pinned, b.time))
}

/// Same order as the public listing, on stored entries.
pub fn stored_order(a: &Entry, b: &Entry) -> Ordering {
    key_order((a.pinned, a.time), (b.pinned, b.time))
}

/// Sorts in place. The sort is stable, so entries with equal keys keep their
/// stored order and the list does not jitter between requests.
pub fn sort_for_listing(entries: &mut [PublicEntry]) {
    entries.sort_by(listing_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()
    }

    fn public(note: &str, minutes: i64, pinned: bool) -> PublicEntry {
        PublicEntry {
            text: String::new(),
            note: note.to_string(),
            time: base() + Duration::minutes(minutes),
            pinned,
            hidden: false,
        }
    }

    fn notes(entries: &[PublicEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.note.as_str()).collect()
    }

    #[test]
    fn pinned_group_precedes_and_each_group_is_newest_first() {
        let mut entries = vec![
            public("old", 0, false),
            public("old-pin", 1, true),
            public("new", 5, false),
            public("new-pin", 9, true),
        ];
        sort_for_listing(&mut entries);
        assert_eq!(notes(&entries), ["new-pin", "old-pin", "new", "old"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut entries = vec![
            public("first", 3, false),
            public("second", 3, false),
            public("third", 3, false),
        ];
        sort_for_listing(&mut entries);
        assert_eq!(notes(&entries), ["first", "second", "third"]);
    }

    #[test]
    fn stored_order_agrees_with_the_public_listing() {
        let stored: Vec<Entry> = [("old", 0, false), ("pin", 1, true), ("new", 5, false)]
            .into_iter()
            .map(|(note, minutes, pinned)| Entry {
                id: crate::models::EntryId::new(note),
                text: "secret".into(),
                note: note.to_string(),
                time: base() + Duration::minutes(minutes),
                pinned,
                hidden: true,
                ipv4: None,
                ipv6: None,
            })
            .collect();

        let mut by_stored = stored.clone();
        by_stored.sort_by(stored_order);
        let mut by_public: Vec<PublicEntry> = stored.iter().map(crate::visibility::project).collect();
        sort_for_listing(&mut by_public);

        let stored_notes: Vec<&str> = by_stored.iter().map(|e| e.note.as_str()).collect();
        assert_eq!(stored_notes, notes(&by_public));
        assert_eq!(stored_notes, ["pin", "new", "old"]);
    }

    #[test]
    fn sorting_twice_is_deterministic() {
        let mut once = vec![
            public("a", 2, false),
            public("b", 2, true),
            public("c", 7, false),
            public("d", 2, false),
        ];
        sort_for_listing(&mut once);
        let mut twice = once.clone();
        sort_for_listing(&mut twice);
        assert_eq!(once, twice);
    }
}
