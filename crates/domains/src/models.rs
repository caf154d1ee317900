//! # Domain Models
//!
//! These structs represent the records kept by the note board.
//! `Entry` is the raw stored form; `PublicEntry` is the only shape that may
//! leave the system without an admin credential.

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque identifier assigned by the store when an entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One submitted note, including the fields only the store may see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    #[serde(default)]
    pub note: String,
    #[serde(deserialize_with = "deserialize_entry_time")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
}

/// Redacted projection of an [`Entry`], safe for unauthenticated clients.
///
/// There is deliberately no `id`, `ipv4` or `ipv6` field on this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicEntry {
    pub text: String,
    pub note: String,
    pub time: DateTime<Utc>,
    pub pinned: bool,
    pub hidden: bool,
}

/// Validated submission handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub text: String,
    pub note: String,
    pub creator: CreatorAddr,
}

/// Network identity of whoever submitted an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatorAddr {
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

impl From<IpAddr> for CreatorAddr {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => Self {
                ipv4: Some(v4.to_string()),
                ipv6: None,
            },
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => Self {
                    ipv4: Some(v4.to_string()),
                    ipv6: None,
                },
                None => Self {
                    ipv4: None,
                    ipv6: Some(v6.to_string()),
                },
            },
        }
    }
}

/// The boolean fields an admin may set on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFlag {
    Hidden,
    Pinned,
}

impl fmt::Display for EntryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => f.write_str("hidden"),
            Self::Pinned => f.write_str("pinned"),
        }
    }
}

/// A single admin mutation against one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Delete,
    SetHidden(bool),
    SetPinned(bool),
}

/// Full admin dump of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub export_time: String,
    pub total_entries: usize,
    pub exported_by: String,
    pub entries: Vec<ExportedEntry>,
}

/// One entry as it appears in an [`ExportDocument`]. Creator addresses are not exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEntry {
    pub id: EntryId,
    pub text: String,
    pub note: String,
    pub time: String,
    pub pinned: bool,
    pub hidden: bool,
}

impl From<&Entry> for ExportedEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            text: entry.text.clone(),
            note: entry.note.clone(),
            time: export_timestamp(entry.time),
            pinned: entry.pinned,
            hidden: entry.hidden,
        }
    }
}

/// `2025-03-04T13:32:44.000Z`
pub fn export_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

const LEGACY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepts RFC 3339 as well as the older `YYYY-MM-DD HH:MM:SS` form, read as UTC.
fn deserialize_entry_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, LEGACY_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn legacy_time_format_is_read_as_utc() {
        let raw = r#"{"id":"65c8a1","text":"hi","note":"","time":"2025-03-04 13:32:44","pinned":false,"hidden":true}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.time, Utc.with_ymd_and_hms(2025, 3, 4, 13, 32, 44).unwrap());
        assert!(entry.hidden);
        assert_eq!(entry.ipv4, None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{"id":"a","text":"t","time":"2025-03-04T13:32:44Z"}"#;
        let entry: Entry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.note, "");
        assert!(!entry.pinned);
        assert!(!entry.hidden);
    }

    #[test]
    fn garbage_time_is_rejected() {
        let raw = r#"{"id":"a","text":"t","time":"yesterday"}"#;
        assert!(serde_json::from_str::<Entry>(raw).is_err());
    }

    #[test]
    fn ipv4_mapped_addresses_are_stored_as_ipv4() {
        let mapped = IpAddr::V6(Ipv4Addr::new(10, 0, 0, 7).to_ipv6_mapped());
        let creator = CreatorAddr::from(mapped);
        assert_eq!(creator.ipv4.as_deref(), Some("10.0.0.7"));
        assert_eq!(creator.ipv6, None);

        let creator = CreatorAddr::from(IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(creator.ipv4, None);
        assert_eq!(creator.ipv6.as_deref(), Some("::1"));
    }

    #[test]
    fn export_timestamp_uses_millisecond_zulu_form() {
        let time = Utc.with_ymd_and_hms(2025, 3, 4, 13, 32, 44).unwrap();
        assert_eq!(export_timestamp(time), "2025-03-04T13:32:44.000Z");
    }
}
