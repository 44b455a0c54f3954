//! Note model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Backend-assigned note identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note as returned by the backend
///
/// `id` and `created_at` are fixed at creation; only `content` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Plain text content
    pub content: String,
    /// Creation time, serialized as `timestamp`
    #[serde(rename = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl Note {
    #[must_use]
    pub fn new(id: NoteId, content: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            content: content.into(),
            created_at,
        }
    }

    /// Get first line as title preview, truncated to `max_len` characters
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        self.content
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(max_len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_time() -> NaiveDateTime {
        "2024-05-01T10:00:00.123456".parse().unwrap()
    }

    #[test]
    fn test_note_id_parse() {
        let parsed: NoteId = " 42 ".parse().unwrap();
        assert_eq!(parsed, NoteId::new(42));
        assert!("abc".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_note_decodes_backend_shape() {
        let note: Note = serde_json::from_str(
            r#"{"id": 3, "content": "Buy milk", "timestamp": "2024-05-01T10:00:00.123456"}"#,
        )
        .unwrap();
        assert_eq!(note.id, NoteId::new(3));
        assert_eq!(note.content, "Buy milk");
        assert_eq!(note.created_at, sample_time());
    }

    #[test]
    fn test_note_encodes_timestamp_field() {
        let note = Note::new(NoteId::new(1), "hello", sample_time());
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["timestamp"], "2024-05-01T10:00:00.123456");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_title_preview() {
        let note = Note::new(NoteId::new(1), "First line\nSecond line", sample_time());
        assert_eq!(note.title_preview(50), "First line");
        assert_eq!(note.title_preview(5), "First");
    }
}
