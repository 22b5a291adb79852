//! Builder for test notes with sensible defaults.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};

/// Builder for creating test notes with sensible defaults.
///
/// Produces the JSON object the notes application stores for a note.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given id and title.
    ///
    /// Timestamps are fixed so archive entries are reproducible.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        Self {
            id,
            title: title.into(),
            content: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Sets the HTML content (builder method).
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the last-updated timestamp.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    /// Returns the id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Converts this TestNote to its JSON form.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "content": self.content,
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new_with_title() {
        let note = TestNote::new(3, "My Test Note");
        assert_eq!(note.title(), "My Test Note");
        assert_eq!(note.id(), 3);
    }

    #[test]
    fn test_note_json_round_trips_into_domain_note() {
        let note = TestNote::new(5, "Physics").content("<p>E = mc^2</p>");
        let parsed: zendown::domain::Note = serde_json::from_value(note.to_json()).unwrap();
        assert_eq!(parsed.id(), 5);
        assert_eq!(parsed.content(), "<p>E = mc^2</p>");
    }
}
