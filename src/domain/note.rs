//! Note struct: the exporter's only input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A note as stored by the notes application.
///
/// `content` is the editor's HTML. The exporter never modifies a note; it
/// parses its own copy of the content for every export call.
///
/// Missing timestamps default to the time the note was read.
///
/// # Examples
///
/// ```
/// use zendown::domain::Note;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::new(7, "API Design", "<p>Hello</p>", now, now);
/// assert_eq!(note.id(), 7);
/// assert_eq!(note.title(), "API Design");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: i64,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note.
    ///
    /// Titles are taken as-is; an empty title is valid and exports as
    /// `untitled`.
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at,
        }
    }

    /// Returns the note's numeric id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's HTML content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the note was last updated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content_len", &self.content.len())
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_datetime() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    // ===========================================
    // Construction
    // ===========================================

    #[test]
    fn new_keeps_fields() {
        let at = test_datetime();
        let note = Note::new(42, "Title", "<p>x</p>", at, at);
        assert_eq!(note.id(), 42);
        assert_eq!(note.title(), "Title");
        assert_eq!(note.content(), "<p>x</p>");
        assert_eq!(note.created_at(), at);
        assert_eq!(note.updated_at(), at);
    }

    #[test]
    fn empty_title_is_allowed() {
        let at = test_datetime();
        assert_eq!(Note::new(1, "", "", at, at).title(), "");
    }

    #[test]
    fn display_shows_title_and_id() {
        let at = test_datetime();
        assert_eq!(Note::new(3, "Plan", "", at, at).to_string(), "Plan [3]");
    }

    #[test]
    fn debug_omits_content() {
        let at = test_datetime();
        let debug = format!("{:?}", Note::new(3, "Plan", "<p>secret</p>", at, at));
        assert!(debug.contains("content_len: 13"));
        assert!(!debug.contains("secret"));
    }

    // ===========================================
    // Serde
    // ===========================================

    #[test]
    fn deserializes_application_json() {
        let json = r#"{
            "id": 5,
            "title": "Physics",
            "content": "<p>E = mc^2</p>",
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id(), 5);
        assert_eq!(note.content(), "<p>E = mc^2</p>");
        assert_eq!(note.updated_at(), test_datetime());
    }

    #[test]
    fn missing_content_and_timestamps_default() {
        let note: Note = serde_json::from_str(r#"{"id": 1, "title": "Bare"}"#).unwrap();
        assert_eq!(note.content(), "");
        assert!(note.created_at() <= Utc::now());
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<Note>(r#"{"title": "No id"}"#).is_err());
    }
}
