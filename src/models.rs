use serde::{Deserialize, Serialize};

/// Title shown for notes saved without one
pub const DEFAULT_TITLE: &str = "Untitled";

/// An active note. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub text: String,
    /// Zero when an older record was stored without one
    #[serde(default)]
    pub created_at: i64,
}

/// A note sitting in the trash. Serializes flat: the note fields plus `deletedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashedNote {
    #[serde(flatten)]
    pub note: Note,
    #[serde(default)]
    pub deleted_at: i64,
}

impl Note {
    pub fn new(id: String, title: String, text: String, created_at: i64) -> Self {
        Self {
            id,
            title,
            text,
            created_at,
        }
    }

    /// Title for display, falling back to "Untitled" when empty
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Wrap this note for the trash, stamping the deletion time
    pub fn into_trashed(self, deleted_at: i64) -> TrashedNote {
        TrashedNote {
            note: self,
            deleted_at,
        }
    }
}

impl TrashedNote {
    pub fn id(&self) -> &str {
        &self.note.id
    }

    /// Drop the deletion time and hand back the plain note
    pub fn restore(self) -> Note {
        self.note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_with_camel_case_fields() {
        let note = Note::new("n1".into(), "A".into(), "hello".into(), 1_700_000_000_000);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert!(json.get("deletedAt").is_none());
    }

    #[test]
    fn trashed_note_is_flat_record_with_deleted_at() {
        let note = Note::new("n1".into(), "".into(), "hello".into(), 10);
        let json = serde_json::to_value(note.into_trashed(20)).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["createdAt"], 10);
        assert_eq!(json["deletedAt"], 20);
        assert!(json.get("note").is_none());
    }

    #[test]
    fn missing_title_defaults_to_empty_and_displays_untitled() {
        let note: Note = serde_json::from_str(r#"{"id":"x","text":"t","createdAt":1}"#).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.display_title(), "Untitled");
    }

    #[test]
    fn restore_drops_deleted_at_and_keeps_fields() {
        let note = Note::new("n1".into(), "A".into(), "hello".into(), 10);
        let restored = note.clone().into_trashed(99).restore();
        assert_eq!(restored, note);
    }
}
