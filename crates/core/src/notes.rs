//! Note entity and validation functions.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Title used when a note is saved without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled Note";

/// Maximum length of a note title in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 200;

/// Maximum length of note content in characters.
pub const MAX_NOTE_CONTENT_LENGTH: usize = 100_000;

/// A stored note, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or replacing a note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Validated note fields ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}

/// Apply defaults and length limits to a note request.
///
/// A missing or blank title becomes [`DEFAULT_NOTE_TITLE`]; missing content
/// becomes the empty string.
pub fn validate_note(input: NoteInput) -> Result<NoteFields, String> {
    let title = match input.title {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => DEFAULT_NOTE_TITLE.to_string(),
    };
    if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
        return Err(format!(
            "Note title exceeds maximum length of {MAX_NOTE_TITLE_LENGTH} characters"
        ));
    }

    let content = input.content.unwrap_or_default();
    if content.chars().count() > MAX_NOTE_CONTENT_LENGTH {
        return Err(format!(
            "Note content exceeds maximum length of {MAX_NOTE_CONTENT_LENGTH} characters"
        ));
    }

    Ok(NoteFields { title, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_gets_default() {
        let fields = validate_note(NoteInput::default()).expect("valid");
        assert_eq!(fields.title, DEFAULT_NOTE_TITLE);
        assert_eq!(fields.content, "");
    }

    #[test]
    fn blank_title_gets_default() {
        let input = NoteInput {
            title: Some("   ".into()),
            content: Some("Loot: 40gp".into()),
        };
        let fields = validate_note(input).expect("valid");
        assert_eq!(fields.title, DEFAULT_NOTE_TITLE);
        assert_eq!(fields.content, "Loot: 40gp");
    }

    #[test]
    fn title_is_trimmed() {
        let input = NoteInput {
            title: Some("  Session 3 ".into()),
            content: None,
        };
        assert_eq!(validate_note(input).expect("valid").title, "Session 3");
    }

    #[test]
    fn overlong_title_rejected() {
        let input = NoteInput {
            title: Some("t".repeat(MAX_NOTE_TITLE_LENGTH + 1)),
            content: None,
        };
        let err = validate_note(input).unwrap_err();
        assert!(err.contains("title exceeds"));
    }

    #[test]
    fn overlong_content_rejected() {
        let input = NoteInput {
            title: None,
            content: Some("c".repeat(MAX_NOTE_CONTENT_LENGTH + 1)),
        };
        assert!(validate_note(input).is_err());
    }
}
