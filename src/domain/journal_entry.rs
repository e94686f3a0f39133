//! Journal entry input validation and partial-update merging.

use super::task::{check_len, require_non_blank};
use crate::error::ApiError;

/// Maximum length of an entry title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// A validated journal entry ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    /// Entry title, non-blank.
    pub title: String,
    /// Entry body, any length.
    pub content: String,
}

impl NewJournalEntry {
    /// Validates the creation fields of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedInput`] when `title` or `content` is
    /// missing, or `title` is blank or too long.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ApiError> {
        let title = title.ok_or_else(|| ApiError::missing_field("title"))?;
        let content = content.ok_or_else(|| ApiError::missing_field("content"))?;
        validate_title(&title)?;
        Ok(Self { title, content })
    }
}

/// A partial update: omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalEntryPatch {
    /// Replacement title, if supplied.
    pub title: Option<String>,
    /// Replacement content, if supplied.
    pub content: Option<String>,
}

impl JournalEntryPatch {
    /// Validates the supplied fields of an update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedInput`] if a supplied title is blank or
    /// too long.
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ApiError> {
        if let Some(title) = &title {
            validate_title(title)?;
        }
        Ok(Self { title, content })
    }

    /// Merges the patch over the current values, returning the new
    /// `(title, content)` pair.
    #[must_use]
    pub fn apply(self, current_title: String, current_content: String) -> (String, String) {
        (
            self.title.unwrap_or(current_title),
            self.content.unwrap_or(current_content),
        )
    }
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    require_non_blank("title", title)?;
    check_len("title", title, MAX_TITLE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_required_on_create() {
        assert!(NewJournalEntry::new(Some("T".to_string()), None).is_err());
        assert!(NewJournalEntry::new(None, Some("C".to_string())).is_err());
        assert!(NewJournalEntry::new(Some("T".to_string()), Some(String::new())).is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            NewJournalEntry::new(Some(" ".to_string()), Some("C".to_string())),
            Err(ApiError::MalformedInput(_))
        ));
        assert!(JournalEntryPatch::new(Some(String::new()), None).is_err());
    }

    #[test]
    fn patch_keeps_omitted_fields() {
        let patch = JournalEntryPatch {
            title: None,
            content: Some("new body".to_string()),
        };
        let (title, content) = patch.apply("Day 1".to_string(), "old body".to_string());
        assert_eq!(title, "Day 1");
        assert_eq!(content, "new body");
    }

    #[test]
    fn empty_patch_is_identity() {
        let (title, content) =
            JournalEntryPatch::default().apply("T".to_string(), "C".to_string());
        assert_eq!((title.as_str(), content.as_str()), ("T", "C"));
    }
}
