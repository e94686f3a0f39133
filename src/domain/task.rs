//! Task input validation.
//!
//! Handlers hand raw request fields to [`NewTask::new`] and
//! [`Percentage::new`]; only validated values reach the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ApiError;

/// Category assigned when the client does not supply one.
pub const DEFAULT_TASK_TYPE: &str = "general";

/// Maximum length of a task's `text`, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// Maximum length of a task's `type`, in characters.
pub const MAX_TYPE_LEN: usize = 50;

/// Naive date-time layouts accepted for `due_date`, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A validated task ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task description, non-blank.
    pub text: String,
    /// Optional deadline, normalized to UTC.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-form category tag.
    pub kind: String,
    /// Optional link to a journal entry.
    pub journal_entry_id: Option<i64>,
}

impl NewTask {
    /// Validates the creation fields of a task.
    ///
    /// `kind` falls back to [`DEFAULT_TASK_TYPE`] when absent. A blank
    /// `due_date` counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedInput`] when `text` is missing or
    /// blank, a field exceeds its length limit, or `due_date` cannot be
    /// parsed.
    pub fn new(
        text: Option<String>,
        due_date: Option<&str>,
        kind: Option<String>,
        journal_entry_id: Option<i64>,
    ) -> Result<Self, ApiError> {
        let text = text.ok_or_else(|| ApiError::missing_field("text"))?;
        require_non_blank("text", &text)?;
        check_len("text", &text, MAX_TEXT_LEN)?;

        let kind = kind.unwrap_or_else(|| DEFAULT_TASK_TYPE.to_string());
        check_len("type", &kind, MAX_TYPE_LEN)?;

        let due_date = match due_date {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };

        Ok(Self {
            text,
            due_date,
            kind,
            journal_entry_id,
        })
    }
}

/// Completion progress of a task, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percentage(u8);

impl Percentage {
    /// Highest allowed progress value.
    pub const MAX: u8 = 100;

    /// Validates a raw progress value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedInput`] if `value` is outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, ApiError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                ApiError::MalformedInput(format!(
                    "percentage must be between 0 and 100, got {value}"
                ))
            })
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Parses a client-supplied due date and normalizes it to UTC.
///
/// Accepts RFC 3339 (offset converted to UTC), naive date-times and plain
/// `YYYY-MM-DD` dates (both taken as UTC). An empty string means no date.
///
/// # Errors
///
/// Returns [`ApiError::MalformedInput`] if no accepted layout matches.
pub fn parse_due_date(raw: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()));
    }
    Err(ApiError::MalformedInput(format!("invalid due_date: {raw}")))
}

/// Rejects empty or whitespace-only strings.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::MalformedInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Rejects strings longer than `max` characters.
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.chars().count() > max {
        return Err(ApiError::MalformedInput(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn text_only_gets_defaults() {
        let Ok(task) = NewTask::new(Some("Review".to_string()), None, None, None) else {
            panic!("valid task");
        };
        assert_eq!(task.kind, DEFAULT_TASK_TYPE);
        assert_eq!(task.due_date, None);
        assert_eq!(task.journal_entry_id, None);
    }

    #[test]
    fn missing_or_blank_text_is_rejected() {
        assert!(matches!(
            NewTask::new(None, None, None, None),
            Err(ApiError::MalformedInput(_))
        ));
        assert!(matches!(
            NewTask::new(Some("   ".to_string()), None, None, None),
            Err(ApiError::MalformedInput(_))
        ));
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long_text = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(NewTask::new(Some(long_text), None, None, None).is_err());

        let long_type = "t".repeat(MAX_TYPE_LEN + 1);
        assert!(NewTask::new(Some("ok".to_string()), None, Some(long_type), None).is_err());

        let exact = "x".repeat(MAX_TEXT_LEN);
        assert!(NewTask::new(Some(exact), None, None, None).is_ok());
    }

    #[test]
    fn due_date_plain_date_is_midnight_utc() {
        let Ok(Some(dt)) = parse_due_date("2024-03-15") else {
            panic!("date should parse");
        };
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 15));
        assert_eq!((dt.hour(), dt.minute()), (0, 0));
    }

    #[test]
    fn due_date_offset_is_converted_to_utc() {
        let Ok(Some(dt)) = parse_due_date("2024-03-15T10:00:00+02:00") else {
            panic!("rfc3339 should parse");
        };
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn due_date_naive_datetime_is_utc() {
        let Ok(Some(dt)) = parse_due_date("2024-03-15T10:30") else {
            panic!("naive datetime should parse");
        };
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
    }

    #[test]
    fn empty_due_date_means_none() {
        assert!(matches!(parse_due_date(""), Ok(None)));
    }

    #[test]
    fn garbage_due_date_is_rejected() {
        assert!(matches!(
            parse_due_date("next tuesday"),
            Err(ApiError::MalformedInput(_))
        ));
    }

    #[test]
    fn percentage_bounds() {
        assert!(Percentage::new(0).is_ok());
        assert!(Percentage::new(100).is_ok());
        assert!(Percentage::new(101).is_err());
        assert!(Percentage::new(-1).is_err());
        assert_eq!(Percentage::new(42).map(Percentage::get).ok(), Some(42));
    }
}
