//! Input normalization helpers shared by the tool handlers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

//--------------------------------------------------------------------------------------------------
// Types: Error
//--------------------------------------------------------------------------------------------------

/// A date argument that is not valid ISO-8601.
///
/// The display string is the user-facing message returned through the tool
/// boundary, so it names the offending argument and the expected format.
#[derive(Debug, thiserror::Error)]
#[error("{label}はYYYY-MM-DD形式で指定してください: {value}")]
pub struct InvalidDateError {
    /// Argument name, e.g. `from_date`.
    pub label: String,

    /// The rejected input.
    pub value: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse a comma-separated list of X handles.
///
/// Fullwidth `＠` markers are normalized to ASCII `@` globally, each piece is
/// trimmed, at most one leading `@` is stripped, and pieces that end up empty
/// are discarded. Input order is preserved. Malformed input degrades to
/// omission; this function never errors.
pub fn parse_handles(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.replace('＠', "@")
        .split(',')
        .filter_map(|part| {
            let handle = part.trim();
            let handle = handle.strip_prefix('@').unwrap_or(handle);
            if handle.is_empty() {
                None
            } else {
                Some(handle.to_string())
            }
        })
        .collect()
}

/// Validate an ISO-8601 date or date-time argument.
///
/// An empty value means "absent" and maps to `Ok(None)`. On success the
/// original string is returned verbatim, never a re-serialized form.
pub fn validate_iso_date(value: &str, label: &str) -> Result<Option<String>, InvalidDateError> {
    if value.is_empty() {
        return Ok(None);
    }

    let parses = value.parse::<NaiveDate>().is_ok()
        || value.parse::<NaiveDateTime>().is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok();

    if parses {
        Ok(Some(value.to_string()))
    } else {
        Err(InvalidDateError {
            label: label.to_string(),
            value: value.to_string(),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
