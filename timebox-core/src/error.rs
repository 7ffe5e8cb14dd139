//! Validation errors surfaced at the engine's parse boundary.
//!
//! The engine is total over null/zero/negative numeric inputs; the only
//! rejected input class is a malformed date/time string. Errors always name
//! the offending field so callers can point the user at it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{field}` has invalid time {value:?} (expected HH:MM or HH:MM:SS)")]
    InvalidTime { field: &'static str, value: String },

    #[error("field `{field}` has invalid date {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("field `{field}` has invalid timezone {value:?} (expected an IANA name)")]
    InvalidTimezone { field: &'static str, value: String },

    #[error("field `{field}`: local time {value:?} is ambiguous or skipped (DST)")]
    AmbiguousLocalTime { field: &'static str, value: String },
}

impl ValidationError {
    /// The field the error applies to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidTime { field, .. }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::InvalidTimezone { field, .. }
            | ValidationError::AmbiguousLocalTime { field, .. } => field,
        }
    }
}
