//! Client-side state slices for the review widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! `share`, `comments` and `reviewers` are independent slices, each driven by
//! its own action enum through a pure reducer. `store` owns a slice and fans
//! out change notifications; `collection` holds the upsert/delete-by-id splice
//! shared by the list-backed slices.
//!
//! Wire records from `net::types` become domain entities here, through
//! `TryFrom` conversions that fail fast on malformed timestamps or reviewer
//! variants.

pub mod collection;
pub mod comments;
pub mod reviewers;
pub mod share;
pub mod store;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Errors raised while translating a wire record into a domain entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A date-time field did not hold a parseable timestamp.
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// A reviewer record carried both `internal` and `external` data.
    #[error("reviewer {id} has both internal and external data")]
    AmbiguousReviewer { id: i64 },

    /// A reviewer record carried neither `internal` nor `external` data.
    #[error("reviewer {id} has neither internal nor external data")]
    MissingReviewer { id: i64 },
}

/// Parse an API date-time string into epoch milliseconds.
///
/// Accepts RFC 3339 (with or without fractional seconds). A naive ISO 8601
/// date-time with no offset is read as UTC.
///
/// # Errors
///
/// Returns [`TranslateError::InvalidTimestamp`] naming `field` when neither
/// format matches.
pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<Timestamp, TranslateError> {
    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .or_else(|_| PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).map(PrimitiveDateTime::assume_utc))
        .map_err(|_| TranslateError::InvalidTimestamp { field, value: raw.to_owned() })?;

    i64::try_from(parsed.unix_timestamp_nanos() / 1_000_000)
        .map_err(|_| TranslateError::InvalidTimestamp { field, value: raw.to_owned() })
}

/// Like [`parse_timestamp`], but `None` and empty strings map to `None`.
///
/// # Errors
///
/// Returns [`TranslateError::InvalidTimestamp`] for a present but malformed value.
pub fn parse_optional_timestamp(field: &'static str, raw: Option<&str>) -> Result<Option<Timestamp>, TranslateError> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(field, value).map(Some),
    }
}
