//! Wire schema for the review admin API, plus client error types.
//!
//! These structs mirror the JSON the server emits. They are translated into
//! domain entities in `state::*` and are never stored directly.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::TranslateError;

// =============================================================================
// ERROR
// =============================================================================

/// Hard failures from API client operations.
///
/// Field validation problems are not errors; see [`CreateOutcome::Error`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The server answered with a status outside the endpoint's contract.
    #[error("{endpoint} returned unexpected status code: {status}")]
    UnexpectedStatus { endpoint: &'static str, status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// An endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A record could not be turned into a domain entity.
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl ApiError {
    /// Stable machine-readable code for logs and UI messages.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_API_REQUEST",
            Self::UnexpectedStatus { .. } => "E_API_STATUS",
            Self::Parse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::InvalidUrl(_) => "E_INVALID_URL",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::Translate(_) => "E_TRANSLATE",
        }
    }
}

// =============================================================================
// CREATE RESULTS
// =============================================================================

/// Field-keyed validation messages from a 400 response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

/// Key used for messages that are not tied to a field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

impl ValidationErrors {
    /// Parse a 400 body.
    ///
    /// Objects map each key to its message; list values are joined with a
    /// space. A bare string or list becomes a [`NON_FIELD_ERRORS`] entry.
    /// Unparseable bodies are kept verbatim under [`NON_FIELD_ERRORS`].
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let mut fields = BTreeMap::new();
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => {
                for (key, value) in map {
                    if let Some(message) = message_text(&value) {
                        fields.insert(key, message);
                    }
                }
            }
            Ok(value) => {
                if let Some(message) = message_text(&value) {
                    fields.insert(NON_FIELD_ERRORS.to_owned(), message);
                }
            }
            Err(_) => {
                let trimmed = body.trim();
                if !trimmed.is_empty() {
                    fields.insert(NON_FIELD_ERRORS.to_owned(), trimmed.to_owned());
                }
            }
        }
        Self { fields }
    }

    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.to_owned(), message.to_owned());
        Self { fields }
    }

    /// Message for one field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn message_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(message_text).collect();
            if parts.is_empty() { None } else { Some(parts.join(" ")) }
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Result of a create call that reached the server and got a contractual answer.
#[derive(Clone, Debug, PartialEq)]
pub enum CreateOutcome<T> {
    /// 200/201 with the created (or existing) record.
    Ok(T),
    /// 400 with field-keyed validation messages.
    Error(ValidationErrors),
}

impl<T> CreateOutcome<T> {
    /// Convert the success payload, keeping validation errors as they are.
    ///
    /// # Errors
    ///
    /// Propagates the conversion error.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<CreateOutcome<U>, E> {
        match self {
            Self::Ok(value) => f(value).map(CreateOutcome::Ok),
            Self::Error(errors) => Ok(CreateOutcome::Error(errors)),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

// =============================================================================
// SHARES
// =============================================================================

/// External user a page was shared with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareUserRecord {
    pub email: String,
}

/// Share link as returned by `GET/POST page/{id}/shares/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub id: i64,
    pub user: ShareUserRecord,
    #[serde(default)]
    pub shared_by: Option<String>,
    #[serde(default)]
    pub shared_at: Option<String>,
    #[serde(default)]
    pub first_accessed_at: Option<String>,
    #[serde(default)]
    pub last_accessed_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Body for creating a share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewShareRequest<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<&'a str>,
}

// =============================================================================
// COMMENTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReplyRecord {
    pub id: i64,
    pub author: AuthorRecord,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Comment as returned by `GET page/{id}/comments/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    pub author: AuthorRecord,
    #[serde(default)]
    pub quote: String,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub is_resolved: bool,
    #[serde(default)]
    pub replies: Vec<CommentReplyRecord>,
    #[serde(default)]
    pub frontend_url: String,
}

// =============================================================================
// REVIEWERS
// =============================================================================

/// Admin user, as listed by `GET users/` and nested in reviewer records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReviewerRecord {
    pub email: String,
}

/// Reviewer as returned by `POST reviewers/`.
///
/// Exactly one of `internal` and `external` is expected to be set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerRecord {
    pub id: i64,
    #[serde(default)]
    pub internal: Option<UserRecord>,
    #[serde(default)]
    pub external: Option<ExternalReviewerRecord>,
}

/// Body for get-or-create reviewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NewReviewerRequest<'a> {
    Internal { user_id: i64 },
    External { email: &'a str },
}
