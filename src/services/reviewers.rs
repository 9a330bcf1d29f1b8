//! Reviewer chooser operations: user search and adding reviewers.

#[cfg(test)]
#[path = "reviewers_test.rs"]
mod reviewers_test;

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::app::EventSender;
use crate::net::reviewer::ReviewerApi;
use crate::net::types::{ApiError, CreateOutcome, ValidationErrors};
use crate::state::reviewers::{InternalUser, Reviewer, ReviewerAction};

pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";

/// Autocomplete candidates for the chooser.
///
/// # Errors
///
/// Returns an error if the users listing fails.
pub async fn search_users(api: &ReviewerApi, search: &str) -> Result<Vec<InternalUser>, ApiError> {
    let users = api.get_users(Some(search)).await?;
    Ok(users.into_iter().map(InternalUser::from).collect())
}

/// Add an admin user as a reviewer.
///
/// # Errors
///
/// Returns an error on hard API failure or a malformed reviewer record.
pub async fn add_internal_reviewer(
    api: &ReviewerApi,
    events: &EventSender,
    user_id: i64,
) -> Result<CreateOutcome<Reviewer>, ApiError> {
    let outcome = api.new_internal_reviewer(user_id).await?.try_map(Reviewer::try_from)?;
    Ok(post_if_created(events, outcome))
}

/// Add an external email address as a reviewer.
///
/// Addresses that are obviously malformed are rejected locally with an
/// `email` validation message and never reach the server.
///
/// # Errors
///
/// Returns an error on hard API failure or a malformed reviewer record.
pub async fn add_external_reviewer(
    api: &ReviewerApi,
    events: &EventSender,
    email: &str,
) -> Result<CreateOutcome<Reviewer>, ApiError> {
    if !is_valid_email(email) {
        return Ok(CreateOutcome::Error(ValidationErrors::single("email", INVALID_EMAIL_MESSAGE)));
    }
    let outcome = api.new_external_reviewer(email).await?.try_map(Reviewer::try_from)?;
    Ok(post_if_created(events, outcome))
}

/// Remove a reviewer from the chooser. Local only; nothing is sent to the server.
pub fn remove_reviewer(events: &EventSender, reviewer_id: i64) {
    events.post(ReviewerAction::DeleteReviewer(reviewer_id));
}

fn post_if_created(events: &EventSender, outcome: CreateOutcome<Reviewer>) -> CreateOutcome<Reviewer> {
    if let CreateOutcome::Ok(reviewer) = &outcome {
        info!(reviewer_id = reviewer.id, "reviewer added");
        events.post(ReviewerAction::PutReviewer(reviewer.clone()));
    }
    outcome
}

/// Address shape accepted by the reviewer chooser: a dotted or quoted local
/// part, then a dotted domain with an alphabetic TLD or a bracketed IPv4
/// literal.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern should compile")
});

/// Matched case-insensitively against [`EMAIL_PATTERN`].
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(&email.to_lowercase())
}
