//! Reviewer chooser API: user search and get-or-create reviewer.

#[cfg(test)]
#[path = "reviewer_test.rs"]
mod reviewer_test;

use std::sync::Arc;

use tracing::{debug, warn};

use super::transport::Transport;
use super::types::{ApiError, CreateOutcome, NewReviewerRequest, ReviewerRecord, UserRecord};
use crate::config::ClientConfig;

const REVIEWER_API: &str = "reviewer api";
const USERS_API: &str = "users api";

#[derive(Clone)]
pub struct ReviewerApi {
    transport: Arc<dyn Transport>,
    users_url: String,
    reviewers_url: String,
}

impl ReviewerApi {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self { transport, users_url: config.users_url(), reviewers_url: config.reviewers_url() }
    }

    /// List active admin users, optionally filtered by a search string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built, the request fails, or the
    /// response is not a 200 list of users.
    pub async fn get_users(&self, search: Option<&str>) -> Result<Vec<UserRecord>, ApiError> {
        let url = users_query_url(&self.users_url, search)?;
        let users: Vec<UserRecord> = self.transport.get(&url).await?.into_list(USERS_API)?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    /// Get or create the reviewer for an admin user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a status other than 200/201/400.
    pub async fn new_internal_reviewer(&self, user_id: i64) -> Result<CreateOutcome<ReviewerRecord>, ApiError> {
        self.new_reviewer(NewReviewerRequest::Internal { user_id }).await
    }

    /// Get or create the reviewer for an external email address.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a status other than 200/201/400.
    pub async fn new_external_reviewer(&self, email: &str) -> Result<CreateOutcome<ReviewerRecord>, ApiError> {
        self.new_reviewer(NewReviewerRequest::External { email }).await
    }

    async fn new_reviewer(&self, request: NewReviewerRequest<'_>) -> Result<CreateOutcome<ReviewerRecord>, ApiError> {
        let body = serde_json::to_value(&request).map_err(|e| ApiError::Parse(e.to_string()))?;
        let outcome: CreateOutcome<ReviewerRecord> = self
            .transport
            .post_json(&self.reviewers_url, &body)
            .await?
            .into_create_outcome(REVIEWER_API)
            .inspect_err(|e| warn!(error = %e, "reviewer create failed"))?;
        if let CreateOutcome::Error(errors) = &outcome {
            debug!(?errors, "reviewer create rejected");
        }
        Ok(outcome)
    }
}

fn users_query_url(base: &str, search: Option<&str>) -> Result<String, ApiError> {
    match search.filter(|s| !s.is_empty()) {
        Some(term) => reqwest::Url::parse_with_params(base, &[("search", term)])
            .map(String::from)
            .map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}"))),
        None => Ok(base.to_owned()),
    }
}
