//! Page-scoped admin API: share links and comments for one page.
//!
//! ERROR HANDLING
//! ==============
//! List calls accept only 200. `new_share` reports 400 validation messages as
//! `CreateOutcome::Error` and fails hard on anything else. Nothing is retried.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::sync::Arc;

use tracing::{debug, warn};

use super::transport::Transport;
use super::types::{ApiError, CommentRecord, CreateOutcome, NewShareRequest, ShareRecord};
use crate::config::{ClientConfig, ConfigError};

const SHARE_API: &str = "share api";
const COMMENT_API: &str = "comment api";

#[derive(Clone)]
pub struct PageApi {
    transport: Arc<dyn Transport>,
    shares_url: String,
    comments_url: String,
}

impl PageApi {
    /// Build a client for the page named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shares or comments endpoint cannot be derived.
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_urls(transport, config.shares_url()?, config.comments_url()?))
    }

    #[must_use]
    pub fn with_urls(transport: Arc<dyn Transport>, shares_url: String, comments_url: String) -> Self {
        Self { transport, shares_url, comments_url }
    }

    /// Fetch every share link for the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 200, or the
    /// body is not a list of shares.
    pub async fn get_shares(&self) -> Result<Vec<ShareRecord>, ApiError> {
        let response = self.transport.get(&self.shares_url).await?;
        let shares: Vec<ShareRecord> = response.into_list(SHARE_API)?;
        debug!(count = shares.len(), "fetched shares");
        Ok(shares)
    }

    /// Share the page with `email`, optionally expiring at an RFC 3339 time.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a status other than 200/201/400.
    pub async fn new_share(
        &self,
        email: &str,
        expires_at: Option<&str>,
    ) -> Result<CreateOutcome<ShareRecord>, ApiError> {
        let body = serde_json::to_value(NewShareRequest { email, expires_at })
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let outcome: CreateOutcome<ShareRecord> = self
            .transport
            .post_json(&self.shares_url, &body)
            .await?
            .into_create_outcome(SHARE_API)
            .inspect_err(|e| warn!(error = %e, "share create failed"))?;
        if let CreateOutcome::Error(errors) = &outcome {
            debug!(?errors, "share create rejected");
        }
        Ok(outcome)
    }

    /// Fetch every comment on the page, newest first as the server orders them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 200, or the
    /// body is not a list of comments.
    pub async fn get_comments(&self) -> Result<Vec<CommentRecord>, ApiError> {
        let response = self.transport.get(&self.comments_url).await?;
        let comments: Vec<CommentRecord> = response.into_list(COMMENT_API)?;
        debug!(count = comments.len(), "fetched comments");
        Ok(comments)
    }
}
