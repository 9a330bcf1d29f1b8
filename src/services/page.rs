//! Share and comment loading for the page editor widgets.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use tracing::info;

use crate::app::EventSender;
use crate::net::page::PageApi;
use crate::net::types::{ApiError, CreateOutcome};
use crate::state::comments::{Comment, CommentsAction};
use crate::state::share::{Share, ShareAction};

/// Fetch the page's shares and post a `PutShare` for each one.
///
/// Every record is translated before anything is posted, so a malformed
/// record leaves the store untouched.
///
/// # Errors
///
/// Returns an error if the fetch or any translation fails.
pub async fn load_shares(api: &PageApi, events: &EventSender) -> Result<usize, ApiError> {
    let shares = api
        .get_shares()
        .await?
        .into_iter()
        .map(Share::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let count = shares.len();
    for share in shares {
        events.post(ShareAction::PutShare(share));
    }
    info!(count, "loaded shares");
    Ok(count)
}

/// Fetch the page's comments and post a single `LoadComments`.
///
/// # Errors
///
/// Returns an error if the fetch or any translation fails.
pub async fn load_comments(api: &PageApi, events: &EventSender) -> Result<usize, ApiError> {
    let comments = api
        .get_comments()
        .await?
        .into_iter()
        .map(Comment::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let count = comments.len();
    events.post(CommentsAction::LoadComments(comments));
    info!(count, "loaded comments");
    Ok(count)
}

/// Share the page with `email`. A created share is posted as `PutShare`.
///
/// # Errors
///
/// Returns an error on hard API failure or if the returned record is malformed.
pub async fn create_share(
    api: &PageApi,
    events: &EventSender,
    email: &str,
    expires_at: Option<&str>,
) -> Result<CreateOutcome<Share>, ApiError> {
    let outcome = api.new_share(email, expires_at).await?.try_map(Share::try_from)?;
    if let CreateOutcome::Ok(share) = &outcome {
        info!(share_id = share.id, "share created");
        events.post(ShareAction::PutShare(share.clone()));
    }
    Ok(outcome)
}
