//! Reviewer chooser state: the reviewers picked for a review request.
//!
//! A reviewer is either an admin user or an external email address. The
//! server sends both as nullable sub-objects; translation collapses them into
//! [`ReviewerKind`] and rejects records that carry both or neither.

#[cfg(test)]
#[path = "reviewers_test.rs"]
mod reviewers_test;

use super::TranslateError;
use super::collection::{Identified, delete_by_id, put_by_id};
use super::store::Reducer;
use crate::net::types::{ReviewerRecord, UserRecord};

/// Admin user that can review internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalUser {
    pub id: i64,
    pub name: String,
}

impl From<UserRecord> for InternalUser {
    fn from(record: UserRecord) -> Self {
        Self { id: record.id, name: record.name }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewerKind {
    Internal(InternalUser),
    External { email: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reviewer {
    pub id: i64,
    pub kind: ReviewerKind,
}

impl Reviewer {
    /// Label shown in the chooser list.
    #[must_use]
    pub fn display(&self) -> &str {
        match &self.kind {
            ReviewerKind::Internal(user) => &user.name,
            ReviewerKind::External { email } => email,
        }
    }
}

impl Identified for Reviewer {
    fn id(&self) -> i64 {
        self.id
    }
}

impl TryFrom<ReviewerRecord> for Reviewer {
    type Error = TranslateError;

    fn try_from(record: ReviewerRecord) -> Result<Self, Self::Error> {
        let kind = match (record.internal, record.external) {
            (Some(user), None) => ReviewerKind::Internal(user.into()),
            (None, Some(external)) => ReviewerKind::External { email: external.email },
            (Some(_), Some(_)) => return Err(TranslateError::AmbiguousReviewer { id: record.id }),
            (None, None) => return Err(TranslateError::MissingReviewer { id: record.id }),
        };
        Ok(Self { id: record.id, kind })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewerAction {
    PutReviewer(Reviewer),
    DeleteReviewer(i64),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewersState {
    pub reviewers: Vec<Reviewer>,
}

impl Reducer for ReviewersState {
    type Action = ReviewerAction;
    const NAME: &'static str = "reviewers";

    fn reduce(&self, action: ReviewerAction) -> Self {
        match action {
            ReviewerAction::PutReviewer(reviewer) => Self { reviewers: put_by_id(&self.reviewers, reviewer) },
            ReviewerAction::DeleteReviewer(reviewer_id) => match delete_by_id(&self.reviewers, reviewer_id) {
                Some(reviewers) => Self { reviewers },
                None => self.clone(),
            },
        }
    }
}
