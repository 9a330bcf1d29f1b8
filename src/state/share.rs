//! Share-link state: who a page was shared with, plus share modal visibility.
//!
//! DESIGN
//! ======
//! Shares arrive one at a time (initial load and each successful create),
//! so the slice exposes upsert/delete by id rather than wholesale replace.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use super::collection::{Identified, delete_by_id, put_by_id};
use super::store::Reducer;
use super::{Timestamp, TranslateError, parse_optional_timestamp};
use crate::net::types::ShareRecord;

/// A page shared with an external email address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub id: i64,
    pub email: String,
    /// Last time the recipient opened the link; `None` if never.
    pub accessed_at: Option<Timestamp>,
    /// `None` when the link never expires.
    pub expires_at: Option<Timestamp>,
}

impl Identified for Share {
    fn id(&self) -> i64 {
        self.id
    }
}

impl TryFrom<ShareRecord> for Share {
    type Error = TranslateError;

    fn try_from(record: ShareRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            email: record.user.email,
            accessed_at: parse_optional_timestamp("last_accessed_at", record.last_accessed_at.as_deref())?,
            expires_at: parse_optional_timestamp("expires_at", record.expires_at.as_deref())?,
        })
    }
}

/// Actions accepted by [`ShareState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareAction {
    ShowHideShareModal(bool),
    PutShare(Share),
    DeleteShare(i64),
}

impl ShareAction {
    #[must_use]
    pub fn show_share_modal() -> Self {
        Self::ShowHideShareModal(true)
    }

    #[must_use]
    pub fn hide_share_modal() -> Self {
        Self::ShowHideShareModal(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareState {
    pub shares: Vec<Share>,
    pub is_share_modal_open: bool,
}

impl Reducer for ShareState {
    type Action = ShareAction;
    const NAME: &'static str = "share";

    fn reduce(&self, action: ShareAction) -> Self {
        match action {
            ShareAction::ShowHideShareModal(show) => Self { is_share_modal_open: show, ..self.clone() },
            ShareAction::PutShare(share) => Self { shares: put_by_id(&self.shares, share), ..self.clone() },
            ShareAction::DeleteShare(share_id) => match delete_by_id(&self.shares, share_id) {
                Some(shares) => Self { shares, ..self.clone() },
                None => self.clone(),
            },
        }
    }
}
