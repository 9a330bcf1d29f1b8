//! Comment panel state: loaded comments plus panel and resolved-filter flags.
//!
//! DESIGN
//! ======
//! Comments are loaded once and replaced wholesale. Hiding resolved comments
//! is a view concern, so `visible_comments` filters a borrowed view and never
//! touches the stored list.

#[cfg(test)]
#[path = "comments_test.rs"]
mod comments_test;

use super::store::Reducer;
use super::{Timestamp, TranslateError, parse_timestamp};
use crate::net::types::{CommentRecord, CommentReplyRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub name: String,
}

impl Author {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new("Unknown")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentReply {
    pub id: i64,
    pub author: Author,
    pub date: Timestamp,
    pub text: String,
}

impl TryFrom<CommentReplyRecord> for CommentReply {
    type Error = TranslateError;

    fn try_from(record: CommentReplyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            author: Author::new(record.author.name),
            date: parse_timestamp("created_at", &record.created_at)?,
            text: record.text,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub is_resolved: bool,
    pub author: Author,
    pub date: Timestamp,
    pub text: String,
    pub replies: Vec<CommentReply>,
    /// Link to the comment in context on the public site.
    pub frontend_url: String,
}

impl TryFrom<CommentRecord> for Comment {
    type Error = TranslateError;

    fn try_from(record: CommentRecord) -> Result<Self, Self::Error> {
        let replies = record
            .replies
            .into_iter()
            .map(CommentReply::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: record.id,
            is_resolved: record.is_resolved,
            author: Author::new(record.author.name),
            date: parse_timestamp("created_at", &record.created_at)?,
            text: record.text,
            replies,
            frontend_url: record.frontend_url,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentsAction {
    LoadComments(Vec<Comment>),
    ShowHideComments(bool),
    ShowHideResolvedComments(bool),
}

impl CommentsAction {
    #[must_use]
    pub fn show_comments() -> Self {
        Self::ShowHideComments(true)
    }

    #[must_use]
    pub fn hide_comments() -> Self {
        Self::ShowHideComments(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentsState {
    pub is_open: bool,
    pub comments: Vec<Comment>,
    pub show_resolved_comments: bool,
}

impl Reducer for CommentsState {
    type Action = CommentsAction;
    const NAME: &'static str = "comments";

    fn reduce(&self, action: CommentsAction) -> Self {
        match action {
            CommentsAction::LoadComments(comments) => Self { comments, ..self.clone() },
            CommentsAction::ShowHideComments(show) => Self { is_open: show, ..self.clone() },
            CommentsAction::ShowHideResolvedComments(show) => Self { show_resolved_comments: show, ..self.clone() },
        }
    }
}

impl CommentsState {
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.comments.iter().filter(|c| c.is_resolved).count()
    }

    /// Count shown on the comments tab badge.
    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.comments.len() - self.resolved_count()
    }

    /// Comments the panel should list.
    ///
    /// Resolved comments are hidden unless `show_resolved_comments` is set.
    /// The toggle only exists once something is resolved, so with no resolved
    /// comments everything is shown.
    #[must_use]
    pub fn visible_comments(&self) -> Vec<&Comment> {
        let hide_resolved = self.resolved_count() > 0 && !self.show_resolved_comments;
        self.comments
            .iter()
            .filter(|c| !(hide_resolved && c.is_resolved))
            .collect()
    }
}
