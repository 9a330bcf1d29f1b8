//! Top-level composition: the three stores, the event queue, and UI hooks.
//!
//! DESIGN
//! ======
//! `ReviewApp` owns one store per slice and is the single consumer of the
//! event queue. UI hooks (tab clicks, keys) dispatch directly; async network
//! work in `services` posts `AppEvent`s through an `EventSender`, and the
//! owner applies them one at a time via `drain` or `run`. Slices never see
//! each other; only this module knows all three.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::state::comments::{CommentsAction, CommentsState};
use crate::state::reviewers::{ReviewerAction, ReviewersState};
use crate::state::share::{ShareAction, ShareState};
use crate::state::store::Store;

// =============================================================================
// EVENTS
// =============================================================================

/// An action addressed to one of the slices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Share(ShareAction),
    Comments(CommentsAction),
    Reviewers(ReviewerAction),
}

impl From<ShareAction> for AppEvent {
    fn from(action: ShareAction) -> Self {
        Self::Share(action)
    }
}

impl From<CommentsAction> for AppEvent {
    fn from(action: CommentsAction) -> Self {
        Self::Comments(action)
    }
}

impl From<ReviewerAction> for AppEvent {
    fn from(action: ReviewerAction) -> Self {
        Self::Reviewers(action)
    }
}

/// Cloneable handle async tasks use to post events.
#[derive(Clone, Debug)]
pub struct EventSender(mpsc::UnboundedSender<AppEvent>);

impl EventSender {
    /// Queue an event. Returns `false` if the queue has been dropped.
    pub fn post(&self, event: impl Into<AppEvent>) -> bool {
        let event = event.into();
        match self.0.send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                warn!(?event, "event queue closed; dropping event");
                false
            }
        }
    }
}

/// Receiving end of the event queue. Owned by whoever owns the `ReviewApp`.
#[derive(Debug)]
pub struct EventQueue(mpsc::UnboundedReceiver<AppEvent>);

/// Create a connected sender/queue pair.
#[must_use]
pub fn event_queue() -> (EventSender, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender(tx), EventQueue(rx))
}

// =============================================================================
// UI HOOKS
// =============================================================================

/// Tabs injected into the page editor's tab bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Share,
    Comments,
}

pub const ESCAPE_KEY: &str = "Escape";

// =============================================================================
// APP
// =============================================================================

#[derive(Debug, Default)]
pub struct ReviewApp {
    pub share: Store<ShareState>,
    pub comments: Store<CommentsState>,
    pub reviewers: Store<ReviewersState>,
}

impl ReviewApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an event to its slice's store.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Share(action) => self.share.dispatch(action),
            AppEvent::Comments(action) => self.comments.dispatch(action),
            AppEvent::Reviewers(action) => self.reviewers.dispatch(action),
        }
    }

    /// Apply every event already queued without waiting. Returns how many ran.
    pub fn drain(&mut self, queue: &mut EventQueue) -> usize {
        let mut applied = 0;
        while let Ok(event) = queue.0.try_recv() {
            self.apply(event);
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "drained event queue");
        }
        applied
    }

    /// Apply events until every sender has been dropped.
    pub async fn run(&mut self, mut queue: EventQueue) -> usize {
        let mut applied = 0;
        while let Some(event) = queue.0.recv().await {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Share opens the share modal; Comments toggles the comments panel.
    pub fn on_tab_click(&mut self, tab: Tab) {
        match tab {
            Tab::Share => self.share.dispatch(ShareAction::show_share_modal()),
            Tab::Comments => {
                let action = if self.comments.state().is_open {
                    CommentsAction::hide_comments()
                } else {
                    CommentsAction::show_comments()
                };
                self.comments.dispatch(action);
            }
        }
    }

    /// Escape closes both the share modal and the comments panel.
    pub fn on_key(&mut self, key: &str) {
        if key == ESCAPE_KEY {
            self.share.dispatch(ShareAction::hide_share_modal());
            self.comments.dispatch(CommentsAction::hide_comments());
        }
    }

    /// Number for the comments tab badge, `None` when nothing is unresolved.
    #[must_use]
    pub fn comments_badge(&self) -> Option<usize> {
        let count = self.comments.state().unresolved_count();
        (count > 0).then_some(count)
    }
}
