//! Inbox workflow: actions offered for a message, status tallies and the
//! detail view that tracks the message currently being read.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{entities::InboxMessageRecord, types::InboxStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InboxAction {
    MarkRead,
    MarkReplied,
    Archive,
    Delete,
}

impl InboxAction {
    /// Status the message ends in; `None` for deletion.
    pub fn target_status(self) -> Option<InboxStatus> {
        match self {
            InboxAction::MarkRead => Some(InboxStatus::Read),
            InboxAction::MarkReplied => Some(InboxStatus::Replied),
            InboxAction::Archive => Some(InboxStatus::Archived),
            InboxAction::Delete => None,
        }
    }
}

/// Actions offered for a message in `status`. The action that would leave the
/// status unchanged is omitted; deletion is always available.
pub fn available_actions(status: InboxStatus) -> Vec<InboxAction> {
    [
        InboxAction::MarkRead,
        InboxAction::MarkReplied,
        InboxAction::Archive,
        InboxAction::Delete,
    ]
    .into_iter()
    .filter(|action| action.target_status() != Some(status))
    .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InboxStats {
    pub total: u64,
    pub new: u64,
    pub read: u64,
    pub replied: u64,
    pub archived: u64,
}

impl InboxStats {
    pub fn tally<'a>(messages: impl IntoIterator<Item = &'a InboxMessageRecord>) -> Self {
        messages
            .into_iter()
            .fold(Self::default(), |mut stats, message| {
                stats.record(message.status, 1);
                stats
            })
    }

    /// Build stats from per-status counts as returned by a grouped query.
    pub fn from_counts(counts: impl IntoIterator<Item = (InboxStatus, u64)>) -> Self {
        counts
            .into_iter()
            .fold(Self::default(), |mut stats, (status, count)| {
                stats.record(status, count);
                stats
            })
    }

    fn record(&mut self, status: InboxStatus, count: u64) {
        self.total += count;
        match status {
            InboxStatus::New => self.new += count,
            InboxStatus::Read => self.read += count,
            InboxStatus::Replied => self.replied += count,
            InboxStatus::Archived => self.archived += count,
        }
    }
}

/// The message currently open in the detail view, if any.
#[derive(Debug, Clone, Default)]
pub struct InboxDetailView {
    current: Option<InboxMessageRecord>,
}

impl InboxDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `message`; returns `true` when it still has to be marked read.
    pub fn open(&mut self, message: InboxMessageRecord) -> bool {
        let needs_read = message.status == InboxStatus::New;
        self.current = Some(message);
        needs_read
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&InboxMessageRecord> {
        self.current.as_ref()
    }

    pub fn is_open(&self, id: Uuid) -> bool {
        self.current.as_ref().is_some_and(|message| message.id == id)
    }

    /// Replace the open message with `updated` when the ids match.
    pub fn apply_status(&mut self, updated: &InboxMessageRecord) {
        if let Some(current) = self.current.as_mut().filter(|current| current.id == updated.id) {
            *current = updated.clone();
        }
    }

    /// Close the view when the deleted message is the one open.
    pub fn apply_delete(&mut self, id: Uuid) {
        if self.is_open(id) {
            self.current = None;
        }
    }
}
