//! Inbox workflow for contact-form messages.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::admin::audit::AdminAuditService;
use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{InboxQueryFilter, InboxRepo, RepoError};
use crate::domain::entities::InboxMessageRecord;
use crate::domain::inbox::{InboxDetailView, InboxStats};
use crate::domain::types::InboxStatus;

#[derive(Debug, Error)]
pub enum AdminInboxError {
    #[error("inbox message `{0}` not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Repo(RepoError),
}

impl AdminInboxError {
    fn from_repo(id: Uuid, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<RepoError> for AdminInboxError {
    fn from(err: RepoError) -> Self {
        Self::Repo(err)
    }
}

#[derive(Clone)]
pub struct AdminInboxService {
    repo: Arc<dyn InboxRepo>,
    audit: AdminAuditService,
}

impl AdminInboxService {
    pub fn new(repo: Arc<dyn InboxRepo>, audit: AdminAuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn list(
        &self,
        filter: &InboxQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<InboxMessageRecord>, AdminInboxError> {
        Ok(self.repo.list_messages(filter, page).await?)
    }

    pub async fn stats(&self) -> Result<InboxStats, AdminInboxError> {
        let counts = self.repo.count_by_status().await?;
        Ok(InboxStats::from_counts(counts))
    }

    pub async fn find(&self, id: Uuid) -> Result<InboxMessageRecord, AdminInboxError> {
        self.repo
            .find_message(id)
            .await?
            .ok_or(AdminInboxError::NotFound(id))
    }

    /// Fetch a message for reading; unread messages are marked read.
    pub async fn view(
        &self,
        actor: &str,
        id: Uuid,
    ) -> Result<InboxMessageRecord, AdminInboxError> {
        let message = self.find(id).await?;
        if message.status == InboxStatus::New {
            return self.update_status(actor, id, InboxStatus::Read).await;
        }
        Ok(message)
    }

    pub async fn update_status(
        &self,
        actor: &str,
        id: Uuid,
        status: InboxStatus,
    ) -> Result<InboxMessageRecord, AdminInboxError> {
        let replied_at = (status == InboxStatus::Replied).then(OffsetDateTime::now_utc);
        let message = self
            .repo
            .update_message_status(id, status, replied_at)
            .await
            .map_err(|err| AdminInboxError::from_repo(id, err))?;

        metrics::counter!("nazim_inbox_status_changes_total", "status" => status.as_str())
            .increment(1);

        let entity_id = id.to_string();
        self.audit
            .record(
                actor,
                "inbox.status",
                "inbox_message",
                Some(&entity_id),
                Some(&StatusSnapshot { status }),
            )
            .await?;
        Ok(message)
    }

    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<(), AdminInboxError> {
        self.repo
            .delete_message(id)
            .await
            .map_err(|err| AdminInboxError::from_repo(id, err))?;

        let entity_id = id.to_string();
        self.audit
            .record::<()>(actor, "inbox.delete", "inbox_message", Some(&entity_id), None)
            .await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusSnapshot {
    status: InboxStatus,
}

/// A reader working through the inbox with one message open at a time.
///
/// Successful mutations patch or close the local view so the caller does not
/// have to refetch the message.
pub struct InboxSession {
    service: AdminInboxService,
    actor: String,
    view: InboxDetailView,
}

impl InboxSession {
    pub fn new(service: AdminInboxService, actor: impl Into<String>) -> Self {
        Self {
            service,
            actor: actor.into(),
            view: InboxDetailView::new(),
        }
    }

    pub fn current(&self) -> Option<&InboxMessageRecord> {
        self.view.current()
    }

    pub fn close(&mut self) {
        self.view.close();
    }

    pub async fn open(&mut self, id: Uuid) -> Result<&InboxMessageRecord, AdminInboxError> {
        let message = self.service.find(id).await?;
        if self.view.open(message) {
            let updated = self
                .service
                .update_status(&self.actor, id, InboxStatus::Read)
                .await?;
            self.view.apply_status(&updated);
        }
        self.view
            .current()
            .ok_or_else(|| AdminInboxError::NotFound(id))
    }

    pub async fn set_status(
        &mut self,
        id: Uuid,
        status: InboxStatus,
    ) -> Result<InboxMessageRecord, AdminInboxError> {
        let updated = self.service.update_status(&self.actor, id, status).await?;
        self.view.apply_status(&updated);
        Ok(updated)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<(), AdminInboxError> {
        self.service.delete(&self.actor, id).await?;
        self.view.apply_delete(id);
        Ok(())
    }
}
