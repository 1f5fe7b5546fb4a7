use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::admin::audit::AdminAuditService;
use crate::application::repos::{EventParams, EventsRepo, EventsWriteRepo, RepoError};
use crate::domain::entities::EventRecord;
use crate::domain::error::DomainError;
use crate::domain::events::EventDraft;
use crate::domain::search::retain_matching;

#[derive(Debug, Error)]
pub enum AdminEventError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("event `{0}` not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Repo(RepoError),
}

impl AdminEventError {
    fn from_repo(id: Uuid, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<RepoError> for AdminEventError {
    fn from(err: RepoError) -> Self {
        Self::Repo(err)
    }
}

#[derive(Clone)]
pub struct AdminEventService {
    reader: Arc<dyn EventsRepo>,
    writer: Arc<dyn EventsWriteRepo>,
    audit: AdminAuditService,
}

impl AdminEventService {
    pub fn new(
        reader: Arc<dyn EventsRepo>,
        writer: Arc<dyn EventsWriteRepo>,
        audit: AdminAuditService,
    ) -> Self {
        Self {
            reader,
            writer,
            audit,
        }
    }

    /// Every event, public or not, earliest first.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<EventRecord>, AdminEventError> {
        let events = self.reader.list_events(false).await?;
        Ok(retain_matching(events, search))
    }

    pub async fn find(&self, id: Uuid) -> Result<EventRecord, AdminEventError> {
        self.reader
            .find_event(id)
            .await?
            .ok_or(AdminEventError::NotFound(id))
    }

    pub async fn create(
        &self,
        actor: &str,
        draft: EventDraft,
    ) -> Result<EventRecord, AdminEventError> {
        let draft = draft.normalized()?;
        let event = self.writer.create_event(to_params(draft)).await?;

        let id = event.id.to_string();
        self.audit
            .record(
                actor,
                "event.create",
                "event",
                Some(&id),
                Some(&EventSnapshot::from(&event)),
            )
            .await?;
        Ok(event)
    }

    pub async fn update(
        &self,
        actor: &str,
        id: Uuid,
        draft: EventDraft,
    ) -> Result<EventRecord, AdminEventError> {
        let draft = draft.normalized()?;
        let event = self
            .writer
            .update_event(id, to_params(draft))
            .await
            .map_err(|err| AdminEventError::from_repo(id, err))?;

        let entity_id = id.to_string();
        self.audit
            .record(
                actor,
                "event.update",
                "event",
                Some(&entity_id),
                Some(&EventSnapshot::from(&event)),
            )
            .await?;
        Ok(event)
    }

    pub async fn delete(&self, actor: &str, id: Uuid) -> Result<(), AdminEventError> {
        self.writer
            .delete_event(id)
            .await
            .map_err(|err| AdminEventError::from_repo(id, err))?;

        let entity_id = id.to_string();
        self.audit
            .record::<()>(actor, "event.delete", "event", Some(&entity_id), None)
            .await?;
        Ok(())
    }
}

fn to_params(draft: EventDraft) -> EventParams {
    EventParams {
        title: draft.title,
        location: draft.location,
        summary: draft.summary,
        starts_at: draft.starts_at,
        ends_at: draft.ends_at,
        is_public: draft.is_public,
    }
}

#[derive(Serialize)]
struct EventSnapshot<'a> {
    title: &'a str,
    location: Option<&'a str>,
    is_public: bool,
}

impl<'a> From<&'a EventRecord> for EventSnapshot<'a> {
    fn from(event: &'a EventRecord) -> Self {
        Self {
            title: &event.title,
            location: event.location.as_deref(),
            is_public: event.is_public,
        }
    }
}
