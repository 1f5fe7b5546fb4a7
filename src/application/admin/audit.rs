use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{AuditQueryFilter, AuditRepo, RepoError};
use crate::domain::entities::AuditLogRecord;

/// Appends admin actions to the audit log and pages through it.
#[derive(Clone)]
pub struct AdminAuditService {
    repo: Arc<dyn AuditRepo>,
}

impl AdminAuditService {
    pub fn new(repo: Arc<dyn AuditRepo>) -> Self {
        Self { repo }
    }

    pub async fn record<S>(
        &self,
        actor: &str,
        action: &str,
        entity_type: &str,
        entity_id: Option<&str>,
        payload: Option<&S>,
    ) -> Result<(), RepoError>
    where
        S: Serialize,
    {
        let payload_text = payload
            .map(serde_json::to_string)
            .transpose()
            .map_err(RepoError::from_persistence)?;

        let record = AuditLogRecord {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.map(str::to_string),
            payload_text,
            created_at: OffsetDateTime::now_utc(),
        };

        tracing::debug!(
            target = "nazim_site::application::admin::audit",
            actor = %record.actor,
            action = %record.action,
            entity_type = %record.entity_type,
            "recording admin action"
        );
        self.repo.append_log(record).await
    }

    pub async fn list(
        &self,
        filter: &AuditQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLogRecord>, RepoError> {
        self.repo.list_logs(filter, page).await
    }
}
