use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::application::pagination::{PageRequest, Paginated};
use crate::application::repos::{AuditQueryFilter, AuditRepo, RepoError};
use crate::domain::entities::AuditLogRecord;

use super::util::{convert_count, to_i64};
use super::{PostgresRepositories, map_sqlx_error};

const AUDIT_COLUMNS: &str = "id, actor, action, entity_type, entity_id, payload_text, created_at";

fn apply_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, filter: &'q AuditQueryFilter) {
    qb.push(" WHERE TRUE");
    let columns = [
        ("actor", filter.actor.as_deref()),
        ("action", filter.action.as_deref()),
        ("entity_type", filter.entity_type.as_deref()),
    ];
    for (column, value) in columns {
        if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
            qb.push(format!(" AND {column} = "));
            qb.push_bind(value);
        }
    }
}

#[async_trait]
impl AuditRepo for PostgresRepositories {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO audit_logs (id, actor, action, entity_type, entity_id, payload_text, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(record.id)
        .bind(record.actor)
        .bind(record.action)
        .bind(record.entity_type)
        .bind(record.entity_id)
        .bind(record.payload_text)
        .bind(record.created_at)
        .execute(self.pool())
        .await
        .map(|_| ())
        .map_err(map_sqlx_error)
    }

    async fn list_logs(
        &self,
        filter: &AuditQueryFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLogRecord>, RepoError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM audit_logs");
        apply_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {AUDIT_COLUMNS} FROM audit_logs"));
        apply_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id LIMIT ");
        qb.push_bind(to_i64(page.limit()));
        qb.push(" OFFSET ");
        qb.push_bind(to_i64(page.offset()));

        let rows = qb
            .build_query_as::<AuditLogRecord>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(page.envelope(rows, convert_count(total)?))
    }
}
