use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::audit_log::{AuditLogEntry, NewAuditLogEntry};

#[async_trait::async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert_audit_log(&self, entry: &NewAuditLogEntry) -> Result<(), AppError>;
    async fn list_recent_audit_logs(&self, limit: i64) -> Result<Vec<AuditLogEntry>, AppError>;
}

#[async_trait::async_trait]
impl AuditLogRepository for PostgresRepository {
    async fn insert_audit_log(&self, entry: &NewAuditLogEntry) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (user_id, action, table_name, record_id, old_data, new_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.table_name)
        .bind(&entry.record_id)
        .bind(&entry.old_data)
        .bind(&entry.new_data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent_audit_logs(&self, limit: i64) -> Result<Vec<AuditLogEntry>, AppError> {
        let entries = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            SELECT id, user_id, action, table_name, record_id, old_data, new_data, created_at
            FROM audit_logs
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
