use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::security_event::{NewSecurityEvent, SecurityEvent};
use chrono::{DateTime, Utc};

#[async_trait::async_trait]
pub trait SecurityLogRepository: Send + Sync {
    async fn insert_security_event(&self, event: &NewSecurityEvent) -> Result<(), AppError>;
    /// Count events of one type from one IP with `created_at >= since`.
    async fn count_security_events_since(&self, event_type: &str, ip_address: &str, since: DateTime<Utc>) -> Result<i64, AppError>;
    async fn list_recent_security_events(&self, limit: i64) -> Result<Vec<SecurityEvent>, AppError>;
}

#[async_trait::async_trait]
impl SecurityLogRepository for PostgresRepository {
    async fn insert_security_event(&self, event: &NewSecurityEvent) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO security_logs (event_type, email, ip_address, device_type, user_agent, details)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&event.event_type)
        .bind(&event.email)
        .bind(&event.ip_address)
        .bind(&event.device_type)
        .bind(&event.user_agent)
        .bind(&event.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_security_events_since(&self, event_type: &str, ip_address: &str, since: DateTime<Utc>) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM security_logs
            WHERE event_type = $1
              AND ip_address = $2
              AND created_at >= $3
            "#,
        )
        .bind(event_type)
        .bind(ip_address)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn list_recent_security_events(&self, limit: i64) -> Result<Vec<SecurityEvent>, AppError> {
        let events = sqlx::query_as::<_, SecurityEvent>(
            r#"
            SELECT id, event_type, email, ip_address, device_type, user_agent, details, created_at
            FROM security_logs
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
