use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::timeline::{TimelineEntry, TimelineEntryRequest, TimelineKind};
use uuid::Uuid;

const TIMELINE_COLUMNS: &str = "id, title, organization, location, start_date, end_date, description, sort_order";

#[async_trait::async_trait]
pub trait TimelineRepository: Send + Sync {
    async fn list_timeline_entries(&self, kind: TimelineKind) -> Result<Vec<TimelineEntry>, AppError>;
    async fn get_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<Option<TimelineEntry>, AppError>;
    async fn create_timeline_entry(&self, kind: TimelineKind, request: &TimelineEntryRequest) -> Result<TimelineEntry, AppError>;
    async fn update_timeline_entry(&self, kind: TimelineKind, id: &Uuid, request: &TimelineEntryRequest) -> Result<Option<TimelineEntry>, AppError>;
    async fn delete_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<bool, AppError>;
}

// Table names come from `TimelineKind::table`, never from request input.
#[async_trait::async_trait]
impl TimelineRepository for PostgresRepository {
    async fn list_timeline_entries(&self, kind: TimelineKind) -> Result<Vec<TimelineEntry>, AppError> {
        let entries = sqlx::query_as::<_, TimelineEntry>(&format!(
            "SELECT {TIMELINE_COLUMNS} FROM {} ORDER BY sort_order, start_date DESC",
            kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn get_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<Option<TimelineEntry>, AppError> {
        let entry = sqlx::query_as::<_, TimelineEntry>(&format!("SELECT {TIMELINE_COLUMNS} FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    async fn create_timeline_entry(&self, kind: TimelineKind, request: &TimelineEntryRequest) -> Result<TimelineEntry, AppError> {
        let entry = sqlx::query_as::<_, TimelineEntry>(&format!(
            r#"
            INSERT INTO {} (title, organization, location, start_date, end_date, description, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TIMELINE_COLUMNS}
            "#,
            kind.table()
        ))
        .bind(&request.title)
        .bind(&request.organization)
        .bind(&request.location)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.description)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn update_timeline_entry(&self, kind: TimelineKind, id: &Uuid, request: &TimelineEntryRequest) -> Result<Option<TimelineEntry>, AppError> {
        let entry = sqlx::query_as::<_, TimelineEntry>(&format!(
            r#"
            UPDATE {}
            SET title = $1, organization = $2, location = $3, start_date = $4,
                end_date = $5, description = $6, sort_order = $7
            WHERE id = $8
            RETURNING {TIMELINE_COLUMNS}
            "#,
            kind.table()
        ))
        .bind(&request.title)
        .bind(&request.organization)
        .bind(&request.location)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.description)
        .bind(request.sort_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn delete_timeline_entry(&self, kind: TimelineKind, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
