use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::contact::{ContactMessage, ContactRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact_message(&self, request: &ContactRequest) -> Result<ContactMessage, AppError>;
    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError>;
    async fn get_contact_message_by_id(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError>;
    async fn mark_contact_message_read(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError>;
    async fn delete_contact_message(&self, id: &Uuid) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl ContactRepository for PostgresRepository {
    async fn create_contact_message(&self, request: &ContactRequest) -> Result<ContactMessage, AppError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, subject, message, is_read, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.subject)
        .bind(&request.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, subject, message, is_read, created_at
            FROM contact_messages
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn get_contact_message_by_id(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, subject, message, is_read, created_at
            FROM contact_messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn mark_contact_message_read(&self, id: &Uuid) -> Result<Option<ContactMessage>, AppError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            UPDATE contact_messages
            SET is_read = TRUE
            WHERE id = $1
            RETURNING id, name, email, subject, message, is_read, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn delete_contact_message(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
