use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::password_reset::PasswordReset;
use chrono::{DateTime, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait PasswordResetRepository: Send + Sync {
    async fn create_password_reset(&self, user_id: &Uuid, token_hash: &str, expires_at: DateTime<Utc>) -> Result<PasswordReset, AppError>;
    async fn get_password_reset_by_token(&self, token_hash: &str) -> Result<Option<PasswordReset>, AppError>;
    async fn mark_password_reset_used(&self, reset_id: &Uuid) -> Result<(), AppError>;
    async fn delete_password_resets_for_user(&self, user_id: &Uuid) -> Result<(), AppError>;
}

/// Generate a password reset token.
/// Returns: (plain_token, token_hash). Only the hash is persisted.
pub fn generate_reset_token() -> (String, String) {
    let token = Alphanumeric.sample_string(&mut rand::rng(), 64);
    let token_hash = hash_reset_token(&token);
    (token, token_hash)
}

pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

impl PostgresRepository {
    /// Clean up expired, unused password reset tokens
    pub async fn cleanup_expired_password_resets(&self) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM password_resets
            WHERE expires_at < NOW()
            AND used_at IS NULL
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl PasswordResetRepository for PostgresRepository {
    async fn create_password_reset(&self, user_id: &Uuid, token_hash: &str, expires_at: DateTime<Utc>) -> Result<PasswordReset, AppError> {
        let reset = sqlx::query_as::<_, PasswordReset>(
            r#"
            INSERT INTO password_resets (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, expires_at, used_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(reset)
    }

    async fn get_password_reset_by_token(&self, token_hash: &str) -> Result<Option<PasswordReset>, AppError> {
        let reset = sqlx::query_as::<_, PasswordReset>(
            r#"
            SELECT id, user_id, expires_at, used_at
            FROM password_resets
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reset)
    }

    async fn mark_password_reset_used(&self, reset_id: &Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE password_resets SET used_at = NOW() WHERE id = $1")
            .bind(reset_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_password_resets_for_user(&self, user_id: &Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM password_resets WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
