use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::user::User;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::LazyLock;
use uuid::Uuid;

/// A real Argon2 hash generated once, used as a timing decoy so that
/// logins for unknown emails cost the same as logins for real accounts.
static DUMMY_HASH: LazyLock<Option<String>> = LazyLock::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"dummy-never-matches", &salt)
        .map(|hash| hash.to_string())
        .ok()
});

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    /// Returns the user only when the password matches. Unknown emails and wrong passwords both yield `None`.
    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AppError>;
    async fn update_user_password(&self, id: &Uuid, new_password: &str) -> Result<(), AppError>;
}

impl PostgresRepository {
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash
            "#,
        )
        .bind(name)
        .bind(email.trim().to_lowercase())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Perform a throwaway Argon2 verification so response latency does not
    /// reveal whether an account exists.
    pub fn dummy_verify(password: &str) {
        if let Some(hash) = DUMMY_HASH.as_deref().and_then(|hash| PasswordHash::new(hash).ok()) {
            let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresRepository {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.get_user_by_email(email).await? else {
            PostgresRepository::dummy_verify(password);
            return Ok(None);
        };

        let stored = PasswordHash::new(&user.password_hash).map_err(|e| AppError::password_hash("Failed to parse stored password hash", e))?;
        match Argon2::default().verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(Some(user)),
            Err(password_hash::Error::Password) => Ok(None),
            Err(e) => Err(AppError::password_hash("Failed to verify password", e)),
        }
    }

    async fn update_user_password(&self, id: &Uuid, new_password: &str) -> Result<(), AppError> {
        let new_hash = hash_password(new_password)?;
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&new_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }

        Ok(())
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}
