use crate::Config;
use crate::database::postgres_repository::PostgresRepository;
use crate::db::init_pool;
use crate::models::user::validate_password_strength;

#[derive(Debug, Clone)]
pub struct CreatedAdmin {
    pub id: uuid::Uuid,
    pub email: String,
    /// Whether `admin.emails` lists this address. An unlisted account cannot reach the dashboard.
    pub allowed: bool,
}

pub async fn create_admin(config: &Config, email: &str, name: &str, password: &str) -> Result<CreatedAdmin, String> {
    if password.chars().count() < 8 || validate_password_strength(password).is_err() {
        return Err("Password must be at least 8 characters and contain a letter and a digit".to_string());
    }

    let pool = init_pool(&config.database)
        .await
        .map_err(|err| format!("Failed to initialize database pool: {err}"))?;

    let repo = PostgresRepository { pool: pool.clone() };
    let user = repo
        .create_user(name, email, password)
        .await
        .map_err(|err| format!("Failed to create admin user: {err:?}"))?;

    pool.close().await;

    Ok(CreatedAdmin {
        allowed: config.admin.is_admin(&user.email),
        id: user.id,
        email: user.email,
    })
}

/// Deletes expired reset tokens that were never used and returns how many went.
pub async fn cleanup_password_resets(config: &Config) -> Result<u64, String> {
    let pool = init_pool(&config.database)
        .await
        .map_err(|err| format!("Failed to initialize database pool: {err}"))?;

    let repo = PostgresRepository { pool: pool.clone() };
    let removed = repo
        .cleanup_expired_password_resets()
        .await
        .map_err(|err| format!("Failed to clean up password resets: {err:?}"))?;

    pool.close().await;

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn weak_password_is_rejected_before_connecting() {
        let mut config = Config::default();
        config.database.url = "postgres://invalid-host-never-used/none".to_string();

        let result = create_admin(&config, "owner@example.com", "Owner", "short").await;
        assert!(result.is_err_and(|err| err.starts_with("Password must be")));

        let result = create_admin(&config, "owner@example.com", "Owner", "allletters").await;
        assert!(result.is_err_and(|err| err.starts_with("Password must be")));
    }
}
