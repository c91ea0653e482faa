use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::technology::{Technology, TechnologyRequest};
use uuid::Uuid;

#[async_trait::async_trait]
pub trait TechnologyRepository: Send + Sync {
    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError>;
    async fn get_technology_by_id(&self, id: &Uuid) -> Result<Option<Technology>, AppError>;
    async fn create_technology(&self, request: &TechnologyRequest) -> Result<Technology, AppError>;
    async fn update_technology(&self, id: &Uuid, request: &TechnologyRequest) -> Result<Option<Technology>, AppError>;
    async fn delete_technology(&self, id: &Uuid) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl TechnologyRepository for PostgresRepository {
    async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        let technologies = sqlx::query_as::<_, Technology>(
            "SELECT id, name, category, icon_url, sort_order FROM technologies ORDER BY category, sort_order, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(technologies)
    }

    async fn get_technology_by_id(&self, id: &Uuid) -> Result<Option<Technology>, AppError> {
        let technology = sqlx::query_as::<_, Technology>("SELECT id, name, category, icon_url, sort_order FROM technologies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technology)
    }

    async fn create_technology(&self, request: &TechnologyRequest) -> Result<Technology, AppError> {
        let technology = sqlx::query_as::<_, Technology>(
            r#"
            INSERT INTO technologies (name, category, icon_url, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, category, icon_url, sort_order
            "#,
        )
        .bind(&request.name)
        .bind(&request.category)
        .bind(&request.icon_url)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(technology)
    }

    async fn update_technology(&self, id: &Uuid, request: &TechnologyRequest) -> Result<Option<Technology>, AppError> {
        let technology = sqlx::query_as::<_, Technology>(
            r#"
            UPDATE technologies
            SET name = $1, category = $2, icon_url = $3, sort_order = $4
            WHERE id = $5
            RETURNING id, name, category, icon_url, sort_order
            "#,
        )
        .bind(&request.name)
        .bind(&request.category)
        .bind(&request.icon_url)
        .bind(request.sort_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(technology)
    }

    async fn delete_technology(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM technologies WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
