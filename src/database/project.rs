use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::project::{Project, ProjectMetrics, ProjectRequest};
use uuid::Uuid;

const PROJECT_COLUMNS: &str = "id, title, description, content, tech_stack, repo_url, live_url, image_url, is_featured, views, likes, created_at, updated_at";

#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
    async fn create_project(&self, request: &ProjectRequest) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, request: &ProjectRequest) -> Result<Option<Project>, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, AppError>;
    async fn increment_project_views(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError>;
    async fn increment_project_likes(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError>;
    async fn reset_project_metrics(&self) -> Result<u64, AppError>;
}

#[async_trait::async_trait]
impl ProjectRepository for PostgresRepository {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY is_featured DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn create_project(&self, request: &ProjectRequest) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (title, description, content, tech_stack, repo_url, live_url, image_url, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.content)
        .bind(&request.tech_stack)
        .bind(&request.repo_url)
        .bind(&request.live_url)
        .bind(&request.image_url)
        .bind(request.is_featured)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn update_project(&self, id: &Uuid, request: &ProjectRequest) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects
            SET title = $1, description = $2, content = $3, tech_stack = $4,
                repo_url = $5, live_url = $6, image_url = $7, is_featured = $8,
                updated_at = NOW()
            WHERE id = $9
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.content)
        .bind(&request.tech_stack)
        .bind(&request.repo_url)
        .bind(&request.live_url)
        .bind(&request.image_url)
        .bind(request.is_featured)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ANY($1)").bind(ids).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn increment_project_views(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError> {
        let metrics = sqlx::query_as::<_, ProjectMetrics>("UPDATE projects SET views = views + 1 WHERE id = $1 RETURNING views, likes")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(metrics)
    }

    async fn increment_project_likes(&self, id: &Uuid) -> Result<Option<ProjectMetrics>, AppError> {
        let metrics = sqlx::query_as::<_, ProjectMetrics>("UPDATE projects SET likes = likes + 1 WHERE id = $1 RETURNING views, likes")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(metrics)
    }

    async fn reset_project_metrics(&self) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE projects SET views = 0, likes = 0").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
