use crate::auth::CurrentUser;
use crate::database::audit_log::AuditLogRepository;
use crate::database::project::ProjectRepository;
use crate::error::app_error::AppError;
use crate::models::audit_log::{audit_actions, audit_tables, record_ids};
use crate::models::project::{Project, ProjectMetrics, ProjectRequest};
use crate::service::audit::{AuditRecorder, snapshot};
use serde_json::json;
use uuid::Uuid;

pub trait ProjectStore: ProjectRepository + AuditLogRepository {}

impl<T> ProjectStore for T where T: ProjectRepository + AuditLogRepository {}

pub struct ProjectService<'a, R: ProjectStore> {
    repo: &'a R,
}

impl<'a, R: ProjectStore> ProjectService<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    fn audit<'b>(&'b self, actor: Option<&'b CurrentUser>) -> AuditRecorder<'b> {
        AuditRecorder::new(self.repo, actor)
    }

    pub async fn list(&self) -> Result<Vec<Project>, AppError> {
        self.repo.list_projects().await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Project, AppError> {
        self.repo.get_project_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, request: &ProjectRequest, actor: &CurrentUser) -> Result<Project, AppError> {
        let project = self.repo.create_project(request).await?;

        self.audit(Some(actor))
            .record(audit_actions::CREATE, audit_tables::PROJECTS, &project.id.to_string(), None, snapshot(&project))
            .await;

        Ok(project)
    }

    pub async fn update(&self, id: &Uuid, request: &ProjectRequest, actor: &CurrentUser) -> Result<Project, AppError> {
        let before = self.get(id).await?;
        let updated = self.repo.update_project(id, request).await?.ok_or_else(not_found)?;

        self.audit(Some(actor))
            .record(audit_actions::UPDATE, audit_tables::PROJECTS, &id.to_string(), snapshot(&before), snapshot(&updated))
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid, actor: &CurrentUser) -> Result<(), AppError> {
        let before = self.get(id).await?;
        if !self.repo.delete_project(id).await? {
            return Err(not_found());
        }

        self.audit(Some(actor))
            .record(audit_actions::DELETE, audit_tables::PROJECTS, &id.to_string(), snapshot(&before), None)
            .await;

        Ok(())
    }

    /// One audit entry for the whole batch, keyed `multiple`.
    pub async fn bulk_delete(&self, ids: &[Uuid], actor: &CurrentUser) -> Result<u64, AppError> {
        let deleted = self.repo.delete_projects(ids).await?;

        self.audit(Some(actor))
            .record(
                audit_actions::BULK_DELETE,
                audit_tables::PROJECTS,
                record_ids::MULTIPLE,
                Some(json!({ "ids": ids })),
                Some(json!({ "deleted": deleted })),
            )
            .await;

        Ok(deleted)
    }

    /// Anonymous page view. Not audited.
    pub async fn record_view(&self, id: &Uuid) -> Result<ProjectMetrics, AppError> {
        self.repo.increment_project_views(id).await?.ok_or_else(not_found)
    }

    /// Counter bump: no before-state read, audited only when an admin is signed in.
    pub async fn like(&self, id: &Uuid, actor: Option<&CurrentUser>) -> Result<ProjectMetrics, AppError> {
        let metrics = self.repo.increment_project_likes(id).await?.ok_or_else(not_found)?;

        self.audit(actor)
            .record(audit_actions::UPDATE, audit_tables::PROJECTS, &id.to_string(), None, Some(json!({ "likes": metrics.likes })))
            .await;

        Ok(metrics)
    }

    pub async fn reset_metrics(&self, actor: &CurrentUser) -> Result<u64, AppError> {
        let affected = self.repo.reset_project_metrics().await?;

        self.audit(Some(actor))
            .record(
                audit_actions::RESET_METRICS,
                audit_tables::PROJECTS,
                record_ids::GLOBAL,
                None,
                Some(json!({ "views": 0, "likes": 0 })),
            )
            .await;

        Ok(affected)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}
