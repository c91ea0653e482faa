use crate::auth::CurrentUser;
use crate::database::audit_log::AuditLogRepository;
use crate::database::technology::TechnologyRepository;
use crate::database::timeline::TimelineRepository;
use crate::error::app_error::AppError;
use crate::models::audit_log::{audit_actions, audit_tables};
use crate::models::technology::{Technology, TechnologyRequest};
use crate::models::timeline::{TimelineEntry, TimelineEntryRequest, TimelineKind};
use crate::service::audit::{AuditRecorder, snapshot};
use uuid::Uuid;

pub trait ProfileStore: TechnologyRepository + TimelineRepository + AuditLogRepository {}

impl<T> ProfileStore for T where T: TechnologyRepository + TimelineRepository + AuditLogRepository {}

/// About-page content: the tech stack plus the experience and education timelines.
pub struct ProfileService<'a, R: ProfileStore> {
    repo: &'a R,
}

impl<'a, R: ProfileStore> ProfileService<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        self.repo.list_technologies().await
    }

    pub async fn create_technology(&self, request: &TechnologyRequest, actor: &CurrentUser) -> Result<Technology, AppError> {
        let technology = self.repo.create_technology(request).await?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::CREATE, audit_tables::TECHNOLOGIES, &technology.id.to_string(), None, snapshot(&technology))
            .await;

        Ok(technology)
    }

    pub async fn update_technology(&self, id: &Uuid, request: &TechnologyRequest, actor: &CurrentUser) -> Result<Technology, AppError> {
        let before = self.repo.get_technology_by_id(id).await?.ok_or_else(technology_not_found)?;
        let updated = self.repo.update_technology(id, request).await?.ok_or_else(technology_not_found)?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::UPDATE, audit_tables::TECHNOLOGIES, &id.to_string(), snapshot(&before), snapshot(&updated))
            .await;

        Ok(updated)
    }

    pub async fn delete_technology(&self, id: &Uuid, actor: &CurrentUser) -> Result<(), AppError> {
        let before = self.repo.get_technology_by_id(id).await?.ok_or_else(technology_not_found)?;
        if !self.repo.delete_technology(id).await? {
            return Err(technology_not_found());
        }

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::DELETE, audit_tables::TECHNOLOGIES, &id.to_string(), snapshot(&before), None)
            .await;

        Ok(())
    }

    pub async fn list_timeline(&self, kind: TimelineKind) -> Result<Vec<TimelineEntry>, AppError> {
        self.repo.list_timeline_entries(kind).await
    }

    pub async fn create_timeline_entry(&self, kind: TimelineKind, request: &TimelineEntryRequest, actor: &CurrentUser) -> Result<TimelineEntry, AppError> {
        let entry = self.repo.create_timeline_entry(kind, request).await?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::CREATE, kind.table(), &entry.id.to_string(), None, snapshot(&entry))
            .await;

        Ok(entry)
    }

    pub async fn update_timeline_entry(
        &self,
        kind: TimelineKind,
        id: &Uuid,
        request: &TimelineEntryRequest,
        actor: &CurrentUser,
    ) -> Result<TimelineEntry, AppError> {
        let before = self.repo.get_timeline_entry(kind, id).await?.ok_or_else(|| timeline_not_found(kind))?;
        let updated = self
            .repo
            .update_timeline_entry(kind, id, request)
            .await?
            .ok_or_else(|| timeline_not_found(kind))?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::UPDATE, kind.table(), &id.to_string(), snapshot(&before), snapshot(&updated))
            .await;

        Ok(updated)
    }

    pub async fn delete_timeline_entry(&self, kind: TimelineKind, id: &Uuid, actor: &CurrentUser) -> Result<(), AppError> {
        let before = self.repo.get_timeline_entry(kind, id).await?.ok_or_else(|| timeline_not_found(kind))?;
        if !self.repo.delete_timeline_entry(kind, id).await? {
            return Err(timeline_not_found(kind));
        }

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::DELETE, kind.table(), &id.to_string(), snapshot(&before), None)
            .await;

        Ok(())
    }
}

fn technology_not_found() -> AppError {
    AppError::NotFound("Technology not found".to_string())
}

fn timeline_not_found(kind: TimelineKind) -> AppError {
    AppError::NotFound(format!("{} entry not found", kind.table()))
}
