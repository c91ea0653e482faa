use crate::auth::CurrentUser;
use crate::database::audit_log::AuditLogRepository;
use crate::database::security_log::SecurityLogRepository;
use crate::database::testimonial::TestimonialRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::audit_log::{audit_actions, audit_tables};
use crate::models::security_event::security_events;
use crate::models::testimonial::{Testimonial, TestimonialRequest};
use crate::service::audit::{AuditRecorder, snapshot};
use crate::service::security::SecurityRecorder;
use serde_json::json;
use uuid::Uuid;

pub trait TestimonialStore: TestimonialRepository + SecurityLogRepository + AuditLogRepository {}

impl<T> TestimonialStore for T where T: TestimonialRepository + SecurityLogRepository + AuditLogRepository {}

pub struct TestimonialService<'a, R: TestimonialStore> {
    repo: &'a R,
}

impl<'a, R: TestimonialStore> TestimonialService<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Public submission. New testimonials wait for approval.
    pub async fn submit(&self, request: &TestimonialRequest, context: &RequestContext) -> Result<Testimonial, AppError> {
        let testimonial = self.repo.create_testimonial(request).await?;

        SecurityRecorder::new(self.repo, context)
            .record(
                security_events::TESTIMONIAL_SUBMITTED,
                json!({
                    "email": testimonial.email,
                    "author_name": testimonial.author_name,
                    "testimonial_id": testimonial.id,
                    "rating": testimonial.rating,
                }),
            )
            .await;

        Ok(testimonial)
    }

    pub async fn list_public(&self) -> Result<Vec<Testimonial>, AppError> {
        self.repo.list_approved_testimonials().await
    }

    pub async fn list_all(&self) -> Result<Vec<Testimonial>, AppError> {
        self.repo.list_all_testimonials().await
    }

    pub async fn approve(&self, id: &Uuid, actor: &CurrentUser) -> Result<Testimonial, AppError> {
        let before = self.find(id).await?;
        let approved = self.repo.approve_testimonial(id).await?.ok_or_else(not_found)?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::APPROVE, audit_tables::TESTIMONIALS, &id.to_string(), snapshot(&before), snapshot(&approved))
            .await;

        Ok(approved)
    }

    /// Flip `is_featured` and return the new state.
    pub async fn toggle_featured(&self, id: &Uuid, actor: &CurrentUser) -> Result<Testimonial, AppError> {
        let before = self.find(id).await?;
        let toggled = self.repo.set_testimonial_featured(id, !before.is_featured).await?.ok_or_else(not_found)?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(
                audit_actions::TOGGLE_FEATURED,
                audit_tables::TESTIMONIALS,
                &id.to_string(),
                snapshot(&before),
                snapshot(&toggled),
            )
            .await;

        Ok(toggled)
    }

    pub async fn delete(&self, id: &Uuid, actor: &CurrentUser) -> Result<(), AppError> {
        let before = self.find(id).await?;
        if !self.repo.delete_testimonial(id).await? {
            return Err(not_found());
        }

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::DELETE, audit_tables::TESTIMONIALS, &id.to_string(), snapshot(&before), None)
            .await;

        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<Testimonial, AppError> {
        self.repo.get_testimonial_by_id(id).await?.ok_or_else(not_found)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Testimonial not found".to_string())
}
