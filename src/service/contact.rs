use crate::auth::CurrentUser;
use crate::config::EmailConfig;
use crate::database::audit_log::AuditLogRepository;
use crate::database::contact::ContactRepository;
use crate::database::security_log::SecurityLogRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::audit_log::{audit_actions, audit_tables};
use crate::models::contact::{ContactMessage, ContactRequest};
use crate::models::security_event::security_events;
use crate::service::audit::{AuditRecorder, snapshot};
use crate::service::email::EmailService;
use crate::service::security::SecurityRecorder;
use serde_json::json;
use uuid::Uuid;

pub const CONTACT_ACCEPTED_MESSAGE: &str = "Thanks for reaching out. I'll get back to you soon.";

pub trait ContactStore: ContactRepository + SecurityLogRepository + AuditLogRepository {}

impl<T> ContactStore for T where T: ContactRepository + SecurityLogRepository + AuditLogRepository {}

pub struct ContactService<'a, R: ContactStore> {
    repo: &'a R,
}

impl<'a, R: ContactStore> ContactService<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Store a public message. Honeypot hits get the same answer and leave no trace.
    pub async fn submit(&self, request: &ContactRequest, context: &RequestContext, email: &EmailConfig) -> Result<&'static str, AppError> {
        if request.is_bot() {
            tracing::info!(category = "security", ip = %context.ip_address, "honeypot filled, dropping contact message");
            return Ok(CONTACT_ACCEPTED_MESSAGE);
        }

        let message = self.repo.create_contact_message(request).await?;

        SecurityRecorder::new(self.repo, context)
            .record(
                security_events::CONTACT_MESSAGE_RECEIVED,
                json!({"email": message.email, "name": message.name, "message_id": message.id}),
            )
            .await;

        if let Err(err) = EmailService::new(email.clone()).send_contact_notification(&message).await {
            tracing::error!(error = ?err, message_id = %message.id, "failed to send contact notification");
        }

        Ok(CONTACT_ACCEPTED_MESSAGE)
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        self.repo.list_contact_messages().await
    }

    pub async fn mark_read(&self, id: &Uuid, actor: &CurrentUser) -> Result<ContactMessage, AppError> {
        let before = self.find(id).await?;
        let updated = self
            .repo
            .mark_contact_message_read(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::UPDATE, audit_tables::CONTACT_MESSAGES, &id.to_string(), snapshot(&before), snapshot(&updated))
            .await;

        Ok(updated)
    }

    pub async fn delete(&self, id: &Uuid, actor: &CurrentUser) -> Result<(), AppError> {
        let before = self.find(id).await?;
        if !self.repo.delete_contact_message(id).await? {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        AuditRecorder::new(self.repo, Some(actor))
            .record(audit_actions::DELETE, audit_tables::CONTACT_MESSAGES, &id.to_string(), snapshot(&before), None)
            .await;

        Ok(())
    }

    async fn find(&self, id: &Uuid) -> Result<ContactMessage, AppError> {
        self.repo
            .get_contact_message_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Message not found".to_string()))
    }
}
