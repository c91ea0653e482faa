use crate::database::audit_log::AuditLogRepository;
use crate::database::security_log::SecurityLogRepository;
use crate::models::audit_log::AuditLogEntry;
use crate::models::audit_trail::{LogPage, SecurityLogEntry};
use crate::service::user_agent::classify;

/// Read side of the admin terminal: newest entries of both logs.
pub struct AuditTrailService<'a> {
    security_repo: &'a dyn SecurityLogRepository,
    audit_repo: &'a dyn AuditLogRepository,
    page_size: i64,
}

impl<'a> AuditTrailService<'a> {
    pub fn new(security_repo: &'a dyn SecurityLogRepository, audit_repo: &'a dyn AuditLogRepository, page_size: i64) -> Self {
        Self {
            security_repo,
            audit_repo,
            page_size,
        }
    }

    /// Security events, newest first, each with its user agent classified at read time.
    pub async fn security_logs(&self) -> LogPage<SecurityLogEntry> {
        match self.security_repo.list_recent_security_events(self.page_size).await {
            Ok(events) => LogPage::ok(
                events
                    .into_iter()
                    .map(|event| SecurityLogEntry {
                        ua_parsed: classify(&event.user_agent),
                        event,
                    })
                    .collect(),
            ),
            Err(err) => {
                tracing::error!(category = "security", error = ?err, "failed to read security logs");
                LogPage::failed(err.to_string())
            }
        }
    }

    pub async fn audit_logs(&self) -> LogPage<AuditLogEntry> {
        match self.audit_repo.list_recent_audit_logs(self.page_size).await {
            Ok(entries) => LogPage::ok(entries),
            Err(err) => {
                tracing::error!(category = "audit", error = ?err, "failed to read audit logs");
                LogPage::failed(err.to_string())
            }
        }
    }
}
