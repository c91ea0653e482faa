use crate::auth::CurrentUser;
use crate::database::audit_log::AuditLogRepository;
use crate::error::app_error::AppError;
use crate::models::audit_log::NewAuditLogEntry;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Best-effort writer for `audit_logs`.
///
/// Call only after the mutation it describes has been persisted. Anonymous
/// calls write nothing, and persistence errors are logged and dropped.
#[derive(Clone, Copy)]
pub struct AuditRecorder<'a> {
    repo: &'a dyn AuditLogRepository,
    actor: Option<&'a CurrentUser>,
}

impl<'a> AuditRecorder<'a> {
    pub fn new(repo: &'a dyn AuditLogRepository, actor: Option<&'a CurrentUser>) -> Self {
        Self { repo, actor }
    }

    pub async fn record(&self, action: &str, table: &str, record_id: &str, old_data: Option<JsonValue>, new_data: Option<JsonValue>) {
        let Some(actor) = self.actor else {
            tracing::debug!(category = "audit", action = action, table = table, "no authenticated actor, skipping audit entry");
            return;
        };

        let entry = NewAuditLogEntry {
            user_id: actor.id,
            action: action.to_string(),
            table_name: table.to_string(),
            record_id: record_id.to_string(),
            old_data,
            new_data,
        };

        if let Err(err) = self.try_record(&entry).await {
            tracing::error!(
                category = "audit",
                action = action,
                table = table,
                record_id = record_id,
                user_id = %actor.id,
                error = ?err,
                "failed to persist audit entry"
            );
        }
    }

    async fn try_record(&self, entry: &NewAuditLogEntry) -> Result<(), AppError> {
        tracing::info!(
            category = "audit",
            action = %entry.action,
            table = %entry.table_name,
            record_id = %entry.record_id,
            user_id = %entry.user_id,
            "audit event"
        );
        self.repo.insert_audit_log(entry).await
    }
}

/// Whole-object snapshot for `old_data` / `new_data`.
pub fn snapshot<T: Serialize>(value: &T) -> Option<JsonValue> {
    match serde_json::to_value(value) {
        Ok(json) => Some(json),
        Err(err) => {
            tracing::warn!(category = "audit", error = %err, "could not serialize audit snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit_log::{audit_actions, audit_tables};
    use crate::test_utils::{MockRepository, admin_user};
    use serde_json::json;

    #[tokio::test]
    async fn writes_exact_entry_for_actor() {
        let repo = MockRepository::new();
        let actor = admin_user();

        AuditRecorder::new(&repo, Some(&actor))
            .record(audit_actions::UPDATE, audit_tables::PROJECTS, "p1", Some(json!({"title": "A"})), Some(json!({"title": "B"})))
            .await;

        let entries = repo.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, actor.id);
        assert_eq!(entries[0].action, "UPDATE");
        assert_eq!(entries[0].table_name, "projects");
        assert_eq!(entries[0].record_id, "p1");
        assert_eq!(entries[0].old_data, Some(json!({"title": "A"})));
        assert_eq!(entries[0].new_data, Some(json!({"title": "B"})));
    }

    #[tokio::test]
    async fn anonymous_call_writes_nothing() {
        let repo = MockRepository::new();

        AuditRecorder::new(&repo, None)
            .record(audit_actions::DELETE, audit_tables::PROJECTS, "p1", None, None)
            .await;

        assert!(repo.audit_entries().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let repo = MockRepository::failing();
        let actor = admin_user();

        AuditRecorder::new(&repo, Some(&actor))
            .record(audit_actions::CREATE, audit_tables::TECHNOLOGIES, "t1", None, Some(json!({})))
            .await;

        assert!(repo.audit_entries().is_empty());
    }

    #[test]
    fn snapshot_serializes_whole_object() {
        #[derive(Serialize)]
        struct Row {
            id: u8,
            title: &'static str,
        }
        assert_eq!(snapshot(&Row { id: 1, title: "A" }), Some(json!({"id": 1, "title": "A"})));
    }
}
