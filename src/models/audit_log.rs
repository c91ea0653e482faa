use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Verbs recorded in `audit_logs.action`.
pub mod audit_actions {
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
    pub const APPROVE: &str = "APPROVE";
    pub const TOGGLE_FEATURED: &str = "TOGGLE_FEATURED";
    pub const RESET_METRICS: &str = "RESET_METRICS";
    pub const BULK_DELETE: &str = "BULK_DELETE";
}

/// Logical tables named in `audit_logs.table_name`.
pub mod audit_tables {
    pub const PROJECTS: &str = "projects";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const CONTACT_MESSAGES: &str = "contact_messages";
    pub const TECHNOLOGIES: &str = "technologies";
    pub const EXPERIENCE: &str = "experience";
    pub const EDUCATION: &str = "education";
}

/// Sentinel record ids for operations that do not target a single row.
pub mod record_ids {
    pub const MULTIPLE: &str = "multiple";
    pub const GLOBAL: &str = "global";
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub table_name: String,
    pub record_id: String,
    pub old_data: Option<JsonValue>,
    pub new_data: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLogEntry {
    pub user_id: Uuid,
    pub action: String,
    pub table_name: String,
    pub record_id: String,
    pub old_data: Option<JsonValue>,
    pub new_data: Option<JsonValue>,
}
