use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Event types written to `security_logs`. The column is plain text, so new kinds can be added freely.
pub mod security_events {
    // Authentication events
    pub const LOGIN_FAIL: &str = "LOGIN_FAIL";
    pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
    pub const BRUTE_FORCE_BLOCKED: &str = "BRUTE_FORCE_BLOCKED";
    pub const INTRUSION_ATTEMPT: &str = "INTRUSION_ATTEMPT";

    // Public submissions
    pub const CONTACT_MESSAGE_RECEIVED: &str = "CONTACT_MESSAGE_RECEIVED";
    pub const TESTIMONIAL_SUBMITTED: &str = "TESTIMONIAL_SUBMITTED";

    // Credential changes
    pub const PASSWORD_RESET_REQUEST: &str = "PASSWORD_RESET_REQUEST";
    pub const PASSWORD_UPDATE_SUCCESS: &str = "PASSWORD_UPDATE_SUCCESS";
}

/// Placeholder stored when the event carries no email.
pub const UNKNOWN_EMAIL: &str = "N/A";

/// Placeholder stored when a request header is absent.
pub const UNKNOWN_HEADER: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct SecurityEvent {
    pub id: Uuid,
    pub event_type: String,
    pub email: String,
    pub ip_address: String,
    pub device_type: String,
    pub user_agent: String,
    pub details: JsonValue,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSecurityEvent {
    pub event_type: String,
    pub email: String,
    pub ip_address: String,
    pub device_type: String,
    pub user_agent: String,
    pub details: JsonValue,
}
