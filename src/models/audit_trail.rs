use crate::models::security_event::SecurityEvent;
use crate::models::user_agent::ParsedUserAgent;
use schemars::JsonSchema;
use serde::Serialize;

/// A stored security event plus the classification of its user agent, computed on read.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SecurityLogEntry {
    #[serde(flatten)]
    pub event: SecurityEvent,
    pub ua_parsed: ParsedUserAgent,
}

/// Newest-first slice of a log. A failed read yields no entries and a diagnostic in `error`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LogPage<T> {
    pub entries: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> LogPage<T> {
    pub fn ok(entries: Vec<T>) -> Self {
        Self { entries, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}
