use crate::database::security_log::SecurityLogRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::security_event::{NewSecurityEvent, UNKNOWN_EMAIL, security_events};
use crate::service::user_agent::classify;
use serde_json::Value as JsonValue;

/// Best-effort writer for `security_logs`.
///
/// Recording never fails from the caller's point of view: persistence errors
/// are reported through tracing and dropped.
pub struct SecurityRecorder<'a> {
    repo: &'a dyn SecurityLogRepository,
    context: &'a RequestContext,
}

impl<'a> SecurityRecorder<'a> {
    pub fn new(repo: &'a dyn SecurityLogRepository, context: &'a RequestContext) -> Self {
        Self { repo, context }
    }

    pub async fn record(&self, event_type: &str, details: JsonValue) {
        if let Err(err) = self.try_record(event_type, details).await {
            tracing::error!(
                category = "security",
                event_type = event_type,
                ip = %self.context.ip_address,
                error = ?err,
                "failed to persist security event"
            );
        }
    }

    async fn try_record(&self, event_type: &str, details: JsonValue) -> Result<(), AppError> {
        let event = build_event(event_type, details, self.context);
        trace_event(&event);
        self.repo.insert_security_event(&event).await
    }
}

pub(crate) fn build_event(event_type: &str, details: JsonValue, context: &RequestContext) -> NewSecurityEvent {
    let email = details
        .get("email")
        .and_then(JsonValue::as_str)
        .filter(|email| !email.is_empty())
        .unwrap_or(UNKNOWN_EMAIL)
        .to_string();

    NewSecurityEvent {
        event_type: event_type.to_string(),
        email,
        ip_address: context.ip_address.clone(),
        device_type: classify(&context.user_agent).device_type,
        user_agent: context.user_agent.clone(),
        details,
    }
}

fn trace_event(event: &NewSecurityEvent) {
    match event.event_type.as_str() {
        security_events::LOGIN_FAIL | security_events::BRUTE_FORCE_BLOCKED | security_events::INTRUSION_ATTEMPT => {
            tracing::warn!(
                category = "security",
                event_type = %event.event_type,
                email = %event.email,
                ip = %event.ip_address,
                device = %event.device_type,
                "security event"
            );
        }
        _ => {
            tracing::info!(
                category = "security",
                event_type = %event.event_type,
                email = %event.email,
                ip = %event.ip_address,
                device = %event.device_type,
                "security event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockRepository, request_context};
    use serde_json::json;

    #[test]
    fn email_defaults_to_placeholder() {
        let context = request_context("10.0.0.1", "curl/8.0");
        let event = build_event(security_events::LOGIN_FAIL, json!({"reason": "bad password"}), &context);
        assert_eq!(event.email, "N/A");

        let event = build_event(security_events::LOGIN_FAIL, json!({"email": 42}), &context);
        assert_eq!(event.email, "N/A");
    }

    #[test]
    fn device_type_comes_from_user_agent() {
        let context = request_context("10.0.0.1", "Mozilla/5.0 (Linux; Android 14) Mobile Safari/537.36");
        let event = build_event(security_events::LOGIN_SUCCESS, json!({"email": "owner@example.com"}), &context);
        assert_eq!(event.device_type, "Mobile");
        assert_eq!(event.email, "owner@example.com");
        assert_eq!(event.ip_address, "10.0.0.1");
    }

    #[tokio::test]
    async fn records_event_with_details_verbatim() {
        let repo = MockRepository::new();
        let context = request_context("192.0.2.10", "Mozilla/5.0 (Windows NT 10.0) Firefox/125.0");
        let details = json!({"email": "visitor@example.com", "name": "Visitor"});

        SecurityRecorder::new(&repo, &context)
            .record(security_events::CONTACT_MESSAGE_RECEIVED, details.clone())
            .await;

        let events = repo.security_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "CONTACT_MESSAGE_RECEIVED");
        assert_eq!(events[0].details, details);
        assert_eq!(events[0].device_type, "Desktop");
        assert_eq!(events[0].user_agent, "Mozilla/5.0 (Windows NT 10.0) Firefox/125.0");
    }

    #[tokio::test]
    async fn never_fails_when_store_is_down() {
        let repo = MockRepository::failing();
        let context = request_context("192.0.2.10", "unknown");

        SecurityRecorder::new(&repo, &context).record(security_events::LOGIN_FAIL, json!({})).await;

        assert!(repo.security_events().is_empty());
    }
}
