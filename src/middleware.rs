use crate::models::security_event::UNKNOWN_HEADER;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, HeaderMap};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{Data, Response};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use tracing::{info, warn};
use uuid::Uuid;

/// Request ID that is attached to every request for tracking
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// Fairing that adds request ID to all requests and logs request/response information
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let request_id = RequestId::new();
        let method = request.method();
        let uri = request.uri();

        request.local_cache(|| Some(request_id.clone()));

        info!(
            request_id = %request_id.0,
            method = %method,
            uri = %uri,
            "incoming request"
        );
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let request_id = request
            .local_cache(|| None::<RequestId>)
            .as_ref()
            .map(|r| r.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let status = response.status();
        let method = request.method();
        let uri = request.uri();

        response.set_header(Header::new("X-Request-Id", request_id.clone()));

        response.set_header(Header::new("X-Content-Type-Options", "nosniff"));
        response.set_header(Header::new("X-Frame-Options", "DENY"));
        response.set_header(Header::new("Cache-Control", "no-store"));

        if status.class().is_server_error() || status.class().is_client_error() {
            warn!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                status = %status.code,
                "request completed with error"
            );
        } else {
            info!(
                request_id = %request_id,
                method = %method,
                uri = %uri,
                status = %status.code,
                "request completed"
            );
        }
    }
}

// ── RequestContext guard ──────────────────────────────────────────────────────

/// Origin of the current request as seen by the security log.
///
/// The IP is the first `X-Forwarded-For` entry, then `X-Real-IP`, since the API sits behind a proxy.
/// Both fields fall back to `"unknown"` and the guard never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub ip_address: String,
    pub user_agent: String,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap<'_>) -> Self {
        let forwarded = headers
            .get_one("X-Forwarded-For")
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        let real_ip = headers.get_one("X-Real-IP").map(str::trim).filter(|ip| !ip.is_empty());
        let ip_address = forwarded.or(real_ip).unwrap_or(UNKNOWN_HEADER).to_string();

        let user_agent = headers
            .get_one("User-Agent")
            .map(str::trim)
            .filter(|ua| !ua.is_empty())
            .unwrap_or(UNKNOWN_HEADER)
            .to_string();

        Self { ip_address, user_agent }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestContext {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, ()> {
        Outcome::Success(RequestContext::from_headers(req.headers()))
    }
}

impl<'a> OpenApiFromRequest<'a> for RequestContext {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap<'static> {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.add(Header::new(*name, *value));
        }
        map
    }

    #[test]
    fn test_request_id_creation() {
        let request_id = RequestId::new();
        assert!(!request_id.0.is_empty());
        assert!(Uuid::parse_str(&request_id.0).is_ok());
    }

    #[test]
    fn test_request_ids_are_unique() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1.0, id2.0);
    }

    #[test]
    fn context_takes_first_forwarded_address() {
        let context = RequestContext::from_headers(&headers(&[
            ("X-Forwarded-For", " 1.2.3.4 , 10.0.0.1"),
            ("User-Agent", "Mozilla/5.0 Firefox/125.0"),
        ]));
        assert_eq!(context.ip_address, "1.2.3.4");
        assert_eq!(context.user_agent, "Mozilla/5.0 Firefox/125.0");
    }

    #[test]
    fn context_falls_back_to_real_ip() {
        let context = RequestContext::from_headers(&headers(&[("X-Real-IP", "5.6.7.8")]));
        assert_eq!(context.ip_address, "5.6.7.8");

        let context = RequestContext::from_headers(&headers(&[("X-Forwarded-For", " "), ("X-Real-IP", "5.6.7.8")]));
        assert_eq!(context.ip_address, "5.6.7.8");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let context = RequestContext::from_headers(&headers(&[("X-Real-IP", "5.6.7.8"), ("X-Forwarded-For", "1.2.3.4")]));
        assert_eq!(context.ip_address, "1.2.3.4");
    }

    #[test]
    fn context_defaults_to_unknown() {
        let context = RequestContext::from_headers(&headers(&[]));
        assert_eq!(context.ip_address, "unknown");
        assert_eq!(context.user_agent, "unknown");

        let context = RequestContext::from_headers(&headers(&[("X-Forwarded-For", ""), ("User-Agent", "  ")]));
        assert_eq!(context.ip_address, "unknown");
        assert_eq!(context.user_agent, "unknown");
    }
}
