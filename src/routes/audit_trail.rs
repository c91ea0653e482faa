use crate::auth::CurrentUser;
use crate::config::Config;
use crate::database::postgres_repository::PostgresRepository;
use crate::models::audit_log::AuditLogEntry;
use crate::models::audit_trail::{LogPage, SecurityLogEntry};
use crate::service::audit_trail::AuditTrailService;
use rocket::serde::json::Json;
use rocket::{State, get};
use rocket_okapi::openapi;
use sqlx::PgPool;

/// Newest security events with their parsed user agent
#[openapi(tag = "Audit")]
#[get("/security")]
pub async fn get_security_logs(pool: &State<PgPool>, config: &State<Config>, _current_user: CurrentUser) -> Json<LogPage<SecurityLogEntry>> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Json(AuditTrailService::new(&repo, &repo, config.audit_trail.page_size).security_logs().await)
}

/// Newest admin mutations
#[openapi(tag = "Audit")]
#[get("/trail")]
pub async fn get_audit_logs(pool: &State<PgPool>, config: &State<Config>, _current_user: CurrentUser) -> Json<LogPage<AuditLogEntry>> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Json(AuditTrailService::new(&repo, &repo, config.audit_trail.page_size).audit_logs().await)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![get_security_logs, get_audit_logs]
}
