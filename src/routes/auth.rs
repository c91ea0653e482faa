use crate::auth::{CurrentUser, SESSION_COOKIE, parse_session_cookie_value, session_cookie_value};
use crate::config::Config;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::password_reset::{PasswordResetConfirmRequest, PasswordResetRequest, PasswordResetResponse};
use crate::models::user::{ChangePasswordRequest, LoginRequest, UserResponse};
use crate::service::auth::AuthService;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::serde::json::Json;
use rocket::time::Duration as CookieDuration;
use rocket::{State, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use validator::Validate;

pub fn build_session_cookie(value: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(ttl_seconds))
        .build()
}

/// Log in to the dashboard
#[openapi(tag = "Auth")]
#[post("/login", data = "<payload>")]
pub async fn login(
    pool: &State<PgPool>,
    config: &State<Config>,
    context: RequestContext,
    cookies: &CookieJar<'_>,
    payload: Json<LoginRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let success = AuthService::new(&repo, config.inner(), &context).login(&payload).await?;

    let value = session_cookie_value(&success.session.id, &success.user.id);
    cookies.add_private(build_session_cookie(value, config.session.ttl_seconds, config.session.cookie_secure));

    Ok(Json(UserResponse::from(&success.user)))
}

/// Drop the current session, if any
#[openapi(tag = "Auth")]
#[post("/logout")]
pub async fn logout(pool: &State<PgPool>, config: &State<Config>, context: RequestContext, cookies: &CookieJar<'_>) -> Result<Status, AppError> {
    if let Some((session_id, _)) = cookies.get_private(SESSION_COOKIE).and_then(|cookie| parse_session_cookie_value(cookie.value())) {
        let repo = PostgresRepository { pool: pool.inner().clone() };
        AuthService::new(&repo, config.inner(), &context).logout(&session_id).await?;
    }

    cookies.remove_private(Cookie::build(SESSION_COOKIE).path("/").build());
    Ok(Status::Ok)
}

/// Request a password reset link
#[openapi(tag = "Auth")]
#[post("/password-reset/request", data = "<payload>")]
pub async fn request_password_reset(
    pool: &State<PgPool>,
    config: &State<Config>,
    context: RequestContext,
    payload: Json<PasswordResetRequest>,
) -> Result<Json<PasswordResetResponse>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let message = AuthService::new(&repo, config.inner(), &context).request_password_reset(&payload.email).await?;

    Ok(Json(PasswordResetResponse { message: message.to_string() }))
}

/// Set a new password with a reset token
#[openapi(tag = "Auth")]
#[post("/password-reset/confirm", data = "<payload>")]
pub async fn confirm_password_reset(
    pool: &State<PgPool>,
    config: &State<Config>,
    context: RequestContext,
    payload: Json<PasswordResetConfirmRequest>,
) -> Result<Json<PasswordResetResponse>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    AuthService::new(&repo, config.inner(), &context).confirm_password_reset(&payload).await?;

    Ok(Json(PasswordResetResponse {
        message: "Password updated. Please log in again.".to_string(),
    }))
}

/// Change the signed-in administrator's password
#[openapi(tag = "Auth")]
#[put("/password", data = "<payload>")]
pub async fn change_password(
    pool: &State<PgPool>,
    config: &State<Config>,
    context: RequestContext,
    current_user: CurrentUser,
    payload: Json<ChangePasswordRequest>,
) -> Result<Status, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    AuthService::new(&repo, config.inner(), &context).change_password(&current_user, &payload).await?;

    Ok(Status::Ok)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![login, logout, request_password_reset, confirm_password_reset, change_password]
}
