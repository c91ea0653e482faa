use crate::config::Config;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::{Object, Responses, SecurityRequirement, SecurityScheme, SecuritySchemeData};
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "user";

/// The authenticated administrator behind the current request.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// Resolves the session when there is one. Never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

pub(crate) fn session_cookie_value(session_id: &Uuid, user_id: &Uuid) -> String {
    format!("{}:{}", session_id, user_id)
}

pub(crate) fn parse_session_cookie_value(value: &str) -> Option<(Uuid, Uuid)> {
    let (session_id_str, user_id_str) = value.split_once(':')?;
    let session_id = Uuid::parse_str(session_id_str).ok()?;
    let user_id = Uuid::parse_str(user_id_str).ok()?;
    Some((session_id, user_id))
}

async fn resolve_current_user(req: &Request<'_>) -> RequestOutcome<CurrentUser, AppError> {
    let Some(cookie) = req.cookies().get_private(SESSION_COOKIE) else {
        return Outcome::Error((Status::Unauthorized, AppError::Unauthorized));
    };
    let Some((session_id, user_id)) = parse_session_cookie_value(cookie.value()) else {
        return Outcome::Error((Status::Unauthorized, AppError::Unauthorized));
    };

    let pool = match req.rocket().state::<PgPool>() {
        Some(pool) => pool,
        None => return Outcome::Error((Status::InternalServerError, AppError::Unauthorized)),
    };
    let repo = PostgresRepository { pool: pool.clone() };

    match repo.get_active_session_user(&session_id, &user_id).await {
        // A session outlives removal from `admin.emails`, so the list is checked on every request.
        Ok(Some(user)) if req.rocket().state::<Config>().is_some_and(|config| !config.admin.is_admin(&user.email)) => {
            Outcome::Error((Status::Forbidden, AppError::Forbidden))
        }
        Ok(Some(user)) => {
            let current_user = CurrentUser { id: user.id, email: user.email };
            req.local_cache(|| Some(current_user.clone()));
            Outcome::Success(current_user)
        }
        Ok(None) => {
            let _ = repo.delete_session_if_expired(&session_id).await;
            Outcome::Error((Status::Unauthorized, AppError::Unauthorized))
        }
        Err(err) => Outcome::Error((Status::InternalServerError, err)),
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        resolve_current_user(req).await
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        match resolve_current_user(req).await {
            Outcome::Success(user) => Outcome::Success(OptionalUser(Some(user))),
            _ => Outcome::Success(OptionalUser(None)),
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for CurrentUser {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        let security_scheme = SecurityScheme {
            description: Some("Cookie-based authentication. Log in via POST /auth/login to obtain the session cookie.".to_string()),
            data: SecuritySchemeData::ApiKey {
                name: SESSION_COOKIE.to_string(),
                location: "cookie".to_string(),
            },
            extensions: Object::default(),
        };

        let mut security_req = SecurityRequirement::new();
        security_req.insert("cookieAuth".to_string(), Vec::new());

        Ok(RequestHeaderInput::Security("cookieAuth".to_string(), security_scheme, security_req))
    }

    fn get_responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        use rocket_okapi::okapi::openapi3::{RefOr, Response};
        let mut responses = Responses::default();
        responses.responses.insert(
            "401".to_string(),
            RefOr::Object(Response {
                description: "Unauthorized - Authentication required".to_string(),
                ..Default::default()
            }),
        );
        Ok(responses)
    }
}

impl<'a> OpenApiFromRequest<'a> for OptionalUser {
    fn from_request_input(_gen: &mut OpenApiGenerator, _name: String, _required: bool) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
