use crate::auth::CurrentUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::timeline::{TimelineEntry, TimelineEntryRequest, TimelineKind};
use crate::service::profile::ProfileService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

// Experience and education are mounted separately but share these helpers.

async fn list(pool: &PgPool, kind: TimelineKind) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    let repo = PostgresRepository { pool: pool.clone() };
    Ok(Json(ProfileService::new(&repo).list_timeline(kind).await?))
}

async fn create(pool: &PgPool, kind: TimelineKind, current_user: &CurrentUser, payload: &TimelineEntryRequest) -> Result<Json<TimelineEntry>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.clone() };
    Ok(Json(ProfileService::new(&repo).create_timeline_entry(kind, payload, current_user).await?))
}

async fn update(
    pool: &PgPool,
    kind: TimelineKind,
    current_user: &CurrentUser,
    id: &str,
    payload: &TimelineEntryRequest,
) -> Result<Json<TimelineEntry>, AppError> {
    payload.validate()?;

    let uuid = Uuid::parse_str(id)?;
    let repo = PostgresRepository { pool: pool.clone() };
    Ok(Json(ProfileService::new(&repo).update_timeline_entry(kind, &uuid, payload, current_user).await?))
}

async fn remove(pool: &PgPool, kind: TimelineKind, current_user: &CurrentUser, id: &str) -> Result<Status, AppError> {
    let uuid = Uuid::parse_str(id)?;
    let repo = PostgresRepository { pool: pool.clone() };
    ProfileService::new(&repo).delete_timeline_entry(kind, &uuid, current_user).await?;
    Ok(Status::NoContent)
}

#[openapi(tag = "Experience")]
#[get("/")]
pub async fn list_experience(pool: &State<PgPool>) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    list(pool, TimelineKind::Experience).await
}

#[openapi(tag = "Experience")]
#[post("/", data = "<payload>")]
pub async fn create_experience(pool: &State<PgPool>, current_user: CurrentUser, payload: Json<TimelineEntryRequest>) -> Result<Json<TimelineEntry>, AppError> {
    create(pool, TimelineKind::Experience, &current_user, &payload).await
}

#[openapi(tag = "Experience")]
#[put("/<id>", data = "<payload>")]
pub async fn update_experience(
    pool: &State<PgPool>,
    current_user: CurrentUser,
    id: String,
    payload: Json<TimelineEntryRequest>,
) -> Result<Json<TimelineEntry>, AppError> {
    update(pool, TimelineKind::Experience, &current_user, &id, &payload).await
}

#[openapi(tag = "Experience")]
#[delete("/<id>")]
pub async fn delete_experience(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    remove(pool, TimelineKind::Experience, &current_user, &id).await
}

#[openapi(tag = "Education")]
#[get("/")]
pub async fn list_education(pool: &State<PgPool>) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    list(pool, TimelineKind::Education).await
}

#[openapi(tag = "Education")]
#[post("/", data = "<payload>")]
pub async fn create_education(pool: &State<PgPool>, current_user: CurrentUser, payload: Json<TimelineEntryRequest>) -> Result<Json<TimelineEntry>, AppError> {
    create(pool, TimelineKind::Education, &current_user, &payload).await
}

#[openapi(tag = "Education")]
#[put("/<id>", data = "<payload>")]
pub async fn update_education(
    pool: &State<PgPool>,
    current_user: CurrentUser,
    id: String,
    payload: Json<TimelineEntryRequest>,
) -> Result<Json<TimelineEntry>, AppError> {
    update(pool, TimelineKind::Education, &current_user, &id, &payload).await
}

#[openapi(tag = "Education")]
#[delete("/<id>")]
pub async fn delete_education(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    remove(pool, TimelineKind::Education, &current_user, &id).await
}

pub fn experience_routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_experience, create_experience, update_experience, delete_experience]
}

pub fn education_routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_education, create_education, update_education, delete_education]
}
