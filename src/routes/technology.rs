use crate::auth::CurrentUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::technology::{Technology, TechnologyRequest};
use crate::service::profile::ProfileService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[openapi(tag = "Technologies")]
#[get("/")]
pub async fn list_technologies(pool: &State<PgPool>) -> Result<Json<Vec<Technology>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProfileService::new(&repo).list_technologies().await?))
}

#[openapi(tag = "Technologies")]
#[post("/", data = "<payload>")]
pub async fn create_technology(pool: &State<PgPool>, current_user: CurrentUser, payload: Json<TechnologyRequest>) -> Result<Json<Technology>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProfileService::new(&repo).create_technology(&payload, &current_user).await?))
}

#[openapi(tag = "Technologies")]
#[put("/<id>", data = "<payload>")]
pub async fn update_technology(
    pool: &State<PgPool>,
    current_user: CurrentUser,
    id: String,
    payload: Json<TechnologyRequest>,
) -> Result<Json<Technology>, AppError> {
    payload.validate()?;

    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProfileService::new(&repo).update_technology(&uuid, &payload, &current_user).await?))
}

#[openapi(tag = "Technologies")]
#[delete("/<id>")]
pub async fn delete_technology(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    ProfileService::new(&repo).delete_technology(&uuid, &current_user).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![list_technologies, create_technology, update_technology, delete_technology]
}
