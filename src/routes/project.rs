use crate::auth::{CurrentUser, OptionalUser};
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::project::{BulkDeleteRequest, BulkDeleteResponse, Project, ProjectMetrics, ProjectRequest};
use crate::service::project::ProjectService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[openapi(tag = "Projects")]
#[get("/")]
pub async fn list_projects(pool: &State<PgPool>) -> Result<Json<Vec<Project>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).list().await?))
}

#[openapi(tag = "Projects")]
#[get("/<id>")]
pub async fn get_project(pool: &State<PgPool>, id: String) -> Result<Json<Project>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).get(&uuid).await?))
}

/// Count a page view
#[openapi(tag = "Projects")]
#[post("/<id>/view")]
pub async fn view_project(pool: &State<PgPool>, id: String) -> Result<Json<ProjectMetrics>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).record_view(&uuid).await?))
}

/// Like a project. Open to visitors.
#[openapi(tag = "Projects")]
#[post("/<id>/like")]
pub async fn like_project(pool: &State<PgPool>, user: OptionalUser, id: String) -> Result<Json<ProjectMetrics>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).like(&uuid, user.0.as_ref()).await?))
}

#[openapi(tag = "Projects")]
#[post("/", data = "<payload>")]
pub async fn create_project(pool: &State<PgPool>, current_user: CurrentUser, payload: Json<ProjectRequest>) -> Result<Json<Project>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).create(&payload, &current_user).await?))
}

#[openapi(tag = "Projects")]
#[put("/<id>", data = "<payload>")]
pub async fn update_project(pool: &State<PgPool>, current_user: CurrentUser, id: String, payload: Json<ProjectRequest>) -> Result<Json<Project>, AppError> {
    payload.validate()?;

    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ProjectService::new(&repo).update(&uuid, &payload, &current_user).await?))
}

#[openapi(tag = "Projects")]
#[delete("/<id>")]
pub async fn delete_project(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    ProjectService::new(&repo).delete(&uuid, &current_user).await?;
    Ok(Status::NoContent)
}

/// Delete several projects at once
#[openapi(tag = "Projects")]
#[post("/bulk-delete", data = "<payload>")]
pub async fn bulk_delete_projects(pool: &State<PgPool>, current_user: CurrentUser, payload: Json<BulkDeleteRequest>) -> Result<Json<BulkDeleteResponse>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let deleted = ProjectService::new(&repo).bulk_delete(&payload.ids, &current_user).await?;
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// Zero every view and like counter
#[openapi(tag = "Projects")]
#[post("/metrics/reset")]
pub async fn reset_project_metrics(pool: &State<PgPool>, current_user: CurrentUser) -> Result<Status, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let affected = ProjectService::new(&repo).reset_metrics(&current_user).await?;
    tracing::info!(projects = affected, user_id = %current_user.id, "project metrics reset");
    Ok(Status::NoContent)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![
        list_projects,
        get_project,
        view_project,
        like_project,
        create_project,
        update_project,
        delete_project,
        bulk_delete_projects,
        reset_project_metrics
    ]
}
