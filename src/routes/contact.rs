use crate::auth::CurrentUser;
use crate::config::Config;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::contact::{ContactMessage, ContactRequest, ContactResponse};
use crate::service::contact::ContactService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Send a message from the public contact form
#[openapi(tag = "Contact")]
#[post("/", data = "<payload>")]
pub async fn submit_contact(
    pool: &State<PgPool>,
    config: &State<Config>,
    context: RequestContext,
    payload: Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    // Bots get the success reply, never a validation error
    if !payload.is_bot() {
        payload.validate()?;
    }

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let message = ContactService::new(&repo).submit(&payload, &context, &config.email).await?;

    Ok(Json(ContactResponse { message: message.to_string() }))
}

/// List received messages
#[openapi(tag = "Contact")]
#[get("/")]
pub async fn list_contact_messages(pool: &State<PgPool>, _current_user: CurrentUser) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ContactService::new(&repo).list().await?))
}

/// Mark a message as read
#[openapi(tag = "Contact")]
#[put("/<id>/read")]
pub async fn mark_contact_message_read(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Json<ContactMessage>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(ContactService::new(&repo).mark_read(&uuid, &current_user).await?))
}

/// Delete a message
#[openapi(tag = "Contact")]
#[delete("/<id>")]
pub async fn delete_contact_message(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    ContactService::new(&repo).delete(&uuid, &current_user).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![submit_contact, list_contact_messages, mark_contact_message_read, delete_contact_message]
}
