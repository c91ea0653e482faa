use crate::auth::CurrentUser;
use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::testimonial::{Testimonial, TestimonialRequest, TestimonialResponse};
use crate::service::testimonial::TestimonialService;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put};
use rocket_okapi::openapi;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Approved testimonials, featured first
#[openapi(tag = "Testimonials")]
#[get("/")]
pub async fn list_testimonials(pool: &State<PgPool>) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    let testimonials = TestimonialService::new(&repo).list_public().await?;
    Ok(Json(testimonials.iter().map(TestimonialResponse::from).collect()))
}

/// Submit a testimonial for moderation
#[openapi(tag = "Testimonials")]
#[post("/", data = "<payload>")]
pub async fn submit_testimonial(pool: &State<PgPool>, context: RequestContext, payload: Json<TestimonialRequest>) -> Result<Json<TestimonialResponse>, AppError> {
    payload.validate()?;

    let repo = PostgresRepository { pool: pool.inner().clone() };
    let testimonial = TestimonialService::new(&repo).submit(&payload, &context).await?;
    Ok(Json(TestimonialResponse::from(&testimonial)))
}

/// Every testimonial, including pending ones
#[openapi(tag = "Testimonials")]
#[get("/all")]
pub async fn list_all_testimonials(pool: &State<PgPool>, _current_user: CurrentUser) -> Result<Json<Vec<Testimonial>>, AppError> {
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(TestimonialService::new(&repo).list_all().await?))
}

#[openapi(tag = "Testimonials")]
#[put("/<id>/approve")]
pub async fn approve_testimonial(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Json<Testimonial>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(TestimonialService::new(&repo).approve(&uuid, &current_user).await?))
}

/// Toggle whether a testimonial is featured
#[openapi(tag = "Testimonials")]
#[put("/<id>/featured")]
pub async fn toggle_featured_testimonial(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Json<Testimonial>, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    Ok(Json(TestimonialService::new(&repo).toggle_featured(&uuid, &current_user).await?))
}

#[openapi(tag = "Testimonials")]
#[delete("/<id>")]
pub async fn delete_testimonial(pool: &State<PgPool>, current_user: CurrentUser, id: String) -> Result<Status, AppError> {
    let uuid = Uuid::parse_str(&id)?;
    let repo = PostgresRepository { pool: pool.inner().clone() };
    TestimonialService::new(&repo).delete(&uuid, &current_user).await?;
    Ok(Status::NoContent)
}

pub fn routes() -> (Vec<rocket::Route>, okapi::openapi3::OpenApi) {
    rocket_okapi::openapi_get_routes_spec![
        list_testimonials,
        submit_testimonial,
        list_all_testimonials,
        approve_testimonial,
        toggle_featured_testimonial,
        delete_testimonial
    ]
}
