use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub content: String,
    pub rating: i16,
    pub is_approved: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
pub struct TestimonialRequest {
    #[validate(length(min = 1, max = 120))]
    pub author_name: String,
    #[validate(length(max = 120))]
    pub author_role: Option<String>,
    #[validate(length(max = 120))]
    pub company: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 10, max = 2000))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
}

/// Public view: never exposes the submitter's email.
#[derive(Debug, Serialize, JsonSchema)]
pub struct TestimonialResponse {
    pub id: Uuid,
    pub author_name: String,
    pub author_role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i16,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Testimonial> for TestimonialResponse {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            id: testimonial.id,
            author_name: testimonial.author_name.clone(),
            author_role: testimonial.author_role.clone(),
            company: testimonial.company.clone(),
            content: testimonial.content.clone(),
            rating: testimonial.rating,
            is_featured: testimonial.is_featured,
            created_at: testimonial.created_at,
        }
    }
}
