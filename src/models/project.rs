use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Markdown body, stored and served as-is.
    pub content: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[validate(url)]
    pub repo_url: Option<String>,
    #[validate(url)]
    pub live_url: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 100))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BulkDeleteResponse {
    pub deleted: u64,
}

/// Public counters. Cheap fields, so mutations on them skip the before-state read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct ProjectMetrics {
    pub views: i64,
    pub likes: i64,
}
