use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Hidden field. Humans never see it, so any value means a bot filled the form.
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactRequest {
    pub fn is_bot(&self) -> bool {
        self.website.as_deref().is_some_and(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ContactResponse {
    pub message: String,
}
