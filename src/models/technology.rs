use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Technology {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
pub struct TechnologyRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(length(min = 1, max = 80))]
    pub category: String,
    #[validate(url)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}
