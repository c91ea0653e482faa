use chrono::NaiveDate;
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::audit_log::audit_tables;

/// Experience and education share one row shape and live in separate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Experience,
    Education,
}

impl TimelineKind {
    pub fn table(self) -> &'static str {
        match self {
            TimelineKind::Experience => audit_tables::EXPERIENCE,
            TimelineKind::Education => audit_tables::EDUCATION,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, JsonSchema)]
#[validate(schema(function = "validate_date_range"))]
pub struct TimelineEntryRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub organization: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

fn validate_date_range(request: &TimelineEntryRequest) -> Result<(), ValidationError> {
    match request.end_date {
        Some(end) if end < request.start_date => Err(ValidationError::new("end_before_start")),
        _ => Ok(()),
    }
}
