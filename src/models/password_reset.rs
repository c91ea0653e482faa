use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

/// Message returned for every reset request so callers cannot probe for accounts.
pub const RESET_REQUEST_MESSAGE: &str = "If your email address exists in our system, you will receive a password reset link shortly.";

/// Password reset record stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(equal = 64))]
    pub token: String,
    #[validate(length(min = 8))]
    #[validate(custom(function = "crate::models::user::validate_password_strength"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PasswordResetResponse {
    pub message: String,
}

impl PasswordReset {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_used()
    }
}
