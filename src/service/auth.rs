use crate::Config;
use crate::auth::CurrentUser;
use crate::database::password_reset::{PasswordResetRepository, generate_reset_token, hash_reset_token};
use crate::database::postgres_repository::PostgresRepository;
use crate::database::security_log::SecurityLogRepository;
use crate::database::session::SessionRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::middleware::RequestContext;
use crate::models::password_reset::{PasswordResetConfirmRequest, RESET_REQUEST_MESSAGE};
use crate::models::security_event::security_events;
use crate::models::session::Session;
use crate::models::user::{ChangePasswordRequest, LoginRequest, User};
use crate::service::email::EmailService;
use crate::service::rate_limit::LoginRateLimiter;
use crate::service::security::SecurityRecorder;
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

/// Everything the login and credential flows touch.
pub trait AuthStore: UserRepository + SessionRepository + PasswordResetRepository + SecurityLogRepository {}

impl<T> AuthStore for T where T: UserRepository + SessionRepository + PasswordResetRepository + SecurityLogRepository {}

#[derive(Debug)]
pub struct LoginSuccess {
    pub user: User,
    pub session: Session,
}

pub struct AuthService<'a, R: AuthStore> {
    repo: &'a R,
    config: &'a Config,
    context: &'a RequestContext,
}

impl<'a, R: AuthStore> AuthService<'a, R> {
    pub fn new(repo: &'a R, config: &'a Config, context: &'a RequestContext) -> Self {
        Self { repo, config, context }
    }

    fn recorder(&self) -> SecurityRecorder<'_> {
        SecurityRecorder::new(self.repo, self.context)
    }

    /// Rate limit, then credentials, then the admin allow-list. Only the last step issues a session.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginSuccess, AppError> {
        let limiter = LoginRateLimiter::new(self.repo, &self.config.login_rate_limit);
        if !limiter.check_rate_limit(&self.context.ip_address).await {
            self.recorder()
                .record(
                    security_events::BRUTE_FORCE_BLOCKED,
                    json!({
                        "email": request.email,
                        "reason": "too_many_failed_attempts",
                        "window_minutes": self.config.login_rate_limit.window_minutes,
                    }),
                )
                .await;
            return Err(AppError::TooManyRequests);
        }

        let Some(user) = self.repo.verify_credentials(&request.email, &request.password).await? else {
            self.recorder()
                .record(security_events::LOGIN_FAIL, json!({"email": request.email, "reason": "invalid_credentials"}))
                .await;
            return Err(AppError::InvalidCredentials);
        };

        if !self.config.admin.is_admin(&user.email) {
            self.recorder()
                .record(security_events::INTRUSION_ATTEMPT, json!({"email": user.email, "reason": "not_an_admin"}))
                .await;
            return Err(AppError::Forbidden);
        }

        let expires_at = Utc::now() + Duration::seconds(self.config.session.ttl_seconds);
        let session = self.repo.create_session(&user.id, expires_at).await?;

        self.recorder().record(security_events::LOGIN_SUCCESS, json!({"email": user.email})).await;

        Ok(LoginSuccess { user, session })
    }

    pub async fn logout(&self, session_id: &Uuid) -> Result<(), AppError> {
        self.repo.delete_session(session_id).await
    }

    /// Always answers with the same message, whether or not the account exists.
    pub async fn request_password_reset(&self, email: &str) -> Result<&'static str, AppError> {
        let user = self.repo.get_user_by_email(email).await?;

        self.recorder()
            .record(security_events::PASSWORD_RESET_REQUEST, json!({"email": email, "account_found": user.is_some()}))
            .await;

        let Some(user) = user else {
            PostgresRepository::dummy_verify("password-reset-decoy");
            return Ok(RESET_REQUEST_MESSAGE);
        };

        // One live token per account
        self.repo.delete_password_resets_for_user(&user.id).await?;

        let (plain_token, token_hash) = generate_reset_token();
        let expires_at = Utc::now() + Duration::seconds(self.config.password_reset.token_ttl_seconds);
        self.repo.create_password_reset(&user.id, &token_hash, expires_at).await?;

        let email_service = EmailService::new(self.config.email.clone());
        if let Err(err) = email_service
            .send_password_reset_email(&user.email, &user.name, &plain_token, &self.config.password_reset.frontend_reset_url)
            .await
        {
            tracing::error!(error = ?err, user_id = %user.id, "failed to send password reset email");
        }

        Ok(RESET_REQUEST_MESSAGE)
    }

    pub async fn confirm_password_reset(&self, request: &PasswordResetConfirmRequest) -> Result<(), AppError> {
        let token_hash = hash_reset_token(&request.token);
        let reset = match self.repo.get_password_reset_by_token(&token_hash).await? {
            Some(reset) if reset.is_valid() => reset,
            _ => return Err(AppError::BadRequest("Invalid or expired reset token".to_string())),
        };

        let user = self.repo.get_user_by_id(&reset.user_id).await?.ok_or(AppError::UserNotFound)?;

        self.repo.update_user_password(&user.id, &request.new_password).await?;
        self.repo.mark_password_reset_used(&reset.id).await?;
        let dropped = self.repo.invalidate_all_user_sessions(&user.id).await?;

        self.recorder()
            .record(
                security_events::PASSWORD_UPDATE_SUCCESS,
                json!({"email": user.email, "method": "reset_token", "sessions_invalidated": dropped}),
            )
            .await;

        Ok(())
    }

    pub async fn change_password(&self, current_user: &CurrentUser, request: &ChangePasswordRequest) -> Result<(), AppError> {
        if self.repo.verify_credentials(&current_user.email, &request.current_password).await?.is_none() {
            return Err(AppError::InvalidCredentials);
        }

        self.repo.update_user_password(&current_user.id, &request.new_password).await?;

        self.recorder()
            .record(security_events::PASSWORD_UPDATE_SUCCESS, json!({"email": current_user.email, "method": "change"}))
            .await;

        Ok(())
    }
}
