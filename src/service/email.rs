use crate::config::EmailConfig;
use crate::error::app_error::AppError;
use crate::models::contact::ContactMessage;
use lettre::message::header::ContentType;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the reset link to the account owner.
    pub async fn send_password_reset_email(&self, to_email: &str, to_name: &str, reset_token: &str, reset_url: &str) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::warn!("Email service is disabled, skipping password reset email to {}", to_email);
            return Ok(());
        }

        let reset_link = format!("{}?token={}", reset_url, reset_token);
        let html_body = reset_email_html(to_name, &reset_link);
        let text_body = reset_email_text(to_name, &reset_link);

        self.send_email(to_email, "Reset your dashboard password", &html_body, &text_body).await
    }

    /// Forward a new contact message to the site owner.
    pub async fn send_contact_notification(&self, message: &ContactMessage) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::warn!("Email service is disabled, skipping contact notification for message {}", message.id);
            return Ok(());
        }

        let subject = format!("New contact message from {}", message.name);
        let text_body = contact_notification_text(message);
        let html_body = format!("<pre style=\"font-family: sans-serif; white-space: pre-wrap\">{}</pre>", escape_html(&text_body));

        let notify_address = self.config.notify_address.clone();
        self.send_email(&notify_address, &subject, &html_body, &text_body).await
    }

    async fn send_email(&self, to_email: &str, subject: &str, html_body: &str, text_body: &str) -> Result<(), AppError> {
        let email = Message::builder()
            .from(
                format!("{} <{}>", self.config.from_name, self.config.from_address)
                    .parse()
                    .map_err(|e| AppError::email(format!("Invalid from address: {}", e)))?,
            )
            .to(to_email.parse().map_err(|e| AppError::email(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text_body.to_string()))
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html_body.to_string())),
            )
            .map_err(|e| AppError::email(format!("Failed to build email: {}", e)))?;

        let creds = Credentials::new(self.config.smtp_username.clone(), self.config.smtp_password.clone());

        let mailer = SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| AppError::email(format!("Failed to create SMTP transport: {}", e)))?
            .credentials(creds)
            .port(self.config.smtp_port)
            .build();

        // SmtpTransport is blocking
        let result = tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::email(format!("Failed to spawn email sending task: {}", e)))?;

        result.map_err(|e| AppError::email(format!("Failed to send email: {}", e)))?;

        tracing::info!(subject = subject, "email sent to {}", to_email);
        Ok(())
    }
}

fn reset_email_html(to_name: &str, reset_link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; color: #141517;">
    <h1 style="font-size: 22px;">Reset your password</h1>
    <p>Hi {name},</p>
    <p>Someone asked to reset the password of your portfolio dashboard. The link expires in 15 minutes.</p>
    <p><a href="{link}" style="display: inline-block; padding: 10px 18px; background: #141517; color: #ffffff; border-radius: 8px; text-decoration: none;">Choose a new password</a></p>
    <p style="font-size: 13px; color: #5C5F66;">If you did not request this, ignore this email. Your password stays unchanged.</p>
</body>
</html>"#,
        name = escape_html(to_name),
        link = escape_html(reset_link),
    )
}

fn reset_email_text(to_name: &str, reset_link: &str) -> String {
    format!(
        "Hi {},\n\nSomeone asked to reset the password of your portfolio dashboard. The link expires in 15 minutes:\n\n{}\n\nIf you did not request this, ignore this email. Your password stays unchanged.\n",
        to_name, reset_link
    )
}

fn contact_notification_text(message: &ContactMessage) -> String {
    format!(
        "From: {} <{}>\nSubject: {}\n\n{}\n",
        message.name,
        message.email,
        message.subject.as_deref().unwrap_or("(none)"),
        message.message
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
