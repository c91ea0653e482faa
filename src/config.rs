use rocket::figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub login_rate_limit: LoginRateLimitConfig,
    pub admin: AdminConfig,
    pub email: EmailConfig,
    pub password_reset: PasswordResetConfig,
    pub audit_trail: AuditTrailConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
    pub acquire_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_path: String,
    pub additional_base_paths: Vec<String>,
    pub enable_swagger: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub ttl_seconds: i64,
    pub cookie_secure: bool,
}

/// Trailing-window policy for failed logins, counted per client IP.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoginRateLimitConfig {
    pub window_minutes: i64,
    pub max_failures: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdminConfig {
    /// Accounts allowed into the dashboard. Anyone else with valid credentials is an intruder.
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub from_name: String,
    pub notify_address: String,
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PasswordResetConfig {
    pub token_ttl_seconds: i64,
    pub frontend_reset_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuditTrailConfig {
    pub page_size: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/portfolio_db".to_string(),
            max_connections: 16,
            min_connections: 4,
            connection_timeout: 5,
            acquire_timeout: 5,
            run_migrations: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            address: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            additional_base_paths: Vec::new(),
            enable_swagger: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 60 * 60 * 24 * 7,
            cookie_secure: true,
        }
    }
}

impl Default for LoginRateLimitConfig {
    fn default() -> Self {
        Self {
            window_minutes: 15,
            max_failures: 5,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "noreply@localhost".to_string(),
            from_name: "Portfolio".to_string(),
            notify_address: "owner@localhost".to_string(),
            enabled: false,
        }
    }
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            token_ttl_seconds: 15 * 60,
            frontend_reset_url: "http://localhost:3000/admin/reset-password".to_string(),
        }
    }
}

impl Default for AuditTrailConfig {
    fn default() -> Self {
        Self { page_size: 50 }
    }
}

impl AdminConfig {
    pub fn is_admin(&self, email: &str) -> bool {
        self.emails.iter().any(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Portfolio.toml (optional)
    /// 3. Environment variables (prefixed with PORTFOLIO_, nested with `__`)
    /// 4. DATABASE_URL environment variable
    pub fn load() -> Result<Self, figment::Error> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("Portfolio.toml").nested())
            .merge(Env::prefixed("PORTFOLIO_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "database.url".into()));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would lock every login out or break every log read.
    pub fn validate(&self) -> Result<(), figment::Error> {
        let positive = [
            ("login_rate_limit.max_failures", self.login_rate_limit.max_failures),
            ("login_rate_limit.window_minutes", self.login_rate_limit.window_minutes),
            ("audit_trail.page_size", self.audit_trail.page_size),
        ];

        for (key, value) in positive {
            if value <= 0 {
                return Err(figment::Error::from(format!("{key} must be greater than zero, got {value}")));
            }
        }

        Ok(())
    }
}
