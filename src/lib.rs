pub mod admin_tasks;
mod auth;
mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod service;

#[cfg(test)]
pub mod test_utils;

pub use admin_tasks::{cleanup_password_resets, create_admin};
pub use config::Config;

use crate::db::stage_db;
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use rocket::{Build, Rocket, catchers, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};
use rocket_okapi::{get_openapi_route, okapi::merge::marge_spec_list};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str, json_format: bool) {
    // RUST_LOG wins over the configured level, e.g. RUST_LOG=info,portfolio_sentinel::service=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    // Tests build several rockets in one process, so a second install is ignored.
    let _ = if json_format { subscriber.json().try_init() } else { subscriber.try_init() };
}

fn ensure_rocket_secret_key() {
    let profile = std::env::var("ROCKET_PROFILE").unwrap_or_else(|_| "debug".to_string());

    // Only enforce ROCKET_SECRET_KEY requirement for non-debug profiles
    if profile != "debug" && std::env::var("ROCKET_SECRET_KEY").is_err() {
        panic!(
            "ROCKET_SECRET_KEY is required for profile '{}'. Generate one with: openssl rand -base64 32",
            profile
        );
    }
}

fn build_cors(cors_config: &config::CorsConfig) -> CorsOptions {
    let is_wildcard = cors_config.allowed_origins.len() == 1 && cors_config.allowed_origins[0] == "*";

    // Validate that wildcard origins are not combined with credentials
    if is_wildcard && cors_config.allow_credentials {
        panic!(
            "Invalid CORS configuration: Cannot use wildcard origins (*) with credentials enabled. \
            Either set specific origins or disable credentials."
        );
    }

    let allowed_origins = if cors_config.allowed_origins.is_empty() {
        AllowedOrigins::some_exact::<&str>(&[])
    } else if is_wildcard {
        AllowedOrigins::all()
    } else {
        AllowedOrigins::some_exact(&cors_config.allowed_origins.iter().map(String::as_str).collect::<Vec<_>>())
    };

    CorsOptions {
        allowed_origins,
        allowed_methods: vec![
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
            Method::Options,
            Method::Head,
        ]
        .into_iter()
        .map(From::from)
        .collect(),
        allowed_headers: rocket_cors::AllowedHeaders::some(&["Content-Type", "Authorization", "Accept"]),
        allow_credentials: cors_config.allow_credentials,
        ..Default::default()
    }
}

fn get_swagger_config(openapi_url: &str) -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: openapi_url.to_string(),
        ..Default::default()
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return config::DEFAULT_API_BASE_PATH.to_string();
    }

    let mut normalized = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    while normalized.ends_with('/') && normalized.len() > 1 {
        normalized.pop();
    }

    normalized
}

fn join_base_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let suffix = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", suffix)
    } else {
        format!("{}/{}", base, suffix)
    }
}

/// Primary base path first, then any distinct extra mounts.
fn collect_base_paths(api_config: &config::ApiConfig) -> (String, Vec<String>) {
    let primary = normalize_base_path(&api_config.base_path);
    let mut extras: Vec<String> = Vec::new();

    for extra in &api_config.additional_base_paths {
        let normalized_extra = normalize_base_path(extra);
        if normalized_extra != primary && !extras.contains(&normalized_extra) {
            extras.push(normalized_extra);
        }
    }

    (primary, extras)
}

struct RouteSpec {
    path: &'static str,
    routes: Vec<rocket::Route>,
    openapi: rocket_okapi::okapi::openapi3::OpenApi,
}

impl RouteSpec {
    fn new(path: &'static str, (routes, openapi): (Vec<rocket::Route>, rocket_okapi::okapi::openapi3::OpenApi)) -> Self {
        Self { path, routes, openapi }
    }
}

fn collect_route_specs() -> Vec<RouteSpec> {
    vec![
        RouteSpec::new("/auth", app_routes::auth::routes()),
        RouteSpec::new("/contact", app_routes::contact::routes()),
        RouteSpec::new("/testimonials", app_routes::testimonial::routes()),
        RouteSpec::new("/projects", app_routes::project::routes()),
        RouteSpec::new("/technologies", app_routes::technology::routes()),
        RouteSpec::new("/experience", app_routes::timeline::experience_routes()),
        RouteSpec::new("/education", app_routes::timeline::education_routes()),
        RouteSpec::new("/admin/audit", app_routes::audit_trail::routes()),
        RouteSpec::new("/health", app_routes::health::routes()),
    ]
}

fn mount_api_routes(mut rocket: Rocket<Build>, base_path: &str, enable_swagger: bool) -> Rocket<Build> {
    let route_specs = collect_route_specs();

    if enable_swagger {
        let mut openapi_list = Vec::new();
        for spec in route_specs {
            rocket = rocket.mount(format!("{}{}", base_path, spec.path), spec.routes);
            openapi_list.push((spec.path, spec.openapi));
        }

        let openapi_docs = match marge_spec_list(&openapi_list) {
            Ok(docs) => docs,
            Err(err) => panic!("Could not merge OpenAPI spec: {}", err),
        };

        let settings = rocket_okapi::settings::OpenApiSettings::default();
        rocket = rocket.mount(base_path, vec![get_openapi_route(openapi_docs, &settings)]);

        let docs_path = join_base_path(base_path, "docs");
        let openapi_url = join_base_path(base_path, "openapi.json");
        rocket = rocket.mount(docs_path, make_swagger_ui(&get_swagger_config(&openapi_url)));
    } else {
        for spec in route_specs {
            rocket = rocket.mount(format!("{}{}", base_path, spec.path), spec.routes);
        }
    }

    rocket.register(
        base_path,
        catchers![
            app_routes::error::unauthorized,
            app_routes::error::forbidden,
            app_routes::error::not_found,
            app_routes::error::conflict,
            app_routes::error::unprocessable_entity,
            app_routes::error::too_many_requests
        ],
    )
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    init_tracing(&config.logging.level, config.logging.json_format);
    ensure_rocket_secret_key();

    let cors = match build_cors(&config.cors).to_cors() {
        Ok(cors) => cors,
        Err(err) => panic!("Failed to create CORS fairing: {}", err),
    };

    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("address", config.server.address.clone()));

    let mut rocket = rocket::custom(figment)
        .manage(config.clone())
        .attach(cors)
        .attach(RequestLogger)
        .attach(stage_db(config.database.clone()));

    let (primary_base_path, additional_base_paths) = collect_base_paths(&config.api);
    let enable_swagger = config.api.enable_swagger;

    rocket = mount_api_routes(rocket, &primary_base_path, enable_swagger);
    for base_path in &additional_base_paths {
        rocket = mount_api_routes(rocket, base_path, enable_swagger);
    }

    rocket
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_paths_are_normalized() {
        assert_eq!(normalize_base_path(""), config::DEFAULT_API_BASE_PATH);
        assert_eq!(normalize_base_path("api/v2/"), "/api/v2");
        assert_eq!(normalize_base_path("  /api  "), "/api");
        assert_eq!(join_base_path("/api/v1/", "/docs"), "/api/v1/docs");
    }

    #[test]
    fn extra_base_paths_skip_duplicates() {
        let api = config::ApiConfig {
            base_path: "/api/v1".to_string(),
            additional_base_paths: vec!["api/v1".to_string(), "/api".to_string(), "/api/".to_string()],
            enable_swagger: false,
        };

        let (primary, extras) = collect_base_paths(&api);
        assert_eq!(primary, "/api/v1");
        assert_eq!(extras, vec!["/api".to_string()]);
    }

    #[test]
    #[should_panic(expected = "wildcard origins")]
    fn wildcard_cors_with_credentials_is_rejected() {
        let cors = config::CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        };
        let _ = build_cors(&cors);
    }
}
