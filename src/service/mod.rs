pub mod audit;
pub mod audit_trail;
pub mod auth;
pub mod contact;
pub mod email;
pub mod profile;
pub mod project;
pub mod rate_limit;
pub mod security;
pub mod testimonial;
pub mod user_agent;
