pub mod audit_log;
pub mod contact;
pub mod password_reset;
pub mod postgres_repository;
pub mod project;
pub mod security_log;
pub mod session;
pub mod technology;
pub mod testimonial;
pub mod timeline;
pub mod user;
