pub mod audit_log;
pub mod audit_trail;
pub mod contact;
pub mod health;
pub mod password_reset;
pub mod project;
pub mod security_event;
pub mod session;
pub mod technology;
pub mod testimonial;
pub mod timeline;
pub mod user;
pub mod user_agent;
