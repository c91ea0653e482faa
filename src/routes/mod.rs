pub mod audit_trail;
pub mod auth;
pub mod contact;
pub mod error;
pub mod health;
pub mod project;
pub mod technology;
pub mod testimonial;
pub mod timeline;
