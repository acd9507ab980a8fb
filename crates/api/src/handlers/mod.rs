//! Request handlers.
//!
//! Handlers delegate to the repositories in `brandkit_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod branding;
pub mod collection;
pub mod nested;
pub mod project;
