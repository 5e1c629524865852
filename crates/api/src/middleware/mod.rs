//! Request middleware.

pub mod auth;
pub mod csrf;

pub use auth::{AuthUser, SESSION_COOKIE, auth_middleware};
pub use csrf::{CSRF_HEADER, csrf_header_middleware};
