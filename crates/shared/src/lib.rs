//! Shared types, errors, and configuration for the partner portal ledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Locale date formats
//! - Session claims and JWT validation
//! - CSRF token issuance and validation
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod csrf;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod error_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use csrf::{CsrfError, CsrfService};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
