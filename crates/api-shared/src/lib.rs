//! # API Shared
//!
//! Shared utilities and definitions for the docmatch API surface.
//!
//! Contains:
//! - Request/response DTO types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//! - Session-token extraction for authenticated endpoints
//!
//! Used by `api-rest` for common functionality.

pub mod auth;
pub mod dto;
pub mod health;

pub use health::HealthService;

/// Header carrying the session token on authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";
