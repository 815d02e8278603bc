//! Shared types, errors, and configuration for Sprout.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Auth DTOs and JWT handling
//! - Pagination types for list endpoints
//! - HTTP client for the advisor text-generation gateway

pub mod advisor;
pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use advisor::{AdvisorClient, AdvisorError};
pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};

#[cfg(test)]
mod jwt_tests;
