//! Core business logic for Sprout.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `gamification` - Daily check-in streaks, point awards, asset rotation
//! - `planner` - Savings plan generation from a financial profile
//! - `advisor` - Prompt building for the text-generation advisor
//! - `auth` - Password hashing

pub mod advisor;
pub mod auth;
pub mod gamification;
pub mod planner;
