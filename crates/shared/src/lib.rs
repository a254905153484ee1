//! Shared types, errors, and configuration for Medistock.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for type-safe record references
//! - Dr/Cr balance sides and grouped amount formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
