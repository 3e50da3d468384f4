//! Stockcheck Common - Shared types and utilities for the stockcheck workspace.
//!
//! This crate provides:
//! - The error type and CLI exit codes
//! - Logging setup
//! - Configuration file helpers and the observability section
//! - Configuration validation

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::ObservabilityConfig;
pub use error::Error;
pub use validation::{Validate, ValidationError, ValidationResult};
