//! Error types for the stockcheck workspace.

use thiserror::Error;

/// Unified error type for stockcheck crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data source exists but cannot be read (corrupt, locked, wrong format)
    #[error("Data source error: {0}")]
    Source(String),
}

impl Error {
    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::NotFound(_) => 3,
            Self::Source(_) => 4,
        }
    }
}
