//! Error handling for tipout
//!
//! The calculator itself never fails; these errors cover what surrounds it
//! (loading the config file). Application code uses the anyhow-based
//! `Result` alias for context chaining.

use thiserror::Error;

/// Core error types for settlement surfaces
#[derive(Error, Debug)]
pub enum SettleError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;
