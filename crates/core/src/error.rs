//! Error types for SupSer
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for SupSer
#[derive(Error, Debug)]
pub enum SupserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unknown branding variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for SupSer operations
pub type Result<T> = std::result::Result<T, SupserError>;

impl SupserError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SupserError::Io(e) => format!("File operation failed: {}", e),
            SupserError::Config(msg) => format!("Configuration error: {}", msg),
            SupserError::UnknownVariant(name) => {
                format!("No branding named '{}' in the configuration", name)
            }
            _ => self.to_string(),
        }
    }
}
