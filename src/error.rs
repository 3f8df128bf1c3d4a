// src/error.rs

//! Unified error handling for the masthead application.

use std::fmt;

use thiserror::Error;

/// Result type alias for masthead operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document import error
    #[error("Import error for {context}: {message}")]
    Import { context: String, message: String },

    /// Internal consistency fault (e.g. a broken front-page ordinal sequence)
    #[error("Consistency fault in {context}: {message}")]
    Consistency { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an import error with context.
    pub fn import(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Import {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a consistency fault with context.
    pub fn consistency(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Consistency {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
