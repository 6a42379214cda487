// src/error.rs

//! Unified error handling for newsping.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for newsping operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Page could not be fetched or rendered
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Selector matched nothing on the page
    #[error("No articles found on {url} using selector '{selector}'")]
    NoCandidates { url: String, selector: String },

    /// Message delivery failed
    #[error("Notify error: {0}")]
    Notify(String),

    /// Link ledger could not be read or appended to
    #[error("Ledger error at {path}: {message}")]
    Ledger { path: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

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
}

impl AppError {
    /// Create a fetch error for a page address.
    pub fn fetch(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a "selector matched nothing" error.
    pub fn no_candidates(url: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::NoCandidates {
            url: url.into(),
            selector: selector.into(),
        }
    }

    /// Create a delivery error.
    pub fn notify(message: impl fmt::Display) -> Self {
        Self::Notify(message.to_string())
    }

    /// Create a ledger error for the given file.
    pub fn ledger(path: &Path, message: impl fmt::Display) -> Self {
        Self::Ledger {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message() {
        let err = AppError::fetch("https://example.com", "HTTP 503");
        assert_eq!(
            err.to_string(),
            "Fetch failed for https://example.com: HTTP 503"
        );
    }

    #[test]
    fn test_no_candidates_message_names_selector() {
        let err = AppError::no_candidates("https://example.com", "a.teaser");
        assert!(err.to_string().contains("'a.teaser'"));
    }
}
