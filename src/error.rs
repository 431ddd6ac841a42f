//! Error types for cvelib
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Transport and HTTP status failures all land in [`Error::Idr`]; the other
//! variants cover configuration, URL joining and response decoding.

use thiserror::Error;

/// The main error type for cvelib
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    // ============================================================================
    // IDR Errors
    // ============================================================================
    /// Any failed exchange with the IDR service: connection failure, timeout
    /// or an error status. The message embeds the server's error body.
    #[error("{message}")]
    Idr { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Path '{path}' resolves outside of the configured IDR URL")]
    PathOutsideBase { path: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Response is missing field '{field}'")]
    MissingField { field: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an IDR error
    pub fn idr(message: impl Into<String>) -> Self {
        Self::Idr {
            message: message.into(),
        }
    }

    /// Create a missing response field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this error came from the configuration layer
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::MissingConfigField { .. })
    }
}

/// Result type alias for cvelib
pub type Result<T> = std::result::Result<T, Error>;
