//! Error types for the paradero report service

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParaderoError {
    // Credential errors
    #[error("Authentication failed for {service}: {reason}")]
    Authentication { service: String, reason: String },

    // Lookup errors
    #[error("{what} not found")]
    NotFound { what: String },

    // Request errors
    #[error("Precondition failed: {0}")]
    Precondition(String),

    // Remote service errors
    #[error("{service} request failed: {reason}")]
    Upstream { service: String, reason: String },

    #[error("Could not parse AI response: {0}")]
    ExtractionParse(String),

    // Report errors
    #[error("Document generation failed: {0}")]
    Document(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl ParaderoError {
    pub fn upstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

pub type Result<T> = std::result::Result<T, ParaderoError>;
