use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use paradero_core::config::LayeredConfig;
use paradero_core::error::{ParaderoError, Result};
use tower_http::cors::{Any, CorsLayer};

/// API server configuration resolved from the layered config
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub gemini_model: String,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_layered(&LayeredConfig::with_defaults())
    }
}

impl ApiConfig {
    /// Load defaults, then the config file, then environment overrides
    pub fn load() -> Result<Self> {
        LayeredConfig::load().map(|layered| Self::from_layered(&layered))
    }

    pub fn from_layered(layered: &LayeredConfig) -> Self {
        Self {
            port: layered.port.value,
            cors_origin: layered.cors_origin.value.clone(),
            gemini_model: layered.gemini_model.value.clone(),
            request_timeout_secs: layered.request_timeout_secs.value,
        }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Timeout applied to every outbound Drive and Gemini request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// CORS layer for the configured origin; `*` allows any origin
    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .expose_headers([header::CONTENT_DISPOSITION]);

        let origin = self.cors_origin.trim();
        if origin == "*" {
            return Ok(cors.allow_origin(Any));
        }

        let origin = origin
            .parse::<HeaderValue>()
            .map_err(|e| ParaderoError::ConfigInvalid {
                key: "cors_origin".to_string(),
                reason: e.to_string(),
            })?;
        Ok(cors.allow_origin(origin))
    }
}
