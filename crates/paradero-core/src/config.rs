use crate::error::{ParaderoError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "PARADERO_CONFIG";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for the report service.
///
/// Secrets (`GEMINI_API_KEY`, `GOOGLE_CREDENTIALS`) are not part of this
/// struct. The adapters that need them read them from the environment.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub port: ConfigValue<u16>,
    pub cors_origin: ConfigValue<String>,
    pub gemini_model: ConfigValue<String>,
    pub request_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            port: ConfigValue::new(8081, ConfigSource::Default),
            cors_origin: ConfigValue::new("*".to_string(), ConfigSource::Default),
            gemini_model: ConfigValue::new(
                "gemini-1.5-pro-latest".to_string(),
                ConfigSource::Default,
            ),
            request_timeout_secs: ConfigValue::new(120, ConfigSource::Default),
        }
    }

    /// Defaults, then the file named by `PARADERO_CONFIG` if set, then env
    pub fn load() -> Result<Self> {
        let config = Self::with_defaults();
        let config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => config.load_from_file(path.trim())?,
            _ => config,
        };
        Ok(config.load_from_env())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ParaderoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ParaderoError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(port) = file_config.port {
            self.port.update(port, ConfigSource::File);
        }

        if let Some(origin) = file_config.cors_origin {
            self.cors_origin.update(origin, ConfigSource::File);
        }

        if let Some(model) = file_config.gemini_model {
            self.gemini_model.update(model, ConfigSource::File);
        }

        if let Some(timeout) = file_config.request_timeout_secs {
            self.request_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // PARADERO_PORT
        if let Ok(port_str) = env::var("PARADERO_PORT") {
            match parse_port(&port_str) {
                Ok(port) => self.port.update(port, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid PARADERO_PORT value '{}': expected a port number",
                    port_str
                ),
            }
        }

        // PARADERO_CORS_ORIGIN
        if let Ok(origin) = env::var("PARADERO_CORS_ORIGIN") {
            if origin.trim().is_empty() {
                tracing::warn!("Ignoring empty PARADERO_CORS_ORIGIN");
            } else {
                self.cors_origin.update(origin.trim().to_string(), ConfigSource::Environment);
            }
        }

        // PARADERO_GEMINI_MODEL
        if let Ok(model) = env::var("PARADERO_GEMINI_MODEL") {
            if !model.trim().is_empty() {
                self.gemini_model.update(model.trim().to_string(), ConfigSource::Environment);
            }
        }

        // PARADERO_REQUEST_TIMEOUT
        if let Ok(timeout_str) = env::var("PARADERO_REQUEST_TIMEOUT") {
            match parse_timeout(&timeout_str) {
                Ok(timeout) => {
                    self.request_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid PARADERO_REQUEST_TIMEOUT value '{}': expected seconds greater than zero",
                    timeout_str
                ),
            }
        }

        self
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    port: Option<u16>,
    cors_origin: Option<String>,
    gemini_model: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Parse a listening port
pub fn parse_port(s: &str) -> Result<u16> {
    match s.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ParaderoError::ConfigInvalid {
            key: "port".to_string(),
            reason: format!("Invalid port: {}. Use a number between 1 and 65535", s),
        }),
    }
}

/// Parse a request timeout in whole seconds
pub fn parse_timeout(s: &str) -> Result<u64> {
    match s.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ParaderoError::ConfigInvalid {
            key: "request_timeout_secs".to_string(),
            reason: format!("Invalid timeout: {}. Use a positive number of seconds", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.port.value, 8081);
        assert_eq!(config.port.source, ConfigSource::Default);
        assert_eq!(config.cors_origin.value, "*");
        assert_eq!(config.gemini_model.value, "gemini-1.5-pro-latest");
        assert_eq!(config.request_timeout_secs.value, 120);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 9090
cors_origin = "https://informes.example.cl"
gemini_model = "gemini-1.5-flash"
request_timeout_secs = 30
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.port.value, 9090);
        assert_eq!(config.port.source, ConfigSource::File);
        assert_eq!(config.cors_origin.value, "https://informes.example.cl");
        assert_eq!(config.gemini_model.value, "gemini-1.5-flash");
        assert_eq!(config.request_timeout_secs.value, 30);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ParaderoError::ConfigInvalid { ref key, .. } if key == "file"));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("8081").unwrap(), 8081);
        assert_eq!(parse_port(" 80 ").unwrap(), 80);
        assert!(parse_port("0").is_err());
        assert!(parse_port("70000").is_err());
        assert!(parse_port("http").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("45").unwrap(), 45);
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-3").is_err());
    }
}
