//! Configuration file for the uploader binary.
//!
//! Read from `uploader.ron` (or the path given with `--config`). A missing
//! file means "use defaults"; a malformed one is an error.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upload_logging::upload_info;
use uploader_engine::{UploadSettings, DEFAULT_ENDPOINT, DEFAULT_FIELD_NAME};

pub const DEFAULT_CONFIG_FILENAME: &str = "uploader.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid upload endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub field_name: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                upload_info!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        upload_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Result<Self, ConfigError> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let parsed = url::Url::parse(&self.endpoint).map_err(|err| invalid(err.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            endpoint: self.endpoint.clone(),
            field_name: self.field_name.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join(DEFAULT_CONFIG_FILENAME)).unwrap();

        assert_eq!(config, AppConfig::default());
        let settings = config.upload_settings();
        assert_eq!(settings.endpoint, "http://localhost:3333/api/upload");
        assert_eq!(settings.field_name, "video");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(endpoint: "https://media.example.com/upload", request_timeout_secs: Some(30))"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.endpoint, "https://media.example.com/upload");
        assert_eq!(config.field_name, "video");
        assert_eq!(
            config.upload_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, "(endpoint: ").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn endpoint_override_is_validated() {
        let config = AppConfig::default()
            .with_endpoint(Some("http://10.0.0.5:8080/api/upload".to_string()))
            .unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.5:8080/api/upload");

        let err = AppConfig::default()
            .with_endpoint(Some("ftp://example.com/upload".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        let err = AppConfig::default()
            .with_endpoint(Some("not a url".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }
}
