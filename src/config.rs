// src/config.rs
//! Client configuration.
//!
//! Loaded from an explicit `--config` path, else from
//! `<config_dir>/medtui/config.json` when that file exists, else defaults.
//! `MEDTUI_BACKEND_URL` overrides the backend URL in every case.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::highlight::Strategy;

pub const BACKEND_URL_ENV: &str = "MEDTUI_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the backend, without trailing slash.
    pub backend_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    pub extract: ExtractEndpoint,
    pub highlight: HighlightConfig,
    /// Coordinates pre-filled in the hospital finder.
    pub default_location: Option<Location>,
    /// Directory the PDF picker opens in. Defaults to the working directory.
    pub start_dir: Option<PathBuf>,
    /// Log file for the TUI. Defaults to `<data_dir>/medtui/medtui.log`.
    pub log_file: Option<PathBuf>,
}

/// Where PDFs are uploaded. The backend exposes `/` with field `file`;
/// older deployments used `/extract` with field `pdf`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractEndpoint {
    pub path: String,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub strategy: Strategy,
    /// Collapse whitespace runs in extracted text before highlighting.
    pub normalize_whitespace: bool,
    /// Markers used when highlighted text is printed as plain text.
    pub open_marker: String,
    pub close_marker: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5002".to_string(),
            request_timeout_secs: 120,
            extract: ExtractEndpoint::default(),
            highlight: HighlightConfig::default(),
            default_location: None,
            start_dir: None,
            log_file: None,
        }
    }
}

impl Default for ExtractEndpoint {
    fn default() -> Self {
        Self { path: "/".to_string(), field: "file".to_string() }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Merged,
            normalize_whitespace: false,
            open_marker: "[[".to_string(),
            close_marker: "]]".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = url;
            }
        }
        config.backend_url = config.backend_url.trim_end_matches('/').to_string();
        config.validate()?;
        Ok(config)
    }

    /// Applies a `--backend` flag, which wins over file and environment.
    pub fn override_backend(&mut self, url: &str) -> Result<()> {
        self.backend_url = url.trim().trim_end_matches('/').to_string();
        self.validate()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("medtui").join("config.json"))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("medtui").join("medtui.log")))
    }

    fn validate(&self) -> Result<()> {
        if !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "backend_url must start with http:// or https://, got '{}'",
                self.backend_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }
        if self.extract.field.trim().is_empty() {
            return Err(Error::Config("extract.field must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"backend_url": "http://10.0.0.2:5002/", "highlight": {{"strategy": "sequential"}}}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.highlight.strategy, Strategy::Sequential);
        assert_eq!(config.highlight.open_marker, "[[");
        assert_eq!(config.extract.field, "file");
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let config = AppConfig { backend_url: "localhost:5002".to_string(), ..AppConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_override() {
        let mut config = AppConfig::default();
        config.override_backend("https://triage.example.org/ ").unwrap();
        assert_eq!(config.backend_url, "https://triage.example.org");
        assert!(config.override_backend("ftp://nope").is_err());
    }
}
