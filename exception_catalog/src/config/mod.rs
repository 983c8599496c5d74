//! Catalog configuration
//!
//! Four source files, all relative to one base directory. Values come from
//! built-in defaults, an optional TOML file, and `EXCEPTION_*` environment
//! overrides, in that order.

pub mod constants;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::registry::PatternSource;
use constants::{defaults, env_vars};

/// Locations of the message, debug, solution and http-status sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base directory the four file names are resolved against
    pub message_files_path: PathBuf,
    pub message_file_name: String,
    pub debug_file_name: String,
    pub solution_file_name: String,
    pub http_status_file_name: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            message_files_path: PathBuf::from(defaults::MESSAGE_FILES_PATH),
            message_file_name: defaults::MESSAGE_FILE_NAME.to_string(),
            debug_file_name: defaults::DEBUG_FILE_NAME.to_string(),
            solution_file_name: defaults::SOLUTION_FILE_NAME.to_string(),
            http_status_file_name: defaults::HTTP_STATUS_FILE_NAME.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Default file names under a custom base directory
    pub fn new(message_files_path: impl Into<PathBuf>) -> Self {
        Self {
            message_files_path: message_files_path.into(),
            ..Self::default()
        }
    }

    /// Defaults with `EXCEPTION_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parse TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|error| ConfigError::Toml {
            origin: "<inline>".to_string(),
            error,
        })
    }

    /// Read and parse a TOML config file
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        toml::from_str(&content).map_err(|error| ConfigError::Toml {
            origin: path.display().to_string(),
            error,
        })
    }

    /// Apply `EXCEPTION_*` environment variables over the current values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(path) = non_blank(env_vars::MESSAGE_FILES_PATH) {
            self.message_files_path = PathBuf::from(path);
        }
        if let Some(name) = non_blank(env_vars::MESSAGE_FILE_NAME) {
            self.message_file_name = name;
        }
        if let Some(name) = non_blank(env_vars::DEBUG_FILE_NAME) {
            self.debug_file_name = name;
        }
        if let Some(name) = non_blank(env_vars::SOLUTION_FILE_NAME) {
            self.solution_file_name = name;
        }
        if let Some(name) = non_blank(env_vars::HTTP_STATUS_FILE_NAME) {
            self.http_status_file_name = name;
        }
        self
    }

    pub fn with_message_files_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.message_files_path = path.into();
        self
    }

    pub fn with_message_file_name(mut self, name: impl Into<String>) -> Self {
        self.message_file_name = name.into();
        self
    }

    pub fn with_debug_file_name(mut self, name: impl Into<String>) -> Self {
        self.debug_file_name = name.into();
        self
    }

    pub fn with_solution_file_name(mut self, name: impl Into<String>) -> Self {
        self.solution_file_name = name.into();
        self
    }

    pub fn with_http_status_file_name(mut self, name: impl Into<String>) -> Self {
        self.http_status_file_name = name.into();
        self
    }

    /// File name configured for a source
    pub fn file_name(&self, source: PatternSource) -> &str {
        match source {
            PatternSource::Message => &self.message_file_name,
            PatternSource::Debug => &self.debug_file_name,
            PatternSource::Solution => &self.solution_file_name,
            PatternSource::HttpStatus => &self.http_status_file_name,
        }
    }

    /// Full path of a source file
    pub fn file_path(&self, source: PatternSource) -> PathBuf {
        self.message_files_path.join(self.file_name(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();

        assert_eq!(config.message_files_path, PathBuf::from("exception"));
        assert_eq!(
            config.file_path(PatternSource::Message),
            Path::new("exception").join("message.properties")
        );
        assert_eq!(config.file_name(PatternSource::HttpStatus), "http_status.properties");
    }

    #[test]
    fn test_config_builder() {
        let config = CatalogConfig::new("/etc/app/errors")
            .with_message_file_name("msg.properties")
            .with_debug_file_name("dbg.properties")
            .with_solution_file_name("fix.properties")
            .with_http_status_file_name("codes.properties");

        assert_eq!(
            config.file_path(PatternSource::Solution),
            PathBuf::from("/etc/app/errors/fix.properties")
        );
        assert_eq!(config.file_name(PatternSource::Message), "msg.properties");
        assert_eq!(config.file_name(PatternSource::Debug), "dbg.properties");
        assert_eq!(config.file_name(PatternSource::HttpStatus), "codes.properties");
    }

    #[test]
    fn test_toml_partial_override() {
        let config = CatalogConfig::from_toml_str(
            r#"
            message_files_path = "i18n/errors"
            message_file_name = "messages_en.properties"
            "#,
        )
        .unwrap();

        assert_eq!(config.message_files_path, PathBuf::from("i18n/errors"));
        assert_eq!(config.message_file_name, "messages_en.properties");
        assert_eq!(config.debug_file_name, "debug.properties");
    }

    #[test]
    fn test_toml_invalid() {
        let result = CatalogConfig::from_toml_str("message_file_name = [1, 2]");
        assert_matches!(result, Err(ConfigError::Toml { .. }));
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "solution_file_name = \"howto.properties\"\n").unwrap();

        let config = CatalogConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.solution_file_name, "howto.properties");

        let missing = CatalogConfig::from_toml_file(dir.path().join("absent.toml"));
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut vars = HashMap::new();
        vars.insert(env_vars::MESSAGE_FILES_PATH, "/srv/errors".to_string());
        vars.insert(env_vars::DEBUG_FILE_NAME, "trace.properties".to_string());
        vars.insert(env_vars::SOLUTION_FILE_NAME, "   ".to_string());

        let config = CatalogConfig::default().with_overrides(|name| vars.get(name).cloned());

        assert_eq!(config.message_files_path, PathBuf::from("/srv/errors"));
        assert_eq!(config.debug_file_name, "trace.properties");
        assert_eq!(config.solution_file_name, "solution.properties");
        assert_eq!(config.message_file_name, "message.properties");
    }
}
