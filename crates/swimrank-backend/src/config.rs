//! Configuration loading and typed config structures for the backend.
//!
//! The canonical configuration lives in `swimrank-config.yaml` next to
//! the binary. The file is optional: every field has a default suited to
//! a local demo deployment, and environment variables override whatever
//! the file says, so a container can be configured with env vars alone.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level backend configuration.
///
/// Mirrors the structure of `swimrank-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Database settings.
    #[serde(default)]
    pub database: DatabaseSection,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `PORT` overrides `server.port`
    /// - `DATABASE_URL` overrides `database.url`
    /// - `DATABASE_NAME` overrides `database.name`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Pure parse: environment overrides are applied by [`Self::from_file`]
    /// (and by the defaults path in `main`), not here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override file values with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PORT") {
            match val.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!(value = val, error = %e, "Ignoring unparseable PORT"),
            }
        }
        if let Ok(val) = std::env::var("DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("DATABASE_NAME") {
            self.database.name = val;
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8000
}

/// Database settings.
///
/// An empty URL means no store: the backend serves every endpoint
/// without persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseSection {
    /// `PostgreSQL` connection URL. Empty or absent = unconfigured.
    #[serde(default)]
    pub url: String,

    /// Database display name, surfaced in startup logs only.
    #[serde(default)]
    pub name: String,
}

impl DatabaseSection {
    /// The configured URL, if any.
    pub fn configured_url(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.database.configured_url().is_none());
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = r"
server:
  port: 9000
database:
  url: postgresql://localhost:5432/swimrank
  name: swimrank
";
        let config = AppConfig::parse(yaml).ok();
        let config = config.as_ref();
        assert_eq!(config.map(|c| c.server.port), Some(9000));
        assert_eq!(
            config.and_then(|c| c.database.configured_url()),
            Some("postgresql://localhost:5432/swimrank")
        );
    }

    #[test]
    fn partial_yaml_keeps_section_defaults() {
        let yaml = r"
server:
  host: 127.0.0.1
";
        let config = AppConfig::parse(yaml).ok();
        let config = config.as_ref();
        assert_eq!(config.map(|c| c.server.host.as_str()), Some("127.0.0.1"));
        assert_eq!(config.map(|c| c.server.port), Some(8000));
    }

    #[test]
    fn blank_database_url_counts_as_unconfigured() {
        let section = DatabaseSection {
            url: String::from("   "),
            name: String::new(),
        };
        assert!(section.configured_url().is_none());
    }
}
