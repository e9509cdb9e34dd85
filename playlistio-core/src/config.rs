use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use playlistio_providers::ClientOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub addon: AddonConfig,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL (e.g. `https://playlistio.example.com`), used for the
    /// startup banner and CLI-generated install links
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7000,
            public_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

/// Addon identity as shown to the Stremio client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    pub name: String,
    pub description: String,
    /// Development mode: logo points at the `main` branch instead of the
    /// release tag
    pub dev_mode: bool,
    /// Raw HTML injected at the top of the configuration page
    pub embed_html: Option<String>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            name: "Playlistio | ElfHosted".to_string(),
            description: "Convert catalogs into an auto-playable series.".to_string(),
            dev_mode: false,
            embed_html: None,
        }
    }
}

/// Outbound requests to wrapped addons
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub connect_timeout_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            timeout_seconds: 30,
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
            ..ClientOptions::default()
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // PLAYLISTIO_SERVER__PORT, PLAYLISTIO_ADDON__DEV_MODE, ...
        // A double underscore separates sections so that field names may
        // contain single underscores.
        builder = builder.add_source(
            Environment::with_prefix("PLAYLISTIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from environment variables only (for Docker/K8s)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load from file path
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Get HTTP address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// URL at which the configuration page is reachable
    #[must_use]
    pub fn public_url(&self) -> String {
        self.server.public_url.clone().map_or_else(
            || format!("http://localhost:{}", self.server.port),
            |url| url.trim_end_matches('/').to_string(),
        )
    }

    /// Check the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.host.is_empty() {
            errors.push("server.host must not be empty".to_string());
        }
        if self.server.port == 0 {
            errors.push("server.port must be greater than 0".to_string());
        }
        if let Some(url) = &self.server.public_url {
            match url::Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => errors.push(format!(
                    "server.public_url must use http or https, got '{}'",
                    parsed.scheme()
                )),
                Err(e) => errors.push(format!("server.public_url is not a valid URL: {e}")),
            }
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be 'json' or 'pretty', got '{}'",
                self.logging.format
            ));
        }
        if self.addon.name.is_empty() {
            errors.push("addon.name must not be empty".to_string());
        }
        if self.remote.timeout_seconds == 0 {
            errors.push("remote.timeout_seconds must be greater than 0".to_string());
        }
        if self.remote.connect_timeout_seconds == 0 {
            errors.push("remote.connect_timeout_seconds must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.addon.name, "Playlistio | ElfHosted");
        assert!(!config.addon.dev_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_address() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                public_url: None,
            },
            ..Config::default()
        };

        assert_eq!(config.http_address(), "127.0.0.1:8080");
        assert_eq!(config.public_url(), "http://localhost:8080");
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.server.public_url = Some("https://playlistio.example.com/".to_string());
        assert_eq!(config.public_url(), "https://playlistio.example.com");
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.server.port = 0;
        config.logging.format = "xml".to_string();
        config.remote.timeout_seconds = 0;
        config.server.public_url = Some("ftp://example.com".to_string());

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("server.port")));
        assert!(errors.iter().any(|e| e.contains("logging.format")));
        assert!(errors.iter().any(|e| e.contains("remote.timeout_seconds")));
        assert!(errors.iter().any(|e| e.contains("public_url")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 9000\naddon:\n  dev_mode: true\nremote:\n  timeout_seconds: 5"
        )
        .unwrap();

        let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.addon.dev_mode);
        assert_eq!(config.remote.timeout_seconds, 5);
        assert_eq!(config.remote.connect_timeout_seconds, 10);
    }

    #[test]
    fn test_client_options() {
        let options = RemoteConfig {
            connect_timeout_seconds: 3,
            timeout_seconds: 12,
        }
        .client_options();
        assert_eq!(options.connect_timeout, Duration::from_secs(3));
        assert_eq!(options.timeout, Duration::from_secs(12));
    }
}
