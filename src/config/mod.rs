use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_BASE_URL: &str = "https://www.damejidlo.cz";
pub const DEFAULT_CATALOG_PATH: &str = "/katalog/";
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub google: GoogleConfig,
    #[serde(default)]
    pub site: SiteConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

fn default_geocoding_endpoint() -> String {
    DEFAULT_GEOCODING_ENDPOINT.to_string()
}

fn default_region() -> String {
    "cz".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_catalog_path() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

fn default_user_agent() -> String {
    concat!("damejidlo-etl/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_path: default_catalog_path(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl AppConfig {
    /// Loads `config.toml`; a missing or unreadable file is a config error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EtlError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds a config around an api key with every other value defaulted.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            google: GoogleConfig {
                api_key: Some(api_key.into()),
                endpoint: default_geocoding_endpoint(),
                region: default_region(),
            },
            site: SiteConfig::default(),
            logging: None,
        }
    }

    pub fn api_key(&self) -> Result<&str> {
        validation::validate_required_field("google.api_key", &self.google.api_key)
            .map(String::as_str)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("google.api_key", self.api_key()?)?;
        validation::validate_url("google.endpoint", &self.google.endpoint)?;
        validation::validate_url("site.base_url", &self.site.base_url)?;
        validation::validate_site_path("site.catalog_path", &self.site.catalog_path)?;
        validation::validate_positive_number("site.timeout_seconds", self.site.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.site.base_url
    }

    fn catalog_path(&self) -> &str {
        &self.site.catalog_path
    }

    fn user_agent(&self) -> &str {
        &self.site.user_agent
    }

    fn timeout_seconds(&self) -> u64 {
        self.site.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[google]
api_key = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.api_key().unwrap(), "secret");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.catalog_path(), "/katalog/");
        assert_eq!(config.google.endpoint, DEFAULT_GEOCODING_ENDPOINT);
        assert_eq!(config.google.region, "cz");
        assert_eq!(config.timeout_seconds(), 30);
        assert!(config.log_level().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_site_and_logging_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
[google]
api_key = "secret"
endpoint = "http://127.0.0.1:9000/geocode"

[site]
base_url = "http://127.0.0.1:9000"
timeout_seconds = 5

[logging]
level = "damejidlo_etl=debug"
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.catalog_path(), DEFAULT_CATALOG_PATH);
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.log_level(), Some("damejidlo_etl=debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig::from_toml_str("[google]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EtlError::MissingConfigError { ref field } if field == "google.api_key"));
    }

    #[test]
    fn test_missing_google_section_is_parse_error() {
        let err = AppConfig::from_toml_str("[site]\nbase_url = \"https://x.cz\"\n").unwrap_err();
        assert!(matches!(err, EtlError::TomlError(_)));
    }

    #[test]
    fn test_bad_base_url_fails_validation() {
        let mut config = AppConfig::with_api_key("secret");
        config.site.base_url = "ftp://damejidlo.cz".to_string();
        assert!(config.validate().is_err());
    }
}
