use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog structure not recognised at {url}: {message}")]
    CatalogStructure { url: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Network,
    Scrape,
    Io,
    Serialization,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
            EtlError::IoError(_) => ErrorCategory::Io,
            EtlError::TomlError(_)
            | EtlError::UrlError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            EtlError::CatalogStructure { .. } | EtlError::ProcessingError { .. } => {
                ErrorCategory::Scrape
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Config => {
                "Check config.toml next to the executable: [google] api_key is required"
            }
            ErrorCategory::Network => "Check network connectivity and that the site is reachable",
            ErrorCategory::Scrape => {
                "The catalog page layout may have changed; inspect the listing markup"
            }
            ErrorCategory::Io => "Check that the output directory is writable",
            ErrorCategory::Serialization => "Inspect the scraped values for unexpected content",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => "Request timed out".to_string(),
            EtlError::ApiError(e) => match e.url() {
                Some(url) => format!("Failed to fetch {}", url),
                None => "Failed to fetch a page".to_string(),
            },
            EtlError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            EtlError::CatalogStructure { .. } => {
                "Restaurant catalog could not be read, nothing was exported".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
