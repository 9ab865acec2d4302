use crate::pagerduty::IncidentUrlError;
use std::path::PathBuf;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Config file could not be read
    #[error("reading config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML for the config model
    #[error("parsing config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup errors (unknown service or environment)
    #[error("{0}")]
    NotFound(String),

    /// A tool lacks the settings it needs for a service/environment
    #[error("{tool} not configured")]
    NotConfigured { tool: String },

    /// Incident URL rejected
    #[error("invalid PagerDuty URL: {0}")]
    IncidentUrl(#[from] IncidentUrlError),

    /// Incident payload lacks a required detail
    #[error("incident missing '{0}' field in details")]
    MissingField(&'static str),

    /// Non-2xx response from the PagerDuty API
    #[error("PagerDuty API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Transport errors
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the incident shape
    #[error("decoding response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Browser launch failed
    #[error("opening {label} ({url}): {source}")]
    Launch {
        label: String,
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::ConfigRead { .. } => "CONFIG_READ_ERROR",
            AppError::ConfigParse(_) => "CONFIG_PARSE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NotConfigured { .. } => "NOT_CONFIGURED",
            AppError::IncidentUrl(_) => "INVALID_INCIDENT_URL",
            AppError::MissingField(_) => "MISSING_INCIDENT_FIELD",
            AppError::Api { .. } => "API_ERROR",
            AppError::Http(_) => "NETWORK_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Launch { .. } => "LAUNCH_ERROR",
        }
    }

    /// True for the soft "skip this tool" outcome of `Tool::build_url`.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, AppError::NotConfigured { .. })
    }

    pub(crate) fn not_configured(tool: &str) -> Self {
        AppError::NotConfigured {
            tool: tool.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
