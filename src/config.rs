use crate::error::{AppError, Result};
use crate::pagerduty::DEFAULT_API_URL;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bundled example config, used to seed a new config file
pub const EXAMPLE_CONFIG: &str = include_str!("../config/example.yaml");

/// Main application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// PagerDuty REST API key (required only for `--alert`)
    #[serde(default)]
    pub pagerduty_api_key: Option<String>,

    /// PagerDuty REST API base URL
    #[serde(default = "default_pagerduty_api_url")]
    pub pagerduty_api_url: String,

    /// Timeout for the incident fetch (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Environment name to tool base URLs
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,

    /// Service name to per-environment tool settings
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pagerduty_api_key: None,
            pagerduty_api_url: default_pagerduty_api_url(),
            request_timeout_secs: default_request_timeout(),
            environments: BTreeMap::new(),
            services: BTreeMap::new(),
        }
    }
}

/// Base URLs for each tool in an environment
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub grafana: Option<String>,

    #[serde(default)]
    pub kibana: Option<String>,

    #[serde(default)]
    pub pagerduty: Option<String>,
}

/// Environment name to tool settings for one service
pub type ServiceConfig = BTreeMap<String, ServiceEnvConfig>;

/// Tool-specific ids and queries for a service in an environment
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServiceEnvConfig {
    #[serde(default)]
    pub grafana_dashboard_id: Option<String>,

    #[serde(default)]
    pub kibana_query: Option<String>,

    #[serde(default)]
    pub pagerduty_service_id: Option<String>,
}

/// Treats an empty string the same as an absent value.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Config {
    /// Default config file location: `~/.config/observe/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("observe").join("config.yaml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::default_path().ok_or_else(|| {
            AppError::Configuration("could not determine home directory".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load configuration from a file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&data)?;
        tracing::debug!(
            path = %path.display(),
            environments = config.environments.len(),
            services = config.services.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml_str(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Replace the API key when an override is supplied
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.pagerduty_api_key = Some(key);
        }
        self
    }

    /// API key for incident mode
    pub fn api_key(&self) -> Result<&str> {
        non_empty(&self.pagerduty_api_key).ok_or_else(|| {
            AppError::Configuration("pagerduty_api_key required in config for --alert".to_string())
        })
    }

    /// Check that the config is well-formed
    pub fn validate(&self) -> Result<()> {
        if self.environments.is_empty() {
            return Err(AppError::Validation("no environments configured".to_string()));
        }
        if self.services.is_empty() {
            return Err(AppError::Validation("no services configured".to_string()));
        }

        for (service, envs) in &self.services {
            for env in envs.keys() {
                if !self.environments.contains_key(env) {
                    return Err(AppError::Validation(format!(
                        "service {:?} references unknown environment {:?}",
                        service, env
                    )));
                }
            }
        }

        Ok(())
    }

    /// Environment settings by name
    pub fn environment(&self, env: &str) -> Result<&EnvironmentConfig> {
        self.environments
            .get(env)
            .ok_or_else(|| AppError::NotFound(format!("unknown environment: {}", env)))
    }

    /// Service settings for one environment
    pub fn service_env(&self, service: &str, env: &str) -> Result<&ServiceEnvConfig> {
        let svc = self
            .services
            .get(service)
            .ok_or_else(|| AppError::NotFound(format!("unknown service: {}", service)))?;

        svc.get(env).ok_or_else(|| {
            AppError::NotFound(format!(
                "service {:?} has no configuration for environment {:?}",
                service, env
            ))
        })
    }
}

fn default_pagerduty_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}
