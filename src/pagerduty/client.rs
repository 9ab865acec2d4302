use super::extract::{extract_incident, Incident, IncidentResponse};
use crate::config::Config;
use crate::error::{AppError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// PagerDuty REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";

const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";

/// PagerDuty REST API client
#[derive(Clone)]
pub struct PagerDutyClient {
    pub(crate) api_key: String,
    pub(crate) api_url: String,
    pub(crate) client: Client,
}

impl fmt::Debug for PagerDutyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerDutyClient")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl PagerDutyClient {
    /// Create a client against the public API
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "PagerDuty API key cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            client,
        })
    }

    /// Create a client from the API key, URL and timeout in the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(
            config.api_key()?,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(client.with_base_url(&config.pagerduty_api_url))
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch an incident and extract its service/environment metadata
    pub async fn get_incident(&self, id: &str) -> Result<Incident> {
        let response = self.fetch_incident(id).await?;
        let incident = extract_incident(&response)?;
        info!(
            incident_id = %id,
            service = %incident.service,
            environment = %incident.environment,
            runbook = incident.runbook_url.is_some(),
            "Resolved incident"
        );
        Ok(incident)
    }

    /// Fetch the raw incident payload. Exactly one request, no retries.
    pub async fn fetch_incident(&self, id: &str) -> Result<IncidentResponse> {
        let url = format!("{}/incidents/{}", self.api_url, id);
        debug!(incident_id = %id, url = %url, "Fetching PagerDuty incident");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Token token={}", self.api_key))
            .header(ACCEPT, ACCEPT_V2)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body is best-effort here, the status is what gets reported.
            let body = response.text().await.unwrap_or_default();
            error!(
                incident_id = %id,
                status = status.as_u16(),
                "PagerDuty API returned an error"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(AppError::Decode)
    }
}
