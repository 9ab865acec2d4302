use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Open string-keyed details map, as sent by PagerDuty
pub type Details = Map<String, Value>;

/// Substrings that mark a description URL as a likely runbook
const RUNBOOK_HINTS: [&str; 5] = ["runbook", "wiki", "confluence", "notion", "docs"];

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("valid url pattern"));

/// Service, environment and runbook resolved from an incident
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub service: String,
    pub environment: String,
    pub runbook_url: Option<String>,
}

/// `GET /incidents/{id}` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub incident: IncidentPayload,
}

/// `null` decodes like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentPayload {
    #[serde(default)]
    pub body: Option<Body>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub alerts: Option<Vec<AlertPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertPayload {
    #[serde(default)]
    pub body: Option<Body>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub details: Option<Details>,
}

impl Body {
    fn details(body: &Option<Body>) -> Option<&Details> {
        body.as_ref().and_then(|b| b.details.as_ref())
    }
}

impl IncidentPayload {
    /// Incident-level details when non-empty, otherwise the first alert's.
    ///
    /// The two sources are never merged.
    pub fn candidate_details(&self) -> Option<&Details> {
        match Body::details(&self.body) {
            Some(details) if !details.is_empty() => Some(details),
            _ => self
                .alerts
                .as_deref()
                .and_then(|alerts| alerts.first())
                .and_then(|alert| Body::details(&alert.body)),
        }
    }
}

/// A non-empty string value. Missing keys, non-strings and `""` are all absent.
pub fn string_field<'a>(details: Option<&'a Details>, key: &str) -> Option<&'a str> {
    match details?.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Turn an incident payload into the service/environment it concerns.
pub fn extract_incident(response: &IncidentResponse) -> Result<Incident> {
    let incident = &response.incident;
    let details = incident.candidate_details();

    let service = string_field(details, "service").ok_or(AppError::MissingField("service"))?;
    let environment =
        string_field(details, "environment").ok_or(AppError::MissingField("environment"))?;

    let runbook_url = string_field(details, "runbook_url")
        .or_else(|| string_field(details, "runbook"))
        .map(str::to_string)
        .or_else(|| extract_url_from_text(incident.description.as_deref().unwrap_or_default()));

    Ok(Incident {
        service: service.to_string(),
        environment: environment.to_string(),
        runbook_url,
    })
}

/// Pick the most runbook-like URL out of free text.
///
/// The first URL mentioning one of the runbook hints wins; otherwise the
/// first URL found.
pub fn extract_url_from_text(text: &str) -> Option<String> {
    let matches: Vec<&str> = URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect();

    matches
        .iter()
        .find(|url| {
            let lower = url.to_lowercase();
            RUNBOOK_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .or_else(|| matches.first())
        .map(|url| url.to_string())
}
