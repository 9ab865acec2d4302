use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

static INCIDENT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/incidents/([A-Z0-9]+)$").expect("valid incident path pattern"));

/// Why an incident URL was rejected
#[derive(Error, Debug, PartialEq)]
pub enum IncidentUrlError {
    #[error("{0}")]
    Malformed(#[from] url::ParseError),

    #[error("expected https scheme, got {0:?}")]
    Scheme(String),

    #[error("expected *.pagerduty.com host, got {0:?}")]
    Host(String),

    #[error("expected format https://*.pagerduty.com/incidents/PXXXXXX, got path {0:?}")]
    Path(String),
}

/// Extract the incident ID from a PagerDuty incident URL.
///
/// Expected format: `https://<subdomain>.pagerduty.com/incidents/<ID>` where
/// the ID is uppercase letters and digits. Query and fragment are ignored.
/// The host is matched case-insensitively; the path must be exactly as given,
/// with no dot segments or percent-encoding.
pub fn parse_incident_url(raw: &str) -> Result<String, IncidentUrlError> {
    let raw = raw.trim();
    let url = Url::parse(raw)?;

    if url.scheme() != "https" {
        return Err(IncidentUrlError::Scheme(url.scheme().to_string()));
    }

    let host = url.host_str().unwrap_or_default();
    let host_ok = host == "pagerduty.com" || host.ends_with(".pagerduty.com");
    if !host_ok || url.port().is_some() {
        let shown = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        return Err(IncidentUrlError::Host(shown));
    }

    // `Url` resolves `..` and re-encodes; only the path as written counts.
    let path = raw_path(raw);
    if path != url.path() {
        return Err(IncidentUrlError::Path(path.to_string()));
    }

    INCIDENT_PATH
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| IncidentUrlError::Path(path.to_string()))
}

fn raw_path(raw: &str) -> &str {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    rest.find('/').map_or("", |start| &rest[start..])
}
