//! PagerDuty incident lookup
//!
//! Parses an incident URL, fetches the incident from the REST API and
//! extracts the service, environment and runbook it refers to.

pub mod client;
pub mod extract;
pub mod incident_url;

pub use client::{PagerDutyClient, DEFAULT_API_URL};
pub use extract::{
    extract_incident, extract_url_from_text, string_field, Details, Incident, IncidentResponse,
};
pub use incident_url::{parse_incident_url, IncidentUrlError};
