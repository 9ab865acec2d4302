//! Observability tools
//!
//! Each tool turns an environment's base URL and a service's per-environment
//! settings into a link that can be opened in the browser.
//!
//! # Available Tools
//!
//! - `grafana`: dashboard by id
//! - `kibana`: discover view filtered by a query string
//! - `pagerduty`: service page
//!
//! A tool that lacks either half of its settings returns
//! [`AppError::NotConfigured`], which callers treat as "skip with a warning"
//! rather than a failure.

mod grafana;
mod kibana;
mod pagerduty;

pub use grafana::Grafana;
pub use kibana::Kibana;
pub use pagerduty::PagerDuty;

use crate::config::{EnvironmentConfig, ServiceEnvConfig};
use crate::error::{AppError, Result};

/// A tool that can build a link for one service in one environment.
pub trait Tool: Send + Sync {
    /// Stable lowercase identifier, used for `--tools` selection and logging.
    fn name(&self) -> &'static str;

    /// Build the tool URL, or `AppError::NotConfigured` when settings are missing.
    fn build_url(&self, env: &EnvironmentConfig, svc: &ServiceEnvConfig) -> Result<String>;
}

static REGISTRY: &[&dyn Tool] = &[&Grafana, &Kibana, &PagerDuty];

/// Look up a tool by name.
pub fn get(name: &str) -> Option<&'static dyn Tool> {
    let name = name.to_ascii_lowercase();
    REGISTRY.iter().copied().find(|tool| tool.name() == name)
}

/// All registered tools, in the order they are opened.
pub fn all() -> Vec<&'static dyn Tool> {
    REGISTRY.to_vec()
}

/// Names of all registered tools.
pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|tool| tool.name()).collect()
}

/// Resolve a `--tools` selection. An empty selection means every tool.
///
/// Blank entries are ignored; an unknown name fails the whole selection so
/// that nothing is opened for a mistyped request.
pub fn select(requested: &[String]) -> Result<Vec<&'static dyn Tool>> {
    let mut selected = Vec::new();
    for name in requested.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let tool = get(name).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown tool: {} (available: {})",
                name,
                names().join(", ")
            ))
        })?;
        selected.push(tool);
    }

    if selected.is_empty() {
        return Ok(all());
    }
    Ok(selected)
}

/// Base URL with a single trailing slash removed.
pub(crate) fn trim_base(base: &str) -> &str {
    base.strip_suffix('/').unwrap_or(base)
}
