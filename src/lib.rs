//! observe
//!
//! Opens the dashboards, log searches and service pages for a service in an
//! environment, or for the service and environment named by a PagerDuty
//! incident.

pub mod browser;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod pagerduty;
pub mod tools;

pub use browser::{BrowserLauncher, Launcher, PrintLauncher};
pub use config::{Config, EnvironmentConfig, ServiceConfig, ServiceEnvConfig};
pub use error::{AppError, Result};
pub use orchestrator::{resolve_alert, OpenedLink, Orchestrator, RunReport, Target};
pub use pagerduty::{Incident, PagerDutyClient};
pub use tools::Tool;
