//! Drives the selected tools for one service/environment.
//!
//! Lookups and tool selection all happen before the first URL is opened, so
//! a bad service, environment or tool name never leaves a half-opened set of
//! tabs behind. Tools that are not configured are skipped with a warning.

use crate::browser::Launcher;
use crate::config::{Config, EnvironmentConfig, ServiceEnvConfig};
use crate::error::{AppError, Result};
use crate::pagerduty::{parse_incident_url, Incident, PagerDutyClient};
use crate::tools;
use tracing::{info, warn};

/// Label used for the runbook link in reports and errors
pub const RUNBOOK_LABEL: &str = "runbook";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Direct,
    Incident,
}

/// What to open links for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub service: String,
    pub environment: String,
    pub runbook_url: Option<String>,
    origin: Origin,
}

impl Target {
    /// Service and environment given by the operator
    pub fn direct(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
            runbook_url: None,
            origin: Origin::Direct,
        }
    }

    /// Service, environment and runbook taken from an incident
    pub fn from_incident(incident: Incident) -> Self {
        Self {
            service: incident.service,
            environment: incident.environment,
            runbook_url: incident.runbook_url,
            origin: Origin::Incident,
        }
    }

    pub fn is_incident(&self) -> bool {
        self.origin == Origin::Incident
    }
}

/// A link that was handed to the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedLink {
    pub label: String,
    pub url: String,
}

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Links in the order they were opened; the runbook, if any, is last
    pub opened: Vec<OpenedLink>,
    /// Tools skipped because they are not configured
    pub skipped: Vec<String>,
}

/// Resolve a PagerDuty incident URL into the incident it refers to.
pub async fn resolve_alert(client: &PagerDutyClient, alert_url: &str) -> Result<Incident> {
    let incident_id = parse_incident_url(alert_url)?;
    client.get_incident(&incident_id).await
}

/// Opens tool links for a target
pub struct Orchestrator<'a, L: Launcher> {
    config: &'a Config,
    launcher: L,
}

impl<'a, L: Launcher> Orchestrator<'a, L> {
    pub fn new(config: &'a Config, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Open every selected tool, then the runbook.
    ///
    /// `requested` is the explicit tool list; empty means all tools in
    /// registry order.
    pub fn run(&self, target: &Target, requested: &[String]) -> Result<RunReport> {
        let env = self.environment(target)?;
        let svc = self.service_env(target)?;
        let selected = tools::select(requested)?;

        let mut report = RunReport::default();

        for tool in selected {
            match tool.build_url(env, svc) {
                Ok(url) => {
                    self.open(&mut report, tool.name(), url)?;
                }
                Err(e) if e.is_not_configured() => {
                    warn!(
                        tool = tool.name(),
                        service = %target.service,
                        environment = %target.environment,
                        "{}",
                        e
                    );
                    report.skipped.push(tool.name().to_string());
                }
                Err(e) => return Err(e),
            }
        }

        if let Some(runbook) = &target.runbook_url {
            self.open(&mut report, RUNBOOK_LABEL, runbook.clone())?;
        }

        info!(
            service = %target.service,
            environment = %target.environment,
            opened = report.opened.len(),
            skipped = report.skipped.len(),
            "Run complete"
        );
        Ok(report)
    }

    fn open(&self, report: &mut RunReport, label: &str, url: String) -> Result<()> {
        self.launcher.open(label, &url)?;
        report.opened.push(OpenedLink {
            label: label.to_string(),
            url,
        });
        Ok(())
    }

    fn environment(&self, target: &Target) -> Result<&'a EnvironmentConfig> {
        self.config.environment(&target.environment).map_err(|e| {
            if target.is_incident() {
                AppError::NotFound(format!(
                    "environment {:?} from incident not found in config",
                    target.environment
                ))
            } else {
                e
            }
        })
    }

    fn service_env(&self, target: &Target) -> Result<&'a ServiceEnvConfig> {
        self.config
            .service_env(&target.service, &target.environment)
            .map_err(|e| {
                if target.is_incident() {
                    AppError::NotFound(format!(
                        "service {:?} from incident not found in config",
                        target.service
                    ))
                } else {
                    e
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopLauncher;

    impl Launcher for NoopLauncher {
        fn open(&self, _label: &str, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    fn config() -> Config {
        Config::from_yaml_str(
            r#"
environments:
  prod:
    grafana: https://grafana.example.com
services:
  api:
    prod:
      grafana_dashboard_id: api
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_target_constructors() {
        let direct = Target::direct("api", "prod");
        assert!(!direct.is_incident());
        assert!(direct.runbook_url.is_none());

        let incident = Target::from_incident(Incident {
            service: "api".to_string(),
            environment: "prod".to_string(),
            runbook_url: Some("https://wiki.example.com/api".to_string()),
        });
        assert!(incident.is_incident());
        assert_eq!(incident.service, direct.service);
    }

    #[test]
    fn test_skips_unconfigured_tools() {
        let config = config();
        let report = Orchestrator::new(&config, NoopLauncher)
            .run(&Target::direct("api", "prod"), &[])
            .unwrap();
        assert_eq!(report.opened.len(), 1);
        assert_eq!(report.opened[0].url, "https://grafana.example.com/d/api");
        assert_eq!(report.skipped, vec!["kibana", "pagerduty"]);
    }

    #[test]
    fn test_incident_lookup_messages() {
        let config = config();
        let orchestrator = Orchestrator::new(&config, NoopLauncher);

        let target = Target::from_incident(Incident {
            service: "api".to_string(),
            environment: "qa".to_string(),
            runbook_url: None,
        });
        assert_eq!(
            orchestrator.run(&target, &[]).unwrap_err().to_string(),
            "environment \"qa\" from incident not found in config"
        );

        let target = Target::from_incident(Incident {
            service: "web".to_string(),
            environment: "prod".to_string(),
            runbook_url: None,
        });
        assert_eq!(
            orchestrator.run(&target, &[]).unwrap_err().to_string(),
            "service \"web\" from incident not found in config"
        );
    }

    #[test]
    fn test_direct_lookup_messages() {
        let config = config();
        let orchestrator = Orchestrator::new(&config, NoopLauncher);
        assert_eq!(
            orchestrator
                .run(&Target::direct("api", "qa"), &[])
                .unwrap_err()
                .to_string(),
            "unknown environment: qa"
        );
        assert_eq!(
            orchestrator
                .run(&Target::direct("web", "prod"), &[])
                .unwrap_err()
                .to_string(),
            "unknown service: web"
        );
    }
}
