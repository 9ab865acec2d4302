//! Common test utilities
//!
//! Config fixtures and launchers that record or fail instead of opening a
//! browser.

#![allow(dead_code)]

use observe::{AppError, Config, Launcher, Result};
use std::cell::RefCell;

/// Config with `api` fully configured in prod and partially in staging
pub const FIXTURE_YAML: &str = r#"
pagerduty_api_key: test-key
environments:
  prod:
    grafana: https://grafana.example.com/
    kibana: https://kibana.example.com
    pagerduty: https://acme.pagerduty.com
  staging:
    grafana: https://grafana.staging.example.com
services:
  api:
    prod:
      grafana_dashboard_id: api-prod
      kibana_query: "service:api AND level:error"
      pagerduty_service_id: PSVC123
    staging:
      grafana_dashboard_id: api-staging
      kibana_query: "service:api"
  checkout:
    prod:
      kibana_query: "service:checkout"
"#;

pub fn fixture_config() -> Config {
    Config::from_yaml_str(FIXTURE_YAML).expect("fixture config parses")
}

/// Records every URL it is asked to open
#[derive(Default)]
pub struct RecordingLauncher {
    pub opened: RefCell<Vec<(String, String)>>,
}

impl RecordingLauncher {
    pub fn labels(&self) -> Vec<String> {
        self.opened.borrow().iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn urls(&self) -> Vec<String> {
        self.opened.borrow().iter().map(|(_, u)| u.clone()).collect()
    }
}

impl Launcher for RecordingLauncher {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        self.opened
            .borrow_mut()
            .push((label.to_string(), url.to_string()));
        Ok(())
    }
}

/// Fails on the named label, records everything before it
pub struct FailingLauncher<'a> {
    pub fail_on: &'a str,
    pub recorder: &'a RecordingLauncher,
}

impl Launcher for FailingLauncher<'_> {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        if label == self.fail_on {
            return Err(AppError::Launch {
                label: label.to_string(),
                url: url.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no browser found"),
            });
        }
        self.recorder.open(label, url)
    }
}
