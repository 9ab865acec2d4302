use super::{trim_base, Tool};
use crate::config::{non_empty, EnvironmentConfig, ServiceEnvConfig};
use crate::error::{AppError, Result};

/// PagerDuty service pages
#[derive(Debug, Clone, Copy, Default)]
pub struct PagerDuty;

impl Tool for PagerDuty {
    fn name(&self) -> &'static str {
        "pagerduty"
    }

    fn build_url(&self, env: &EnvironmentConfig, svc: &ServiceEnvConfig) -> Result<String> {
        let (Some(base), Some(service_id)) =
            (non_empty(&env.pagerduty), non_empty(&svc.pagerduty_service_id))
        else {
            return Err(AppError::not_configured(self.name()));
        };

        Ok(format!("{}/services/{}", trim_base(base), service_id))
    }
}
