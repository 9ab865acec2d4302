use super::{trim_base, Tool};
use crate::config::{non_empty, EnvironmentConfig, ServiceEnvConfig};
use crate::error::{AppError, Result};

/// Grafana dashboards
#[derive(Debug, Clone, Copy, Default)]
pub struct Grafana;

impl Tool for Grafana {
    fn name(&self) -> &'static str {
        "grafana"
    }

    fn build_url(&self, env: &EnvironmentConfig, svc: &ServiceEnvConfig) -> Result<String> {
        let (Some(base), Some(dashboard_id)) =
            (non_empty(&env.grafana), non_empty(&svc.grafana_dashboard_id))
        else {
            return Err(AppError::not_configured(self.name()));
        };

        Ok(format!("{}/d/{}", trim_base(base), dashboard_id))
    }
}
