use super::{trim_base, Tool};
use crate::config::{non_empty, EnvironmentConfig, ServiceEnvConfig};
use crate::error::{AppError, Result};
use url::form_urlencoded;

/// Kibana discover view filtered by a query string
#[derive(Debug, Clone, Copy, Default)]
pub struct Kibana;

impl Kibana {
    /// Form-style query component encoding: spaces become `+`, everything
    /// except ASCII alphanumerics and `*-._` is percent-encoded.
    pub fn encode_query(query: &str) -> String {
        form_urlencoded::byte_serialize(query.as_bytes()).collect()
    }
}

impl Tool for Kibana {
    fn name(&self) -> &'static str {
        "kibana"
    }

    fn build_url(&self, env: &EnvironmentConfig, svc: &ServiceEnvConfig) -> Result<String> {
        let (Some(base), Some(query)) = (non_empty(&env.kibana), non_empty(&svc.kibana_query))
        else {
            return Err(AppError::not_configured(self.name()));
        };

        Ok(format!(
            "{}/app/discover#/?_g=()&_a=(query:(query_string:(query:'{}')))",
            trim_base(base),
            Self::encode_query(query)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/app/discover#/?_g=()&_a=(query:(query_string:(query:'";
    const SUFFIX: &str = "')))";

    fn config(base: &str, query: &str) -> (EnvironmentConfig, ServiceEnvConfig) {
        (
            EnvironmentConfig {
                kibana: Some(base.to_string()),
                ..Default::default()
            },
            ServiceEnvConfig {
                kibana_query: Some(query.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_build_url() {
        let (env, svc) = config("https://kibana.example.com/", "service:api");
        assert_eq!(
            Kibana.build_url(&env, &svc).unwrap(),
            "https://kibana.example.com/app/discover#/?_g=()&_a=(query:(query_string:(query:'service%3Aapi')))"
        );
    }

    #[test]
    fn test_encoding_is_pinned() {
        assert_eq!(
            Kibana::encode_query(r#"service:checkout AND msg:"timed out""#),
            "service%3Acheckout+AND+msg%3A%22timed+out%22"
        );
        assert_eq!(Kibana::encode_query("it's a+b"), "it%27s+a%2Bb");
        assert_eq!(Kibana::encode_query("level.name_x-y*"), "level.name_x-y*");
        assert_eq!(Kibana::encode_query("svc:api* ~x"), "svc%3Aapi*+%7Ex");
    }

    #[test]
    fn test_query_round_trips() {
        let query = r#"service:"checkout api" AND NOT level:'debug' & x=1"#;
        let (env, svc) = config("https://kibana.example.com", query);
        let url = Kibana.build_url(&env, &svc).unwrap();

        let encoded = url
            .strip_prefix(&format!("https://kibana.example.com{}", PREFIX))
            .and_then(|rest| rest.strip_suffix(SUFFIX))
            .unwrap();
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\''));

        let decoded: Vec<(String, String)> = form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(decoded, vec![(query.to_string(), String::new())]);
    }

    #[test]
    fn test_not_configured() {
        let (blank_base, svc) = config("", "service:api");
        assert!(Kibana.build_url(&blank_base, &svc).unwrap_err().is_not_configured());

        let (env, blank_query) = config("https://kibana.example.com", "");
        assert!(Kibana.build_url(&env, &blank_query).unwrap_err().is_not_configured());
        assert!(Kibana
            .build_url(&env, &ServiceEnvConfig::default())
            .unwrap_err()
            .is_not_configured());
    }
}
