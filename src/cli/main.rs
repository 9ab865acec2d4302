use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "observe", version)]
#[command(about = "Open observability tools for a service or PagerDuty incident", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "Examples:\n  observe --service api --env prod\n  observe --alert https://example.pagerduty.com/incidents/P1234567")]
struct Cli {
    /// Config file (default: ~/.config/observe/config.yaml)
    #[arg(long = "config", value_name = "PATH", env = "OBSERVE_CONFIG", global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    open: OpenArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the config file in $EDITOR
    Config,

    /// List configured environments, services and tools
    List,

    /// Validate the config file
    Validate,
}

#[derive(Args)]
struct OpenArgs {
    /// Service name
    #[arg(short, long, requires = "env", conflicts_with = "alert")]
    service: Option<String>,

    /// Environment name
    #[arg(short, long, requires = "service", conflicts_with = "alert")]
    env: Option<String>,

    /// PagerDuty incident URL for incident response
    #[arg(short, long, value_name = "INCIDENT_URL")]
    alert: Option<String>,

    /// Comma-separated list of tools (default: all)
    #[arg(short, long, value_delimiter = ',')]
    tools: Vec<String>,

    /// Print the URLs without opening a browser
    #[arg(long)]
    dry_run: bool,

    /// PagerDuty API key, overrides pagerduty_api_key in the config
    #[arg(long, env = "OBSERVE_PAGERDUTY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "observe=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let cli = Cli::parse();

    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_open_flags() {
        let cli = Cli::try_parse_from([
            "observe", "--service", "api", "--env", "prod", "--tools", "grafana,kibana",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.open.service.as_deref(), Some("api"));
        assert_eq!(cli.open.env.as_deref(), Some("prod"));
        assert_eq!(cli.open.tools, vec!["grafana", "kibana"]);
    }

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from(["observe", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_service_requires_env() {
        assert!(Cli::try_parse_from(["observe", "--service", "api"]).is_err());
    }

    #[test]
    fn test_alert_conflicts_with_service() {
        assert!(Cli::try_parse_from([
            "observe",
            "--alert",
            "https://acme.pagerduty.com/incidents/P1",
            "--service",
            "api",
            "--env",
            "prod",
        ])
        .is_err());
    }
}
