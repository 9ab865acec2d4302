use crate::{Cli, Commands, OpenArgs};
use anyhow::{bail, Context, Result};
use observe::config::EXAMPLE_CONFIG;
use observe::pagerduty::parse_incident_url;
use observe::{
    tools, AppError, BrowserLauncher, Config, Launcher, Orchestrator, PagerDutyClient,
    PrintLauncher, RunReport, Target,
};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let path = cli.config_path;

    match cli.command {
        Some(Commands::Config) => {
            let path = match path {
                Some(path) => path,
                None => Config::default_path().context("could not determine config file location")?,
            };
            run_config(&path)
        }
        Some(Commands::List) => {
            print!("{}", render_list(&load_config(path)?));
            Ok(())
        }
        Some(Commands::Validate) => run_validate(&load_config(path)?),
        None => {
            let config = load_config(path)?;
            run_open(&config, cli.open, io::stdout()).await?;
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> observe::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn run_config(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "vi".to_string());

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating config directory {}", dir.display()))?;
    }
    if !path.exists() {
        std::fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("writing example config to {}", path.display()))?;
    }

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor {:?}", editor))?;
    if !status.success() {
        bail!("editor {:?} exited with {}", editor, status);
    }
    Ok(())
}

fn render_list(config: &Config) -> String {
    let mut out = String::from("Environments:\n");
    for name in config.environments.keys() {
        out.push_str(&format!("  {}\n", name));
    }

    out.push_str("\nServices:\n");
    for (name, envs) in &config.services {
        let envs: Vec<&str> = envs.keys().map(String::as_str).collect();
        out.push_str(&format!("  {} ({})\n", name, envs.join(", ")));
    }

    out.push_str("\nTools:\n");
    for name in tools::names() {
        out.push_str(&format!("  {}\n", name));
    }

    out
}

fn run_validate(config: &Config) -> Result<()> {
    config.validate()?;
    println!("Config is valid.");
    Ok(())
}

async fn run_open<W: Write>(config: &Config, args: OpenArgs, mut out: W) -> Result<RunReport> {
    let config = config.clone().with_api_key(args.api_key);
    config.validate()?;

    let target = if let Some(alert) = &args.alert {
        let client = PagerDutyClient::from_config(&config)?;
        let incident_id = parse_incident_url(alert).map_err(AppError::from)?;
        let incident = client
            .get_incident(&incident_id)
            .await
            .context("fetching incident")?;
        writeln!(
            out,
            "Incident: service={} environment={}",
            incident.service, incident.environment
        )?;
        Target::from_incident(incident)
    } else {
        match (args.service, args.env) {
            (Some(service), Some(env)) => Target::direct(service, env),
            _ => bail!("--service and --env are required (or use --alert)"),
        }
    };

    let launcher: Box<dyn Launcher> = if args.dry_run {
        Box::new(PrintLauncher)
    } else {
        Box::new(BrowserLauncher)
    };
    let console = ConsoleLauncher {
        inner: launcher,
        out: RefCell::new(out),
    };

    let report = Orchestrator::new(&config, &console).run(&target, &args.tools)?;
    Ok(report)
}

/// Announces each link before handing it to the real launcher
struct ConsoleLauncher<W> {
    inner: Box<dyn Launcher>,
    out: RefCell<W>,
}

impl<W: Write> Launcher for ConsoleLauncher<W> {
    fn open(&self, label: &str, url: &str) -> observe::Result<()> {
        writeln!(self.out.borrow_mut(), "Opening {}: {}", label, url).map_err(|source| {
            AppError::Launch {
                label: label.to_string(),
                url: url.to_string(),
                source,
            }
        })?;
        self.inner.open(label, url)
    }
}
