//! Bootstrap preflight binary
//!
//! Usage:
//!   braccio-bootstrap --config config/device.toml
//!   braccio-bootstrap --environment workshop --probe-bind
//!   braccio-bootstrap --print-template > config/device.toml

use anyhow::{bail, Context, Result};
use braccio_bootstrap::{BootstrapPlan, ConfigSummary};
use braccio_config::{ConfigLoader, DeviceConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "braccio-bootstrap")]
#[command(about = "Validate braccio device configuration before bringing up WiFi and HTTP")]
#[command(version)]
struct Args {
    /// Path to configuration file (default: config/device.toml, optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment overlay loaded from environments/<name>.toml
    #[arg(short, long)]
    environment: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Check that the HTTP port can be bound
    #[arg(long)]
    probe_bind: bool,

    /// Print the compiled defaults as a TOML template and exit
    #[arg(long)]
    print_template: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    if args.print_template {
        print!("{}", DeviceConfig::compiled().to_template().to_toml()?);
        return Ok(());
    }

    info!("Starting braccio bootstrap preflight");

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        info!("Configuration: {:?}", path);
        loader = loader.file(path);
    }
    if let Some(env) = &args.environment {
        loader = loader.environment(env);
    }

    let mut config = loader.load().context("Failed to load device configuration")?;
    config
        .expand_env_vars()
        .context("Failed to expand environment variables")?;

    let summary = ConfigSummary::from(&config);
    match args.format {
        OutputFormat::Text => println!("{}", summary),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }

    let plan = match BootstrapPlan::prepare(&config) {
        Ok(plan) => plan,
        Err(e) if e.is_unconfigured() => {
            error!("{}", e);
            for field in &summary.unconfigured {
                error!("  set {} or {}", field.key(), field.env_var());
            }
            bail!("device is not configured; refusing to join '{}'", config.wifi.ssid);
        }
        Err(e) => return Err(e).context("Device configuration is invalid"),
    };

    if args.probe_bind {
        let bound = plan.probe_bind().context("HTTP port probe failed")?;
        info!("HTTP server can bind {}", bound);
    }

    info!(
        "Ready: join '{}' as {} and serve HTTP on {}",
        plan.join.ssid, plan.hostname, plan.http_bind
    );
    Ok(())
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_lowercase()));

    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
