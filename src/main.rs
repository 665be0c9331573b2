use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error};

use version_monitor::config::{MonitorConfig, MonitorSettings, config_path};
use version_monitor::inventory::{CargoLockInventory, FixedInventory, ModuleInventory};
use version_monitor::logging::{LogFormat, init_logging};
use version_monitor::monitor::{MonitorError, ReconciliationEngine};

#[derive(Parser)]
#[command(name = "version-monitor")]
#[command(version, about = "Report service liveness and module versions of a host")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Access token presented by the caller
    #[arg(long, global = true, env = "VERSION_MONITOR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file (defaults to $XDG_CONFIG_HOME/version-monitor/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print OK or NOK
    Up,
    /// Print runtime and modules info as JSON
    Modules {
        /// Cargo.lock to take the module inventory from
        #[arg(long)]
        lockfile: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<MonitorConfig> {
    let explicit = path.is_some();
    let path = path.unwrap_or_else(config_path);

    if !explicit && !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Ok(MonitorConfig::default());
    }

    Ok(MonitorConfig::load(&path)?)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.common.config)?;
    let settings = Arc::new(MonitorSettings::from_config(config)?);

    let inventory: Arc<dyn ModuleInventory> = match &cli.command {
        Command::Modules {
            lockfile: Some(path),
        } => Arc::new(CargoLockInventory::from_path(path.clone())),
        _ => Arc::new(FixedInventory::default()),
    };

    let engine = ReconciliationEngine::new(settings, inventory)?;
    let token = cli.common.token.as_deref();

    let output = match cli.command {
        Command::Up => engine.up(token).map(|status| status.to_string()),
        Command::Modules { .. } => match engine.modules(token).await {
            Ok(report) => Ok(serde_json::to_string_pretty(&report)?),
            Err(e) => Err(e),
        },
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(MonitorError::Unauthorized) => {
            eprintln!("Unauthorized");
            Ok(ExitCode::from(2))
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let format = if cli.common.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    let _guard = init_logging(cli.common.log_file.as_deref(), format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
