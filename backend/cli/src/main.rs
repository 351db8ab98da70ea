mod demo_cmd;
mod history_cmd;
mod terminal_output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chatpane_config::{
    apply_all_defaults, config_dir, config_file_path, load_and_prepare, write_config, ChatPaneConfig,
};
use chatpane_logging::{init_logger, LogOptions};

#[derive(Parser)]
#[command(name = "chatpane")]
#[command(about = "ChatPane — terminal chat widget demo and chat history tools")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.chatpane/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive demo window
    Demo,
    /// Print every message of a saved JSON session
    History {
        file: PathBuf,
    },
    /// Print the context window a model would receive for a saved session
    Context {
        file: PathBuf,
        /// Most recent user/assistant messages to keep; 0 or negative keeps all
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Write the plain-text export of a saved session
    Export {
        file: PathBuf,
        /// Output directory (defaults to the configured export dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let prepared = load_and_prepare(&config_path).await?;
    let config = prepared.config;

    let demo = matches!(cli.command, Commands::Demo);
    let _log_guard = init_logger(&log_options(&config, demo, &config_dir()));
    for warning in &prepared.warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    match cli.command {
        Commands::Demo => {
            info!(config = %config_path.display(), "Starting ChatPane demo");
            demo_cmd::run(config).await?;
        }
        Commands::History { file } => history_cmd::show_history(&file).await?,
        Commands::Context { file, limit } => {
            let limit = limit.unwrap_or_else(|| i64::from(config.max_context_messages()));
            history_cmd::show_context(&file, limit).await?;
        }
        Commands::Export { file, out } => {
            let out = out.unwrap_or_else(|| config.export_dir());
            history_cmd::export(&file, out).await?;
        }
        Commands::InitConfig { force } => init_config(&config_path, force).await?,
    }

    Ok(())
}

/// The demo owns the terminal, so its logs go to a file only; without a
/// configured dir that file lives under `<config dir>/logs`.
fn log_options(config: &ChatPaneConfig, demo: bool, config_dir: &Path) -> LogOptions {
    let logging = config.logging.clone().unwrap_or_default();
    let dir = match logging.dir {
        Some(dir) => Some(dir),
        None if demo => Some(config_dir.join("logs")),
        None => None,
    };
    LogOptions {
        level: config.log_level(),
        dir,
        console: !demo,
        json: logging.json.unwrap_or(false),
    }
}

async fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(&apply_all_defaults(ChatPaneConfig::default()), path).await?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
