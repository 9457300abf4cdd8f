//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use lineup_core::config::{self, Config, ModeSetting};

#[derive(Parser)]
#[command(name = "lineup")]
#[command(version = "0.1")]
#[command(about = "Animated roster widget for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use a specific config file instead of $LINEUP_HOME/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the input mode from config
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Comma-separated member names, replacing the configured roster
    #[arg(long, value_name = "NAMES")]
    names: Option<String>,

    /// Override the roster title
    #[arg(long)]
    title: Option<String>,

    /// Log filter (also via LINEUP_LOG), e.g. "debug" or "lineup_core=trace"
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Auto,
    Pointer,
    Touch,
    Hybrid,
}

impl From<ModeArg> for ModeSetting {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => ModeSetting::Auto,
            ModeArg::Pointer => ModeSetting::Pointer,
            ModeArg::Touch => ModeSetting::Touch,
            ModeArg::Hybrid => ModeSetting::Hybrid,
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a config file with the default template
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => handle_config(command, cli.config.as_deref()),
        None => run_widget(&cli),
    }
}

fn run_widget(cli: &Cli) -> Result<()> {
    // Logs go to a file; stderr belongs to the TUI.
    let _guard = init_logging(&cli.log_level)?;

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(mode) = cli.mode {
        config.input.mode = mode.into();
    }
    if let Some(names) = &cli.names {
        config.roster.members = names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(title) = &cli.title {
        config.roster.title = title.clone();
    }
    config.validate()?;

    tracing::info!(
        members = config.roster.members.len(),
        mode = config.input.mode.display_name(),
        "starting widget"
    );
    lineup_tui::run(&config)
}

fn handle_config(command: ConfigCommands, path_override: Option<&std::path::Path>) -> Result<()> {
    let path = path_override
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(config::paths::config_path);
    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => {
            Config::write_template(&path)?;
            println!("Created config at {}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let config = Config::load_from(&path)?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(path_override: Option<&std::path::Path>) -> Result<Config> {
    match path_override {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Initializes tracing into a daily-rolled file under $LINEUP_HOME/logs.
///
/// The returned guard must stay alive for the duration of the run or
/// buffered log lines are lost.
fn init_logging(level: &str) -> Result<WorkerGuard> {
    let dir = config::paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "lineup.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_env("LINEUP_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
