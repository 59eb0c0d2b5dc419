//! CLI for PollSub
//!
//! Subcommands:
//! - `shell`: read registry commands from stdin until EOF, `quit` or Ctrl-C
//! - `run`: execute a command script and exit

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pollsub::Registry;
use pollsub::config::{Settings, load_config_from};
use pollsub::shell;
use pollsub::utils::logging;
use tokio::io::BufReader;
use tracing::{error, info};

/// Lines read ahead from stdin before the reader thread waits.
const STDIN_BUFFER: usize = 64;

#[derive(Parser)]
#[command(name = "pollsub", version, about = "In-process publish/subscribe registry")]
struct Cli {
    /// Configuration file (default: config/default.* if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read commands interactively from stdin
    Shell,
    /// Execute the commands in a script file
    Run {
        /// Path to the command script
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match load_config_from(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init(cli.log_level.as_deref().unwrap_or("info"));
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(cli.log_level.as_deref().unwrap_or(&settings.log.level));

    match run_session(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_session(command: Command, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::from_settings(&settings.registry);
    let mut stdout = tokio::io::stdout();

    match command {
        Command::Shell => {
            info!("Reading commands from stdin. Type 'help' for a list.");
            let mut lines = shell::spawn_stdin_reader(STDIN_BUFFER);

            tokio::select! {
                res = shell::run_lines(&mut registry, &mut lines, &mut stdout) => res?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received. Exiting gracefully.");
                }
            }
        }
        Command::Run { script } => {
            let file = tokio::fs::File::open(&script)
                .await
                .map_err(|e| format!("cannot open {}: {e}", script.display()))?;
            shell::run(&mut registry, BufReader::new(file), &mut stdout).await?;
        }
    }

    info!(topics = registry.topic_count(), "Session finished");
    Ok(())
}
