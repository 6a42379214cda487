//! newsping CLI
//!
//! One invocation performs one pass and exits; schedule it with cron or a
//! systemd timer to keep watching.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use newsping::{
    error::Result,
    models::Config,
    pipeline::{self, RunOptions},
};

/// newsping - news page watcher with Telegram delivery
#[derive(Parser, Debug)]
#[command(
    name = "newsping",
    version,
    about = "Sends the newest unseen article from each watched news page to Telegram"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Bot token, overriding telegram.token
    #[arg(long, env = "NEWSPING_BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Destination chat, overriding telegram.chat_id
    #[arg(long, env = "NEWSPING_CHAT_ID")]
    chat_id: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every target once and send what is new
    Run {
        /// Log messages instead of sending them; the ledger is not written
        #[arg(long)]
        dry_run: bool,

        /// Only process targets whose URL contains this text
        #[arg(long)]
        target: Option<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Show ledger and target summary
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(token) = &cli.bot_token {
        config.telegram.token = token.clone();
    }
    if let Some(chat_id) = &cli.chat_id {
        config.telegram.chat_id = chat_id.clone();
    }
    log::info!("Loaded configuration from {}", cli.config.display());
    Ok(config)
}

async fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Command::Run { dry_run, target } => {
            config.validate()?;
            let options = RunOptions {
                dry_run,
                target_filter: target,
            };
            pipeline::run_once(&config, &options).await?;
        }
        Command::Validate => pipeline::run_validate(&config)?,
        Command::Info => pipeline::run_info(&config).await?,
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_run_flags() {
        let cli = Cli::parse_from([
            "newsping",
            "-c",
            "/etc/newsping.toml",
            "run",
            "--dry-run",
            "--target",
            "ft.com",
        ]);

        assert_eq!(cli.config, PathBuf::from("/etc/newsping.toml"));
        match cli.command {
            Command::Run { dry_run, target } => {
                assert!(dry_run);
                assert_eq!(target.as_deref(), Some("ft.com"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_default_config_path() {
        let cli = Cli::parse_from(["newsping", "validate"]);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert!(matches!(cli.command, Command::Validate));
    }
}
