mod app;
mod auth;
mod briefing;
mod cli;
mod completion;
mod config;
mod consts;
mod error;
mod export;
mod output;
mod session;
mod shell;
mod utils;

use std::path::PathBuf;

use clap::Parser;

use app::{CommandContext, handle_command};
use auth::{AccessGate, StaticCredentials};
use cli::Cli;
use completion::OpenAiClient;
use config::Config;
use consts::{API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_MODEL};
use error::AppError;
use session::Session;
use utils::Timezone;

/// Configure logging based on verbosity level
fn setup_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn require_api_key() -> Result<String, AppError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(AppError::MissingApiKey),
    }
}

fn run(cli: Cli, config: Config) -> Result<(), AppError> {
    let api_key = require_api_key()?;

    let gate = AccessGate::new(StaticCredentials::from_config(config.users.as_ref()));
    let principal = gate.admit(cli.user.as_deref(), cli.password.as_deref())?;

    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let client = OpenAiClient::new(
        api_key,
        config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
    );
    let ctx = CommandContext {
        client: &client,
        timezone,
        default_mode: config.mode.unwrap_or_default(),
        out_dir: config.out_dir.unwrap_or_else(|| PathBuf::from(".")),
        use_color: cli.use_color(),
    };

    let mut session = Session::new(principal);
    handle_command(&cli.command, &ctx, &mut session)
}

fn main() {
    let cli = Cli::parse();
    let (config, origin) = Config::load();
    let cli = cli.with_config(&config).with_env_credentials();

    setup_logging(cli.debug);
    origin.log();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
