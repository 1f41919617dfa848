//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

use crate::config::Config;

use super::commands::Commands;

pub(crate) const USER_ENV: &str = "FLIGHTWX_USER";
pub(crate) const PASSWORD_ENV: &str = "FLIGHTWX_PASSWORD";

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "flightwx")]
#[command(about = "Climatological flight-briefing estimates with safety margins", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Username (falls back to FLIGHTWX_USER)
    #[arg(short, long, global = true)]
    pub(crate) user: Option<String>,

    /// Password (falls back to FLIGHTWX_PASSWORD)
    #[arg(short, long, global = true)]
    pub(crate) password: Option<String>,

    /// Timezone for history timestamps and export names (e.g., "UTC", "America/Bogota")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.debug && config.debug {
            self.debug = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self
    }

    /// Fill missing credentials from the environment
    pub(crate) fn with_env_credentials(mut self) -> Self {
        if self.user.is_none() {
            self.user = std::env::var(USER_ENV).ok();
        }
        if self.password.is_none() {
            self.password = std::env::var(PASSWORD_ENV).ok();
        }
        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
