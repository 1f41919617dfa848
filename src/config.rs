use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::briefing::BriefingMode;

/// Explicit config file path; disables the default search
pub(crate) const CONFIG_ENV: &str = "FLIGHTWX_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) model: Option<String>,
    #[serde(default)]
    pub(crate) api_base: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) mode: Option<BriefingMode>,
    #[serde(default)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Replaces the built-in accounts when present
    #[serde(default)]
    pub(crate) users: Option<BTreeMap<String, String>>,
}

/// Where the active configuration came from
#[derive(Debug)]
pub(crate) enum ConfigOrigin {
    Defaults,
    File(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigOrigin {
    /// Report the origin once logging is up
    pub(crate) fn log(&self) {
        match self {
            ConfigOrigin::Defaults => tracing::debug!("no config file found, using defaults"),
            ConfigOrigin::File(path) => tracing::debug!("loaded config from {}", path.display()),
            ConfigOrigin::Invalid { path, error } => {
                tracing::warn!("failed to load {}: {}", path.display(), error);
            }
        }
    }
}

impl Config {
    pub(crate) fn load() -> (Self, ConfigOrigin) {
        let paths = match std::env::var_os(CONFIG_ENV) {
            Some(explicit) => vec![PathBuf::from(explicit)],
            None => Self::get_config_paths(),
        };
        Self::load_from(&paths)
    }

    /// First readable file wins; a file that fails to parse yields defaults
    fn load_from(paths: &[PathBuf]) -> (Self, ConfigOrigin) {
        for path in paths {
            if !path.exists() {
                continue;
            }
            let content = match fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    return (
                        Self::default(),
                        ConfigOrigin::Invalid {
                            path: path.clone(),
                            error: e.to_string(),
                        },
                    );
                }
            };
            return match toml::from_str::<Config>(&content) {
                Ok(config) => (config, ConfigOrigin::File(path.clone())),
                Err(e) => (
                    Self::default(),
                    ConfigOrigin::Invalid {
                        path: path.clone(),
                        error: e.to_string(),
                    },
                ),
            };
        }

        (Self::default(), ConfigOrigin::Defaults)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/flightwx/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("flightwx").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("flightwx").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.flightwx.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".flightwx.toml"));
        }

        paths
    }
}
