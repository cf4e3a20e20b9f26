//! config file discovery and loading.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use meshward_types::Config;
use tracing::debug;

/// default config file search paths (in order of priority).
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "/etc/meshward/config.toml",
    "~/.config/meshward/config.toml",
    "./config.toml",
];

/// expand a leading `~/` to the current user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// parse a toml config file.
pub fn read_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("failed to parse config file: {:?}", path))
}

/// find and load a config file, returning none if no config file is found.
///
/// an explicit path must exist; otherwise the search paths are tried in order.
pub fn load_config_file(config_path: Option<&Path>) -> Result<Option<Config>> {
    if let Some(path) = config_path {
        return read_config_file(path).map(Some);
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = expand_home(path_str);
        if path.exists() {
            debug!("Found config file at {:?}", path);
            return read_config_file(&path).map(Some);
        }
    }

    Ok(None)
}

/// load the config, falling back to defaults when no file is found.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match load_config_file(config_path)? {
        Some(config) => Ok(config),
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
