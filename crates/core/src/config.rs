//! Locating and reading the optional `climate-api.toml` file.
//!
//! The file only supplies fallbacks: command-line flags and their
//! environment variables override anything it sets.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where the settings file came from, if anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Named on the command line or by the config env var.
    Explicit(PathBuf),
    CurrentDir(PathBuf),
    /// Per-user directory under `$XDG_CONFIG_HOME` or `~/.config`.
    XdgConfig(PathBuf),
    /// Machine-wide directory under `/etc`.
    System(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::CurrentDir(p) | Self::XdgConfig(p) | Self::System(p) => {
                Some(p.as_path())
            }
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => f.write_str("(defaults)"),
        }
    }
}

/// Every place a settings file may live, most specific first.
fn candidates(env_var: &str, filename: &str) -> Vec<ConfigSource> {
    let mut found = Vec::with_capacity(4);
    if let Ok(path) = env::var(env_var) {
        found.push(ConfigSource::Explicit(PathBuf::from(path)));
    }
    found.push(ConfigSource::CurrentDir(PathBuf::from(filename)));
    found.push(ConfigSource::XdgConfig(user_config_dir().join(filename)));
    found.push(ConfigSource::System(
        Path::new("/etc").join(APP_NAME).join(filename),
    ));
    found
}

fn user_config_dir() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join(APP_NAME)
}

/// First existing settings file: `env_var`, then the working directory, the
/// user config directory and `/etc/climate-api/`.
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    candidates(env_var, filename)
        .into_iter()
        .find(|source| source.path().is_some_and(Path::exists))
        .unwrap_or(ConfigSource::Defaults)
}

/// Parse the TOML file behind `source`; `T::default()` when there is none.
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}
