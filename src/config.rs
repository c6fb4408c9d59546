use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TableError;
use crate::record::AVAILABLE_STATUS;

const CONFIG_ENV_PATH: &str = "TABULAR_DATA_CONFIG";
const CONFIG_DIR_NAME: &str = "tabular-data";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Status value that permits a record to be downloaded.
    pub available_status: String,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub copy_to_clipboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            available_status: AVAILABLE_STATUS.to_string(),
            log_file: None,
            log_level: "info".to_string(),
            copy_to_clipboard: false,
        }
    }
}

/// Values of the environment variables that locate the config file.
#[derive(Clone, Debug, Default)]
pub struct ConfigEnv {
    pub config_path: Option<OsString>,
    pub xdg_config_home: Option<OsString>,
    pub home: Option<OsString>,
}

impl ConfigEnv {
    pub fn from_process() -> Self {
        Self {
            config_path: std::env::var_os(CONFIG_ENV_PATH),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME"),
            home: std::env::var_os("HOME"),
        }
    }

    /// `$TABULAR_DATA_CONFIG`, else `$XDG_CONFIG_HOME/tabular-data/config.toml`,
    /// else `$HOME/.config/tabular-data/config.toml`. Empty values are skipped.
    pub fn default_config_path(&self) -> Option<PathBuf> {
        if let Some(path) = non_empty_path(&self.config_path) {
            return Some(path);
        }

        let base = non_empty_path(&self.xdg_config_home)
            .or_else(|| non_empty_path(&self.home).map(|home| home.join(".config")))?;
        Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

fn non_empty_path(value: &Option<OsString>) -> Option<PathBuf> {
    value
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Loads the config file using the process environment.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, TableError> {
    load_config_with_env(explicit_path, &ConfigEnv::from_process())
}

/// An explicit path must exist; the environment and default locations fall
/// back to defaults when nothing is there.
pub fn load_config_with_env(
    explicit_path: Option<&Path>,
    env: &ConfigEnv,
) -> Result<AppConfig, TableError> {
    if let Some(path) = explicit_path {
        return read_config_file(path);
    }

    match env.default_config_path() {
        Some(path) if path.exists() => read_config_file(&path),
        _ => Ok(AppConfig::default()),
    }
}

pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig, TableError> {
    toml::from_str(content).map_err(|source| TableError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_config_file(path: &Path) -> Result<AppConfig, TableError> {
    let content = fs::read_to_string(path).map_err(|source| config_read_error(path, source))?;
    parse_config(&content, path)
}

fn config_read_error(path: &Path, source: io::Error) -> TableError {
    TableError::ConfigRead {
        path: path.to_path_buf(),
        source,
    }
}
