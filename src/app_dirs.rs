//! Resolve the configuration and data directories for `vidscout`.
//!
//! Environment overrides win over the platform locations reported by the
//! `directories` crate.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "vidscout";
const APPLICATION: &str = "vidscout";

pub const CONFIG_DIR_ENV: &str = "VIDSCOUT_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "VIDSCOUT_DATA_DIR";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine a home directory for vidscout"))
}

/// An empty override counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
    match dir_from_env(CONFIG_DIR_ENV) {
        Some(dir) => Ok(dir),
        None => Ok(project_dirs()?.config_local_dir().to_path_buf()),
    }
}

/// Directory holding the log file.
pub fn get_data_dir() -> Result<PathBuf> {
    match dir_from_env(DATA_DIR_ENV) {
        Some(dir) => Ok(dir),
        None => Ok(project_dirs()?.data_local_dir().to_path_buf()),
    }
}
