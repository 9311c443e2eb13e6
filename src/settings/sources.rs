use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};

use crate::cli::CliArgs;
use vidscout::app_dirs;

const ENV_PREFIX: &str = "vidscout";
const FILE_NAMES: [&str; 2] = [".vidscout.toml", "vidscout.toml"];

/// Layer configuration sources: discovered files, then `--config` files,
/// then `VIDSCOUT__*` environment variables.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let discovered = if cli.no_config {
        Vec::new()
    } else {
        discovered_files()
    };

    let builder = discovered
        .into_iter()
        .map(|path| File::from(path).required(false))
        .chain(cli.config.iter().map(|path| File::from(path.clone()).required(true)))
        .fold(Config::builder(), |builder, file| builder.add_source(file));

    builder
        .add_source(environment())
        .build()
        .context("failed to read configuration sources")
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("search.types")
}

/// Config files looked up when `--no-config` is absent, lowest precedence
/// first.
fn discovered_files() -> Vec<PathBuf> {
    let user = app_dirs::get_config_dir()
        .ok()
        .map(|dir| dir.join("config.toml"));
    let local = env::current_dir()
        .ok()
        .into_iter()
        .flat_map(|dir| FILE_NAMES.map(|name| dir.join(name)));
    user.into_iter().chain(local).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_files_follow_the_user_file() {
        let files = discovered_files();
        let names: Vec<_> = files
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .collect();
        assert!(names.ends_with(&FILE_NAMES));
    }
}
