use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use vidscout::app_dirs;
use vidscout::logging::{LOG_ENV, LOG_FILE};

fn describe(path: anyhow::Result<std::path::PathBuf>) -> String {
    match path {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    }
}

/// Version banner listing where configuration and logs live.
pub(super) fn long_version() -> &'static str {
    let config_dir = describe(app_dirs::get_config_dir());
    let log_file = describe(app_dirs::get_data_dir().map(|dir| dir.join(LOG_FILE)));

    let mut details = String::from(env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "log file: {log_file} (filter with {LOG_ENV})");

    Box::leak(details.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Magenta.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
