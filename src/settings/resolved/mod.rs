use std::time::Duration;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Settings after layering files, environment and flags, validated.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Shareable link the session starts from.
    pub link: String,
    pub theme: Option<String>,
    pub input_title: Option<String>,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    pub fn print_summary(&self) {
        print!("{}", summary::Summary(self));
    }
}
