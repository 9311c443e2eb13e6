use std::env;
use std::time::Duration;

use anyhow::{Error, Result};
use serde::Deserialize;
use vidscout::search::{
    DEFAULT_LINK_BASE, EnabledFacets, Facet, LinkSync, MemoryLocation,
};
use vidscout::transport::DEFAULT_BASE_URL;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    service: ServiceSection,
    search: SearchSection,
    ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServiceSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Initial search state. Individual keys override the matching part of
/// `initial_link`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    initial_link: Option<String>,
    query: Option<String>,
    language: Option<String>,
    types: Option<Vec<String>>,
    include_unavailable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    theme: Option<String>,
    input_title: Option<String>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(url) = cli.base_url.clone() {
            self.service.base_url = Some(url);
        }
        if let Some(timeout) = cli.timeout {
            self.service.timeout_secs = Some(timeout);
        }
        if let Some(link) = cli.link.clone() {
            self.search.initial_link = Some(link);
        }
        if let Some(query) = cli.query.clone() {
            self.search.query = Some(query);
        }
        if let Some(language) = cli.language.clone() {
            self.search.language = Some(language);
        }
        if let Some(types) = &cli.types {
            self.search.types = Some(
                types
                    .iter()
                    .map(|arg| arg.facet().link_name().to_string())
                    .collect(),
            );
        }
        if let Some(include) = cli.include_unavailable {
            self.search.include_unavailable = Some(include);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
        if let Some(title) = cli.title.clone() {
            self.ui.input_title = Some(title);
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            base_url: detect_source(
                cli.base_url.is_some(),
                self.service.base_url.is_some(),
                "VIDSCOUT__SERVICE__BASE_URL",
                "--base-url",
                "service.base_url",
            ),
            timeout: detect_source(
                cli.timeout.is_some(),
                self.service.timeout_secs.is_some(),
                "VIDSCOUT__SERVICE__TIMEOUT_SECS",
                "--timeout",
                "service.timeout_secs",
            ),
            link: detect_source(
                cli.link.is_some(),
                self.search.initial_link.is_some(),
                "VIDSCOUT__SEARCH__INITIAL_LINK",
                "--link",
                "search.initial_link",
            ),
            query: detect_source(
                cli.query.is_some(),
                self.search.query.is_some(),
                "VIDSCOUT__SEARCH__QUERY",
                "--query",
                "search.query",
            ),
            types: detect_source(
                cli.types.is_some(),
                self.search.types.is_some(),
                "VIDSCOUT__SEARCH__TYPES",
                "--types",
                "search.types",
            ),
            theme: detect_source(
                cli.theme.is_some(),
                self.ui.theme.is_some(),
                "VIDSCOUT__UI__THEME",
                "--theme",
                "ui.theme",
            ),
        };

        let link = self.search.resolve_link(&sources)?;
        let config = ResolvedConfig {
            base_url: self
                .service
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                self.service.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            link,
            theme: self.ui.theme,
            input_title: self.ui.input_title,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

impl SearchSection {
    /// Fold the individual keys into the initial link.
    fn resolve_link(self, sources: &ConfigSources) -> Result<String, ConfigError> {
        let raw_link = self.initial_link.unwrap_or_default();
        let location = MemoryLocation::from_link(&raw_link, DEFAULT_LINK_BASE).map_err(|err| {
            ConfigError::invalid(
                "search.initial_link",
                raw_link.clone(),
                sources.source_for_link(),
                err.to_string(),
            )
        })?;
        let mut link = LinkSync::new(location);
        let mut state = link.initial_state();

        if let Some(query) = self.query {
            state.query = query.trim().to_string();
        }
        if let Some(language) = self.language {
            let language = language.trim().to_string();
            state.language = (!language.is_empty()).then_some(language);
        }
        if let Some(types) = self.types {
            state.enabled = parse_types(&types, sources)?;
        }
        if let Some(include) = self.include_unavailable {
            state.include_unavailable = include;
        }

        link.sync(&state);
        Ok(link.location().href().to_string())
    }
}

fn parse_types(types: &[String], sources: &ConfigSources) -> Result<EnabledFacets, ConfigError> {
    let mut facets = Vec::with_capacity(types.len());
    for name in types {
        let facet = Facet::from_link_name(name).ok_or_else(|| {
            ConfigError::unknown_name(
                "search.types",
                name.clone(),
                sources.source_for_types(),
                &Facet::ALL.map(Facet::link_name),
            )
        })?;
        facets.push(facet);
    }
    EnabledFacets::from_facets(facets).ok_or_else(|| {
        ConfigError::invalid(
            "search.types",
            String::new(),
            sources.source_for_types(),
            "at least one facet must be enabled",
        )
    })
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
