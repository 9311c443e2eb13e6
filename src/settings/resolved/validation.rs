use url::Url;
use vidscout::search::{MAX_QUERY_CHARS, SearchState};
use vidscout::ui::theme;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    match Url::parse(&config.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => {
            return Err(ConfigError::invalid(
                "service.base_url",
                config.base_url.clone(),
                sources.source_for_base_url(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Err(err) => {
            return Err(ConfigError::invalid(
                "service.base_url",
                config.base_url.clone(),
                sources.source_for_base_url(),
                err.to_string(),
            ));
        }
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::invalid(
            "service.timeout_secs",
            "0",
            sources.source_for_timeout(),
            "must be greater than zero",
        ));
    }

    if let Ok(link) = Url::parse(&config.link)
        && let Some(query) = link.query()
    {
        let state = SearchState::from_query_string(query);
        let len = state.query.chars().count();
        if len > MAX_QUERY_CHARS {
            return Err(ConfigError::invalid(
                "search.query",
                format!("{len} characters"),
                sources.source_for_query(),
                format!("must be at most {MAX_QUERY_CHARS} characters"),
            ));
        }
    }

    if let Some(name) = &config.theme
        && theme::by_name(name).is_none()
    {
        return Err(ConfigError::unknown_name(
            "ui.theme",
            name.clone(),
            sources.source_for_theme(),
            &theme::names(),
        ));
    }

    Ok(())
}
