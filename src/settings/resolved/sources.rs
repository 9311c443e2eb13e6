use std::fmt;

/// Where an offending setting came from.
#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
    pub(crate) base_url: Option<SettingSource>,
    pub(crate) timeout: Option<SettingSource>,
    pub(crate) link: Option<SettingSource>,
    pub(crate) query: Option<SettingSource>,
    pub(crate) types: Option<SettingSource>,
    pub(crate) theme: Option<SettingSource>,
}

fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
    source.clone().unwrap_or(SettingSource::ConfigKey(key))
}

impl ConfigSources {
    pub(crate) fn source_for_base_url(&self) -> SettingSource {
        or_key(&self.base_url, "service.base_url")
    }

    pub(crate) fn source_for_timeout(&self) -> SettingSource {
        or_key(&self.timeout, "service.timeout_secs")
    }

    pub(crate) fn source_for_link(&self) -> SettingSource {
        or_key(&self.link, "search.initial_link")
    }

    pub(crate) fn source_for_query(&self) -> SettingSource {
        or_key(&self.query, "search.query")
    }

    pub(crate) fn source_for_types(&self) -> SettingSource {
        or_key(&self.types, "search.types")
    }

    pub(crate) fn source_for_theme(&self) -> SettingSource {
        or_key(&self.theme, "ui.theme")
    }
}
