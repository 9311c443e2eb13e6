use thiserror::Error;

use super::SettingSource;

/// A setting that failed validation, with enough context to find and fix it.
#[derive(Debug, Error)]
#[error("{key}: {reason} (value: {value}, from {origin})")]
pub(crate) struct ConfigError {
    pub(crate) key: &'static str,
    pub(crate) value: String,
    pub(crate) origin: SettingSource,
    pub(crate) reason: String,
}

impl ConfigError {
    pub(crate) fn invalid(
        key: &'static str,
        value: impl Into<String>,
        origin: SettingSource,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            key,
            value: value.into(),
            origin,
            reason: reason.into(),
        }
    }

    /// A name outside a closed set, such as a theme or a facet.
    pub(crate) fn unknown_name(
        key: &'static str,
        value: impl Into<String>,
        origin: SettingSource,
        known: &[&str],
    ) -> Self {
        Self::invalid(key, value, origin, format!("expected one of: {}", known.join(", ")))
    }
}
