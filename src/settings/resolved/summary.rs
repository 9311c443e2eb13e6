use std::fmt;

use super::ResolvedConfig;

/// Aligned `key  value` listing of the effective settings.
pub(super) struct Summary<'a>(pub(super) &'a ResolvedConfig);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        let timeout = format!("{}s", config.timeout.as_secs());
        let mut rows = vec![
            ("service", config.base_url.as_str()),
            ("timeout", timeout.as_str()),
            ("link", config.link.as_str()),
            ("theme", config.theme.as_deref().unwrap_or("default")),
        ];
        if let Some(title) = &config.input_title {
            rows.push(("prompt", title.as_str()));
        }

        writeln!(f, "vidscout configuration")?;
        for (key, value) in rows {
            writeln!(f, "  {key:<8} {value}")?;
        }
        Ok(())
    }
}
