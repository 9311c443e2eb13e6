use clap::Parser;

use super::{ConfigSources, RawConfig};
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "vidscout",
        "--base-url",
        "http://search.internal/api/v1",
        "--timeout",
        "4",
        "--query",
        "rust",
        "--language",
        "en",
        "--types",
        "titles,transcripts",
        "--include-unavailable",
        "--theme",
        "paper",
        "--title",
        "Find",
    ]);

    let mut config = RawConfig::default();
    config.service.base_url = Some("http://ignored".into());
    config.apply_cli_overrides(&cli);

    assert_eq!(config.service.base_url, cli.base_url);
    assert_eq!(config.service.timeout_secs, Some(4));
    assert_eq!(config.search.query.as_deref(), Some("rust"));
    assert_eq!(
        config.search.types,
        Some(vec!["titles".to_string(), "transcripts".to_string()])
    );
    assert_eq!(config.search.include_unavailable, Some(true));
    assert_eq!(config.ui.theme, cli.theme);
    assert_eq!(config.ui.input_title, cli.title);
}

#[test]
fn search_keys_override_the_initial_link() {
    let cli = CliArgs::parse_from([
        "vidscout",
        "--link",
        "https://videos.example.com/search?q=old&language=fr",
        "--query",
        "new",
        "--types",
        "descriptions",
    ]);
    let mut config = RawConfig::default();
    config.apply_cli_overrides(&cli);

    let resolved = config.resolve(&cli).expect("resolves");
    assert_eq!(
        resolved.link,
        "https://videos.example.com/search?q=new&language=fr&types=descriptions"
    );
}

#[test]
fn unknown_configured_types_are_rejected() {
    let mut config = RawConfig::default();
    config.search.types = Some(vec!["videos".into()]);
    let error = config
        .search
        .resolve_link(&ConfigSources::default())
        .expect_err("unknown facet");
    assert_eq!(error.key, "search.types");
    assert!(error.to_string().contains("value: videos"));
}

#[test]
fn empty_type_lists_are_rejected() {
    let mut config = RawConfig::default();
    config.search.types = Some(Vec::new());
    let error = config
        .search
        .resolve_link(&ConfigSources::default())
        .expect_err("empty set");
    assert!(error.reason.contains("at least one"));
}
