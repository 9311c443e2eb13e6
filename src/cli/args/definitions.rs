use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{FacetArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Flags accepted by `vidscout`; each overrides the matching config key.
#[derive(Parser, Debug)]
#[command(
    name = "vidscout",
    version,
    long_version = long_version(),
    about = "Search video titles, descriptions and transcripts from the terminal",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "VIDSCOUT_CONFIG",
        action = ArgAction::Append,
        help = "Merge this TOML file over the discovered settings; repeatable"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Ignore config files found in the user and working directories"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'b',
        long = "base-url",
        value_name = "URL",
        help = "Search service base URL (default: http://localhost:8000/api/v1)"
    )]
    pub(crate) base_url: Option<String>,
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Per-request timeout in seconds (default: 10)"
    )]
    pub(crate) timeout: Option<u64>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Start with this query (default: empty)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        short = 'L',
        long,
        value_name = "CODE",
        help = "Restrict transcript matches to a language (default: any)"
    )]
    pub(crate) language: Option<String>,
    #[arg(
        short = 't',
        long,
        value_enum,
        value_delimiter = ',',
        value_name = "TYPE",
        help = "Comma-separated facets to search (default: all)"
    )]
    pub(crate) types: Option<Vec<FacetArg>>,
    #[arg(
        long = "include-unavailable",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Show results whose video is unavailable (default: disabled)"
    )]
    pub(crate) include_unavailable: Option<bool>,
    #[arg(
        long,
        value_name = "LINK",
        help = "Restore a shareable link or bare query string (default: none)"
    )]
    pub(crate) link: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long,
        value_name = "TITLE",
        help = "Set the input prompt title (default: Search)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Show the effective settings before the search starts"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "Print the built-in theme names and exit"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Format of the accepted result written to stdout"
    )]
    pub(crate) output: OutputFormat,
}
