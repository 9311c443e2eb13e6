mod definitions;
mod options;
mod styles;

use clap::Parser;
pub(crate) use definitions::CliArgs;
pub(crate) use options::OutputFormat;

pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}
