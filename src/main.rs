mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use vidscout::ui::SearchOutcome;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    if cli.list_themes {
        list_themes();
        return Ok(());
    }

    let outcome = search(&cli)?;
    match cli.output {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }
    Ok(())
}

fn list_themes() {
    let default = vidscout::ui::theme::DEFAULT_THEME;
    for name in vidscout::ui::theme::names() {
        let marker = if name == default { " (default)" } else { "" };
        println!("{name}{marker}");
    }
}

/// Resolve configuration for `cli` and run one interactive session.
fn search(cli: &CliArgs) -> Result<SearchOutcome> {
    let resolved = settings::load(cli)?;
    if cli.print_config {
        resolved.print_summary();
    }
    SearchWorkflow::from_config(resolved)?.run()
}
