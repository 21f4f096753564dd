use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use argh::FromArgs;
use prefixrun::{ExtensionMap, Runner};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Run every file in a directory named <integer>-<rest>, in ascending prefix
/// order, each with an interpreter chosen by its file extension. Prints a
/// summary table of what ran, when, and how it went.
struct Args {
    /// directory containing the pipeline; defaults to the current directory
    #[argh(positional)]
    directory: Option<PathBuf>,

    /// extension override of the form .ext=command, e.g. '.sh=zsh' or
    /// '.hql=hive -f'; may be given multiple times
    #[argh(option, short = 'e')]
    extension: Vec<String>,

    /// treat a non-zero exit status from a step as a failure
    #[argh(switch)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prefixrun=info")),
        )
        .init();

    let args: Args = argh::from_env();
    let directory = match args.directory {
        Some(directory) => directory,
        // Resolved here, once, so the runner itself never captures ambient
        // process state.
        None => std::env::current_dir().context("cannot resolve the current directory")?,
    };

    let mut extensions = ExtensionMap::defaults();
    for entry in &args.extension {
        let (extension, command) = parse_override(entry)?;
        extensions.insert(extension, command);
    }

    let mut runner =
        Runner::with_extensions(directory, extensions)?.fail_on_nonzero(args.strict);
    let outcome = runner.run();
    // The table covers partial progress, so it prints on failure too.
    println!("{}", runner.report());
    outcome?;
    Ok(())
}

/// Split an override like `.sh=zsh` or `.hql=hive -f` into its extension and
/// command tokens.
fn parse_override(entry: &str) -> Result<(String, Vec<String>)> {
    let Some((extension, command)) = entry.split_once('=') else {
        bail!("extension override '{entry}' is missing '='; expected .ext=command");
    };
    let tokens: Vec<String> = command.split_whitespace().map(str::to_owned).collect();
    if extension.is_empty() || tokens.is_empty() {
        bail!("extension override '{entry}' needs both an extension and a command");
    }
    Ok((extension.to_owned(), tokens))
}
