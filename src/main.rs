use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{IsTerminal, Read};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use youtube_subtitler::{Cli, Config, HttpTimedTextApi, Subtitler};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "youtube_subtitler=debug,subtitler=debug"
    } else {
        "youtube_subtitler=warn,subtitler=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", style("ERROR").red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.show_config {
        config.display();
        return Ok(());
    }

    let mut inputs = cli.inputs(None)?;
    if inputs.links.is_empty() {
        inputs = cli.inputs(read_piped_stdin()?.as_deref())?;
    }
    if inputs.links.is_empty() {
        anyhow::bail!("No links given (see --help)");
    }

    let output_dir = match inputs.output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Could not determine current directory")?,
    };
    let language = cli.lang.unwrap_or(config.defaults.language);
    let collect = cli.collect || config.defaults.collect;

    let api = HttpTimedTextApi::new(config.api).context("Failed to build HTTP client")?;
    let subtitler = Subtitler::create(api, &output_dir, language, cli.quiet)?;
    tracing::info!(
        "Fetching {} link(s) into {}",
        inputs.links.len(),
        subtitler.run_dir().display()
    );

    subtitler.process(&inputs.links, collect).await?;

    Ok(())
}

/// Links can be piped in, e.g. an `errors.log` from an earlier run. Only read
/// when no link was given as an argument, so an open pipe can't stall a run.
fn read_piped_stdin() -> Result<Option<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut content = String::new();
    stdin
        .read_to_string(&mut content)
        .context("Failed to read links from stdin")?;
    Ok(Some(content))
}
