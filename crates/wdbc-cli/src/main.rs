mod display;
mod input;
mod shell;
mod submit;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wdbc_core::{Outcome, Session};

use crate::input::PasteSource;

#[derive(Parser)]
#[command(
    name = "wdbc",
    version,
    about = "Collect the 30 Breast Cancer Wisconsin features and ask a prediction backend to classify them."
)]
struct Cli {
    /// Prediction endpoint; relative paths are joined onto --base-url
    #[arg(long, env = "WDBC_ENDPOINT", default_value = "/predict", global = true)]
    endpoint: String,

    /// Base URL for relative endpoints
    #[arg(long, env = "WDBC_BASE_URL", default_value = "http://127.0.0.1:8000", global = true)]
    base_url: String,

    /// Value sent as meta.source with every request
    #[arg(long, env = "WDBC_SOURCE", default_value = "wdbc-cli", global = true)]
    source: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the feature schema in wire order
    Schema,

    /// Print a random plausible vector as a JSON array
    Random {
        /// Submit the generated vector as well
        #[arg(long)]
        predict: bool,
    },

    /// Load 30 values from a JSON array or CSV row and submit them
    Predict {
        #[command(flatten)]
        values: ValuesArg,

        /// Print the result as JSON instead of a card
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: edit fields, paste, submit
    Shell,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ValuesArg {
    /// Values inline, e.g. "[17.99, 10.38, ...]" or "17.99,10.38,..."
    #[arg(long)]
    values: Option<String>,

    /// Read values from a file (an optional header line is allowed)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Read values from stdin
    #[arg(long)]
    stdin: bool,
}

impl ValuesArg {
    fn into_source(self) -> PasteSource {
        match (self.values, self.file, self.stdin) {
            (Some(text), _, _) => PasteSource::Inline(text),
            (None, Some(path), _) => PasteSource::File(path),
            (None, None, _) => PasteSource::Stdin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("wdbc v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::new(cli.endpoint, Some(cli.source));

    match cli.command {
        Commands::Schema => {
            display::print_schema();
            Ok(())
        }
        Commands::Random { predict } => cmd_random(session, &cli.base_url, predict).await,
        Commands::Predict { values, json } => {
            cmd_predict(session, &cli.base_url, values.into_source(), json).await
        }
        Commands::Shell => shell::run(session, &cli.base_url).await,
    }
}

async fn cmd_random(mut session: Session, base_url: &str, predict: bool) -> anyhow::Result<()> {
    session.fill_random();
    let values = session
        .vector()
        .values()
        .context("random fill left unset features")?;
    println!("{}", serde_json::to_string(&values.to_vec())?);

    if predict {
        display::print_vector_card(session.vector())?;
        finish(&mut session, base_url, false).await?;
    }
    Ok(())
}

async fn cmd_predict(
    mut session: Session,
    base_url: &str,
    source: PasteSource,
    json: bool,
) -> anyhow::Result<()> {
    let text = source.read()?;
    session.paste(&text).context("parsing feature values")?;
    if !json {
        display::print_vector_card(session.vector())?;
    }
    finish(&mut session, base_url, json).await
}

/// Submit and render; a failed prediction becomes a non-zero exit.
async fn finish(session: &mut Session, base_url: &str, json: bool) -> anyhow::Result<()> {
    submit::submit(session, base_url).await?;

    match session.last().map(|s| &s.outcome) {
        Some(Outcome::Result(r)) if json => {
            println!("{}", serde_json::to_string_pretty(r)?);
            Ok(())
        }
        Some(Outcome::Error(msg)) => anyhow::bail!("{msg}"),
        _ => {
            display::print_outcome(session.last());
            Ok(())
        }
    }
}
