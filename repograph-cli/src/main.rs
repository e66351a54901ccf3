//! repograph - turn user/repo CSV exports into graph bulk-import tables.
//!
//! Reads every CSV in the input directory and writes `users.csv`,
//! `repos.csv`, `memberships.csv` and `ownerships.csv` to the output
//! directory, ready for a graph database bulk loader.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;
mod pipeline;

use config::{RepographConfig, CONFIG_FILE_NAME};
use output::OutputFormat;
use pipeline::RunOptions;

/// Creates graph nodes and relationships from CSV files.
///
/// Each input file needs `user` and `repo_name` columns, where `repo_name`
/// is `owner/name`. Users become `User` nodes, repos become `Repo` nodes,
/// each row becomes a MEMBER edge and each repo gets an OWNER edge from its
/// owner.
#[derive(Parser)]
#[command(name = "repograph")]
#[command(author, version)]
#[command(about = "Creates graph nodes and relationships from CSV files")]
#[command(after_help = "Examples:
  repograph --input data/ --output import/
  repograph --input data/ --format json")]
pub struct Cli {
    /// Directory containing the input CSV files
    #[arg(short, long, env = "REPOGRAPH_INPUT", default_value = "./")]
    input: PathBuf,

    /// Directory to write the bulk-import tables to
    #[arg(short, long, env = "REPOGRAPH_OUTPUT", default_value = "./")]
    output: PathBuf,

    /// Summary format (overrides config default)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file (defaults to .repographrc.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on config file errors instead of falling back to defaults
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    }
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = RepographConfig::load(&config_path, cli.strict)?;

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let opts = RunOptions {
        input: cli.input,
        output: cli.output,
        extension: config.extension().to_string(),
        layout: config.layout(),
        interactive: format == OutputFormat::Table && !cli.quiet,
    };

    let report = pipeline::run(&opts)?;

    if format == OutputFormat::Json {
        println!("{}", report.to_json()?);
    }

    Ok(())
}
