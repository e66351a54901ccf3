//! The single repograph run: discover sources, aggregate, write tables.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use repograph_core::{aggregate_with, discover_sources, write_graph, OutputLayout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::output::{counts_table, found_line, written_lines, RunReport, RunStatus};

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub extension: String,
    pub layout: OutputLayout,
    /// Print progress and table summaries to the terminal.
    pub interactive: bool,
}

/// Execute a run.
///
/// In interactive mode the file count, counts table and written paths are
/// printed as the run progresses; otherwise nothing is printed and the
/// caller renders the returned report.
pub fn run(opts: &RunOptions) -> Result<RunReport> {
    let start = Instant::now();

    let sources = discover_sources(&opts.input, &opts.extension)
        .context("Failed to discover input files")?;

    if opts.interactive {
        println!("{}", found_line(sources.len(), &opts.input));
    }

    let progress = if opts.interactive {
        ProgressBar::new(sources.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let aggregated = aggregate_with(&sources, |path| {
        progress.inc(1);
        progress.set_message(display_name(path));
    });
    progress.finish_and_clear();

    let graph = match aggregated.context("No tables were written")? {
        Some(graph) => graph,
        None => {
            tracing::info!(input = %opts.input.display(), "No input files, nothing to do");
            return Ok(RunReport::no_input(
                opts.input.clone(),
                start.elapsed().as_millis() as u64,
            ))
        }
    };

    let counts = graph.counts();
    if opts.interactive {
        println!("{}", counts_table(&counts));
    }

    let tables = write_graph(&graph, &opts.output, &opts.layout)
        .context("Failed to write bulk-import tables")?;

    let duration_ms = start.elapsed().as_millis() as u64;
    if opts.interactive {
        print!("{}", written_lines(&tables, duration_ms));
    }

    Ok(RunReport {
        status: RunStatus::Completed,
        input_dir: opts.input.clone(),
        files_found: sources.len(),
        counts: Some(counts),
        tables: Some(tables),
        duration_ms,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
