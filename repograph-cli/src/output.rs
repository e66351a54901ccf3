//! Run summary rendering.
//!
//! Supports a human-readable table (default) and JSON for scripting.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use repograph_core::{GraphCounts, WrittenTables};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify},
};

/// Output format for the run summary
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No source files were found; nothing was written.
    NoInput,
    /// All four tables were written.
    Completed,
}

/// Summary of a run, rendered after the tables are written.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub input_dir: PathBuf,
    pub files_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<GraphCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<WrittenTables>,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn no_input(input_dir: PathBuf, duration_ms: u64) -> Self {
        Self {
            status: RunStatus::NoInput,
            input_dir,
            files_found: 0,
            counts: None,
            tables: None,
            duration_ms,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `=> N files found in DIR`
pub fn found_line(files_found: usize, input_dir: &Path) -> String {
    format!(
        "{} {} files found in {}",
        "=>".cyan().bold(),
        files_found,
        input_dir.display()
    )
}

/// Unique node and edge counts as a two-column table.
pub fn counts_table(counts: &GraphCounts) -> String {
    let mut builder = Builder::default();
    for (label, count) in [
        ("Users", counts.users),
        ("Repos", counts.repos),
        ("Memberships", counts.memberships),
        ("Ownerships", counts.ownerships),
    ] {
        builder.push_record([label.to_string(), count.to_string()]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()));
    table.to_string()
}

/// Success banner followed by one line per written table.
pub fn written_lines(tables: &WrittenTables, duration_ms: u64) -> String {
    let mut output = format!(
        "{} Wrote bulk-import tables in {}ms\n",
        "SUCCESS:".green().bold(),
        duration_ms
    );
    for (kind, path) in [
        ("User nodes", &tables.users),
        ("Repo nodes", &tables.repos),
        ("MEMBER edges", &tables.memberships),
        ("OWNER edges", &tables.ownerships),
    ] {
        output.push_str(&format!(
            "  {:<13} {}\n",
            kind,
            path.display().to_string().cyan()
        ));
    }
    output
}
