//! Bulk-import table writer.
//!
//! Node tables:
//!
//! ```text
//! username:ID,:LABEL
//! alice,User
//! ```
//!
//! Edge tables:
//!
//! ```text
//! :START_ID,:END_ID,:TYPE
//! bob,alice/widgets,MEMBER
//! ```
//!
//! Values containing the delimiter, quotes or newlines are quoted with
//! standard CSV escaping; nothing else is quoted. Rows end with `\n`, not
//! `\r\n`; bulk loaders accept either.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{GraphError, Result};
use crate::graph::{Edge, GraphData, NodeLabel, RelationType};

/// Header row of every edge table.
pub const EDGE_HEADER: [&str; 3] = [":START_ID", ":END_ID", ":TYPE"];

/// Write a node table: header `<id_header>:ID,:LABEL`, then one `<id>,<label>` row per id.
pub fn write_nodes<W: io::Write>(
    ids: &BTreeSet<String>,
    writer: W,
    id_header: &str,
    label: &str,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([format!("{}:ID", id_header).as_str(), ":LABEL"])?;
    for id in ids {
        wtr.write_record([id.as_str(), label])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write an edge table: header `:START_ID,:END_ID,:TYPE`, then one
/// `<start>,<end>,<relationship>` row per edge.
pub fn write_edges<W: io::Write>(
    edges: &BTreeSet<Edge>,
    writer: W,
    relationship: &str,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EDGE_HEADER)?;
    for edge in edges {
        wtr.write_record([edge.start.as_str(), edge.end.as_str(), relationship])?;
    }
    wtr.flush()?;
    Ok(())
}

/// File names of the four output tables, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub users: String,
    pub repos: String,
    pub memberships: String,
    pub ownerships: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            users: "users.csv".to_string(),
            repos: "repos.csv".to_string(),
            memberships: "memberships.csv".to_string(),
            ownerships: "ownerships.csv".to_string(),
        }
    }
}

/// Paths of the tables produced by [`write_graph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenTables {
    pub users: PathBuf,
    pub repos: PathBuf,
    pub memberships: PathBuf,
    pub ownerships: PathBuf,
}

/// A fully written table waiting to be moved into place.
struct Staged {
    file: NamedTempFile,
    target: PathBuf,
}

/// Write all four tables of `graph` into `out_dir`.
///
/// Tables are staged as temporary files in `out_dir` and only renamed to
/// their final names once all four have been written. A failed rename
/// removes the tables already renamed, so an error leaves no output tables
/// behind.
pub fn write_graph(graph: &GraphData, out_dir: &Path, layout: &OutputLayout) -> Result<WrittenTables> {
    fs::create_dir_all(out_dir).map_err(|e| GraphError::io(out_dir, e))?;

    let users = stage(out_dir, &layout.users, |f| {
        write_nodes(
            &graph.users,
            f,
            NodeLabel::User.id_header(),
            NodeLabel::User.as_str(),
        )
    })?;
    let repos = stage(out_dir, &layout.repos, |f| {
        write_nodes(
            &graph.repos,
            f,
            NodeLabel::Repo.id_header(),
            NodeLabel::Repo.as_str(),
        )
    })?;
    let memberships = stage(out_dir, &layout.memberships, |f| {
        write_edges(&graph.memberships, f, RelationType::Member.as_str())
    })?;
    let ownerships = stage(out_dir, &layout.ownerships, |f| {
        write_edges(&graph.ownerships, f, RelationType::Owner.as_str())
    })?;

    let tables = WrittenTables {
        users: users.target.clone(),
        repos: repos.target.clone(),
        memberships: memberships.target.clone(),
        ownerships: ownerships.target.clone(),
    };
    persist_all([users, repos, memberships, ownerships])?;

    tracing::info!(out_dir = %out_dir.display(), "Wrote bulk-import tables");
    Ok(tables)
}

fn stage<F>(out_dir: &Path, name: &str, write: F) -> Result<Staged>
where
    F: FnOnce(&mut File) -> csv::Result<()>,
{
    let target = out_dir.join(name);
    let mut file = tempfile::Builder::new()
        .prefix(".repograph-")
        .suffix(".tmp")
        .tempfile_in(out_dir)
        .map_err(|e| GraphError::io(out_dir, e))?;

    write(file.as_file_mut()).map_err(|source| GraphError::Write {
        path: target.clone(),
        source,
    })?;

    tracing::debug!(path = %target.display(), "Staged table");
    Ok(Staged { file, target })
}

/// Move every staged table into place. If any rename fails, tables already
/// moved by this call are removed again; unmoved staging files are dropped.
fn persist_all<const N: usize>(staged: [Staged; N]) -> Result<()> {
    let mut persisted: Vec<PathBuf> = Vec::with_capacity(N);
    for Staged { file, target } in staged {
        if let Err(e) = file.persist(&target) {
            for path in &persisted {
                if let Err(remove_err) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), "Failed to roll back table: {}", remove_err);
                }
            }
            return Err(GraphError::io(&target, e.error));
        }
        persisted.push(target);
    }
    Ok(())
}
