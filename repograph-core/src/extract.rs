//! Extraction of graph facts from a single user/repo CSV file.
//!
//! A source file must have a header row with at least the `user` and
//! `repo_name` columns; any other columns are ignored. Extraction is
//! all-or-nothing: the first malformed row aborts with an error naming the
//! file, and nothing from that file is returned.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use crate::error::{GraphError, Result};
use crate::graph::{Edge, GraphData};
use crate::owner::parse_owner;

/// Column naming the member user.
pub const USER_COLUMN: &str = "user";

/// Column holding the `owner/name` repository identifier.
pub const REPO_COLUMN: &str = "repo_name";

const REQUIRED_COLUMNS: [&str; 2] = [USER_COLUMN, REPO_COLUMN];

/// Projection of a source row onto the two columns we use.
#[derive(Debug, Deserialize)]
struct SourceRow {
    user: String,
    repo_name: String,
}

/// Extract users, repos, memberships and ownerships from the CSV file at `path`.
///
/// # Errors
///
/// - [`GraphError::InputRead`] if the file cannot be opened or parsed
/// - [`GraphError::MissingColumn`] if `user` or `repo_name` is absent
/// - [`GraphError::EmptyValue`] if a `user` cell is empty
/// - [`GraphError::SchemaViolation`] if any `repo_name` has no derivable owner
pub fn extract(path: &Path) -> Result<GraphData> {
    let reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|source| GraphError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
    extract_csv(reader, path)
}

/// Like [`extract`], but reads CSV from any reader. `path` is only used to
/// label errors.
pub fn extract_from_reader<R: io::Read>(reader: R, path: &Path) -> Result<GraphData> {
    extract_csv(csv::ReaderBuilder::new().from_reader(reader), path)
}

fn extract_csv<R: io::Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<GraphData> {
    let read_err = |source: csv::Error| GraphError::InputRead {
        path: path.to_path_buf(),
        source,
    };

    let headers = reader.headers().map_err(read_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(GraphError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    // Exact duplicate rows collapse here, before validation.
    let mut rows: BTreeSet<(String, String)> = BTreeSet::new();
    let mut total = 0usize;
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        let row: SourceRow = record.deserialize(Some(&headers)).map_err(read_err)?;
        if row.user.is_empty() {
            return Err(GraphError::EmptyValue {
                path: path.to_path_buf(),
                column: USER_COLUMN,
                line: record.position().map_or(0, |p| p.line()),
            });
        }
        total += 1;
        rows.insert((row.user, row.repo_name));
    }

    // Every row is validated before any fact is derived.
    let owners = rows
        .iter()
        .map(|(_, repo)| parse_owner(repo))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|reason| GraphError::SchemaViolation {
            path: path.to_path_buf(),
            reason,
        })?;

    let mut data = GraphData::new();
    for ((user, repo), owner) in rows.iter().zip(owners) {
        data.users.insert(user.clone());
        data.users.insert(owner.to_string());
        data.repos.insert(repo.clone());
        data.memberships.insert(Edge::new(user.as_str(), repo.as_str()));
        data.ownerships.insert(Edge::new(owner, repo.as_str()));
    }

    tracing::debug!(
        path = %path.display(),
        rows = total,
        unique_rows = rows.len(),
        users = data.users.len(),
        repos = data.repos.len(),
        "Extracted graph facts"
    );

    Ok(data)
}
