//! Union of per-file extraction results into one deduplicated graph.

use std::path::Path;

use crate::error::Result;
use crate::extract::extract;
use crate::graph::GraphData;

/// Extract every source and union the results.
///
/// Returns `Ok(None)` when `sources` is empty. The first failing source
/// aborts the whole aggregation.
pub fn aggregate<P: AsRef<Path>>(sources: &[P]) -> Result<Option<GraphData>> {
    aggregate_with(sources, |_| {})
}

/// Like [`aggregate`], calling `on_source` before each source is extracted.
pub fn aggregate_with<P, F>(sources: &[P], mut on_source: F) -> Result<Option<GraphData>>
where
    P: AsRef<Path>,
    F: FnMut(&Path),
{
    if sources.is_empty() {
        return Ok(None);
    }

    let mut acc = GraphData::new();
    for source in sources {
        let path = source.as_ref();
        on_source(path);
        acc = accumulate(acc, path)?;
    }

    let counts = acc.counts();
    tracing::info!(
        sources = sources.len(),
        users = counts.users,
        repos = counts.repos,
        memberships = counts.memberships,
        ownerships = counts.ownerships,
        "Aggregated graph data"
    );

    Ok(Some(acc))
}

/// Fold a single source into `acc`.
pub fn accumulate(acc: GraphData, source: &Path) -> Result<GraphData> {
    Ok(acc.union(extract(source)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::Edge;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_empty_sources() {
        let sources: Vec<PathBuf> = Vec::new();
        assert!(aggregate(&sources).unwrap().is_none());
    }

    #[test]
    fn test_union_matches_individual_extractions() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(dir.path(), "a.csv", "user,repo_name\nbob,alice/widgets\n");
        let b = write_csv(
            dir.path(),
            "b.csv",
            "user,repo_name\ncarol,dave/tools\nbob,alice/widgets\n",
        );

        let expected = extract(&a).unwrap().union(extract(&b).unwrap());
        let got = aggregate(&[&a, &b]).unwrap().unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_cross_file_duplicates_collapse() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(dir.path(), "a.csv", "user,repo_name\nbob,alice/widgets\n");
        let b = write_csv(dir.path(), "b.csv", "user,repo_name\nbob,alice/widgets\n");

        let data = aggregate(&[a, b]).unwrap().unwrap();
        assert_eq!(data.memberships.len(), 1);
        assert_eq!(data.ownerships.len(), 1);
        assert_eq!(data.users.len(), 2);
        assert_eq!(data.repos.len(), 1);
        assert!(data.memberships.contains(&Edge::new("bob", "alice/widgets")));
    }

    #[test]
    fn test_order_does_not_matter() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(dir.path(), "a.csv", "user,repo_name\nbob,alice/widgets\n");
        let b = write_csv(dir.path(), "b.csv", "user,repo_name\neve,eve/notes\n");

        let forward = aggregate(&[&a, &b]).unwrap();
        let backward = aggregate(&[&b, &a]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_bad_file_aborts_run() {
        let dir = TempDir::new().unwrap();
        let good = write_csv(dir.path(), "good.csv", "user,repo_name\nbob,alice/widgets\n");
        let bad = write_csv(dir.path(), "bad.csv", "user,repo_name\nbob,/widgets\n");

        let err = aggregate(&[good, bad]).unwrap_err();
        assert!(matches!(err, GraphError::SchemaViolation { .. }));
        assert!(err.to_string().contains("bad.csv"));
    }

    #[test]
    fn test_callback_sees_every_source() {
        let dir = TempDir::new().unwrap();
        let a = write_csv(dir.path(), "a.csv", "user,repo_name\nbob,alice/widgets\n");
        let b = write_csv(dir.path(), "b.csv", "user,repo_name\neve,eve/notes\n");

        let mut seen = Vec::new();
        aggregate_with(&[&a, &b], |p| seen.push(p.to_path_buf())).unwrap();
        assert_eq!(seen, vec![a, b]);
    }
}
