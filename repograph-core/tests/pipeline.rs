//! End-to-end tests of the library pipeline: discover, aggregate, write.

use repograph_core::{
    aggregate, discover_sources, write_graph, Edge, GraphError, OutputLayout,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Read a written table as (header, set of data rows).
fn read_table(path: &Path) -> (String, BTreeSet<String>) {
    let content = fs::read_to_string(path).expect("table should exist");
    let mut lines = content.lines();
    let header = lines.next().expect("table should have a header").to_string();
    (header, lines.map(str::to_string).collect())
}

fn rows(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn run_pipeline(input: &Path, output: &Path) -> repograph_core::Result<bool> {
    let sources = discover_sources(input, "csv")?;
    match aggregate(&sources)? {
        Some(graph) => {
            write_graph(&graph, output, &OutputLayout::default())?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[test]
fn test_end_to_end_example() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        input.path().join("data.csv"),
        "user,repo_name\nbob,alice/widgets\nalice,alice/gadgets\n",
    )
    .unwrap();

    assert!(run_pipeline(input.path(), output.path()).unwrap());

    let (header, users) = read_table(&output.path().join("users.csv"));
    assert_eq!(header, "username:ID,:LABEL");
    assert_eq!(users, rows(&["bob,User", "alice,User"]));

    let (header, repos) = read_table(&output.path().join("repos.csv"));
    assert_eq!(header, "repo_name:ID,:LABEL");
    assert_eq!(repos, rows(&["alice/widgets,Repo", "alice/gadgets,Repo"]));

    let (header, memberships) = read_table(&output.path().join("memberships.csv"));
    assert_eq!(header, ":START_ID,:END_ID,:TYPE");
    assert_eq!(
        memberships,
        rows(&["bob,alice/widgets,MEMBER", "alice,alice/gadgets,MEMBER"])
    );

    let (header, ownerships) = read_table(&output.path().join("ownerships.csv"));
    assert_eq!(header, ":START_ID,:END_ID,:TYPE");
    assert_eq!(
        ownerships,
        rows(&["alice,alice/widgets,OWNER", "alice,alice/gadgets,OWNER"])
    );
}

#[test]
fn test_owner_only_user_gets_node() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("data.csv"), "user,repo_name\nbob,alice/widgets\n").unwrap();

    let sources = discover_sources(input.path(), "csv").unwrap();
    let graph = aggregate(&sources).unwrap().unwrap();
    assert!(graph.users.contains("alice"));
    assert!(graph
        .ownerships
        .contains(&Edge::new("alice", "alice/widgets")));
}

#[test]
fn test_rerun_is_byte_identical() {
    let input = TempDir::new().unwrap();
    fs::write(
        input.path().join("a.csv"),
        "user,repo_name\nbob,alice/widgets\ncarol,dave/tools\n",
    )
    .unwrap();
    fs::write(input.path().join("b.csv"), "user,repo_name\neve,alice/widgets\n").unwrap();

    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    run_pipeline(input.path(), first.path()).unwrap();
    run_pipeline(input.path(), second.path()).unwrap();

    for name in ["users.csv", "repos.csv", "memberships.csv", "ownerships.csv"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

#[test]
fn test_duplicates_across_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.csv"), "user,repo_name\nbob,alice/widgets\n").unwrap();
    fs::write(input.path().join("b.csv"), "repo_name,user\nalice/widgets,bob\n").unwrap();

    run_pipeline(input.path(), output.path()).unwrap();

    let (_, memberships) = read_table(&output.path().join("memberships.csv"));
    assert_eq!(memberships.len(), 1);
    let (_, users) = read_table(&output.path().join("users.csv"));
    assert_eq!(users.len(), 2);
    let (_, repos) = read_table(&output.path().join("repos.csv"));
    assert_eq!(repos.len(), 1);
}

#[test]
fn test_validation_failure_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.csv"), "user,repo_name\nbob,alice/widgets\n").unwrap();
    fs::write(input.path().join("b.csv"), "user,repo_name\nbob,/widgets\n").unwrap();

    let err = run_pipeline(input.path(), output.path()).unwrap_err();
    assert!(matches!(err, GraphError::SchemaViolation { .. }));
    assert!(err.to_string().contains("b.csv"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_empty_input_dir() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("readme.txt"), "not a source").unwrap();

    assert!(!run_pipeline(input.path(), output.path()).unwrap());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}
