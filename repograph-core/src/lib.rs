//! repograph core - builds graph bulk-import tables from user/repo CSV exports.
//!
//! Each input CSV associates a `user` with a `repo_name` of the form
//! `owner/name`. The pipeline turns a directory of such files into four
//! deduplicated tables for a graph database bulk loader:
//!
//! | Table       | Header                    | Row                          |
//! |-------------|---------------------------|------------------------------|
//! | users       | `username:ID,:LABEL`      | `<user>,User`                |
//! | repos       | `repo_name:ID,:LABEL`     | `<repo_name>,Repo`           |
//! | memberships | `:START_ID,:END_ID,:TYPE` | `<user>,<repo_name>,MEMBER`  |
//! | ownerships  | `:START_ID,:END_ID,:TYPE` | `<owner>,<repo_name>,OWNER`  |
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use repograph_core::{aggregate, discover_sources, write_graph, OutputLayout};
//!
//! # fn main() -> repograph_core::Result<()> {
//! let sources = discover_sources(Path::new("data"), "csv")?;
//! if let Some(graph) = aggregate(&sources)? {
//!     write_graph(&graph, Path::new("import"), &OutputLayout::default())?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod graph;
pub mod owner;
pub mod scanner;
pub mod writer;

pub use aggregate::{accumulate, aggregate, aggregate_with};
pub use error::{GraphError, Result};
pub use extract::{extract, extract_from_reader};
pub use graph::{Edge, GraphCounts, GraphData, NodeLabel, RelationType};
pub use owner::{parse_owner, OwnerError};
pub use scanner::{discover_sources, DEFAULT_EXTENSION};
pub use writer::{write_edges, write_graph, write_nodes, OutputLayout, WrittenTables};
