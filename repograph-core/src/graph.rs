//! Graph data model: node identifiers, relationship facts and the
//! accumulator that unions them across input files.
//!
//! All containers are ordered sets. Uniqueness is by value, and iteration
//! order is stable so that identical input always produces identical output
//! tables. Consumers of the written tables must still treat row order as
//! unspecified.

use serde::Serialize;
use std::collections::BTreeSet;

/// A directed relationship between two node identifiers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    /// Identifier of the start node (always a user).
    pub start: String,
    /// Identifier of the end node (always a repo).
    pub end: String,
}

impl Edge {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Node type written to the `:LABEL` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLabel {
    User,
    Repo,
}

impl NodeLabel {
    /// Label value for the `:LABEL` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Repo => "Repo",
        }
    }

    /// Semantic key name used in the `<key>:ID` header.
    pub fn id_header(&self) -> &'static str {
        match self {
            Self::User => "username",
            Self::Repo => "repo_name",
        }
    }
}

/// Relationship type written to the `:TYPE` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    /// `user` column of a source row relates to its `repo_name`.
    Member,
    /// Owner component of `repo_name` owns the repo.
    Owner,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Owner => "OWNER",
        }
    }
}

/// Deduplicated users, repos, memberships and ownerships.
///
/// Used both as the result of extracting one file and as the accumulator
/// threaded through aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphData {
    pub users: BTreeSet<String>,
    pub repos: BTreeSet<String>,
    pub memberships: BTreeSet<Edge>,
    pub ownerships: BTreeSet<Edge>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: GraphData) {
        self.users.extend(other.users);
        self.repos.extend(other.repos);
        self.memberships.extend(other.memberships);
        self.ownerships.extend(other.ownerships);
    }

    /// Consuming variant of [`GraphData::merge`].
    pub fn union(mut self, other: GraphData) -> Self {
        self.merge(other);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.repos.is_empty()
            && self.memberships.is_empty()
            && self.ownerships.is_empty()
    }

    pub fn counts(&self) -> GraphCounts {
        GraphCounts {
            users: self.users.len(),
            repos: self.repos.len(),
            memberships: self.memberships.len(),
            ownerships: self.ownerships.len(),
        }
    }
}

/// Cardinalities of a [`GraphData`], for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphCounts {
    pub users: usize,
    pub repos: usize,
    pub memberships: usize,
    pub ownerships: usize,
}
